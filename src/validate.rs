//! Declarative validation of options values.
//!
//! Every options type describes its constraints as a table of [`Rule`]s.
//! [`validate`] walks that table, so a new operation only adds rows.

use crate::error::{MonitorError, Violation, Violations};

/// A named field and whether the caller populated it.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub set: bool,
}

pub fn field(name: &'static str, set: bool) -> Field {
    Field { name, set }
}

pub enum Rule<'a> {
    /// The object identifier is usable. Failure stops validation.
    ValidIdentifier(bool),
    /// At most one of the fields may be set.
    MutuallyExclusive(Vec<Field>),
    /// At least one of the fields must be set.
    AtLeastOneOf(Vec<Field>),
    /// `Some(false)` is a present but empty value; `None` is an absent one.
    NotEmpty(&'static str, Option<bool>),
    /// Rules of a sub-group, evaluated only when the group is present.
    Nested(Option<&'a dyn Validate>),
}

pub trait Validate {
    /// Group name reported in violations.
    fn group(&self) -> &'static str;

    fn rules(&self) -> Vec<Rule<'_>>;
}

pub fn validate(opts: &dyn Validate) -> Result<(), MonitorError> {
    let mut violations = Vec::new();
    collect(opts, &mut violations)?;
    if violations.is_empty() {
        Ok(())
    } else {
        Err(MonitorError::Validation(Violations(violations)))
    }
}

fn collect(opts: &dyn Validate, out: &mut Vec<Violation>) -> Result<(), MonitorError> {
    let group = opts.group();
    let rules = opts.rules();

    // Nothing can be said about an unnamed object.
    for rule in &rules {
        if let Rule::ValidIdentifier(false) = rule {
            return Err(MonitorError::InvalidObjectIdentifier);
        }
    }

    for rule in rules {
        match rule {
            Rule::ValidIdentifier(_) => {}
            Rule::MutuallyExclusive(fields) => {
                if fields.iter().filter(|f| f.set).count() > 1 {
                    out.push(Violation::MutuallyExclusive {
                        group,
                        fields: fields.iter().map(|f| f.name).collect(),
                    });
                }
            }
            Rule::AtLeastOneOf(fields) => {
                if !fields.iter().any(|f| f.set) {
                    out.push(Violation::AtLeastOneOf {
                        group,
                        fields: fields.iter().map(|f| f.name).collect(),
                    });
                }
            }
            Rule::NotEmpty(name, Some(false)) => {
                out.push(Violation::Empty { group, field: name });
            }
            Rule::NotEmpty(..) => {}
            Rule::Nested(Some(inner)) => collect(inner, out)?,
            Rule::Nested(None) => {}
        }
    }
    Ok(())
}
