use std::fmt;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("invalid object identifier")]
    InvalidObjectIdentifier,

    #[error("{0}")]
    Validation(Violations),

    #[error("failed to convert {token} to integer: {source}")]
    Decode {
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid value in column {column}: {reason}")]
    Row { column: String, reason: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Execution error: {0}")]
    Execution(String),
}

impl MonitorError {
    /// Violations carried by a validation failure; empty for every other kind.
    pub fn violations(&self) -> &[Violation] {
        match self {
            MonitorError::Validation(v) => &v.0,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{group}: fields [{}] are incompatible and cannot be set at the same time", .fields.join(", "))]
    MutuallyExclusive {
        group: &'static str,
        fields: Vec<&'static str>,
    },

    #[error("{group}: at least one of the fields [{}] must be set", .fields.join(", "))]
    AtLeastOneOf {
        group: &'static str,
        fields: Vec<&'static str>,
    },

    #[error("{group}: field {field} must not be empty")]
    Empty {
        group: &'static str,
        field: &'static str,
    },
}

/// Every violation found for one options value, in rule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violations(pub Vec<Violation>);

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}
