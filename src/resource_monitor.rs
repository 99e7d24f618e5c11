//! Options, validation rules and SQL rendering for resource monitor DDL.

use crate::error::MonitorError;
use crate::format::{single_quoted, SqlWriter};
use crate::ident::{AccountObjectIdentifier, ObjectIdentifier};
use crate::model::{Frequency, NotifyUsers, TriggerDefinition};
use crate::validate::{field, validate, Rule, Validate};
use serde::{Deserialize, Serialize};

/// Renders an options value that has already passed validation.
pub trait ToSql {
    fn to_sql(&self) -> String;
}

/// Validates `opts` and, only if that succeeds, renders it.
pub fn build_sql<T: Validate + ToSql>(opts: &T) -> Result<String, MonitorError> {
    validate(opts)?;
    Ok(opts.to_sql())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceMonitorWith {
    pub credit_quota: Option<i64>,
    pub frequency: Option<Frequency>,
    pub start_timestamp: Option<String>,
    pub end_timestamp: Option<String>,
    pub notify_users: Option<NotifyUsers>,
    pub triggers: Vec<TriggerDefinition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceMonitorSet {
    pub credit_quota: Option<i64>,
    pub frequency: Option<Frequency>,
    pub start_timestamp: Option<String>,
    pub end_timestamp: Option<String>,
    pub notify_users: Option<NotifyUsers>,
}

/// Parameters reset to their defaults by `ALTER ... SET <FIELD> = null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMonitorUnset {
    pub credit_quota: bool,
    pub end_timestamp: bool,
    pub notify_users: bool,
}

/// The parameter vocabulary shared by `WITH` and `SET`.
struct Params<'a> {
    credit_quota: Option<i64>,
    frequency: Option<Frequency>,
    start_timestamp: Option<&'a str>,
    end_timestamp: Option<&'a str>,
    notify_users: Option<&'a NotifyUsers>,
}

type ParamRenderer = fn(&Params<'_>) -> Option<String>;

fn credit_quota_param(p: &Params<'_>) -> Option<String> {
    p.credit_quota.map(|q| format!("CREDIT_QUOTA = {q}"))
}

fn frequency_param(p: &Params<'_>) -> Option<String> {
    p.frequency.map(|f| format!("FREQUENCY = {f}"))
}

fn start_timestamp_param(p: &Params<'_>) -> Option<String> {
    p.start_timestamp
        .map(|s| format!("START_TIMESTAMP = {}", single_quoted(s)))
}

fn end_timestamp_param(p: &Params<'_>) -> Option<String> {
    p.end_timestamp
        .map(|s| format!("END_TIMESTAMP = {}", single_quoted(s)))
}

fn notify_users_param(p: &Params<'_>) -> Option<String> {
    p.notify_users.map(|u| format!("NOTIFY_USERS = {u}"))
}

/// Emission order of parameters; triggers always come after these.
const PARAM_ORDER: [ParamRenderer; 5] = [
    credit_quota_param,
    frequency_param,
    start_timestamp_param,
    end_timestamp_param,
    notify_users_param,
];

fn write_params(w: &mut SqlWriter, params: &Params<'_>) {
    for render in PARAM_ORDER {
        if let Some(fragment) = render(params) {
            w.raw(fragment);
        }
    }
}

fn write_triggers(w: &mut SqlWriter, triggers: &[TriggerDefinition]) {
    if triggers.is_empty() {
        return;
    }
    w.keyword("TRIGGERS");
    for t in triggers {
        w.raw(t.to_string());
    }
}

fn notify_users_not_empty(users: Option<&NotifyUsers>) -> Option<bool> {
    users.map(|u| !u.is_empty())
}

impl ResourceMonitorWith {
    fn params(&self) -> Params<'_> {
        Params {
            credit_quota: self.credit_quota,
            frequency: self.frequency,
            start_timestamp: self.start_timestamp.as_deref(),
            end_timestamp: self.end_timestamp.as_deref(),
            notify_users: self.notify_users.as_ref(),
        }
    }
}

impl Validate for ResourceMonitorWith {
    fn group(&self) -> &'static str {
        "ResourceMonitorWith"
    }

    fn rules(&self) -> Vec<Rule<'_>> {
        vec![Rule::NotEmpty(
            "NotifyUsers",
            notify_users_not_empty(self.notify_users.as_ref()),
        )]
    }
}

impl ResourceMonitorSet {
    fn params(&self) -> Params<'_> {
        Params {
            credit_quota: self.credit_quota,
            frequency: self.frequency,
            start_timestamp: self.start_timestamp.as_deref(),
            end_timestamp: self.end_timestamp.as_deref(),
            notify_users: self.notify_users.as_ref(),
        }
    }
}

impl Validate for ResourceMonitorSet {
    fn group(&self) -> &'static str {
        "ResourceMonitorSet"
    }

    fn rules(&self) -> Vec<Rule<'_>> {
        vec![
            Rule::AtLeastOneOf(vec![
                field("CreditQuota", self.credit_quota.is_some()),
                field("Frequency", self.frequency.is_some()),
                field("StartTimestamp", self.start_timestamp.is_some()),
                field("EndTimestamp", self.end_timestamp.is_some()),
                field("NotifyUsers", self.notify_users.is_some()),
            ]),
            Rule::NotEmpty(
                "NotifyUsers",
                notify_users_not_empty(self.notify_users.as_ref()),
            ),
        ]
    }
}

impl ResourceMonitorUnset {
    fn write(&self, w: &mut SqlWriter) {
        if self.credit_quota {
            w.raw("CREDIT_QUOTA = null".into());
        }
        if self.end_timestamp {
            w.raw("END_TIMESTAMP = null".into());
        }
        if self.notify_users {
            w.raw("NOTIFY_USERS = ()".into());
        }
    }
}

impl Validate for ResourceMonitorUnset {
    fn group(&self) -> &'static str {
        "ResourceMonitorUnset"
    }

    fn rules(&self) -> Vec<Rule<'_>> {
        vec![Rule::AtLeastOneOf(vec![
            field("CreditQuota", self.credit_quota),
            field("EndTimestamp", self.end_timestamp),
            field("NotifyUsers", self.notify_users),
        ])]
    }
}

/// `CREATE [OR REPLACE] RESOURCE MONITOR [IF NOT EXISTS] <name> [WITH ...]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateResourceMonitorOptions {
    pub name: AccountObjectIdentifier,
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub with: Option<ResourceMonitorWith>,
}

impl CreateResourceMonitorOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }
}

impl Validate for CreateResourceMonitorOptions {
    fn group(&self) -> &'static str {
        "CreateResourceMonitorOptions"
    }

    fn rules(&self) -> Vec<Rule<'_>> {
        vec![
            Rule::ValidIdentifier(self.name.is_valid()),
            Rule::MutuallyExclusive(vec![
                field("OrReplace", self.or_replace),
                field("IfNotExists", self.if_not_exists),
            ]),
            Rule::Nested(self.with.as_ref().map(|w| w as &dyn Validate)),
        ]
    }
}

impl ToSql for CreateResourceMonitorOptions {
    fn to_sql(&self) -> String {
        let mut w = SqlWriter::new();
        w.keyword("CREATE")
            .keyword_if(self.or_replace, "OR REPLACE")
            .keyword("RESOURCE MONITOR")
            .keyword_if(self.if_not_exists, "IF NOT EXISTS")
            .ident(&self.name);

        if let Some(with) = &self.with {
            let mut clause = SqlWriter::new();
            write_params(&mut clause, &with.params());
            write_triggers(&mut clause, &with.triggers);
            if !clause.is_empty() {
                w.keyword("WITH").raw(clause.finish());
            }
        }
        w.finish()
    }
}

/// `ALTER RESOURCE MONITOR [IF EXISTS] <name> [SET ...] [TRIGGERS ...]`
///
/// Unset parameters share the `SET` keyword and follow the assigned ones.
/// A non-empty `triggers` list replaces every trigger on the monitor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlterResourceMonitorOptions {
    pub name: AccountObjectIdentifier,
    pub if_exists: bool,
    pub set: Option<ResourceMonitorSet>,
    pub unset: Option<ResourceMonitorUnset>,
    pub triggers: Vec<TriggerDefinition>,
}

impl AlterResourceMonitorOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }
}

impl Validate for AlterResourceMonitorOptions {
    fn group(&self) -> &'static str {
        "AlterResourceMonitorOptions"
    }

    fn rules(&self) -> Vec<Rule<'_>> {
        let set = self.set.as_ref();
        let unset = self.unset.as_ref();
        let both = |assigned: bool, cleared: bool, names: [&'static str; 2]| {
            Rule::MutuallyExclusive(vec![field(names[0], assigned), field(names[1], cleared)])
        };

        vec![
            Rule::ValidIdentifier(self.name.is_valid()),
            Rule::AtLeastOneOf(vec![
                field("Set", set.is_some()),
                field("Unset", unset.is_some()),
                field("Triggers", !self.triggers.is_empty()),
            ]),
            both(
                set.is_some_and(|s| s.credit_quota.is_some()),
                unset.is_some_and(|u| u.credit_quota),
                ["Set.CreditQuota", "Unset.CreditQuota"],
            ),
            both(
                set.is_some_and(|s| s.end_timestamp.is_some()),
                unset.is_some_and(|u| u.end_timestamp),
                ["Set.EndTimestamp", "Unset.EndTimestamp"],
            ),
            both(
                set.is_some_and(|s| s.notify_users.is_some()),
                unset.is_some_and(|u| u.notify_users),
                ["Set.NotifyUsers", "Unset.NotifyUsers"],
            ),
            Rule::Nested(set.map(|s| s as &dyn Validate)),
            Rule::Nested(unset.map(|u| u as &dyn Validate)),
        ]
    }
}

impl ToSql for AlterResourceMonitorOptions {
    fn to_sql(&self) -> String {
        let mut w = SqlWriter::new();
        w.keyword("ALTER")
            .keyword("RESOURCE MONITOR")
            .keyword_if(self.if_exists, "IF EXISTS")
            .ident(&self.name);

        if self.set.is_some() || self.unset.is_some() {
            w.keyword("SET");
            if let Some(set) = &self.set {
                write_params(&mut w, &set.params());
            }
            if let Some(unset) = &self.unset {
                unset.write(&mut w);
            }
        }
        write_triggers(&mut w, &self.triggers);
        w.finish()
    }
}

/// `DROP RESOURCE MONITOR [IF EXISTS] <name>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropResourceMonitorOptions {
    pub name: AccountObjectIdentifier,
    pub if_exists: bool,
}

impl DropResourceMonitorOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            name,
            if_exists: false,
        }
    }
}

impl Validate for DropResourceMonitorOptions {
    fn group(&self) -> &'static str {
        "DropResourceMonitorOptions"
    }

    fn rules(&self) -> Vec<Rule<'_>> {
        vec![Rule::ValidIdentifier(self.name.is_valid())]
    }
}

impl ToSql for DropResourceMonitorOptions {
    fn to_sql(&self) -> String {
        let mut w = SqlWriter::new();
        w.keyword("DROP")
            .keyword("RESOURCE MONITOR")
            .keyword_if(self.if_exists, "IF EXISTS")
            .ident(&self.name);
        w.finish()
    }
}

/// Case-insensitive name filter; `%` and `_` are wildcards on the warehouse side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub pattern: String,
}

impl Like {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

/// `SHOW RESOURCE MONITORS [LIKE '<pattern>']`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowResourceMonitorOptions {
    pub like: Option<Like>,
}

impl Validate for ShowResourceMonitorOptions {
    fn group(&self) -> &'static str {
        "ShowResourceMonitorOptions"
    }

    fn rules(&self) -> Vec<Rule<'_>> {
        vec![Rule::NotEmpty(
            "Like",
            self.like.as_ref().map(|l| !l.pattern.is_empty()),
        )]
    }
}

impl ToSql for ShowResourceMonitorOptions {
    fn to_sql(&self) -> String {
        let mut w = SqlWriter::new();
        w.keyword("SHOW").keyword("RESOURCE MONITORS");
        if let Some(like) = &self.like {
            w.keyword("LIKE").raw(single_quoted(&like.pattern));
        }
        w.finish()
    }
}
