use crate::error::MonitorError;
use crate::format::parenthesized;
use crate::ident::{AccountObjectIdentifier, ObjectIdentifier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A result row handed back by the executor: column name to nullable text.
pub type Row = BTreeMap<String, Option<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl Frequency {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Yearly => "YEARLY",
            Frequency::Never => "NEVER",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for Frequency {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DAILY" => Ok(Frequency::Daily),
            "WEEKLY" => Ok(Frequency::Weekly),
            "MONTHLY" => Ok(Frequency::Monthly),
            "YEARLY" => Ok(Frequency::Yearly),
            "NEVER" => Ok(Frequency::Never),
            other => Err(MonitorError::Parse(format!("unknown frequency: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerAction {
    Suspend,
    SuspendImmediate,
    Notify,
}

impl TriggerAction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            TriggerAction::Suspend => "SUSPEND",
            TriggerAction::SuspendImmediate => "SUSPEND_IMMEDIATE",
            TriggerAction::Notify => "NOTIFY",
        }
    }
}

impl fmt::Display for TriggerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for TriggerAction {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUSPEND" => Ok(TriggerAction::Suspend),
            "SUSPEND_IMMEDIATE" => Ok(TriggerAction::SuspendImmediate),
            "NOTIFY" => Ok(TriggerAction::Notify),
            other => Err(MonitorError::Parse(format!("unknown trigger action: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceMonitorLevel {
    Account,
    Warehouse,
}

impl FromStr for ResourceMonitorLevel {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACCOUNT" => Ok(ResourceMonitorLevel::Account),
            "WAREHOUSE" => Ok(ResourceMonitorLevel::Warehouse),
            other => Err(MonitorError::Parse(format!("unknown level: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerDefinition {
    /// Percentage of the credit quota; the warehouse enforces the range.
    pub threshold: i32,
    pub action: TriggerAction,
}

impl TriggerDefinition {
    pub fn new(threshold: i32, action: TriggerAction) -> Self {
        Self { threshold, action }
    }
}

impl fmt::Display for TriggerDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ON {} PERCENT DO {}", self.threshold, self.action)
    }
}

/// Parses the `PCT:ACTION` shorthand, e.g. `90:suspend_immediate`.
impl FromStr for TriggerDefinition {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (threshold, action) = s
            .split_once(':')
            .ok_or_else(|| MonitorError::Parse(format!("expected PCT:ACTION, got {s}")))?;
        let threshold = threshold
            .trim()
            .parse::<i32>()
            .map_err(|source| MonitorError::Decode {
                token: threshold.to_string(),
                source,
            })?;
        Ok(Self {
            threshold,
            action: action.parse()?,
        })
    }
}

/// Users notified by a monitor, in input order. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyUsers {
    pub users: Vec<AccountObjectIdentifier>,
}

impl NotifyUsers {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            users: names
                .into_iter()
                .map(AccountObjectIdentifier::new)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl fmt::Display for NotifyUsers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&parenthesized(
            self.users.iter().map(|u| u.fully_qualified_name()),
        ))
    }
}

/// A resource monitor as reported by `SHOW RESOURCE MONITORS`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceMonitor {
    pub name: String,
    pub credit_quota: Option<f64>,
    pub used_credits: Option<f64>,
    pub remaining_credits: Option<f64>,
    pub level: Option<ResourceMonitorLevel>,
    pub frequency: Option<Frequency>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub notify_triggers: Vec<i32>,
    pub suspend_at: Option<i32>,
    pub suspend_immediate_at: Option<i32>,
    pub created_on: Option<DateTime<Utc>>,
    pub owner: String,
    pub comment: Option<String>,
    pub notify_users: Vec<String>,
}

impl ResourceMonitor {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(self.name.clone())
    }
}
