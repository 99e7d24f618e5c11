use crate::format::double_quoted;
use serde::{Deserialize, Serialize};
use std::fmt;

pub trait ObjectIdentifier {
    /// Canonical form with every part double quoted, e.g. `"DB"."SCHEMA"."NAME"`.
    fn fully_qualified_name(&self) -> String;

    /// An identifier is usable in SQL only when none of its parts is empty.
    fn is_valid(&self) -> bool;
}

/// Single-part name for objects that live directly under the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountObjectIdentifier {
    name: String,
}

impl AccountObjectIdentifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ObjectIdentifier for AccountObjectIdentifier {
    fn fully_qualified_name(&self) -> String {
        double_quoted(&self.name)
    }

    fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }
}

impl fmt::Display for AccountObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fully_qualified_name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaObjectIdentifier {
    database: String,
    schema: String,
    name: String,
}

impl SchemaObjectIdentifier {
    pub fn new(
        database: impl Into<String>,
        schema: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
            name: name.into(),
        }
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ObjectIdentifier for SchemaObjectIdentifier {
    fn fully_qualified_name(&self) -> String {
        format!(
            "{}.{}.{}",
            double_quoted(&self.database),
            double_quoted(&self.schema),
            double_quoted(&self.name)
        )
    }

    fn is_valid(&self) -> bool {
        !self.database.is_empty() && !self.schema.is_empty() && !self.name.is_empty()
    }
}

impl fmt::Display for SchemaObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fully_qualified_name())
    }
}
