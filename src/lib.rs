//! Typed resource monitor DDL: validate options, render SQL, decode SHOW rows.

pub mod client;
pub mod decode;
pub mod error;
pub mod format;
pub mod ident;
pub mod model;
pub mod resource_monitor;
pub mod validate;

pub use client::{RecordingExecutor, ResourceMonitors, SqlExecutor};
pub use decode::extract_trigger_ints;
pub use error::{MonitorError, Violation, Violations};
pub use ident::{AccountObjectIdentifier, ObjectIdentifier, SchemaObjectIdentifier};
pub use model::{
    Frequency, NotifyUsers, ResourceMonitor, ResourceMonitorLevel, Row, TriggerAction,
    TriggerDefinition,
};
pub use resource_monitor::{
    build_sql, AlterResourceMonitorOptions, CreateResourceMonitorOptions,
    DropResourceMonitorOptions, Like, ResourceMonitorSet, ResourceMonitorUnset,
    ResourceMonitorWith, ShowResourceMonitorOptions, ToSql,
};
pub use validate::{validate, Validate};
