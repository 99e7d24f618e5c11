use crate::error::MonitorError;
use crate::ident::{AccountObjectIdentifier, ObjectIdentifier};
use crate::model::{ResourceMonitor, Row};
use crate::resource_monitor::{
    build_sql, AlterResourceMonitorOptions, CreateResourceMonitorOptions,
    DropResourceMonitorOptions, Like, ShowResourceMonitorOptions, ToSql,
};
use crate::validate::Validate;
use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, warn};

/// Runs statement text against the warehouse. Implemented by the caller's driver.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    async fn exec(&self, sql: &str) -> Result<(), MonitorError>;

    async fn query(&self, sql: &str) -> Result<Vec<Row>, MonitorError>;
}

/// Executor that records statements instead of sending them anywhere.
///
/// Queries answer with the rows given to [`RecordingExecutor::with_rows`].
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    statements: Mutex<Vec<String>>,
    rows: Vec<Row>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            statements: Mutex::new(Vec::new()),
            rows,
        }
    }

    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().clone()
    }
}

#[async_trait]
impl SqlExecutor for RecordingExecutor {
    async fn exec(&self, sql: &str) -> Result<(), MonitorError> {
        self.statements.lock().push(sql.to_string());
        Ok(())
    }

    async fn query(&self, sql: &str) -> Result<Vec<Row>, MonitorError> {
        self.statements.lock().push(sql.to_string());
        Ok(self.rows.clone())
    }
}

/// Resource monitor operations on top of an executor.
pub struct ResourceMonitors<E> {
    executor: E,
}

impl<E: SqlExecutor> ResourceMonitors<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    fn compile<T: Validate + ToSql>(opts: &T) -> Result<String, MonitorError> {
        build_sql(opts).inspect_err(|e| warn!(group = opts.group(), "rejected options: {e}"))
    }

    async fn run(&self, sql: String) -> Result<(), MonitorError> {
        debug!(%sql, "executing resource monitor statement");
        self.executor.exec(&sql).await
    }

    pub async fn create(&self, opts: &CreateResourceMonitorOptions) -> Result<(), MonitorError> {
        let sql = Self::compile(opts)?;
        self.run(sql).await
    }

    pub async fn alter(&self, opts: &AlterResourceMonitorOptions) -> Result<(), MonitorError> {
        let sql = Self::compile(opts)?;
        self.run(sql).await
    }

    pub async fn drop(&self, opts: &DropResourceMonitorOptions) -> Result<(), MonitorError> {
        let sql = Self::compile(opts)?;
        self.run(sql).await
    }

    pub async fn show(
        &self,
        opts: &ShowResourceMonitorOptions,
    ) -> Result<Vec<ResourceMonitor>, MonitorError> {
        let sql = Self::compile(opts)?;
        debug!(%sql, "querying resource monitors");
        let rows = self.executor.query(&sql).await?;
        let monitors = rows
            .iter()
            .map(ResourceMonitor::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = monitors.len(), "decoded resource monitors");
        Ok(monitors)
    }

    /// Looks up one monitor by exact name; `LIKE` alone would also match wildcards.
    pub async fn show_by_id(
        &self,
        id: &AccountObjectIdentifier,
    ) -> Result<ResourceMonitor, MonitorError> {
        if !id.is_valid() {
            return Err(MonitorError::InvalidObjectIdentifier);
        }
        let opts = ShowResourceMonitorOptions {
            like: Some(Like::new(id.name())),
        };
        self.show(&opts)
            .await?
            .into_iter()
            .find(|m| m.name == id.name())
            .ok_or_else(|| {
                MonitorError::NotFound(format!("resource monitor {}", id.fully_qualified_name()))
            })
    }
}
