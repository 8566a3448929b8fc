//! Database access layer for Ladle.
//!
//! Provides a trait-based interface over the MySQL backend and the scoped
//! one-connection-per-report execution path used by the dashboard.

mod mysql;
mod types;

pub use mysql::MySqlClient;
pub use types::{ColumnInfo, QueryResult, Row, Value};

use crate::config::ConnectionConfig;
use crate::error::Result;
use crate::reports::Report;
use async_trait::async_trait;
use tracing::{debug, info};

/// Trait defining the interface for database clients.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Executes a SQL query and returns the results.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult>;

    /// Closes the database connection. Infallible so that release can be
    /// guaranteed on error paths.
    async fn close(&self);
}

/// Creates a database client for the given configuration.
pub async fn connect(config: &ConnectionConfig) -> Result<Box<dyn DatabaseClient>> {
    let client = MySqlClient::connect(config).await?;
    Ok(Box::new(client))
}

/// Executes a single report against a fresh connection.
///
/// The connection lives exactly as long as this call: it is opened, used for
/// one query, and closed before returning, whether the query succeeded or
/// failed. Each dashboard action is an independent read; nothing is shared
/// between invocations.
pub async fn run_report(config: &ConnectionConfig, report: Report) -> Result<QueryResult> {
    info!("Running report: {}", report.label());
    let client = connect(config).await?;

    let result = client.execute_query(report.sql()).await;

    // Release the connection before propagating any query error.
    client.close().await;

    match &result {
        Ok(r) => debug!(
            "Report '{}' returned {} rows in {}ms",
            report.label(),
            r.row_count,
            r.execution_time.as_millis()
        ),
        Err(e) => debug!("Report '{}' failed: {}", report.label(), e),
    }

    result
}
