//! Database trait definitions

use crate::error::DbResult;
use crate::value::ResultSet;
use async_trait::async_trait;

/// An open database session.
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Run a query and collect every returned row
    async fn query(&self, sql: &str) -> DbResult<ResultSet>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}

/// Opens [`Database`] sessions against one configured endpoint.
///
/// A connector owns the connection settings and any tuning options; it hands
/// them to the driver unchanged on every `connect`.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Establish a new session
    async fn connect(&self) -> DbResult<Box<dyn Database>>;

    /// Endpoint description for logging; never includes credentials
    fn endpoint(&self) -> String;
}
