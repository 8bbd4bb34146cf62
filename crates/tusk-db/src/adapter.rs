//! Database trait used by the query runner

use tusk_core::ResultSet;

/// Errors that can occur while talking to the database
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Rollback failed: {0}")]
    Rollback(String),
}

/// A live database connection
///
/// Implementations hold a single connection; calls never overlap and a
/// rolled-back transaction is closed before the method returns.
#[async_trait::async_trait]
pub trait Database: Send {
    /// Get the backend name (e.g., "PostgreSQL")
    fn name(&self) -> &'static str;

    /// Run `sql` inside a transaction, capture the result of its last
    /// statement, then roll back unconditionally
    ///
    /// A statement that describes no rows yields an empty [`ResultSet`].
    async fn query_rolled_back(&mut self, sql: &str) -> Result<ResultSet, DbError>;

    /// Run `sql` with no transaction wrapping; effects persist
    async fn execute_persistent(&mut self, sql: &str) -> Result<(), DbError>;
}
