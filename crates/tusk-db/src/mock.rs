//! In-memory database for testing
//!
//! Returns scripted result sets keyed by SQL text without connecting to a
//! server. Every call is recorded with the contract it used, and batches
//! run through [`Database::execute_persistent`] are kept as the "persisted"
//! state, so tests can check that snapshot queries left nothing behind.
//!
//! ```rust,ignore
//! let mut db = MockDatabase::new()
//!     .with_result("select 1 as x", ResultSet::from_text(["x"], [["1"]]))
//!     .with_error("select broken", "syntax error at or near \"broken\"");
//! ```

use crate::adapter::{Database, DbError};
use std::collections::HashMap;
use tusk_core::ResultSet;

/// A recorded call against the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    RolledBack(String),
    Persistent(String),
}

/// Mock database for testing
#[derive(Debug, Default)]
pub struct MockDatabase {
    /// Scripted results by trimmed SQL text
    results: HashMap<String, ResultSet>,

    /// Scripted errors by trimmed SQL text
    errors: HashMap<String, String>,

    /// Every call in order
    calls: Vec<MockCall>,

    /// Batches that were executed without rollback
    persisted: Vec<String>,

    /// Number of transactions opened and rolled back
    rollbacks: usize,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the result for a query
    pub fn with_result(mut self, sql: &str, result: ResultSet) -> Self {
        self.set_result(sql, result);
        self
    }

    /// Script an error for a query or seed batch
    pub fn with_error(mut self, sql: &str, message: impl Into<String>) -> Self {
        self.errors.insert(key(sql), message.into());
        self
    }

    /// Replace the scripted result for a query
    pub fn set_result(&mut self, sql: &str, result: ResultSet) {
        self.errors.remove(&key(sql));
        self.results.insert(key(sql), result);
    }

    pub fn calls(&self) -> &[MockCall] {
        &self.calls
    }

    pub fn persisted(&self) -> &[String] {
        &self.persisted
    }

    pub fn rollbacks(&self) -> usize {
        self.rollbacks
    }

    fn scripted_error(&self, sql: &str) -> Option<DbError> {
        self.errors
            .get(&key(sql))
            .map(|message| DbError::Query(message.clone()))
    }
}

fn key(sql: &str) -> String {
    sql.trim().to_string()
}

#[async_trait::async_trait]
impl Database for MockDatabase {
    fn name(&self) -> &'static str {
        "Mock"
    }

    async fn query_rolled_back(&mut self, sql: &str) -> Result<ResultSet, DbError> {
        self.calls.push(MockCall::RolledBack(sql.to_string()));
        self.rollbacks += 1;

        if let Some(error) = self.scripted_error(sql) {
            return Err(error);
        }

        self.results
            .get(&key(sql))
            .cloned()
            .ok_or_else(|| DbError::Query(format!("no scripted result for: {}", sql.trim())))
    }

    async fn execute_persistent(&mut self, sql: &str) -> Result<(), DbError> {
        self.calls.push(MockCall::Persistent(sql.to_string()));

        if let Some(error) = self.scripted_error(sql) {
            return Err(error);
        }

        self.persisted.push(sql.to_string());
        Ok(())
    }
}
