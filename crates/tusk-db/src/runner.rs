//! Runs query files against a database

use crate::adapter::{Database, DbError};
use std::path::{Path, PathBuf};
use tusk_core::ResultSet;

/// Errors raised while running a query file
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} failed: {source}", .path.display())]
    Query {
        path: PathBuf,
        #[source]
        source: DbError,
    },
}

/// Executes whole query files, one at a time
///
/// The file's full text is sent as a single batch. Which contract applies
/// is chosen by the caller: [`QueryRunner::run_isolated`] for snapshot
/// queries, [`QueryRunner::run_persistent`] for seeds.
pub struct QueryRunner<'a, D: Database + ?Sized> {
    db: &'a mut D,
}

impl<'a, D: Database + ?Sized> QueryRunner<'a, D> {
    pub fn new(db: &'a mut D) -> Self {
        Self { db }
    }

    /// Run a query file in a rolled-back transaction and return its result
    pub async fn run_isolated(&mut self, path: &Path) -> Result<ResultSet, RunnerError> {
        let sql = read_query(path).await?;

        let result = self
            .db
            .query_rolled_back(&sql)
            .await
            .map_err(|source| RunnerError::Query {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            file = %path.display(),
            columns = result.columns.len(),
            rows = result.row_count(),
            "query rolled back"
        );

        Ok(result)
    }

    /// Run a script file with no transaction; effects persist
    pub async fn run_persistent(&mut self, path: &Path) -> Result<(), RunnerError> {
        let sql = read_query(path).await?;

        self.db
            .execute_persistent(&sql)
            .await
            .map_err(|source| RunnerError::Query {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(file = %path.display(), "script executed");
        Ok(())
    }
}

async fn read_query(path: &Path) -> Result<String, RunnerError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| RunnerError::Read {
            path: path.to_path_buf(),
            source,
        })
}
