//! Database access for snapshot runs
//!
//! The [`Database`] trait exposes two execution contracts that callers
//! pick explicitly:
//!
//! - [`Database::query_rolled_back`] - run inside a transaction that is
//!   always rolled back, returning the result set (test and update)
//! - [`Database::execute_persistent`] - run with no transaction so the
//!   effects stay (seed)
//!
//! ## Example
//!
//! ```rust,ignore
//! use tusk_db::{PostgresDatabase, QueryRunner};
//!
//! let mut db = PostgresDatabase::connect(&config.database).await?;
//! let mut runner = QueryRunner::new(&mut db);
//! let result = runner.run_isolated(Path::new("tests/users.sql")).await?;
//! ```

pub mod adapter;
pub mod mock;
pub mod postgres;
pub mod runner;

pub use adapter::{Database, DbError};
pub use mock::{MockCall, MockDatabase};
pub use postgres::PostgresDatabase;
pub use runner::{QueryRunner, RunnerError};
