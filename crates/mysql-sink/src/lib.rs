//! MySQL sink for table-sync.
//!
//! This crate reconciles an in-memory `Dataset` against a MySQL table inside
//! a single transaction:
//!
//! 1. `ensure_table` creates the table if it is absent, with the dataset's
//!    columns, the bookkeeping columns and the inferred primary key.
//! 2. `upsert_rows` writes every row in bounded batches, inserting new keys
//!    and overwriting existing ones.
//! 3. `soft_delete_missing` flags rows whose key is no longer in the dataset.
//!
//! `SyncSession` runs the three stages and commits, or rolls back on the
//! first failure. The stages only talk to the database through the
//! `SinkTransaction` trait, which `mysql_async::Transaction` implements.

mod connect;
mod error;
mod executor;
mod plan;
mod reconcile;
mod schema;
mod session;
mod upsert;

#[cfg(test)]
mod testing;

pub use connect::{sanitize_connection_string, sync_dataset};
pub use error::{ReconcileStep, SyncError, SyncStage};
pub use executor::{DryRunTransaction, SinkTransaction};
pub use plan::SyncPlan;
pub use reconcile::{soft_delete_missing, ReconcileOutcome};
pub use schema::ensure_table;
pub use session::{SyncOptions, SyncReport, SyncSession, DEFAULT_BATCH_SIZE};
pub use upsert::upsert_rows;
