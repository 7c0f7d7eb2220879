//! Sync session: the three stages inside one transaction.

use crate::error::SyncError;
use crate::executor::SinkTransaction;
use crate::plan::SyncPlan;
use crate::reconcile::{soft_delete_missing, ReconcileOutcome};
use crate::schema::ensure_table;
use crate::upsert::upsert_rows;
use serde::Serialize;
use sync_core::Dataset;
use tracing::{error, info, warn};

/// Rows per upsert statement unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Rows per upsert statement (and keys per staging statement)
    pub batch_size: usize,

    /// Log statements instead of connecting
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            dry_run: false,
        }
    }
}

/// Outcome of a committed sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub table: String,
    pub primary_key: Option<String>,
    pub rows_in_dataset: usize,
    /// Affected rows as reported by MySQL for the upserts
    pub rows_affected: u64,
    pub rows_soft_deleted: u64,
    pub reconcile: ReconcileOutcome,
    pub dry_run: bool,
}

/// One sync of one dataset into one table.
///
/// The session owns the transaction until it commits or rolls back; each
/// stage only borrows it for its own call.
pub struct SyncSession<T: SinkTransaction> {
    tx: T,
    plan: SyncPlan,
    options: SyncOptions,
}

impl<T: SinkTransaction> SyncSession<T> {
    /// `plan` must have been compiled from the dataset later passed to `run`.
    pub fn new(tx: T, plan: SyncPlan, options: SyncOptions) -> Self {
        Self { tx, plan, options }
    }

    /// Ensure the table, upsert all rows, soft-delete missing ones, commit.
    ///
    /// On the first failure the transaction is rolled back and that failure
    /// is returned.
    pub async fn run(self, dataset: &Dataset) -> Result<SyncReport, SyncError> {
        let SyncSession {
            mut tx,
            plan,
            options,
        } = self;

        info!(
            "Starting sync of {} rows into '{}'",
            dataset.len(),
            plan.table()
        );

        match apply(&mut tx, &plan, dataset, &options).await {
            Ok(report) => {
                tx.commit()
                    .await
                    .map_err(|source| SyncError::Transaction {
                        action: "commit",
                        source,
                    })?;
                info!(
                    "Committed sync of '{}': {} rows affected, {} rows soft-deleted",
                    report.table, report.rows_affected, report.rows_soft_deleted
                );
                Ok(report)
            }
            Err(e) => {
                error!("Sync of '{}' failed at {} stage: {e}", plan.table(), e.stage());
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback of '{}' failed: {rollback_err}", plan.table());
                } else {
                    info!("Rolled back sync of '{}'", plan.table());
                }
                Err(e)
            }
        }
    }
}

async fn apply<T: SinkTransaction>(
    tx: &mut T,
    plan: &SyncPlan,
    dataset: &Dataset,
    options: &SyncOptions,
) -> Result<SyncReport, SyncError> {
    ensure_table(tx, plan).await?;
    let rows_affected = upsert_rows(tx, plan, dataset, options.batch_size).await?;
    let reconcile = soft_delete_missing(tx, plan, dataset, options.batch_size).await?;

    Ok(SyncReport {
        table: plan.table().to_string(),
        primary_key: plan.primary_key().map(|key| key.name.clone()),
        rows_in_dataset: dataset.len(),
        rows_affected,
        rows_soft_deleted: reconcile.flagged_rows(),
        reconcile,
        dry_run: options.dry_run,
    })
}
