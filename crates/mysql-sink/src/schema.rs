//! Ensure-table stage.

use crate::error::SyncError;
use crate::executor::SinkTransaction;
use crate::plan::SyncPlan;
use tracing::{debug, info};

/// Create the target table if it does not exist yet.
///
/// An existing table is left as is, whatever its columns. Note that MySQL
/// commits implicitly around `CREATE TABLE`, so a newly created table
/// survives a later rollback (empty).
pub async fn ensure_table<T: SinkTransaction>(tx: &mut T, plan: &SyncPlan) -> Result<(), SyncError> {
    debug!("Ensuring table with:\n{}", plan.create_table_sql());

    tx.execute(plan.create_table_sql(), Vec::new())
        .await
        .map_err(|source| SyncError::SchemaCreation {
            table: plan.table().to_string(),
            source,
        })?;

    info!("Table '{}' is ready", plan.table());
    Ok(())
}
