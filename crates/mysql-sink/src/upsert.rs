//! Batch upsert stage.

use crate::error::SyncError;
use crate::executor::SinkTransaction;
use crate::plan::SyncPlan;
use mysql_types::{row_to_params, rows_per_statement, MySQLDdl};
use sync_core::Dataset;
use tracing::{debug, info};

/// Write every dataset row into the target table.
///
/// Rows are sent `batch_size` at a time (fewer if a batch would exceed the
/// placeholder limit), in dataset order. Returns the affected-row count
/// MySQL reports, which counts an updated row twice.
pub async fn upsert_rows<T: SinkTransaction>(
    tx: &mut T,
    plan: &SyncPlan,
    dataset: &Dataset,
    batch_size: usize,
) -> Result<u64, SyncError> {
    if dataset.is_empty() {
        info!("No rows to upsert into '{}'", plan.table());
        return Ok(0);
    }

    let ddl = MySQLDdl;
    let rows_per_batch = rows_per_statement(batch_size, plan.columns().len());
    let full_batch_sql = ddl.to_batch_upsert(plan.table(), plan.columns(), rows_per_batch);

    let mut affected = 0;
    for (batch, rows) in dataset.rows().chunks(rows_per_batch).enumerate() {
        let sql = if rows.len() == rows_per_batch {
            full_batch_sql.clone()
        } else {
            ddl.to_batch_upsert(plan.table(), plan.columns(), rows.len())
        };
        let params = rows.iter().flat_map(|row| row_to_params(row)).collect();

        debug!("Upserting batch {batch} ({} rows) into '{}'", rows.len(), plan.table());
        affected += tx
            .execute(&sql, params)
            .await
            .map_err(|source| SyncError::Upsert {
                table: plan.table().to_string(),
                batch,
                source,
            })?;
    }

    info!(
        "Upserted {} rows into '{}' ({affected} rows affected)",
        dataset.len(),
        plan.table()
    );
    Ok(affected)
}
