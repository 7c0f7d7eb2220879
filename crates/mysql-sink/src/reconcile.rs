//! Soft-delete stage.
//!
//! The dataset's keys are staged into a temporary table on the session's
//! connection, then every live row whose key is not staged gets flagged.
//! Nothing is ever physically deleted.

use crate::error::{ReconcileStep, SyncError};
use crate::executor::SinkTransaction;
use crate::plan::SyncPlan;
use mysql_types::{key_set_name, row_to_params, rows_per_statement, MySQLDdl};
use serde::Serialize;
use sync_core::{ColumnDefinition, Dataset};
use tracing::{debug, info, warn};

/// Result of the soft-delete pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "rows", rename_all = "snake_case")]
pub enum ReconcileOutcome {
    /// Number of rows newly flagged as deleted.
    Flagged(u64),
    /// No primary key, so there was nothing to reconcile against.
    Skipped,
}

impl ReconcileOutcome {
    pub fn flagged_rows(&self) -> u64 {
        match self {
            ReconcileOutcome::Flagged(rows) => *rows,
            ReconcileOutcome::Skipped => 0,
        }
    }
}

/// Flag rows of the target table whose key is absent from `dataset`.
///
/// Rows already flagged are left alone. The key set is dropped whether or
/// not flagging succeeds.
pub async fn soft_delete_missing<T: SinkTransaction>(
    tx: &mut T,
    plan: &SyncPlan,
    dataset: &Dataset,
    batch_size: usize,
) -> Result<ReconcileOutcome, SyncError> {
    let (Some(key), Some(key_index)) = (plan.primary_key(), plan.key_index()) else {
        warn!(
            "Skipping soft delete for '{}': no primary key",
            plan.table()
        );
        return Ok(ReconcileOutcome::Skipped);
    };

    let ddl = MySQLDdl;
    let key_set = key_set_name(plan.table());

    // a pooled connection may still hold a key set from an aborted run
    let drop_sql = ddl.to_drop_temporary_table(&key_set);
    tx.execute(&drop_sql, Vec::new())
        .await
        .map_err(failed(plan, ReconcileStep::CreateKeySet))?;

    let flagged = stage_and_flag(tx, plan, dataset, batch_size, key, key_index, &key_set).await;

    let dropped = tx.execute(&drop_sql, Vec::new()).await;
    let flagged = match (flagged, dropped) {
        (Ok(rows), Ok(_)) => rows,
        (Ok(_), Err(source)) => return Err(failed(plan, ReconcileStep::DropKeySet)(source)),
        (Err(e), dropped) => {
            if let Err(drop_err) = dropped {
                warn!("Failed to drop key set '{key_set}' after error: {drop_err}");
            }
            return Err(e);
        }
    };

    info!(
        "Soft-deleted {flagged} rows of '{}' missing from the dataset",
        plan.table()
    );
    Ok(ReconcileOutcome::Flagged(flagged))
}

fn failed(plan: &SyncPlan, step: ReconcileStep) -> impl FnOnce(mysql_async::Error) -> SyncError {
    let table = plan.table().to_string();
    move |source| SyncError::Reconcile { table, step, source }
}

async fn stage_and_flag<T: SinkTransaction>(
    tx: &mut T,
    plan: &SyncPlan,
    dataset: &Dataset,
    batch_size: usize,
    key: &ColumnDefinition,
    key_index: usize,
    key_set: &str,
) -> Result<u64, SyncError> {
    let ddl = MySQLDdl;

    let key_column = key.name.as_str();
    tx.execute(
        &ddl.to_create_key_set(key_set, key_column, &ddl.to_key_ddl(&key.column_type)),
        Vec::new(),
    )
    .await
    .map_err(failed(plan, ReconcileStep::CreateKeySet))?;

    let keys: Vec<_> = dataset.column_values(key_index).collect();
    let key_columns = [key_column.to_string()];
    for (batch, chunk) in keys.chunks(rows_per_statement(batch_size, 1)).enumerate() {
        debug!("Staging key batch {batch} ({} keys) into '{key_set}'", chunk.len());
        tx.execute(
            &ddl.to_batch_insert(key_set, &key_columns, chunk.len()),
            row_to_params(chunk.iter().copied()),
        )
        .await
        .map_err(failed(plan, ReconcileStep::StageKeys))?;
    }

    tx.execute(&ddl.to_soft_delete(plan.table(), key_set, key_column), Vec::new())
        .await
        .map_err(failed(plan, ReconcileStep::SoftDelete))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTransaction;
    use mysql_async::Value;
    use sync_core::{UniversalType, UniversalValue};

    fn keyed(ids: &[i64]) -> Dataset {
        let mut builder = Dataset::builder().column("id", UniversalType::Int64);
        for id in ids {
            builder = builder.row(vec![UniversalValue::Int64(*id)]);
        }
        builder.build().unwrap()
    }

    #[tokio::test]
    async fn test_soft_delete_statement_sequence() {
        let dataset = keyed(&[1, 3]);
        let plan = SyncPlan::compile("people", &dataset).unwrap();
        let (tx, recorded) = RecordingTransaction::new();
        let mut tx = tx.with_updated_rows(1);

        let outcome = soft_delete_missing(&mut tx, &plan, &dataset, 1000).await.unwrap();
        assert_eq!(outcome, ReconcileOutcome::Flagged(1));

        let recorded = recorded.lock().unwrap();
        assert_eq!(
            recorded.sql(),
            vec![
                "DROP TEMPORARY TABLE IF EXISTS `people_sync_keys`",
                "CREATE TEMPORARY TABLE `people_sync_keys` (`id` INT NOT NULL, INDEX (`id`))",
                "INSERT INTO `people_sync_keys` (`id`) VALUES (?), (?)",
                "UPDATE `people` AS dest SET dest.`is_deleted` = TRUE, dest.`last_modified` = NOW() \
                 WHERE dest.`is_deleted` = FALSE AND NOT EXISTS \
                 (SELECT 1 FROM `people_sync_keys` AS staged WHERE staged.`id` = dest.`id`)",
                "DROP TEMPORARY TABLE IF EXISTS `people_sync_keys`",
            ]
        );
        assert_eq!(recorded.statements[2].1, vec![Value::Int(1), Value::Int(3)]);
    }

    #[tokio::test]
    async fn test_text_key_set_uses_bounded_type() {
        let dataset = Dataset::builder()
            .column("code", UniversalType::Text)
            .row(vec![UniversalValue::Text("A".into())])
            .build()
            .unwrap();
        let plan = SyncPlan::compile("codes", &dataset).unwrap();
        let (mut tx, recorded) = RecordingTransaction::new();

        soft_delete_missing(&mut tx, &plan, &dataset, 1000).await.unwrap();
        assert!(recorded.lock().unwrap().statements[1]
            .0
            .contains("`code` VARCHAR(255) NOT NULL"));
    }

    #[tokio::test]
    async fn test_keys_staged_in_batches() {
        let ids: Vec<i64> = (0..5).collect();
        let dataset = keyed(&ids);
        let plan = SyncPlan::compile("people", &dataset).unwrap();
        let (mut tx, recorded) = RecordingTransaction::new();

        soft_delete_missing(&mut tx, &plan, &dataset, 2).await.unwrap();
        assert_eq!(
            recorded
                .lock()
                .unwrap()
                .count_starting_with("INSERT INTO `people_sync_keys`"),
            3
        );
    }

    #[tokio::test]
    async fn test_skipped_without_key() {
        let dataset = keyed(&[]);
        let plan = SyncPlan::compile("people", &dataset).unwrap();
        let (mut tx, recorded) = RecordingTransaction::new();

        let outcome = soft_delete_missing(&mut tx, &plan, &dataset, 1000).await.unwrap();
        assert_eq!(outcome, ReconcileOutcome::Skipped);
        assert_eq!(outcome.flagged_rows(), 0);
        assert!(recorded.lock().unwrap().statements.is_empty());
    }

    #[tokio::test]
    async fn test_key_set_dropped_after_failure() {
        let dataset = keyed(&[1, 2]);
        let plan = SyncPlan::compile("people", &dataset).unwrap();
        let (tx, recorded) = RecordingTransaction::new();
        let mut tx = tx.failing_on("UPDATE");

        let err = soft_delete_missing(&mut tx, &plan, &dataset, 1000).await.unwrap_err();
        assert!(matches!(
            err,
            SyncError::Reconcile { step: ReconcileStep::SoftDelete, .. }
        ));

        let recorded = recorded.lock().unwrap();
        assert_eq!(
            recorded.sql().last().copied(),
            Some("DROP TEMPORARY TABLE IF EXISTS `people_sync_keys`")
        );
    }

    #[tokio::test]
    async fn test_staging_failure_step() {
        let dataset = keyed(&[1]);
        let plan = SyncPlan::compile("people", &dataset).unwrap();
        let (tx, _) = RecordingTransaction::new();
        let mut tx = tx.failing_on("INSERT INTO `people_sync_keys`");

        let err = soft_delete_missing(&mut tx, &plan, &dataset, 1000).await.unwrap_err();
        assert!(matches!(
            err,
            SyncError::Reconcile { step: ReconcileStep::StageKeys, .. }
        ));
    }

    #[test]
    fn test_outcome_serialization() {
        assert_eq!(
            serde_json::to_string(&ReconcileOutcome::Flagged(2)).unwrap(),
            r#"{"status":"flagged","rows":2}"#
        );
        assert_eq!(
            serde_json::to_string(&ReconcileOutcome::Skipped).unwrap(),
            r#"{"status":"skipped"}"#
        );
    }
}
