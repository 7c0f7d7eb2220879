//! Error types for the sync engine.

use std::fmt;
use sync_core::IdentifierError;
use thiserror::Error;

/// Stage of a sync at which an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    Compile,
    Begin,
    EnsureTable,
    Upsert,
    Reconcile,
    Commit,
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncStage::Compile => "compile",
            SyncStage::Begin => "begin",
            SyncStage::EnsureTable => "ensure-table",
            SyncStage::Upsert => "upsert",
            SyncStage::Reconcile => "reconcile",
            SyncStage::Commit => "commit",
        };
        f.write_str(name)
    }
}

/// Step of the soft-delete pass that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileStep {
    CreateKeySet,
    StageKeys,
    SoftDelete,
    DropKeySet,
}

impl fmt::Display for ReconcileStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReconcileStep::CreateKeySet => "creating the key set",
            ReconcileStep::StageKeys => "staging keys",
            ReconcileStep::SoftDelete => "flagging missing rows",
            ReconcileStep::DropKeySet => "dropping the key set",
        };
        f.write_str(name)
    }
}

/// Terminal failure of a sync.
#[derive(Error, Debug)]
pub enum SyncError {
    /// A table or column name failed validation.
    #[error(transparent)]
    InvalidIdentifier(#[from] IdentifierError),

    /// A dataset column shares its name with a bookkeeping column.
    #[error("Column '{column}' collides with a bookkeeping column")]
    ReservedColumn { column: String },

    #[error("Failed to create table '{table}'")]
    SchemaCreation {
        table: String,
        #[source]
        source: mysql_async::Error,
    },

    /// `batch` is the zero-based index of the failing statement.
    #[error("Failed to upsert batch {batch} into '{table}'")]
    Upsert {
        table: String,
        batch: usize,
        #[source]
        source: mysql_async::Error,
    },

    #[error("Failed to reconcile '{table}' while {step}")]
    Reconcile {
        table: String,
        step: ReconcileStep,
        #[source]
        source: mysql_async::Error,
    },

    /// Starting or committing the transaction failed.
    #[error("Failed to {action} transaction")]
    Transaction {
        action: &'static str,
        #[source]
        source: mysql_async::Error,
    },
}

impl SyncError {
    /// The stage this error aborted.
    pub fn stage(&self) -> SyncStage {
        match self {
            SyncError::InvalidIdentifier(_) | SyncError::ReservedColumn { .. } => SyncStage::Compile,
            SyncError::SchemaCreation { .. } => SyncStage::EnsureTable,
            SyncError::Upsert { .. } => SyncStage::Upsert,
            SyncError::Reconcile { .. } => SyncStage::Reconcile,
            SyncError::Transaction { action: "begin", .. } => SyncStage::Begin,
            SyncError::Transaction { .. } => SyncStage::Commit,
        }
    }
}
