//! In-memory transaction for engine tests.

use crate::executor::SinkTransaction;
use async_trait::async_trait;
use mysql_async::{Error, Value};
use std::sync::{Arc, Mutex};

/// What a `RecordingTransaction` saw, shared with the test after the
/// transaction itself has been consumed.
#[derive(Debug, Default)]
pub(crate) struct Recorded {
    pub statements: Vec<(String, Vec<Value>)>,
    pub committed: bool,
    pub rolled_back: bool,
}

impl Recorded {
    pub fn sql(&self) -> Vec<&str> {
        self.statements.iter().map(|(sql, _)| sql.as_str()).collect()
    }

    pub fn count_starting_with(&self, prefix: &str) -> usize {
        self.statements
            .iter()
            .filter(|(sql, _)| sql.starts_with(prefix))
            .count()
    }
}

/// Records statements and reports one affected row per value tuple.
/// `UPDATE` statements report `updated_rows`.
pub(crate) struct RecordingTransaction {
    recorded: Arc<Mutex<Recorded>>,
    fail_on: Option<String>,
    fail_commit: bool,
    fail_rollback: bool,
    updated_rows: u64,
}

impl RecordingTransaction {
    pub fn new() -> (Self, Arc<Mutex<Recorded>>) {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let tx = Self {
            recorded: Arc::clone(&recorded),
            fail_on: None,
            fail_commit: false,
            fail_rollback: false,
            updated_rows: 0,
        };
        (tx, recorded)
    }

    /// Fail the first statement containing `fragment`.
    pub fn failing_on(mut self, fragment: &str) -> Self {
        self.fail_on = Some(fragment.to_string());
        self
    }

    pub fn failing_commit(mut self) -> Self {
        self.fail_commit = true;
        self
    }

    pub fn failing_rollback(mut self) -> Self {
        self.fail_rollback = true;
        self
    }

    pub fn with_updated_rows(mut self, rows: u64) -> Self {
        self.updated_rows = rows;
        self
    }
}

#[async_trait]
impl SinkTransaction for RecordingTransaction {
    async fn execute(&mut self, sql: &str, params: Vec<Value>) -> Result<u64, Error> {
        if let Some(fragment) = &self.fail_on {
            if sql.contains(fragment.as_str()) {
                self.fail_on = None;
                return Err(Error::Other(format!("injected failure on: {sql}").into()));
            }
        }

        let affected = if sql.starts_with("UPDATE") {
            self.updated_rows
        } else if sql.starts_with("INSERT") {
            // every value tuple opens with a placeholder
            sql.matches("(?").count() as u64
        } else {
            0
        };

        self.recorded
            .lock()
            .unwrap()
            .statements
            .push((sql.to_string(), params));
        Ok(affected)
    }

    async fn commit(self) -> Result<(), Error> {
        if self.fail_commit {
            return Err(Error::Other("injected commit failure".into()));
        }
        self.recorded.lock().unwrap().committed = true;
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        if self.fail_rollback {
            return Err(Error::Other("injected rollback failure".into()));
        }
        self.recorded.lock().unwrap().rolled_back = true;
        Ok(())
    }
}
