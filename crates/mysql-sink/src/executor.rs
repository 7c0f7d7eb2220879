//! Transaction seam between the sync stages and MySQL.

use async_trait::async_trait;
use mysql_async::prelude::Queryable;
use mysql_async::{Error, Transaction, Value};
use tracing::info;

/// An open transaction that sync statements run in.
///
/// The session owns the transaction; stages borrow it for the duration of
/// one call. `commit` and `rollback` consume it.
#[async_trait]
pub trait SinkTransaction: Send + Sized {
    /// Run one statement with positional parameters, returning the number
    /// of affected rows.
    async fn execute(&mut self, sql: &str, params: Vec<Value>) -> Result<u64, Error>;

    async fn commit(self) -> Result<(), Error>;

    async fn rollback(self) -> Result<(), Error>;
}

#[async_trait]
impl<'a> SinkTransaction for Transaction<'a> {
    async fn execute(&mut self, sql: &str, params: Vec<Value>) -> Result<u64, Error> {
        // DDL goes over the text protocol; anything with values is prepared
        if params.is_empty() {
            let result = self.query_iter(sql).await?;
            let affected = result.affected_rows();
            result.drop_result().await?;
            Ok(affected)
        } else {
            let result = self.exec_iter(sql, params).await?;
            let affected = result.affected_rows();
            result.drop_result().await?;
            Ok(affected)
        }
    }

    async fn commit(self) -> Result<(), Error> {
        Transaction::commit(self).await
    }

    async fn rollback(self) -> Result<(), Error> {
        Transaction::rollback(self).await
    }
}

/// Transaction that logs statements instead of running them.
///
/// Every statement reports zero affected rows.
#[derive(Debug, Default)]
pub struct DryRunTransaction {
    statements: usize,
}

#[async_trait]
impl SinkTransaction for DryRunTransaction {
    async fn execute(&mut self, sql: &str, params: Vec<Value>) -> Result<u64, Error> {
        self.statements += 1;
        info!("Dry run: {sql} [{} parameters]", params.len());
        Ok(0)
    }

    async fn commit(self) -> Result<(), Error> {
        info!("Dry run: would commit {} statements", self.statements);
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        Ok(())
    }
}
