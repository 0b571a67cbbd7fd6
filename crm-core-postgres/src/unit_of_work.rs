//! Transaction scope shared by all repositories of one unit of work.
//!
//! Every repository built for a session holds a clone of the same
//! [`Executor`], so their statements run on one PostgreSQL transaction and
//! commit or roll back together.

use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Error, Debug)]
pub enum UnitOfWorkError {
    #[error("Transaction has been consumed")]
    TransactionConsumed,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Shared handle to the open transaction.
///
/// The slot is emptied by `commit`/`rollback`; repositories that find it empty
/// report "Transaction has been consumed".
#[derive(Clone)]
pub struct Executor {
    pub tx: Arc<Mutex<Option<Transaction<'static, Postgres>>>>,
}

impl Executor {
    pub fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self {
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    pub async fn commit(&self) -> Result<(), UnitOfWorkError> {
        let tx = self
            .tx
            .lock()
            .await
            .take()
            .ok_or(UnitOfWorkError::TransactionConsumed)?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn rollback(&self) -> Result<(), UnitOfWorkError> {
        let tx = self
            .tx
            .lock()
            .await
            .take()
            .ok_or(UnitOfWorkError::TransactionConsumed)?;
        tx.rollback().await?;
        Ok(())
    }
}

/// Anything that exposes the executor repositories should be built with.
pub trait UnitOfWorkSession {
    fn executor(&self) -> &Executor;
}

/// Opens sessions on a connection pool.
#[derive(Clone)]
pub struct PostgresUnitOfWork {
    pool: Arc<PgPool>,
}

impl PostgresUnitOfWork {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub async fn begin(&self) -> Result<PostgresSession, UnitOfWorkError> {
        let tx = self.pool.begin().await?;
        Ok(PostgresSession {
            executor: Executor::new(tx),
        })
    }
}

/// One open transaction. Dropping it without committing rolls back.
pub struct PostgresSession {
    executor: Executor,
}

impl PostgresSession {
    pub async fn commit(self) -> Result<(), UnitOfWorkError> {
        self.executor.commit().await
    }

    pub async fn rollback(self) -> Result<(), UnitOfWorkError> {
        self.executor.rollback().await
    }
}

impl UnitOfWorkSession for PostgresSession {
    fn executor(&self) -> &Executor {
        &self.executor
    }
}
