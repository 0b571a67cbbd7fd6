//! Test helper module for transaction-based test isolation
//!
//! Repository tests run inside a transaction that is never committed, so
//! dropping the context rolls everything back and no cleanup is needed.

use crate::config::DatabaseConfig;
use crate::repository::customer::{CustomerRepoFactory, CustomerRepositories};
use crate::service::CustomerStatusService;
use crate::unit_of_work::{PostgresSession, PostgresUnitOfWork};
use sqlx::PgPool;
use std::sync::Arc;

/// Repositories sharing one open transaction.
pub struct TestContext {
    pub customer_repos: CustomerRepositories,
    // Keeps the transaction alive for the lifetime of the context.
    _session: PostgresSession,
}

impl TestContext {
    pub fn customer_repos(&self) -> &CustomerRepositories {
        &self.customer_repos
    }
}

async fn migrated_pool(max_connections: u32) -> Result<PgPool, Box<dyn std::error::Error + Send + Sync>> {
    let mut config = DatabaseConfig::from_env()?;
    config.max_connections = max_connections;
    let pool = config.connect().await?;
    sqlx::migrate!().run(&pool).await?;
    Ok(pool)
}

/// Setup a test context with a transactional database session
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let ctx = setup_test_context().await?;
///     let customer_repo = &ctx.customer_repos().customer_repository;
///     // All changes are rolled back when ctx is dropped
///     Ok(())
/// }
/// ```
pub async fn setup_test_context() -> Result<TestContext, Box<dyn std::error::Error + Send + Sync>> {
    let pool = migrated_pool(1).await?;
    let session = PostgresUnitOfWork::new(Arc::new(pool)).begin().await?;
    let customer_repos = CustomerRepoFactory::new().build_all_repos(&session);

    Ok(TestContext {
        customer_repos,
        _session: session,
    })
}

/// A service over a migrated pool. Its operations commit, so tests using it
/// must only touch customers they created.
pub async fn setup_service() -> Result<CustomerStatusService, Box<dyn std::error::Error + Send + Sync>> {
    let pool = migrated_pool(5).await?;
    Ok(CustomerStatusService::new(Arc::new(pool)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::customer::test_utils::create_test_customer;
    use crm_core_api::CustomerStatus;
    use crm_core_db::repository::create_batch::CreateBatch;
    use crm_core_db::repository::load_batch::LoadBatch;

    #[tokio::test]
    #[ignore = "requires a PostgreSQL database"]
    async fn test_transaction_rollback() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let customer = create_test_customer("Rolled back", CustomerStatus::New);
        {
            let ctx = setup_test_context().await?;
            let customer_repo = &ctx.customer_repos().customer_repository;
            customer_repo.create_batch(vec![customer.clone()]).await?;

            let loaded = customer_repo.load_batch(&[customer.id]).await?;
            assert!(loaded[0].is_some());
        }

        {
            let ctx = setup_test_context().await?;
            let customer_repo = &ctx.customer_repos().customer_repository;
            let loaded = customer_repo.load_batch(&[customer.id]).await?;
            assert!(loaded[0].is_none());
        }

        Ok(())
    }
}
