use crm_core_api::{
    ApiError, ApiResult, CreateCustomerRequest, CustomerStatus, TransitionStatusRequest,
    TransitionValidator,
};
use crm_core_db::models::customer::{CustomerModel, StatusTransitionModel};
use crm_core_db::repository::pagination::{Page, PageRequest};
use crm_core_db::repository::status_history_repository::HistoryOrder;
use crm_core_db::service::CustomerLifecycle;
use sqlx::{PgPool, Postgres};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::repository::customer::CustomerRepoFactory;
use crate::unit_of_work::{PostgresSession, PostgresUnitOfWork, UnitOfWorkError};

impl From<UnitOfWorkError> for ApiError {
    fn from(error: UnitOfWorkError) -> Self {
        ApiError::StorageFailure(Box::new(error))
    }
}

/// Entry point for the customer status use cases on PostgreSQL.
///
/// Each call runs in its own transaction: the repositories are built on one
/// session, the lifecycle operation runs, and the session commits on `Ok` or
/// rolls back on `Err`. Nothing is retried here.
pub struct CustomerStatusService {
    unit_of_work: PostgresUnitOfWork,
    factory: Arc<CustomerRepoFactory>,
    lifecycle: CustomerLifecycle<Postgres>,
}

impl CustomerStatusService {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self::with_validator(pool, TransitionValidator::default())
    }

    pub fn with_validator(pool: Arc<PgPool>, validator: TransitionValidator) -> Self {
        Self {
            unit_of_work: PostgresUnitOfWork::new(pool),
            factory: CustomerRepoFactory::new(),
            lifecycle: CustomerLifecycle::new(validator),
        }
    }

    pub fn validator(&self) -> &TransitionValidator {
        self.lifecycle.validator()
    }

    #[instrument(skip_all)]
    pub async fn create_customer(&self, request: CreateCustomerRequest) -> ApiResult<CustomerModel> {
        let session = self.unit_of_work.begin().await?;
        let repos = self.factory.build_all_repos(&session);
        let result = self
            .lifecycle
            .create_customer(
                repos.customer_repository.as_ref(),
                repos.status_history_repository.as_ref(),
                request,
            )
            .await;
        finish(session, result).await
    }

    #[instrument(skip(self, request))]
    pub async fn transition_status(
        &self,
        customer_id: Uuid,
        request: TransitionStatusRequest,
    ) -> ApiResult<CustomerModel> {
        let session = self.unit_of_work.begin().await?;
        let repos = self.factory.build_all_repos(&session);
        let result = self
            .lifecycle
            .transition_status(
                repos.customer_repository.as_ref(),
                repos.status_history_repository.as_ref(),
                customer_id,
                request,
            )
            .await;
        finish(session, result).await
    }

    pub async fn history_for(
        &self,
        customer_id: Uuid,
        order: HistoryOrder,
    ) -> ApiResult<Vec<StatusTransitionModel>> {
        let session = self.unit_of_work.begin().await?;
        let repos = self.factory.build_all_repos(&session);
        let result = self
            .lifecycle
            .history_for(
                repos.customer_repository.as_ref(),
                repos.status_history_repository.as_ref(),
                customer_id,
                order,
            )
            .await;
        finish(session, result).await
    }

    pub async fn history_page(
        &self,
        customer_id: Uuid,
        page: PageRequest,
    ) -> ApiResult<Page<StatusTransitionModel>> {
        let session = self.unit_of_work.begin().await?;
        let repos = self.factory.build_all_repos(&session);
        let result = self
            .lifecycle
            .history_page(
                repos.customer_repository.as_ref(),
                repos.status_history_repository.as_ref(),
                customer_id,
                page,
            )
            .await;
        finish(session, result).await
    }

    pub async fn valid_transitions_for(&self, customer_id: Uuid) -> ApiResult<BTreeSet<CustomerStatus>> {
        let session = self.unit_of_work.begin().await?;
        let customers = self.factory.build_customer_repo(&session);
        let result = self
            .lifecycle
            .valid_transitions_for(customers.as_ref(), customer_id)
            .await;
        finish(session, result).await
    }

    #[instrument(skip(self))]
    pub async fn soft_delete_customer(&self, customer_id: Uuid, actor: &str) -> ApiResult<CustomerModel> {
        let session = self.unit_of_work.begin().await?;
        let customers = self.factory.build_customer_repo(&session);
        let result = self
            .lifecycle
            .soft_delete_customer(customers.as_ref(), customer_id, actor)
            .await;
        finish(session, result).await
    }

    pub async fn find_customer(&self, customer_id: Uuid) -> ApiResult<CustomerModel> {
        let session = self.unit_of_work.begin().await?;
        let customers = self.factory.build_customer_repo(&session);
        let result = self.lifecycle.find_customer(customers.as_ref(), customer_id).await;
        finish(session, result).await
    }

    pub async fn list_by_status(
        &self,
        status: CustomerStatus,
        page: PageRequest,
    ) -> ApiResult<Page<CustomerModel>> {
        let session = self.unit_of_work.begin().await?;
        let customers = self.factory.build_customer_repo(&session);
        let result = self.lifecycle.list_by_status(customers.as_ref(), status, page).await;
        finish(session, result).await
    }
}

/// Commit on success, roll back on failure.
///
/// A failed rollback is only logged: the original error is what the caller
/// needs, and Postgres discards the transaction when the connection drops.
async fn finish<T>(session: PostgresSession, result: ApiResult<T>) -> ApiResult<T> {
    match result {
        Ok(value) => {
            session.commit().await?;
            Ok(value)
        }
        Err(error) => {
            if let Err(rollback_error) = session.rollback().await {
                warn!(%rollback_error, "rollback failed");
            }
            Err(error)
        }
    }
}
