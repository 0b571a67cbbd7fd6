use std::sync::Arc;
use crate::unit_of_work::UnitOfWorkSession;
use super::{
    customer_repository::CustomerRepositoryImpl,
    status_history_repository::StatusHistoryRepositoryImpl,
};

/// Factory for creating customer module repositories
///
/// Repositories built from the same session share its executor and therefore
/// its transaction.
#[derive(Default)]
pub struct CustomerRepoFactory {}

impl CustomerRepoFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {})
    }

    pub fn build_customer_repo(&self, session: &impl UnitOfWorkSession) -> Arc<CustomerRepositoryImpl> {
        Arc::new(CustomerRepositoryImpl::new(session.executor().clone()))
    }

    pub fn build_status_history_repo(&self, session: &impl UnitOfWorkSession) -> Arc<StatusHistoryRepositoryImpl> {
        Arc::new(StatusHistoryRepositoryImpl::new(session.executor().clone()))
    }

    pub fn build_all_repos(&self, session: &impl UnitOfWorkSession) -> CustomerRepositories {
        CustomerRepositories {
            customer_repository: self.build_customer_repo(session),
            status_history_repository: self.build_status_history_repo(session),
        }
    }
}

/// Container for all customer module repositories
pub struct CustomerRepositories {
    pub customer_repository: Arc<CustomerRepositoryImpl>,
    pub status_history_repository: Arc<StatusHistoryRepositoryImpl>,
}
