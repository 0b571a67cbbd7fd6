pub mod customer_repository;
pub mod factory;
pub mod status_history_repository;
#[cfg(test)]
pub mod test_utils;

pub use customer_repository::CustomerRepositoryImpl;
pub use factory::{CustomerRepoFactory, CustomerRepositories};
pub use status_history_repository::StatusHistoryRepositoryImpl;
