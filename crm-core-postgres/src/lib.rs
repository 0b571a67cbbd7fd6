pub mod config;
pub mod repository;
pub mod service;
pub mod unit_of_work;
pub mod utils;

pub use config::DatabaseConfig;
pub use repository::customer::{CustomerRepoFactory, CustomerRepositories};
pub use service::CustomerStatusService;
pub use unit_of_work::{Executor, PostgresSession, PostgresUnitOfWork, UnitOfWorkSession};

#[cfg(test)]
pub mod test_helper;
