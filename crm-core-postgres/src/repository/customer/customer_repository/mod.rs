pub mod repo_impl;
pub mod create_batch;
pub mod load_batch;
pub mod update_batch;
pub mod find_for_update;
pub mod find_by_status;

pub use repo_impl::CustomerRepositoryImpl;
