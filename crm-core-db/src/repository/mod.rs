pub mod create_batch;
pub mod customer_repository;
pub mod find_by_id;
pub mod load_batch;
pub mod pagination;
pub mod status_history_repository;
pub mod update_batch;

// Re-exports
pub use create_batch::*;
pub use customer_repository::*;
pub use find_by_id::*;
pub use load_batch::*;
pub use pagination::*;
pub use status_history_repository::*;
pub use update_batch::*;
