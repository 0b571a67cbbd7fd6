pub mod customer_status_service;

pub use customer_status_service::CustomerStatusService;
