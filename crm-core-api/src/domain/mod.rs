pub mod customer_status;
pub mod requests;
pub mod status_registry;
pub mod transition_validator;

pub use customer_status::*;
pub use requests::*;
pub use status_registry::*;
pub use transition_validator::*;
