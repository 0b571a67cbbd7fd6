pub mod customer;
pub mod status_transition;

pub use customer::*;
pub use status_transition::*;
