pub mod customer;
pub mod field_limits;
pub mod identifiable;

// Re-exports
pub use customer::*;
pub use field_limits::*;
pub use identifiable::*;
