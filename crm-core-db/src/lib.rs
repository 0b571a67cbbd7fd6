pub mod models;
pub mod repository;
pub mod service;
pub mod utils;

pub use models::*;
