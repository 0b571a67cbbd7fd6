pub mod customer_lifecycle;

#[cfg(test)]
pub mod test_support;

pub use customer_lifecycle::CustomerLifecycle;
