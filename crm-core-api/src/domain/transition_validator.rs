use std::collections::BTreeSet;
use std::sync::Arc;

use super::customer_status::CustomerStatus;
use super::status_registry::StatusRegistry;
use crate::error::ApiError;

/// Decides whether a proposed status change is legal.
///
/// Holds no state besides the registry, so every query is deterministic.
#[derive(Debug, Clone, Default)]
pub struct TransitionValidator {
    registry: Arc<StatusRegistry>,
}

impl TransitionValidator {
    pub fn new(registry: Arc<StatusRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &StatusRegistry {
        &self.registry
    }

    pub fn is_valid(&self, from: CustomerStatus, to: CustomerStatus) -> bool {
        self.registry.allowed_targets(from).contains(&to)
    }

    pub fn error_message(&self, from: CustomerStatus, to: CustomerStatus) -> String {
        format!("Invalid transition from {from} to {to}")
    }

    /// Next statuses reachable from `from`, in status order (the `Ord` of
    /// [`CustomerStatus`]), not the order the table lists them.
    pub fn valid_transitions(&self, from: CustomerStatus) -> BTreeSet<CustomerStatus> {
        self.registry.allowed_targets(from).clone()
    }

    pub fn validate(&self, from: CustomerStatus, to: CustomerStatus) -> Result<(), ApiError> {
        if self.is_valid(from, to) {
            Ok(())
        } else {
            Err(ApiError::InvalidTransition(self.error_message(from, to)))
        }
    }
}
