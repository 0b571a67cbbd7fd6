use std::collections::{BTreeMap, BTreeSet};

use super::customer_status::CustomerStatus;
use crate::error::ApiError;

/// Adjacency table of the default customer workflow.
///
/// ```text
/// NEW ──▶ NOTIFIED ──▶ SUBMITTED ──▶ CERTIFIED
///  │         │  ▲          │
///  │         │  └──────────┤
///  └─────────┴─────────────┴──▶ ABORTED
///
/// CUSTOMER_CALLED ──▶ REPLIED ──▶ ORDER_PLACED ──▶ PRODUCT_DELIVERED ──▶ BUSINESS_DONE
///        └──────────────┴──────────────┴────────────────┴──▶ LOST
/// ```
const DEFAULT_TRANSITIONS: &[(CustomerStatus, &[CustomerStatus])] = &[
    (
        CustomerStatus::New,
        &[CustomerStatus::Notified, CustomerStatus::Aborted],
    ),
    (
        CustomerStatus::Notified,
        &[CustomerStatus::Submitted, CustomerStatus::Aborted],
    ),
    (
        CustomerStatus::Submitted,
        &[
            CustomerStatus::Certified,
            CustomerStatus::Notified,
            CustomerStatus::Aborted,
        ],
    ),
    (CustomerStatus::Certified, &[]),
    (CustomerStatus::Aborted, &[]),
    (
        CustomerStatus::CustomerCalled,
        &[CustomerStatus::Replied, CustomerStatus::Lost],
    ),
    (
        CustomerStatus::Replied,
        &[CustomerStatus::OrderPlaced, CustomerStatus::Lost],
    ),
    (
        CustomerStatus::OrderPlaced,
        &[CustomerStatus::ProductDelivered, CustomerStatus::Lost],
    ),
    (
        CustomerStatus::ProductDelivered,
        &[CustomerStatus::BusinessDone, CustomerStatus::Lost],
    ),
    (CustomerStatus::BusinessDone, &[]),
    (CustomerStatus::Lost, &[]),
];

/// Statuses a customer may be created in.
const INITIAL_STATUSES: &[CustomerStatus] = &[CustomerStatus::New, CustomerStatus::CustomerCalled];

/// For every status, the set of statuses reachable by one direct transition.
///
/// A registry always has an entry for every member of [`CustomerStatus::ALL`];
/// [`StatusRegistry::from_table`] refuses incomplete tables, so lookups never fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRegistry {
    transitions: BTreeMap<CustomerStatus, BTreeSet<CustomerStatus>>,
    initial: BTreeSet<CustomerStatus>,
}

impl StatusRegistry {
    /// Build a registry from an adjacency table and the set of creation statuses.
    ///
    /// # Returns
    /// * `Err(ApiError::InvalidState)` - a status has no entry, or appears twice
    pub fn from_table(
        table: &[(CustomerStatus, &[CustomerStatus])],
        initial: &[CustomerStatus],
    ) -> Result<Self, ApiError> {
        let mut transitions = BTreeMap::new();
        for (from, targets) in table {
            let targets: BTreeSet<CustomerStatus> = targets.iter().copied().collect();
            if transitions.insert(*from, targets).is_some() {
                return Err(ApiError::InvalidState(format!(
                    "Duplicate transition entry for {from}"
                )));
            }
        }

        if let Some(missing) = CustomerStatus::ALL
            .iter()
            .find(|status| !transitions.contains_key(status))
        {
            return Err(ApiError::InvalidState(format!(
                "No transition entry for {missing}"
            )));
        }

        Ok(Self {
            transitions,
            initial: initial.iter().copied().collect(),
        })
    }

    pub fn allowed_targets(&self, from: CustomerStatus) -> &BTreeSet<CustomerStatus> {
        // Completeness is checked at construction.
        &self.transitions[&from]
    }

    pub fn is_terminal(&self, status: CustomerStatus) -> bool {
        self.allowed_targets(status).is_empty()
    }

    pub fn is_initial(&self, status: CustomerStatus) -> bool {
        self.initial.contains(&status)
    }

    pub fn initial_statuses(&self) -> &BTreeSet<CustomerStatus> {
        &self.initial
    }
}

impl Default for StatusRegistry {
    fn default() -> Self {
        Self::from_table(DEFAULT_TRANSITIONS, INITIAL_STATUSES)
            .unwrap_or_else(|e| panic!("default status table is incomplete: {e}"))
    }
}
