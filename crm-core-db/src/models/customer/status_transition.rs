use chrono::{DateTime, Utc};
use crm_core_api::{ApiError, CustomerStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::field_limits::{
    bounded_text, ActorString, ReasonString, ACTOR_MAX_CHARS, REASON_MAX_CHARS,
};
use crate::models::identifiable::Identifiable;
use crate::utils::ledger_hash;

/// # Documentation
/// One immutable entry of a customer's status ledger.
///
/// Rows are inserted once and never updated or deleted. Per customer they form
/// a chain: `sequence_number` starts at 1 and increases by one, and each
/// `antecedent_hash` equals the `hash` of the entry before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusTransitionModel {
    pub id: Uuid,
    pub customer_id: Uuid,

    /// Insertion order within the customer's ledger. Timestamps may collide, this does not.
    pub sequence_number: i64,

    /// None for the creation entry
    pub from_status: Option<CustomerStatus>,
    pub to_status: CustomerStatus,
    pub reason: Option<ReasonString>,
    pub actor: ActorString,
    pub changed_at: DateTime<Utc>,

    /// Hash of the previous entry (0 for the creation entry)
    pub antecedent_hash: i64,

    /// Hash of this entry computed with the hash field set to 0
    pub hash: i64,
}

impl StatusTransitionModel {
    /// Build the entry that follows `previous` in a customer's ledger.
    ///
    /// `previous` is None only for the creation entry, where `from_status` is None as well.
    pub fn next(
        customer_id: Uuid,
        previous: Option<&StatusTransitionModel>,
        from_status: Option<CustomerStatus>,
        to_status: CustomerStatus,
        reason: Option<&str>,
        actor: &str,
        changed_at: DateTime<Utc>,
    ) -> Result<Self, ApiError> {
        let reason = reason
            .map(|r| bounded_text("reason", r, REASON_MAX_CHARS))
            .transpose()?;
        let actor = bounded_text("actor", actor, ACTOR_MAX_CHARS)?;

        let mut entry = StatusTransitionModel {
            id: Uuid::new_v4(),
            customer_id,
            sequence_number: previous.map_or(1, |p| p.sequence_number + 1),
            from_status,
            to_status,
            reason,
            actor,
            changed_at,
            antecedent_hash: previous.map_or(0, |p| p.hash),
            hash: 0,
        };
        entry.hash = entry.compute_hash()?;
        Ok(entry)
    }

    pub fn compute_hash(&self) -> Result<i64, ApiError> {
        let mut unsealed = self.clone();
        unsealed.hash = 0;
        ledger_hash(&unsealed)
    }
}

impl Identifiable for StatusTransitionModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

/// Check that `entries` (oldest first) form an untampered ledger.
///
/// Verifies the hash of every entry, the antecedent links, gap-free sequence
/// numbers starting at 1, and that each `from_status` matches the preceding
/// `to_status`.
pub fn verify_history_chain(entries: &[StatusTransitionModel]) -> Result<(), ApiError> {
    let mut previous: Option<&StatusTransitionModel> = None;
    for entry in entries {
        let expected_sequence = previous.map_or(1, |p| p.sequence_number + 1);
        if entry.sequence_number != expected_sequence {
            return Err(ApiError::InvalidState(format!(
                "Ledger gap for customer {}: expected sequence {expected_sequence}, found {}",
                entry.customer_id, entry.sequence_number
            )));
        }
        if entry.antecedent_hash != previous.map_or(0, |p| p.hash) {
            return Err(ApiError::InvalidState(format!(
                "Broken antecedent link at sequence {}",
                entry.sequence_number
            )));
        }
        if entry.from_status != previous.map(|p| p.to_status) {
            return Err(ApiError::InvalidState(format!(
                "Status discontinuity at sequence {}",
                entry.sequence_number
            )));
        }
        if entry.hash != entry.compute_hash()? {
            return Err(ApiError::InvalidState(format!(
                "Hash mismatch at sequence {}",
                entry.sequence_number
            )));
        }
        previous = Some(entry);
    }
    Ok(())
}
