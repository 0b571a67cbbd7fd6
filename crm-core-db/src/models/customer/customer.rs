use chrono::{DateTime, Utc};
use crm_core_api::CustomerStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::field_limits::{CompanyString, EmailString, NameString, PhoneString};
use crate::models::identifiable::Identifiable;

/// # Documentation
/// A tracked customer. Owns exactly one current status.
///
/// The status only changes through the lifecycle service, which appends a
/// `StatusTransitionModel` in the same transaction. Soft deletion sets
/// `deleted_at` and leaves the status as it was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerModel {
    pub id: Uuid,
    pub name: NameString,
    pub email: Option<EmailString>,
    pub phone: Option<PhoneString>,
    pub company: Option<CompanyString>,
    pub status: CustomerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Soft-delete marker
    /// - None: live customer
    /// - Some(ts): excluded from lookups, history stays readable
    pub deleted_at: Option<DateTime<Utc>>,
}

impl CustomerModel {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl Identifiable for CustomerModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
