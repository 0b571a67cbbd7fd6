use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ApiError;

/// Lifecycle status of a customer.
///
/// The set is closed. Adding a value requires a data migration; rows written
/// under the legacy workflow keep their legacy codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "customer_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum CustomerStatus {
    New,
    Notified,
    Submitted,
    Certified,
    Aborted,
    // Legacy workflow
    CustomerCalled,
    Replied,
    OrderPlaced,
    ProductDelivered,
    BusinessDone,
    Lost,
}

impl CustomerStatus {
    pub const ALL: [CustomerStatus; 11] = [
        CustomerStatus::New,
        CustomerStatus::Notified,
        CustomerStatus::Submitted,
        CustomerStatus::Certified,
        CustomerStatus::Aborted,
        CustomerStatus::CustomerCalled,
        CustomerStatus::Replied,
        CustomerStatus::OrderPlaced,
        CustomerStatus::ProductDelivered,
        CustomerStatus::BusinessDone,
        CustomerStatus::Lost,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            CustomerStatus::New => "NEW",
            CustomerStatus::Notified => "NOTIFIED",
            CustomerStatus::Submitted => "SUBMITTED",
            CustomerStatus::Certified => "CERTIFIED",
            CustomerStatus::Aborted => "ABORTED",
            CustomerStatus::CustomerCalled => "CUSTOMER_CALLED",
            CustomerStatus::Replied => "REPLIED",
            CustomerStatus::OrderPlaced => "ORDER_PLACED",
            CustomerStatus::ProductDelivered => "PRODUCT_DELIVERED",
            CustomerStatus::BusinessDone => "BUSINESS_DONE",
            CustomerStatus::Lost => "LOST",
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(
            self,
            CustomerStatus::CustomerCalled
                | CustomerStatus::Replied
                | CustomerStatus::OrderPlaced
                | CustomerStatus::ProductDelivered
                | CustomerStatus::BusinessDone
                | CustomerStatus::Lost
        )
    }
}

impl std::fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CustomerStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CustomerStatus::ALL
            .iter()
            .copied()
            .find(|status| status.code() == s)
            .ok_or_else(|| ApiError::InvalidState(format!("Unknown customer status: {s}")))
    }
}
