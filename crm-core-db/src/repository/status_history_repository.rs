use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::customer::StatusTransitionModel;
use crate::repository::pagination::{Page, PageRequest};

/// Ordering of a customer's ledger, always by sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryOrder {
    #[default]
    OldestFirst,
    NewestFirst,
}

/// Append-only storage for the status ledger.
///
/// Entries are never updated or deleted.
#[async_trait]
pub trait StatusHistoryRepository<DB: Database>: Send + Sync {
    /// Insert one ledger entry.
    ///
    /// # Returns
    /// * `Ok(StatusTransitionModel)` - The stored entry
    /// * `Err` - On write failure or if the `(customer_id, sequence_number)` slot is taken
    async fn append(
        &self,
        entry: StatusTransitionModel,
    ) -> Result<StatusTransitionModel, Box<dyn std::error::Error + Send + Sync>>;

    async fn find_by_customer_id(
        &self,
        customer_id: Uuid,
        order: HistoryOrder,
    ) -> Result<Vec<StatusTransitionModel>, Box<dyn std::error::Error + Send + Sync>>;

    /// The entry with the highest sequence number, if any.
    async fn find_latest(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<StatusTransitionModel>, Box<dyn std::error::Error + Send + Sync>>;

    /// Newest-first page of the ledger.
    async fn load_page(
        &self,
        customer_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<StatusTransitionModel>, Box<dyn std::error::Error + Send + Sync>>;
}
