use async_trait::async_trait;
use crm_core_api::CustomerStatus;
use sqlx::Database;
use uuid::Uuid;

use crate::models::customer::CustomerModel;
use crate::repository::create_batch::CreateBatch;
use crate::repository::load_batch::LoadBatch;
use crate::repository::pagination::{Page, PageRequest};
use crate::repository::update_batch::UpdateBatch;

/// Storage collaborator for customers.
///
/// Implementations share the caller's transaction. `load_batch` and
/// `find_by_id` return soft-deleted rows too; filtering is the caller's policy.
#[async_trait]
pub trait CustomerRepository<DB: Database>:
    LoadBatch<DB, CustomerModel> + CreateBatch<DB, CustomerModel> + UpdateBatch<DB, CustomerModel>
{
    /// Load a customer and lock its row until the transaction ends.
    ///
    /// # Returns
    /// * `Ok(None)` - If the customer does not exist
    async fn find_for_update(
        &self,
        id: Uuid,
    ) -> Result<Option<CustomerModel>, Box<dyn std::error::Error + Send + Sync>>;

    /// Live customers currently in `status`, oldest first.
    async fn find_by_status(
        &self,
        status: CustomerStatus,
        page: PageRequest,
    ) -> Result<Page<CustomerModel>, Box<dyn std::error::Error + Send + Sync>>;
}
