use async_trait::async_trait;
use crm_core_db::models::customer::StatusTransitionModel;
use crm_core_db::repository::pagination::{Page, PageRequest};
use crm_core_db::repository::status_history_repository::{HistoryOrder, StatusHistoryRepository};
use crate::unit_of_work::Executor;
use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};
use sqlx::{postgres::PgRow, Postgres, Row};
use std::error::Error;
use uuid::Uuid;

pub struct StatusHistoryRepositoryImpl {
    pub executor: Executor,
}

impl StatusHistoryRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for StatusTransitionModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(StatusTransitionModel {
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            sequence_number: row.try_get("sequence_number")?,
            from_status: row.try_get("from_status")?,
            to_status: row.try_get("to_status")?,
            reason: get_optional_heapless_string(row, "reason")?,
            actor: get_heapless_string(row, "actor")?,
            changed_at: row.try_get("changed_at")?,
            antecedent_hash: row.try_get("antecedent_hash")?,
            hash: row.try_get("hash")?,
        })
    }
}

#[async_trait]
impl StatusHistoryRepository<Postgres> for StatusHistoryRepositoryImpl {
    async fn append(
        &self,
        entry: StatusTransitionModel,
    ) -> Result<StatusTransitionModel, Box<dyn Error + Send + Sync>> {
        Self::append_impl(self, entry).await
    }

    async fn find_by_customer_id(
        &self,
        customer_id: Uuid,
        order: HistoryOrder,
    ) -> Result<Vec<StatusTransitionModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_customer_id_impl(self, customer_id, order).await
    }

    async fn find_latest(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<StatusTransitionModel>, Box<dyn Error + Send + Sync>> {
        Self::find_latest_impl(self, customer_id).await
    }

    async fn load_page(
        &self,
        customer_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<StatusTransitionModel>, Box<dyn Error + Send + Sync>> {
        Self::load_page_impl(self, customer_id, page).await
    }
}
