use async_trait::async_trait;
use crm_core_api::CustomerStatus;
use crm_core_db::models::customer::CustomerModel;
use crm_core_db::repository::customer_repository::CustomerRepository;
use crm_core_db::repository::pagination::{Page, PageRequest};
use crate::unit_of_work::Executor;
use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};
use sqlx::{postgres::PgRow, Postgres, Row};
use std::error::Error;
use uuid::Uuid;

pub struct CustomerRepositoryImpl {
    pub executor: Executor,
}

impl CustomerRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for CustomerModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(CustomerModel {
            id: row.try_get("id")?,
            name: get_heapless_string(row, "name")?,
            email: get_optional_heapless_string(row, "email")?,
            phone: get_optional_heapless_string(row, "phone")?,
            company: get_optional_heapless_string(row, "company")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            deleted_at: row.try_get("deleted_at")?,
        })
    }
}

#[async_trait]
impl CustomerRepository<Postgres> for CustomerRepositoryImpl {
    async fn find_for_update(
        &self,
        id: Uuid,
    ) -> Result<Option<CustomerModel>, Box<dyn Error + Send + Sync>> {
        Self::find_for_update_impl(self, id).await
    }

    async fn find_by_status(
        &self,
        status: CustomerStatus,
        page: PageRequest,
    ) -> Result<Page<CustomerModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_status_impl(self, status, page).await
    }
}
