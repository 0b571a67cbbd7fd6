use async_trait::async_trait;
use crm_core_db::models::customer::CustomerModel;
use crm_core_db::repository::create_batch::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::CustomerRepositoryImpl;

impl CustomerRepositoryImpl {
    pub(super) async fn create_batch_impl(
        &self,
        items: Vec<CustomerModel>,
    ) -> Result<Vec<CustomerModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO customer
                (id, name, email, phone, company, status, created_at, updated_at, deleted_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(item.id)
            .bind(item.name.as_str())
            .bind(item.email.as_deref())
            .bind(item.phone.as_deref())
            .bind(item.company.as_deref())
            .bind(item.status)
            .bind(item.created_at)
            .bind(item.updated_at)
            .bind(item.deleted_at)
            .execute(&mut **transaction)
            .await?;
        }

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, CustomerModel> for CustomerRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<CustomerModel>,
    ) -> Result<Vec<CustomerModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
