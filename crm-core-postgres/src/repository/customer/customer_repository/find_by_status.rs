use crm_core_api::CustomerStatus;
use crm_core_db::models::customer::CustomerModel;
use crm_core_db::repository::pagination::{Page, PageRequest};
use crate::utils::{to_i64, TryFromRow};
use sqlx::Row;
use std::error::Error;

use super::repo_impl::CustomerRepositoryImpl;

impl CustomerRepositoryImpl {
    pub(super) async fn find_by_status_impl(
        repo: &CustomerRepositoryImpl,
        status: CustomerStatus,
        page: PageRequest,
    ) -> Result<Page<CustomerModel>, Box<dyn Error + Send + Sync>> {
        let (total, rows) = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

            let total: i64 = sqlx::query(
                r#"SELECT COUNT(*) AS total FROM customer WHERE status = $1 AND deleted_at IS NULL"#,
            )
            .bind(status)
            .fetch_one(&mut **transaction)
            .await?
            .try_get("total")?;

            let rows = sqlx::query(
                r#"
                SELECT * FROM customer
                WHERE status = $1 AND deleted_at IS NULL
                ORDER BY created_at, id
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(status)
            .bind(to_i64(page.limit)?)
            .bind(to_i64(page.offset)?)
            .fetch_all(&mut **transaction)
            .await?;

            (total, rows)
        };

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(CustomerModel::try_from_row(&row)?);
        }
        Ok(Page::new(items, total as usize, page))
    }
}
