use crm_core_db::models::customer::StatusTransitionModel;
use crm_core_db::repository::pagination::{Page, PageRequest};
use crate::utils::{to_i64, TryFromRow};
use sqlx::Row;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::StatusHistoryRepositoryImpl;

impl StatusHistoryRepositoryImpl {
    pub(super) async fn load_page_impl(
        repo: &StatusHistoryRepositoryImpl,
        customer_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<StatusTransitionModel>, Box<dyn Error + Send + Sync>> {
        let (total, rows) = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

            let total: i64 = sqlx::query(
                r#"SELECT COUNT(*) AS total FROM customer_status_history WHERE customer_id = $1"#,
            )
            .bind(customer_id)
            .fetch_one(&mut **transaction)
            .await?
            .try_get("total")?;

            let rows = sqlx::query(
                r#"
                SELECT * FROM customer_status_history
                WHERE customer_id = $1
                ORDER BY sequence_number DESC
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(customer_id)
            .bind(to_i64(page.limit)?)
            .bind(to_i64(page.offset)?)
            .fetch_all(&mut **transaction)
            .await?;

            (total, rows)
        };

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(StatusTransitionModel::try_from_row(&row)?);
        }
        Ok(Page::new(items, total as usize, page))
    }
}
