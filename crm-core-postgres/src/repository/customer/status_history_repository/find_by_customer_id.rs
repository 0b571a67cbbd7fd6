use crm_core_db::models::customer::StatusTransitionModel;
use crm_core_db::repository::status_history_repository::HistoryOrder;
use crate::utils::TryFromRow;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::StatusHistoryRepositoryImpl;

impl StatusHistoryRepositoryImpl {
    pub(super) async fn find_by_customer_id_impl(
        repo: &StatusHistoryRepositoryImpl,
        customer_id: Uuid,
        order: HistoryOrder,
    ) -> Result<Vec<StatusTransitionModel>, Box<dyn Error + Send + Sync>> {
        let query = match order {
            HistoryOrder::OldestFirst => {
                r#"SELECT * FROM customer_status_history WHERE customer_id = $1 ORDER BY sequence_number ASC"#
            }
            HistoryOrder::NewestFirst => {
                r#"SELECT * FROM customer_status_history WHERE customer_id = $1 ORDER BY sequence_number DESC"#
            }
        };

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            if let Some(transaction) = tx.as_mut() {
                sqlx::query(query).bind(customer_id).fetch_all(&mut **transaction).await?
            } else {
                return Err("Transaction has been consumed".into());
            }
        };

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            entries.push(StatusTransitionModel::try_from_row(&row)?);
        }
        Ok(entries)
    }

    pub(super) async fn find_latest_impl(
        repo: &StatusHistoryRepositoryImpl,
        customer_id: Uuid,
    ) -> Result<Option<StatusTransitionModel>, Box<dyn Error + Send + Sync>> {
        let query = r#"
            SELECT * FROM customer_status_history
            WHERE customer_id = $1
            ORDER BY sequence_number DESC
            LIMIT 1
        "#;

        let row = {
            let mut tx = repo.executor.tx.lock().await;
            if let Some(transaction) = tx.as_mut() {
                sqlx::query(query).bind(customer_id).fetch_optional(&mut **transaction).await?
            } else {
                return Err("Transaction has been consumed".into());
            }
        };

        row.map(|row| StatusTransitionModel::try_from_row(&row)).transpose()
    }
}
