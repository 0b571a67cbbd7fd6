use crm_core_db::models::customer::StatusTransitionModel;
use std::error::Error;

use super::repo_impl::StatusHistoryRepositoryImpl;

impl StatusHistoryRepositoryImpl {
    pub(super) async fn append_impl(
        repo: &StatusHistoryRepositoryImpl,
        entry: StatusTransitionModel,
    ) -> Result<StatusTransitionModel, Box<dyn Error + Send + Sync>> {
        let query = sqlx::query(
            r#"
            INSERT INTO customer_status_history
            (id, customer_id, sequence_number, from_status, to_status, reason, actor, changed_at, antecedent_hash, hash)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(entry.id)
        .bind(entry.customer_id)
        .bind(entry.sequence_number)
        .bind(entry.from_status)
        .bind(entry.to_status)
        .bind(entry.reason.as_deref())
        .bind(entry.actor.as_str())
        .bind(entry.changed_at)
        .bind(entry.antecedent_hash)
        .bind(entry.hash);

        let mut tx = repo.executor.tx.lock().await;
        if let Some(transaction) = tx.as_mut() {
            query.execute(&mut **transaction).await?;
        } else {
            return Err("Transaction has been consumed".into());
        }

        Ok(entry)
    }
}
