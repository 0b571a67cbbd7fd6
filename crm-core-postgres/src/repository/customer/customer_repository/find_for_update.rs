use crm_core_db::models::customer::CustomerModel;
use crate::utils::TryFromRow;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CustomerRepositoryImpl;

impl CustomerRepositoryImpl {
    /// Row-locks the customer for the rest of the transaction, serialising
    /// concurrent status changes of the same customer.
    pub(super) async fn find_for_update_impl(
        repo: &CustomerRepositoryImpl,
        id: Uuid,
    ) -> Result<Option<CustomerModel>, Box<dyn Error + Send + Sync>> {
        let query = r#"SELECT * FROM customer WHERE id = $1 FOR UPDATE"#;
        let row = {
            let mut tx = repo.executor.tx.lock().await;
            if let Some(transaction) = tx.as_mut() {
                sqlx::query(query).bind(id).fetch_optional(&mut **transaction).await?
            } else {
                return Err("Transaction has been consumed".into());
            }
        };

        row.map(|row| CustomerModel::try_from_row(&row)).transpose()
    }
}
