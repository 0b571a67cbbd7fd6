use chrono::{SubsecRound, Utc};
use crm_core_api::CustomerStatus;
use crm_core_db::models::customer::{CustomerModel, StatusTransitionModel};
use heapless::String as HeaplessString;
use uuid::Uuid;

pub fn create_test_customer(name: &str, status: CustomerStatus) -> CustomerModel {
    let now = Utc::now().trunc_subsecs(6);
    CustomerModel {
        id: Uuid::new_v4(),
        name: HeaplessString::try_from(name).unwrap(),
        email: Some(HeaplessString::try_from("customer@example.test").unwrap()),
        phone: None,
        company: None,
        status,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

/// The next ledger entry for `customer_id`, chained onto `previous`.
pub fn create_test_entry(
    customer_id: Uuid,
    previous: Option<&StatusTransitionModel>,
    to_status: CustomerStatus,
) -> StatusTransitionModel {
    StatusTransitionModel::next(
        customer_id,
        previous,
        previous.map(|p| p.to_status),
        to_status,
        Some("test"),
        "test-agent",
        Utc::now().trunc_subsecs(6),
    )
    .unwrap()
}
