//! In-memory storage with transaction staging and fault injection.
//!
//! Writes land in a staged copy of the state; `commit` publishes it and
//! `rollback` discards it, mirroring the transaction a real unit of work
//! would wrap around the lifecycle operations.

use async_trait::async_trait;
use crm_core_api::CustomerStatus;
use sqlx::Postgres;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use crate::models::customer::{CustomerModel, StatusTransitionModel};
use crate::repository::{
    CreateBatch, CustomerRepository, HistoryOrder, LoadBatch, Page, PageRequest,
    StatusHistoryRepository, UpdateBatch,
};

#[derive(Debug, Clone, Default)]
struct State {
    customers: HashMap<Uuid, CustomerModel>,
    ledger: Vec<StatusTransitionModel>,
}

#[derive(Default)]
pub struct InMemoryStore {
    committed: Mutex<State>,
    staged: Mutex<State>,
    pub fail_customer_write: AtomicBool,
    pub fail_history_append: AtomicBool,
}

impl InMemoryStore {
    pub fn commit(&self) {
        let staged = self.staged.lock().unwrap().clone();
        *self.committed.lock().unwrap() = staged;
    }

    pub fn rollback(&self) {
        let committed = self.committed.lock().unwrap().clone();
        *self.staged.lock().unwrap() = committed;
    }

    pub fn inject_customer_write_failure(&self) {
        self.fail_customer_write.store(true, Ordering::SeqCst);
    }

    pub fn inject_history_append_failure(&self) {
        self.fail_history_append.store(true, Ordering::SeqCst);
    }

    pub fn committed_customer(&self, id: Uuid) -> Option<CustomerModel> {
        self.committed.lock().unwrap().customers.get(&id).cloned()
    }

    pub fn committed_ledger_len(&self, customer_id: Uuid) -> usize {
        self.committed
            .lock()
            .unwrap()
            .ledger
            .iter()
            .filter(|e| e.customer_id == customer_id)
            .count()
    }

    pub fn staged_ledger_len(&self, customer_id: Uuid) -> usize {
        self.staged
            .lock()
            .unwrap()
            .ledger
            .iter()
            .filter(|e| e.customer_id == customer_id)
            .count()
    }

    fn check_customer_write(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.fail_customer_write.load(Ordering::SeqCst) {
            return Err("injected customer write failure".into());
        }
        Ok(())
    }
}

#[async_trait]
impl LoadBatch<Postgres, CustomerModel> for InMemoryStore {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<CustomerModel>>, Box<dyn std::error::Error + Send + Sync>> {
        let state = self.staged.lock().unwrap();
        Ok(ids.iter().map(|id| state.customers.get(id).cloned()).collect())
    }
}

#[async_trait]
impl CreateBatch<Postgres, CustomerModel> for InMemoryStore {
    async fn create_batch(
        &self,
        items: Vec<CustomerModel>,
    ) -> Result<Vec<CustomerModel>, Box<dyn std::error::Error + Send + Sync>> {
        self.check_customer_write()?;
        let mut state = self.staged.lock().unwrap();
        for item in &items {
            if state.customers.contains_key(&item.id) {
                return Err(format!("duplicate customer {}", item.id).into());
            }
            state.customers.insert(item.id, item.clone());
        }
        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, CustomerModel> for InMemoryStore {
    async fn update_batch(
        &self,
        items: Vec<CustomerModel>,
    ) -> Result<Vec<CustomerModel>, Box<dyn std::error::Error + Send + Sync>> {
        self.check_customer_write()?;
        let mut state = self.staged.lock().unwrap();
        for item in &items {
            match state.customers.get_mut(&item.id) {
                Some(existing) => *existing = item.clone(),
                None => return Err(format!("customer {} does not exist", item.id).into()),
            }
        }
        Ok(items)
    }
}

#[async_trait]
impl CustomerRepository<Postgres> for InMemoryStore {
    async fn find_for_update(
        &self,
        id: Uuid,
    ) -> Result<Option<CustomerModel>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.staged.lock().unwrap().customers.get(&id).cloned())
    }

    async fn find_by_status(
        &self,
        status: CustomerStatus,
        page: PageRequest,
    ) -> Result<Page<CustomerModel>, Box<dyn std::error::Error + Send + Sync>> {
        let state = self.staged.lock().unwrap();
        let mut matching: Vec<CustomerModel> = state
            .customers
            .values()
            .filter(|c| c.status == status && !c.is_deleted())
            .cloned()
            .collect();
        matching.sort_by_key(|c| (c.created_at, c.id));
        let total = matching.len();
        let items = matching
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .collect();
        Ok(Page::new(items, total, page))
    }
}

#[async_trait]
impl StatusHistoryRepository<Postgres> for InMemoryStore {
    async fn append(
        &self,
        entry: StatusTransitionModel,
    ) -> Result<StatusTransitionModel, Box<dyn std::error::Error + Send + Sync>> {
        if self.fail_history_append.load(Ordering::SeqCst) {
            return Err("injected history append failure".into());
        }
        let mut state = self.staged.lock().unwrap();
        if state.ledger.iter().any(|e| {
            e.customer_id == entry.customer_id && e.sequence_number == entry.sequence_number
        }) {
            return Err("duplicate ledger sequence".into());
        }
        state.ledger.push(entry.clone());
        Ok(entry)
    }

    async fn find_by_customer_id(
        &self,
        customer_id: Uuid,
        order: HistoryOrder,
    ) -> Result<Vec<StatusTransitionModel>, Box<dyn std::error::Error + Send + Sync>> {
        let state = self.staged.lock().unwrap();
        let mut entries: Vec<StatusTransitionModel> = state
            .ledger
            .iter()
            .filter(|e| e.customer_id == customer_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.sequence_number);
        if order == HistoryOrder::NewestFirst {
            entries.reverse();
        }
        Ok(entries)
    }

    async fn find_latest(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<StatusTransitionModel>, Box<dyn std::error::Error + Send + Sync>> {
        let state = self.staged.lock().unwrap();
        Ok(state
            .ledger
            .iter()
            .filter(|e| e.customer_id == customer_id)
            .max_by_key(|e| e.sequence_number)
            .cloned())
    }

    async fn load_page(
        &self,
        customer_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<StatusTransitionModel>, Box<dyn std::error::Error + Send + Sync>> {
        let entries = self
            .find_by_customer_id(customer_id, HistoryOrder::NewestFirst)
            .await?;
        let total = entries.len();
        let items = entries
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .collect();
        Ok(Page::new(items, total, page))
    }
}
