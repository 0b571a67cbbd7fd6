use chrono::{DateTime, SubsecRound, Utc};
use crm_core_api::{
    ApiError, ApiResult, CreateCustomerRequest, CustomerStatus, TransitionStatusRequest,
    TransitionValidator,
};
use sqlx::Database;
use std::collections::BTreeSet;
use std::marker::PhantomData;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::models::customer::{CustomerModel, StatusTransitionModel};
use crate::models::field_limits::{
    bounded_text, ACTOR_MAX_CHARS, COMPANY_MAX_CHARS, EMAIL_MAX_CHARS, NAME_MAX_CHARS,
    PHONE_MAX_CHARS,
};
use crate::repository::{
    CustomerRepository, FindById, HistoryOrder, Page, PageRequest, StatusHistoryRepository,
};

/// The customer aggregate: every status change is validated, applied and
/// recorded in the ledger here.
///
/// Operations never open or commit transactions. The repositories passed in
/// must share the caller's transaction; on `Err` the caller rolls it back, so
/// a customer write without its ledger entry (or the reverse) never commits.
pub struct CustomerLifecycle<DB: Database> {
    validator: TransitionValidator,
    _db: PhantomData<fn() -> DB>,
}

impl<DB: Database> Default for CustomerLifecycle<DB> {
    fn default() -> Self {
        Self::new(TransitionValidator::default())
    }
}

impl<DB: Database> CustomerLifecycle<DB> {
    pub fn new(validator: TransitionValidator) -> Self {
        Self {
            validator,
            _db: PhantomData,
        }
    }

    pub fn validator(&self) -> &TransitionValidator {
        &self.validator
    }

    /// Insert a customer together with its creation entry `(None -> initial_status)`.
    #[instrument(skip_all, fields(initial_status = %request.initial_status))]
    pub async fn create_customer<C, H>(
        &self,
        customers: &C,
        history: &H,
        request: CreateCustomerRequest,
    ) -> ApiResult<CustomerModel>
    where
        C: CustomerRepository<DB> + ?Sized,
        H: StatusHistoryRepository<DB> + ?Sized,
    {
        request.validate()?;
        if !self.validator.registry().is_initial(request.initial_status) {
            return Err(ApiError::ValidationError(format!(
                "{} is not a valid initial status",
                request.initial_status
            )));
        }

        let now = now();
        let customer = CustomerModel {
            id: Uuid::new_v4(),
            name: bounded_text("name", &request.name, NAME_MAX_CHARS)?,
            email: request
                .email
                .as_deref()
                .map(|v| bounded_text("email", v, EMAIL_MAX_CHARS))
                .transpose()?,
            phone: request
                .phone
                .as_deref()
                .map(|v| bounded_text("phone", v, PHONE_MAX_CHARS))
                .transpose()?,
            company: request
                .company
                .as_deref()
                .map(|v| bounded_text("company", v, COMPANY_MAX_CHARS))
                .transpose()?,
            status: request.initial_status,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let entry = StatusTransitionModel::next(
            customer.id,
            None,
            None,
            customer.status,
            request.reason.as_deref(),
            &request.actor,
            now,
        )?;

        let customer = customers
            .create_batch(vec![customer])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::InvalidState("customer insert returned nothing".to_string()))?;
        history.append(entry).await?;

        info!(customer_id = %customer.id, actor = %request.actor, "customer created");
        Ok(customer)
    }

    /// Validate, apply and record a status change.
    ///
    /// # Returns
    /// * `Err(ApiError::NotFound)` - The customer does not exist or is soft-deleted
    /// * `Err(ApiError::InvalidTransition)` - `request.to` is not reachable from the current status
    /// * `Err(ApiError::StorageFailure)` - A read or write failed; nothing may be committed
    #[instrument(skip(self, customers, history, request), fields(to = %request.to))]
    pub async fn transition_status<C, H>(
        &self,
        customers: &C,
        history: &H,
        customer_id: Uuid,
        request: TransitionStatusRequest,
    ) -> ApiResult<CustomerModel>
    where
        C: CustomerRepository<DB> + ?Sized,
        H: StatusHistoryRepository<DB> + ?Sized,
    {
        request.validate()?;

        let mut customer = customers
            .find_for_update(customer_id)
            .await?
            .filter(|c| !c.is_deleted())
            .ok_or_else(|| ApiError::customer_not_found(customer_id))?;

        let from = customer.status;
        if let Err(e) = self.validator.validate(from, request.to) {
            warn!(%from, actor = %request.actor, "status transition rejected");
            return Err(e);
        }

        let previous = history.find_latest(customer_id).await?;
        let now = now();
        let entry = StatusTransitionModel::next(
            customer_id,
            previous.as_ref(),
            Some(from),
            request.to,
            request.reason.as_deref(),
            &request.actor,
            now,
        )?;

        customer.status = request.to;
        customer.updated_at = now;
        let customer = customers
            .update_batch(vec![customer])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::InvalidState("customer update returned nothing".to_string()))?;
        history.append(entry).await?;

        info!(%from, actor = %request.actor, "status transition applied");
        Ok(customer)
    }

    /// The full ledger of a customer. Soft-deleted customers keep a readable history.
    #[instrument(skip(self, customers, history))]
    pub async fn history_for<C, H>(
        &self,
        customers: &C,
        history: &H,
        customer_id: Uuid,
        order: HistoryOrder,
    ) -> ApiResult<Vec<StatusTransitionModel>>
    where
        C: CustomerRepository<DB> + ?Sized,
        H: StatusHistoryRepository<DB> + ?Sized,
    {
        self.load_any(customers, customer_id).await?;
        let entries = history.find_by_customer_id(customer_id, order).await?;
        debug!(entries = entries.len(), "history loaded");
        Ok(entries)
    }

    pub async fn history_page<C, H>(
        &self,
        customers: &C,
        history: &H,
        customer_id: Uuid,
        page: PageRequest,
    ) -> ApiResult<Page<StatusTransitionModel>>
    where
        C: CustomerRepository<DB> + ?Sized,
        H: StatusHistoryRepository<DB> + ?Sized,
    {
        self.load_any(customers, customer_id).await?;
        Ok(history.load_page(customer_id, page).await?)
    }

    /// Next statuses the customer may move to, for populating UI choices.
    pub async fn valid_transitions_for<C>(
        &self,
        customers: &C,
        customer_id: Uuid,
    ) -> ApiResult<BTreeSet<CustomerStatus>>
    where
        C: CustomerRepository<DB> + ?Sized,
    {
        let customer = self.find_customer(customers, customer_id).await?;
        Ok(self.validator.valid_transitions(customer.status))
    }

    /// Mark a customer deleted. Status and ledger stay untouched; `actor` is
    /// checked like a request actor and only logged.
    #[instrument(skip(self, customers))]
    pub async fn soft_delete_customer<C>(
        &self,
        customers: &C,
        customer_id: Uuid,
        actor: &str,
    ) -> ApiResult<CustomerModel>
    where
        C: CustomerRepository<DB> + ?Sized,
    {
        if actor.is_empty() {
            return Err(ApiError::ValidationError("actor must not be empty".to_string()));
        }
        if actor.chars().count() > ACTOR_MAX_CHARS {
            return Err(ApiError::ValidationError(format!(
                "actor is too long (max {ACTOR_MAX_CHARS} characters)"
            )));
        }

        let mut customer = customers
            .find_for_update(customer_id)
            .await?
            .filter(|c| !c.is_deleted())
            .ok_or_else(|| ApiError::customer_not_found(customer_id))?;

        let now = now();
        customer.deleted_at = Some(now);
        customer.updated_at = now;
        let customer = customers
            .update_batch(vec![customer])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::InvalidState("customer update returned nothing".to_string()))?;

        info!(status = %customer.status, %actor, "customer soft-deleted");
        Ok(customer)
    }

    /// A live (not soft-deleted) customer.
    pub async fn find_customer<C>(&self, customers: &C, customer_id: Uuid) -> ApiResult<CustomerModel>
    where
        C: CustomerRepository<DB> + ?Sized,
    {
        let customer = self.load_any(customers, customer_id).await?;
        if customer.is_deleted() {
            return Err(ApiError::customer_not_found(customer_id));
        }
        Ok(customer)
    }

    pub async fn list_by_status<C>(
        &self,
        customers: &C,
        status: CustomerStatus,
        page: PageRequest,
    ) -> ApiResult<Page<CustomerModel>>
    where
        C: CustomerRepository<DB> + ?Sized,
    {
        Ok(customers.find_by_status(status, page).await?)
    }

    /// Loads a customer whether or not it is soft-deleted. NotFound only if it never existed.
    async fn load_any<C>(&self, customers: &C, customer_id: Uuid) -> ApiResult<CustomerModel>
    where
        C: CustomerRepository<DB> + ?Sized,
    {
        FindById::<DB, CustomerModel>::find_by_id(customers, customer_id)
            .await?
            .ok_or_else(|| ApiError::customer_not_found(customer_id))
    }
}

/// Microsecond precision, matching what Postgres stores, so ledger hashes
/// survive a round trip.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
