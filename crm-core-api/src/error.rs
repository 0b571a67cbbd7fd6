use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Carries the validator's message verbatim.
    #[error("{0}")]
    InvalidTransition(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Storage failure: {0}")]
    StorageFailure(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
    pub fn customer_not_found(customer_id: Uuid) -> Self {
        ApiError::NotFound(format!("Customer {customer_id}"))
    }

    /// HTTP status the caller should surface for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::ValidationError(_) | ApiError::InvalidTransition(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::InvalidState(_) => 500,
            ApiError::StorageFailure(_) => 503,
        }
    }

    /// Only storage faults are transient. Business-rule rejections are permanent.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::StorageFailure(_))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(errors.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
