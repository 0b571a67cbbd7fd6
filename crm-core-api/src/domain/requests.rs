use serde::{Deserialize, Serialize};
use validator::Validate;

use super::customer_status::CustomerStatus;

/// Input for creating a customer together with its first ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub company: Option<String>,
    pub initial_status: CustomerStatus,
    #[validate(length(max = 500))]
    pub reason: Option<String>,
    /// Derived from the authenticated principal by the caller.
    #[validate(length(min = 1, max = 100))]
    pub actor: String,
}

/// Input for a single status change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TransitionStatusRequest {
    pub to: CustomerStatus,
    #[validate(length(max = 500))]
    pub reason: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub actor: String,
}

impl TransitionStatusRequest {
    pub fn new(to: CustomerStatus, reason: Option<&str>, actor: &str) -> Self {
        Self {
            to,
            reason: reason.map(str::to_owned),
            actor: actor.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateCustomerRequest {
        CreateCustomerRequest {
            name: "Acme Ltd".to_string(),
            email: Some("contact@acme.test".to_string()),
            phone: None,
            company: Some("Acme".to_string()),
            initial_status: CustomerStatus::New,
            reason: None,
            actor: "agent1".to_string(),
        }
    }

    #[test]
    fn test_valid_create_request() {
        assert!(create_request().validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_bad_email_and_empty_name() {
        let mut request = create_request();
        request.email = Some("not-an-email".to_string());
        request.name = String::new();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("name"));
    }

    #[test]
    fn test_transition_request_requires_actor() {
        let request = TransitionStatusRequest::new(CustomerStatus::Notified, Some("called"), "");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_transition_request_reason_limit() {
        let long_reason = "x".repeat(501);
        let request =
            TransitionStatusRequest::new(CustomerStatus::Notified, Some(&long_reason), "agent1");
        assert!(request.validate().is_err());

        let request = TransitionStatusRequest::new(CustomerStatus::Notified, None, "agent1");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_transition_request_from_json() {
        let request: TransitionStatusRequest =
            serde_json::from_str(r#"{"to":"SUBMITTED","reason":"docs in","actor":"agent1"}"#)
                .unwrap();
        assert_eq!(request.to, CustomerStatus::Submitted);
        assert_eq!(request.reason.as_deref(), Some("docs in"));
    }
}
