use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Storage(String),

    #[error(transparent)]
    Billing(#[from] BillingError),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Storage(e.to_string())
    }
}

/// Failures of the subscription-billing bridge.
///
/// Every variant leaves the account's membership flags untouched.
#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Billing provider is not configured")]
    NotConfigured,

    #[error("Billing provider error: {0}")]
    Provider(String),

    #[error("session_id is required")]
    MissingSessionId,

    #[error("Malformed checkout session id: {0}")]
    InvalidSessionId(String),

    #[error("Checkout session {0} is not complete")]
    SessionIncomplete(String),

    #[error("Checkout session {0} belongs to another account")]
    SessionMismatch(String),

    #[error("Checkout session {0} has no customer")]
    MissingCustomer(String),
}
