//! Subscription-billing provider port
//!
//! The application talks to the external billing provider only through
//! [`BillingProvider`]; the Stripe implementation lives in
//! `infrastructure::billing`.

use async_trait::async_trait;

use crate::shared::errors::BillingError;

/// Parameters of a hosted subscription checkout.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    /// Echoed back by the provider so the session can be tied to the account
    pub client_reference_id: String,
    pub customer_email: Option<String>,
    /// May contain the provider's `{CHECKOUT_SESSION_ID}` placeholder
    pub success_url: String,
    pub cancel_url: String,
}

/// Provider-side status of a checkout session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStatus {
    Open,
    Complete,
    Expired,
    Unknown,
}

impl CheckoutStatus {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("open") => Self::Open,
            Some("complete") => Self::Complete,
            Some("expired") => Self::Expired,
            _ => Self::Unknown,
        }
    }
}

/// `cs_` followed by letters, digits and underscores, the shape of a
/// provider checkout session id.
pub fn is_checkout_session_id(id: &str) -> bool {
    id.strip_prefix("cs_").is_some_and(|rest| {
        !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}

#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub id: String,
    /// Hosted page to redirect the requester to (present while open)
    pub url: Option<String>,
    pub status: CheckoutStatus,
    pub customer_id: Option<String>,
    pub client_reference_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PortalSession {
    pub url: String,
}

/// External subscription-billing provider.
///
/// Calls are one-shot: implementations must not retry.
#[async_trait]
pub trait BillingProvider: Send + Sync {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, BillingError>;

    async fn retrieve_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSession, BillingError>;

    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<PortalSession, BillingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_session_id_shape() {
        assert!(is_checkout_session_id("cs_test_a1B2c3"));
        assert!(!is_checkout_session_id("cs_"));
        assert!(!is_checkout_session_id("sub_123"));
        assert!(!is_checkout_session_id("cs_1/../../customers"));
        assert!(!is_checkout_session_id("cs_1?expand=customer"));
    }
}
