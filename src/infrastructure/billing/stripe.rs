//! Stripe adapter over the REST API (form-encoded requests, no SDK).

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use urlencoding::encode;

use crate::domain::{
    is_checkout_session_id, BillingProvider, CheckoutRequest, CheckoutSession, CheckoutStatus,
    PortalSession,
};
use crate::shared::errors::BillingError;

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    /// Recurring price of the paid membership
    pub price_id: String,
    pub api_base: String,
    pub request_timeout: Duration,
}

impl StripeConfig {
    pub fn is_configured(&self) -> bool {
        !self.secret_key.is_empty() && !self.price_id.is_empty()
    }
}

pub struct StripeClient {
    http: reqwest::Client,
    config: StripeConfig,
}

impl StripeClient {
    pub fn new(config: StripeConfig) -> Result<Self, BillingError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| BillingError::Provider(e.to_string()))?;
        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.config.api_base.trim_end_matches('/'), path)
    }

    fn ensure_configured(&self) -> Result<(), BillingError> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(BillingError::NotConfigured)
        }
    }

    async fn read<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, BillingError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BillingError::Provider(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<StripeErrorBody>(&body)
                .ok()
                .and_then(|b| b.error.message)
                .unwrap_or_else(|| format!("HTTP {}", status));
            warn!("Stripe request failed ({}): {}", status, message);
            return Err(BillingError::Provider(message));
        }

        serde_json::from_str(&body).map_err(|e| BillingError::Provider(format!("Unexpected response: {}", e)))
    }
}

// ── Wire types ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
    url: Option<String>,
    status: Option<String>,
    customer: Option<String>,
    client_reference_id: Option<String>,
}

impl From<SessionResponse> for CheckoutSession {
    fn from(r: SessionResponse) -> Self {
        Self {
            id: r.id,
            url: r.url,
            status: CheckoutStatus::parse(r.status.as_deref()),
            customer_id: r.customer,
            client_reference_id: r.client_reference_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PortalResponse {
    url: String,
}

// ── BillingProvider impl ────────────────────────────────────────

#[async_trait]
impl BillingProvider for StripeClient {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, BillingError> {
        self.ensure_configured()?;
        debug!("Creating Stripe checkout session for {}", request.client_reference_id);

        let mut form = vec![
            ("mode", "subscription"),
            ("line_items[0][price]", self.config.price_id.as_str()),
            ("line_items[0][quantity]", "1"),
            ("client_reference_id", request.client_reference_id.as_str()),
            ("success_url", request.success_url.as_str()),
            ("cancel_url", request.cancel_url.as_str()),
        ];
        if let Some(email) = request.customer_email.as_deref() {
            form.push(("customer_email", email));
        }

        let response = self
            .http
            .post(self.url("checkout/sessions"))
            .basic_auth(&self.config.secret_key, None::<&str>)
            .form(&form)
            .send()
            .await
            .map_err(|e| BillingError::Provider(e.to_string()))?;

        let session: SessionResponse = self.read(response).await?;
        Ok(session.into())
    }

    async fn retrieve_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSession, BillingError> {
        self.ensure_configured()?;
        if !is_checkout_session_id(session_id) {
            return Err(BillingError::InvalidSessionId(session_id.to_string()));
        }
        debug!("Retrieving Stripe checkout session {}", session_id);

        let response = self
            .http
            .get(self.url(&format!("checkout/sessions/{}", encode(session_id))))
            .basic_auth(&self.config.secret_key, None::<&str>)
            .send()
            .await
            .map_err(|e| BillingError::Provider(e.to_string()))?;

        let session: SessionResponse = self.read(response).await?;
        Ok(session.into())
    }

    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<PortalSession, BillingError> {
        self.ensure_configured()?;
        debug!("Creating Stripe billing portal session for {}", customer_id);

        let response = self
            .http
            .post(self.url("billing_portal/sessions"))
            .basic_auth(&self.config.secret_key, None::<&str>)
            .form(&[("customer", customer_id), ("return_url", return_url)])
            .send()
            .await
            .map_err(|e| BillingError::Provider(e.to_string()))?;

        let portal: PortalResponse = self.read(response).await?;
        Ok(PortalSession { url: portal.url })
    }
}
