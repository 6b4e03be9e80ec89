//! Membership service
//!
//! Owns the paid-member capability check, reservation creation behind it,
//! and the three billing-provider interactions (checkout, confirmation,
//! portal). Every provider failure leaves the account untouched.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{error, info, warn};

use crate::domain::{
    is_checkout_session_id, Account, BillingError, BillingProvider, CheckoutRequest,
    CheckoutStatus, DomainError, DomainResult, MembershipState, NewReservation, RepositoryProvider, Reservation, Restaurant,
};

/// Reservations cannot be dated before this day.
pub const EARLIEST_RESERVATION_DATE: (i32, u32, u32) = (2023, 1, 1);

/// Result of an action behind the paid-member gate.
#[derive(Debug, Clone, PartialEq)]
pub enum Gated<T> {
    Allowed(T),
    /// The requester is not a paid member; nothing happened.
    MembershipRequired,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReservationForm {
    pub restaurant: Restaurant,
    pub earliest_date: NaiveDate,
    pub min_people: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsView {
    pub is_paid: bool,
    pub state: MembershipState,
    pub has_billing_customer: bool,
}

/// Where the portal request should send the requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortalRedirect {
    Provider(String),
    /// No billing customer recorded; back to the settings page.
    Settings,
}

pub struct MembershipService {
    repos: Arc<dyn RepositoryProvider>,
    billing: Arc<dyn BillingProvider>,
    public_url: String,
}

fn earliest_date() -> NaiveDate {
    let (y, m, d) = EARLIEST_RESERVATION_DATE;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

impl MembershipService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        billing: Arc<dyn BillingProvider>,
        public_url: impl Into<String>,
    ) -> Self {
        Self {
            repos,
            billing,
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn account(&self, account_id: i32) -> DomainResult<Account> {
        self.repos
            .accounts()
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Account", account_id))
    }

    async fn restaurant(&self, id: i32) -> DomainResult<Restaurant> {
        self.repos
            .restaurants()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Restaurant", id))
    }

    // ── Gate ────────────────────────────────────────────────────

    /// Whether the stored account currently holds a paid membership.
    pub async fn is_paid_member(&self, account_id: i32) -> DomainResult<bool> {
        Ok(self.account(account_id).await?.is_paid)
    }

    // ── Reservations ────────────────────────────────────────────

    pub async fn reservation_form(
        &self,
        account_id: i32,
        restaurant_id: i32,
    ) -> DomainResult<Gated<ReservationForm>> {
        if !self.is_paid_member(account_id).await? {
            return Ok(Gated::MembershipRequired);
        }
        Ok(Gated::Allowed(ReservationForm {
            restaurant: self.restaurant(restaurant_id).await?,
            earliest_date: earliest_date(),
            min_people: 1,
        }))
    }

    pub async fn create_reservation(
        &self,
        account_id: i32,
        restaurant_id: i32,
        reservation_date: DateTime<Utc>,
        number_of_people: u32,
    ) -> DomainResult<Gated<Reservation>> {
        if !self.is_paid_member(account_id).await? {
            info!(account_id, "Reservation refused: membership required");
            return Ok(Gated::MembershipRequired);
        }

        self.restaurant(restaurant_id).await?;

        let new = NewReservation {
            restaurant_id,
            account_id,
            reservation_date,
            number_of_people,
        };
        new.validate()?;
        if reservation_date.date_naive() < earliest_date() {
            return Err(DomainError::Validation(format!(
                "reservation_date must not be before {}",
                earliest_date()
            )));
        }

        let reservation = self.repos.reservations().create(new).await?;
        info!(reservation_id = reservation.id, restaurant_id, account_id, "Reservation created");
        Ok(Gated::Allowed(reservation))
    }

    // ── Billing bridge ──────────────────────────────────────────

    pub async fn settings(&self, account_id: i32) -> DomainResult<SettingsView> {
        let account = self.account(account_id).await?;
        Ok(SettingsView {
            is_paid: account.is_paid,
            state: account.membership_state(),
            has_billing_customer: account.has_billing_customer(),
        })
    }

    /// Start a subscription checkout and return the hosted page URL.
    pub async fn start_checkout(&self, account_id: i32) -> DomainResult<String> {
        let account = self.account(account_id).await?;

        let request = CheckoutRequest {
            client_reference_id: account.id.to_string(),
            customer_email: Some(account.email.clone()),
            success_url: format!("{}/success?session_id={{CHECKOUT_SESSION_ID}}", self.public_url),
            cancel_url: format!("{}/settings", self.public_url),
        };

        let session = match self.billing.create_checkout_session(&request).await {
            Ok(session) => session,
            Err(e) => {
                error!(account_id, "Checkout session creation failed: {}", e);
                metrics::counter!("billing_checkout_sessions_total", "result" => "error").increment(1);
                return Err(e.into());
            }
        };

        let Some(url) = session.url.clone() else {
            metrics::counter!("billing_checkout_sessions_total", "result" => "error").increment(1);
            return Err(BillingError::Provider(format!(
                "checkout session {} has no redirect URL",
                session.id
            ))
            .into());
        };

        self.repos
            .accounts()
            .set_checkout_session(account.id, Some(&session.id))
            .await?;

        metrics::counter!("billing_checkout_sessions_total", "result" => "created").increment(1);
        info!(account_id, session_id = %session.id, "Checkout session created");
        Ok(url)
    }

    /// Confirm a finished checkout and flip the account to paid.
    ///
    /// The session must be complete, issued for this account and carry a
    /// customer; otherwise a typed error is returned and nothing changes.
    pub async fn confirm_checkout(
        &self,
        account_id: i32,
        session_id: Option<&str>,
    ) -> DomainResult<Account> {
        let outcome = self.try_confirm(account_id, session_id).await;
        let label = match &outcome {
            Ok(_) => "paid",
            Err(DomainError::Billing(BillingError::Provider(_))) => "provider_error",
            Err(DomainError::Billing(BillingError::SessionIncomplete(_))) => "incomplete",
            Err(DomainError::Billing(BillingError::SessionMismatch(_))) => "mismatch",
            Err(_) => "rejected",
        };
        metrics::counter!("billing_confirmations_total", "outcome" => label).increment(1);
        outcome
    }

    async fn try_confirm(&self, account_id: i32, session_id: Option<&str>) -> DomainResult<Account> {
        let session_id = session_id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(BillingError::MissingSessionId)?;
        if !is_checkout_session_id(session_id) {
            return Err(BillingError::InvalidSessionId(session_id.to_string()).into());
        }

        let account = self.account(account_id).await?;

        let session = match self.billing.retrieve_checkout_session(session_id).await {
            Ok(session) => session,
            Err(e) => {
                error!(account_id, session_id, "Checkout session lookup failed: {}", e);
                return Err(e.into());
            }
        };

        if session.status != CheckoutStatus::Complete {
            warn!(account_id, session_id, status = ?session.status, "Checkout session not complete");
            return Err(BillingError::SessionIncomplete(session.id).into());
        }

        if session.client_reference_id.as_deref() != Some(account.id.to_string().as_str()) {
            warn!(account_id, session_id, "Checkout session issued for another account");
            return Err(BillingError::SessionMismatch(session.id).into());
        }

        let Some(customer_id) = session.customer_id.filter(|c| !c.is_empty()) else {
            return Err(BillingError::MissingCustomer(session.id).into());
        };

        if account.is_paid && account.billing_customer_id.as_deref() == Some(customer_id.as_str()) {
            return Ok(account);
        }

        self.repos.accounts().mark_paid(account.id, &customer_id).await?;
        info!(account_id, customer_id = %customer_id, "Paid membership activated");
        self.account(account_id).await
    }

    /// Open the billing portal for the requester's customer.
    pub async fn portal(&self, account_id: i32) -> DomainResult<PortalRedirect> {
        let account = self.account(account_id).await?;
        let Some(customer_id) = account.billing_customer_id.as_deref().filter(|c| !c.is_empty())
        else {
            return Ok(PortalRedirect::Settings);
        };

        let return_url = format!("{}/settings", self.public_url);
        match self.billing.create_portal_session(customer_id, &return_url).await {
            Ok(portal) => Ok(PortalRedirect::Provider(portal.url)),
            Err(e) => {
                error!(account_id, "Billing portal session failed: {}", e);
                Err(e.into())
            }
        }
    }
}
