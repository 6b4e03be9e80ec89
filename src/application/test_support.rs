//! Shared fixtures for service and router tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{
    Account, BillingProvider, CheckoutRequest, CheckoutSession, CheckoutStatus, CreateAccountDto,
    PortalSession, RepositoryProvider,
};
use crate::infrastructure::crypto::password::hash_password;
use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
use crate::infrastructure::database::test_support::{insert_category, insert_restaurant, setup_db};
use crate::shared::errors::BillingError;

pub const TEST_PASSWORD: &str = "s3cret-pass";

/// Migrated in-memory store holding one category and one restaurant.
pub async fn repos_with_shop() -> (Arc<dyn RepositoryProvider>, i32) {
    let db = setup_db().await;
    let cat = insert_category(&db, "Tonkatsu").await;
    let shop = insert_restaurant(&db, "Yabaton", "Osu, Naka-ku", cat, 1200, 0).await;
    (Arc::new(SeaOrmRepositoryProvider::new(db)), shop)
}

pub async fn member(repos: &Arc<dyn RepositoryProvider>, username: &str) -> Account {
    repos
        .accounts()
        .create(CreateAccountDto {
            username: username.into(),
            email: format!("{}@example.com", username),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            is_staff: false,
        })
        .await
        .unwrap()
}

pub async fn paid_member(repos: &Arc<dyn RepositoryProvider>) -> Account {
    let account = member(repos, "paid").await;
    repos.accounts().mark_paid(account.id, "cus_paid").await.unwrap();
    repos.accounts().find_by_id(account.id).await.unwrap().unwrap()
}

pub async fn staff(repos: &Arc<dyn RepositoryProvider>) -> Account {
    repos
        .accounts()
        .create(CreateAccountDto {
            username: "staff".into(),
            email: "staff@example.com".into(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            is_staff: true,
        })
        .await
        .unwrap()
}

/// Scripted billing provider.
#[derive(Default)]
pub struct FakeBilling {
    /// Session returned by `retrieve_checkout_session`; `None` means a
    /// provider failure.
    pub session: Mutex<Option<CheckoutSession>>,
    pub fail_checkout: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeBilling {
    pub fn completed(session_id: &str, account_id: i32, customer: &str) -> Self {
        Self {
            session: Mutex::new(Some(CheckoutSession {
                id: session_id.into(),
                url: None,
                status: CheckoutStatus::Complete,
                customer_id: Some(customer.into()),
                client_reference_id: Some(account_id.to_string()),
            })),
            ..Default::default()
        }
    }

    /// Script a completed session after construction.
    pub fn complete(&self, session_id: &str, account_id: i32, customer: &str) {
        let scripted = Self::completed(session_id, account_id, customer);
        *self.session.lock().unwrap() = scripted.session.into_inner().unwrap();
    }

    pub fn failing() -> Self {
        Self {
            fail_checkout: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl BillingProvider for FakeBilling {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, BillingError> {
        self.record(format!("checkout:{}", request.client_reference_id));
        if self.fail_checkout {
            return Err(BillingError::Provider("card network down".into()));
        }
        Ok(CheckoutSession {
            id: "cs_new".into(),
            url: Some("https://checkout.example/cs_new".into()),
            status: CheckoutStatus::Open,
            customer_id: None,
            client_reference_id: Some(request.client_reference_id.clone()),
        })
    }

    async fn retrieve_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSession, BillingError> {
        self.record(format!("retrieve:{}", session_id));
        self.session
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| BillingError::Provider("No such checkout.session".into()))
    }

    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<PortalSession, BillingError> {
        self.record(format!("portal:{}", customer_id));
        Ok(PortalSession {
            url: format!("https://portal.example/{}?return={}", customer_id, return_url),
        })
    }
}
