use async_trait::async_trait;

use super::{Account, CreateAccountDto, UpdateProfileDto};
use crate::domain::DomainResult;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Fails with `DomainError::Conflict` when the username is taken.
    async fn create(&self, dto: CreateAccountDto) -> DomainResult<Account>;

    async fn count(&self) -> DomainResult<u64>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Account>>;
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<Account>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>>;

    /// Returns `None` when the account does not exist.
    async fn update_profile(&self, id: i32, dto: UpdateProfileDto) -> DomainResult<Option<Account>>;

    async fn record_login(&self, id: i32) -> DomainResult<()>;

    /// Record (or clear) the checkout session awaiting confirmation.
    async fn set_checkout_session(&self, id: i32, session_id: Option<&str>) -> DomainResult<()>;

    /// Flip the account to paid, store the provider customer id and clear
    /// any pending checkout session.
    async fn mark_paid(&self, id: i32, customer_id: &str) -> DomainResult<()>;
}
