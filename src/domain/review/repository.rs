//! Review repository interface

use async_trait::async_trait;

use super::model::{AuthoredReview, NewReview, Review};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: NewReview) -> DomainResult<Review>;

    /// Reviews of a restaurant, newest first
    async fn list_for_restaurant(&self, restaurant_id: i32) -> DomainResult<Vec<AuthoredReview>>;

    /// Reviews written by an account, newest first
    async fn list_for_account(&self, account_id: i32) -> DomainResult<Vec<Review>>;
}
