//! Favorite repository interface

use async_trait::async_trait;

use super::model::{Favorite, FavoriteToggle};
use crate::domain::DomainResult;

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    async fn exists(&self, account_id: i32, restaurant_id: i32) -> DomainResult<bool>;

    /// Create the favorite if absent, delete it if present, atomically.
    async fn toggle(&self, account_id: i32, restaurant_id: i32) -> DomainResult<FavoriteToggle>;

    /// Favorites of an account, newest first
    async fn list_for_account(&self, account_id: i32) -> DomainResult<Vec<Favorite>>;
}
