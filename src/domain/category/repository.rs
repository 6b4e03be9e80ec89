//! Category repository interface

use async_trait::async_trait;

use super::model::Category;
use crate::domain::DomainResult;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories, alphabetical.
    async fn list_all(&self) -> DomainResult<Vec<Category>>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Category>>;

    async fn create(&self, name: &str) -> DomainResult<Category>;

    /// Returns `None` when the category does not exist.
    async fn update(&self, id: i32, name: &str) -> DomainResult<Option<Category>>;

    /// Deletes the category and, by cascade, its restaurants.
    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: i32) -> DomainResult<bool>;
}
