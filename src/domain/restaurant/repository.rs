//! Restaurant repository interface

use async_trait::async_trait;

use super::model::{Restaurant, RestaurantInput};
use super::search::RestaurantQuery;
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// One page of restaurants matching `query`, in the query's order.
    ///
    /// `total` is the number of matching rows across all pages.
    async fn search(
        &self,
        query: &RestaurantQuery,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Restaurant>>;

    /// Most recently created restaurants
    async fn newest(&self, limit: u64) -> DomainResult<Vec<Restaurant>>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Restaurant>>;

    async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Restaurant>>;

    async fn create(&self, input: RestaurantInput) -> DomainResult<Restaurant>;

    async fn update(&self, id: i32, input: RestaurantInput) -> DomainResult<Option<Restaurant>>;

    /// Deletes the restaurant together with its reviews, reservations and
    /// favorites. Returns `false` when nothing was deleted.
    async fn delete(&self, id: i32) -> DomainResult<bool>;
}
