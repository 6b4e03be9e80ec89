//! Repository provider for the domain layer
//!
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::account::AccountRepository;
use super::category::CategoryRepository;
use super::favorite::FavoriteRepository;
use super::reservation::ReservationRepository;
use super::restaurant::RestaurantRepository;
use super::review::ReviewRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let restaurant = repos.restaurants().find_by_id(7).await?;
///     let liked = repos.favorites().exists(account_id, 7).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn categories(&self) -> &dyn CategoryRepository;
    fn restaurants(&self) -> &dyn RestaurantRepository;
    fn accounts(&self) -> &dyn AccountRepository;
    fn reviews(&self) -> &dyn ReviewRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
    fn favorites(&self) -> &dyn FavoriteRepository;
}
