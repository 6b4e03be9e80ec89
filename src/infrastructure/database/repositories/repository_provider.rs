//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::account::AccountRepository;
use crate::domain::category::CategoryRepository;
use crate::domain::favorite::FavoriteRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::ReservationRepository;
use crate::domain::restaurant::RestaurantRepository;
use crate::domain::review::ReviewRepository;

use super::account_repository::SeaOrmAccountRepository;
use super::category_repository::SeaOrmCategoryRepository;
use super::favorite_repository::SeaOrmFavoriteRepository;
use super::reservation_repository::SeaOrmReservationRepository;
use super::restaurant_repository::SeaOrmRestaurantRepository;
use super::review_repository::SeaOrmReviewRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let shop = repos.restaurants().find_by_id(7).await?;
/// let reviews = repos.reviews().list_for_restaurant(7).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    categories: SeaOrmCategoryRepository,
    restaurants: SeaOrmRestaurantRepository,
    accounts: SeaOrmAccountRepository,
    reviews: SeaOrmReviewRepository,
    reservations: SeaOrmReservationRepository,
    favorites: SeaOrmFavoriteRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            categories: SeaOrmCategoryRepository::new(db.clone()),
            restaurants: SeaOrmRestaurantRepository::new(db.clone()),
            accounts: SeaOrmAccountRepository::new(db.clone()),
            reviews: SeaOrmReviewRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db.clone()),
            favorites: SeaOrmFavoriteRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn categories(&self) -> &dyn CategoryRepository {
        &self.categories
    }

    fn restaurants(&self) -> &dyn RestaurantRepository {
        &self.restaurants
    }

    fn accounts(&self) -> &dyn AccountRepository {
        &self.accounts
    }

    fn reviews(&self) -> &dyn ReviewRepository {
        &self.reviews
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn favorites(&self) -> &dyn FavoriteRepository {
        &self.favorites
    }
}
