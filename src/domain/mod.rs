//! Domain layer: entities, query predicates and repository interfaces.
//!
//! Nothing in here knows about HTTP or SeaORM.

pub mod account;
pub mod billing;
pub mod category;
pub mod favorite;
pub mod repositories;
pub mod reservation;
pub mod restaurant;
pub mod review;

pub use account::{Account, AccountRepository, CreateAccountDto, MembershipState, UpdateProfileDto};
pub use billing::{is_checkout_session_id, BillingProvider, CheckoutRequest, CheckoutSession, CheckoutStatus, PortalSession};
pub use category::{Category, CategoryRepository};
pub use favorite::{Favorite, FavoriteRepository, FavoriteToggle};
pub use repositories::{DomainResult, RepositoryProvider};
pub use reservation::{NewReservation, Reservation, ReservationRepository};
pub use restaurant::{
    Restaurant, RestaurantFilter, RestaurantInput, RestaurantOrder, RestaurantQuery,
    RestaurantRepository,
};
pub use review::{AuthoredReview, NewReview, Review, ReviewRepository};

pub use crate::shared::errors::{BillingError, DomainError};
