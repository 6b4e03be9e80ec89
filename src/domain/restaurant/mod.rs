//! Restaurant aggregate
//!
//! Contains the Restaurant entity, the typed search predicates used by the
//! listing page, and the repository interface.

pub mod model;
pub mod repository;
pub mod search;

pub use model::{Restaurant, RestaurantInput};
pub use repository::RestaurantRepository;
pub use search::{RestaurantFilter, RestaurantOrder, RestaurantQuery};
