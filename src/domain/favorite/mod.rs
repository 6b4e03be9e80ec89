//! Favorite aggregate

pub mod model;
pub mod repository;

pub use model::{Favorite, FavoriteToggle};
pub use repository::FavoriteRepository;
