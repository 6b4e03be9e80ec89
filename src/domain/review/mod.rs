//! Review aggregate

pub mod model;
pub mod repository;

pub use model::{
    score_label, AuthoredReview, NewReview, Review, DEFAULT_SCORE, MAX_SCORE, MIN_SCORE,
};
pub use repository::ReviewRepository;
