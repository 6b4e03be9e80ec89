//! Category aggregate

pub mod model;
pub mod repository;

pub use model::Category;
pub use repository::CategoryRepository;
