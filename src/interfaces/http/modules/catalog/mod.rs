//! Catalog module: top page, search listing, restaurant detail

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
