//! Catalog module: top page, search/list, detail and staff administration

pub mod service;

pub use service::{CatalogService, RestaurantDetail, TopPage, TOP_PAGE_NEWEST};
