//! HTTP interface
//!
//! - `common`: response envelope, error mapping, validated JSON extractor
//! - `middleware`: login, staff and paid-member guards
//! - `modules`: route handlers and DTOs per feature
//! - `router`: route table with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, AppServices};
