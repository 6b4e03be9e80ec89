//! # Dining service
//!
//! Restaurant directory with search, reviews and favorites, member accounts,
//! and reservations reserved for paid members (subscription billing through
//! Stripe).
//!
//! ## Architecture
//!
//! - **domain**: entities, search predicates, repository and billing ports
//! - **application**: use-case services (catalog, engagement, identity, membership)
//! - **infrastructure**: SeaORM persistence, JWT/bcrypt, Stripe client
//! - **interfaces**: axum HTTP API with Swagger documentation
//! - **server**: process lifecycle shared by the CLI

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use infrastructure::{init_database, DatabaseConfig};
pub use interfaces::http::create_api_router;
