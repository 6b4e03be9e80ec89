//! Infrastructure layer - external concerns

pub mod billing;
pub mod crypto;
pub mod database;

pub use billing::{StripeClient, StripeConfig};
pub use database::{init_database, DatabaseConfig, PoolConfig};
