//! Billing provider adapters

pub mod stripe;

pub use stripe::{StripeClient, StripeConfig};
