//! Membership module: gated reservations and the billing bridge

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
