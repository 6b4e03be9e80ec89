//! Admin module: staff-only catalog maintenance

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
