//! Accounts module: signup, login/logout, profile, my page

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
