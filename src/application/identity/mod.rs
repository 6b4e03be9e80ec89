//! Identity module: accounts & authentication
//!
//! Contains the `AccountService` which orchestrates signup, login/logout,
//! profile edits and the my-page aggregation.

pub mod revocation;
pub mod rules;
pub mod service;

pub use revocation::TokenRevocations;
pub use service::{AccountService, AuthResult, MyPage, NamedItem, SignupInput};
