//! Account aggregate
//!
//! Contains the Account entity, its membership state, DTOs, and the
//! repository interface.

pub mod model;
pub mod repository;

mod dto;

pub use dto::{CreateAccountDto, UpdateProfileDto};
pub use model::{Account, MembershipState};
pub use repository::AccountRepository;
