//! Application layer: use-case services orchestrating the domain
//! repositories and the billing provider.

pub mod catalog;
pub mod engagement;
pub mod identity;
pub mod membership;

#[cfg(test)]
pub mod test_support;

pub use catalog::{CatalogService, RestaurantDetail, TopPage};
pub use engagement::{EngagementService, ReviewForm};
pub use identity::{AccountService, AuthResult, MyPage, NamedItem, SignupInput, TokenRevocations};
pub use membership::{Gated, MembershipService, PortalRedirect, ReservationForm, SettingsView};
