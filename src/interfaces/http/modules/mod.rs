pub mod accounts;
pub mod admin;
pub mod catalog;
pub mod engagement;
pub mod health;
pub mod membership;
pub mod metrics;
pub mod request_id;
