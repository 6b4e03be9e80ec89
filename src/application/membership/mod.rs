//! Membership module: paid-member gate, reservations and the billing bridge

pub mod service;

pub use service::{
    Gated, MembershipService, PortalRedirect, ReservationForm, SettingsView,
    EARLIEST_RESERVATION_DATE,
};
