//! Reservation aggregate
//!
//! Contains the Reservation entity and repository interface.

pub mod model;
pub mod repository;

pub use model::{NewReservation, Reservation, MAX_PARTY_SIZE};
pub use repository::ReservationRepository;
