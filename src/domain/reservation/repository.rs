//! Reservation repository interface

use async_trait::async_trait;

use super::model::{NewReservation, Reservation};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Save a new reservation
    async fn create(&self, reservation: NewReservation) -> DomainResult<Reservation>;

    /// Reservations of an account, latest reservation date first
    async fn list_for_account(&self, account_id: i32) -> DomainResult<Vec<Reservation>>;

    /// Number of reservations for a restaurant
    async fn count_for_restaurant(&self, restaurant_id: i32) -> DomainResult<u64>;
}
