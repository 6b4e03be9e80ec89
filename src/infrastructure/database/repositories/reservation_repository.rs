//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::db_err;
use crate::domain::reservation::{NewReservation, Reservation, ReservationRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::reservation;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> Reservation {
    Reservation {
        id: m.id,
        restaurant_id: m.restaurant_id,
        account_id: m.account_id,
        reservation_date: m.reservation_date,
        number_of_people: u32::try_from(m.number_of_people).unwrap_or_default(),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn create(&self, r: NewReservation) -> DomainResult<Reservation> {
        debug!(
            "Saving reservation: restaurant={} account={} at {}",
            r.restaurant_id, r.account_id, r.reservation_date
        );

        let number_of_people = i32::try_from(r.number_of_people).map_err(|_| {
            DomainError::Validation(format!(
                "number_of_people {} is too large",
                r.number_of_people
            ))
        })?;

        let now = Utc::now();
        let model = reservation::ActiveModel {
            restaurant_id: Set(r.restaurant_id),
            account_id: Set(r.account_id),
            reservation_date: Set(r.reservation_date),
            number_of_people: Set(number_of_people),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        Ok(model_to_domain(model))
    }

    async fn list_for_account(&self, account_id: i32) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::AccountId.eq(account_id))
            .order_by_desc(reservation::Column::ReservationDate)
            .order_by_desc(reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn count_for_restaurant(&self, restaurant_id: i32) -> DomainResult<u64> {
        reservation::Entity::find()
            .filter(reservation::Column::RestaurantId.eq(restaurant_id))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}
