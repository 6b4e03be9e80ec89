//! SeaORM implementation of FavoriteRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::{db_err, is_unique_violation};
use crate::domain::favorite::{Favorite, FavoriteRepository, FavoriteToggle};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::favorite;

pub struct SeaOrmFavoriteRepository {
    db: DatabaseConnection,
}

impl SeaOrmFavoriteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: favorite::Model) -> Favorite {
    Favorite {
        id: m.id,
        restaurant_id: m.restaurant_id,
        account_id: m.account_id,
        created_at: m.created_at,
    }
}

/// A concurrent toggle of the same pair won the insert.
fn insert_err(e: DbErr) -> DomainError {
    if is_unique_violation(&e) {
        DomainError::Conflict("Favorite was changed concurrently; try again".to_string())
    } else {
        db_err(e)
    }
}

#[async_trait]
impl FavoriteRepository for SeaOrmFavoriteRepository {
    async fn exists(&self, account_id: i32, restaurant_id: i32) -> DomainResult<bool> {
        let count = favorite::Entity::find()
            .filter(favorite::Column::AccountId.eq(account_id))
            .filter(favorite::Column::RestaurantId.eq(restaurant_id))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn toggle(&self, account_id: i32, restaurant_id: i32) -> DomainResult<FavoriteToggle> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let existing = favorite::Entity::find()
            .filter(favorite::Column::AccountId.eq(account_id))
            .filter(favorite::Column::RestaurantId.eq(restaurant_id))
            .one(&txn)
            .await
            .map_err(db_err)?;

        let outcome = match existing {
            Some(model) => {
                favorite::Entity::delete_by_id(model.id)
                    .exec(&txn)
                    .await
                    .map_err(db_err)?;
                FavoriteToggle::Removed
            }
            None => {
                favorite::ActiveModel {
                    restaurant_id: Set(restaurant_id),
                    account_id: Set(account_id),
                    created_at: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(insert_err)?;
                FavoriteToggle::Added
            }
        };

        txn.commit().await.map_err(db_err)?;

        debug!(
            "Favorite account={} restaurant={} {}",
            account_id,
            restaurant_id,
            outcome.as_str()
        );
        Ok(outcome)
    }

    async fn list_for_account(&self, account_id: i32) -> DomainResult<Vec<Favorite>> {
        let models = favorite::Entity::find()
            .filter(favorite::Column::AccountId.eq(account_id))
            .order_by_desc(favorite::Column::CreatedAt)
            .order_by_desc(favorite::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
