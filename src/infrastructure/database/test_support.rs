//! Fixtures for tests that need a migrated database.

use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;

use super::entities::{category, restaurant};
use super::migrator::Migrator;
use super::{init_database, DatabaseConfig};

pub async fn setup_db() -> DatabaseConnection {
    let db = init_database(&DatabaseConfig::in_memory())
        .await
        .expect("connect in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub async fn insert_category(db: &DatabaseConnection, name: &str) -> i32 {
    let now = Utc::now();
    category::ActiveModel {
        name: Set(name.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert category")
    .id
}

/// Inserts a restaurant whose `created_at` is `age_secs` seconds in the past.
pub async fn insert_restaurant(
    db: &DatabaseConnection,
    name: &str,
    address: &str,
    category_id: i32,
    price_lower: i64,
    age_secs: i64,
) -> i32 {
    let created = Utc::now() - Duration::seconds(age_secs);
    restaurant::ActiveModel {
        name: Set(name.to_string()),
        image: Set(None),
        description: Set(format!("{} description", name)),
        price_lower: Set(price_lower),
        price_upper: Set(price_lower + 1000),
        opening_time: Set("11:00-22:00".to_string()),
        closing_day: Set("Monday".to_string()),
        address: Set(address.to_string()),
        phone_number: Set("052-000-0000".to_string()),
        category_id: Set(category_id),
        created_at: Set(created),
        updated_at: Set(created),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert restaurant")
    .id
}
