//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_categories;
mod m20240101_000002_create_restaurants;
mod m20240101_000003_create_accounts;
mod m20240101_000004_create_reviews;
mod m20240101_000005_create_reservations;
mod m20240101_000006_create_favorites;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_categories::Migration),
            Box::new(m20240101_000002_create_restaurants::Migration),
            Box::new(m20240101_000003_create_accounts::Migration),
            Box::new(m20240101_000004_create_reviews::Migration),
            Box::new(m20240101_000005_create_reservations::Migration),
            Box::new(m20240101_000006_create_favorites::Migration),
        ]
    }
}
