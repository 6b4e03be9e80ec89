//! Create restaurants table
//!
//! Restaurants belong to a category and are removed with it.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_categories::Categories;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Restaurants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Restaurants::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Restaurants::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Restaurants::Image).string())
                    .col(ColumnDef::new(Restaurants::Description).text().not_null())
                    .col(
                        ColumnDef::new(Restaurants::PriceLower)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Restaurants::PriceUpper)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Restaurants::OpeningTime)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Restaurants::ClosingDay)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Restaurants::Address).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Restaurants::PhoneNumber)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Restaurants::CategoryId).integer().not_null())
                    .col(
                        ColumnDef::new(Restaurants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Restaurants::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_restaurants_category")
                            .from(Restaurants::Table, Restaurants::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_restaurants_category")
                    .table(Restaurants::Table)
                    .col(Restaurants::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_restaurants_price_lower")
                    .table(Restaurants::Table)
                    .col(Restaurants::PriceLower)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_restaurants_created_at")
                    .table(Restaurants::Table)
                    .col(Restaurants::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Restaurants::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Restaurants {
    Table,
    Id,
    Name,
    Image,
    Description,
    PriceLower,
    PriceUpper,
    OpeningTime,
    ClosingDay,
    Address,
    PhoneNumber,
    CategoryId,
    CreatedAt,
    UpdatedAt,
}
