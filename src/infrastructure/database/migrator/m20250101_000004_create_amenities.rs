//! Create amenities table

use sea_orm_migration::prelude::*;

use super::m20250101_000002_create_hotels::Hotels;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Amenities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Amenities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Amenities::HotelId).integer().not_null())
                    .col(ColumnDef::new(Amenities::Name).string().not_null())
                    .col(ColumnDef::new(Amenities::Description).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_amenities_hotel")
                            .from(Amenities::Table, Amenities::HotelId)
                            .to(Hotels::Table, Hotels::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Amenities::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Amenities {
    Table,
    Id,
    HotelId,
    Name,
    Description,
}
