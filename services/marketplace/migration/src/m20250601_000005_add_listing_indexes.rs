use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Cars::Table)
                    .col(Cars::Available)
                    .col(Cars::CreatedAt)
                    .name("idx_cars_available_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Cars::Table)
                    .col(Cars::ProviderId)
                    .name("idx_cars_provider_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Bookings::Table)
                    .col(Bookings::UserId)
                    .col(Bookings::CreatedAt)
                    .name("idx_bookings_user_id_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Bookings::Table)
                    .col(Bookings::CarId)
                    .name("idx_bookings_car_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_bookings_car_id").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_bookings_user_id_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_cars_provider_id").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_cars_available_created_at")
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Cars {
    Table,
    Available,
    CreatedAt,
    ProviderId,
}

#[derive(Iden)]
enum Bookings {
    Table,
    UserId,
    CarId,
    CreatedAt,
}
