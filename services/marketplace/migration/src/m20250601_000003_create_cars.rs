use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cars::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cars::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Cars::ProviderId).uuid().not_null())
                    .col(ColumnDef::new(Cars::Name).string().not_null())
                    .col(ColumnDef::new(Cars::Brand).string().not_null())
                    .col(ColumnDef::new(Cars::Model).string().not_null())
                    .col(ColumnDef::new(Cars::Year).integer().not_null())
                    .col(ColumnDef::new(Cars::PricePerDay).double().not_null())
                    .col(
                        ColumnDef::new(Cars::InsurancePerDay)
                            .double()
                            .not_null()
                            .default(15.0),
                    )
                    .col(ColumnDef::new(Cars::CarType).string().not_null())
                    .col(ColumnDef::new(Cars::Transmission).string().not_null())
                    .col(ColumnDef::new(Cars::FuelType).string().not_null())
                    .col(ColumnDef::new(Cars::Seats).integer().not_null())
                    .col(ColumnDef::new(Cars::Luggage).integer().not_null().default(0))
                    .col(ColumnDef::new(Cars::Location).string().not_null())
                    .col(
                        ColumnDef::new(Cars::Features)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(ColumnDef::new(Cars::Description).text())
                    .col(ColumnDef::new(Cars::MileagePolicy).string())
                    .col(ColumnDef::new(Cars::ImageUrl).string())
                    .col(
                        ColumnDef::new(Cars::Available)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Cars::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Cars::Table, Cars::ProviderId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cars::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Cars {
    Table,
    Id,
    ProviderId,
    Name,
    Brand,
    Model,
    Year,
    PricePerDay,
    InsurancePerDay,
    CarType,
    Transmission,
    FuelType,
    Seats,
    Luggage,
    Location,
    Features,
    Description,
    MileagePolicy,
    ImageUrl,
    Available,
    CreatedAt,
}

#[derive(Iden)]
enum Profiles {
    Table,
    Id,
}
