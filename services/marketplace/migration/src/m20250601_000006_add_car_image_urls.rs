use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Cars::Table)
                    .add_column(
                        ColumnDef::new(Cars::ImageUrls)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .to_owned(),
            )
            .await?;
        // Listings created before the gallery keep their single photo.
        manager
            .get_connection()
            .execute_unprepared(
                "UPDATE cars SET image_urls = jsonb_build_array(image_url) \
                 WHERE image_url IS NOT NULL",
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Cars::Table)
                    .drop_column(Cars::ImageUrls)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Cars {
    Table,
    ImageUrls,
}
