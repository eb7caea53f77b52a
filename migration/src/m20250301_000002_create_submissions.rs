use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Submissions::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Submissions::Name).string().not_null())
                    .col(ColumnDef::new(Submissions::Description).text().not_null())
                    .col(ColumnDef::new(Submissions::PhotoUrl).string().not_null())
                    .col(ColumnDef::new(Submissions::LocationCity).string().null())
                    .col(ColumnDef::new(Submissions::LocationState).string().null())
                    .col(ColumnDef::new(Submissions::Latitude).double().null())
                    .col(ColumnDef::new(Submissions::Longitude).double().null())
                    .col(ColumnDef::new(Submissions::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Dashboard lists newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_submissions_created_at")
                    .table(Submissions::Table)
                    .col(Submissions::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Submissions {
    Table,
    Id,
    Name,
    Description,
    PhotoUrl,
    LocationCity,
    LocationState,
    Latitude,
    Longitude,
    CreatedAt,
}
