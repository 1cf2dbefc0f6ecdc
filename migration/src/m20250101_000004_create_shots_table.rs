use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Shots::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Shots::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Shots::Type).string().not_null())
                    .col(ColumnDef::new(Shots::Result).string().not_null())
                    .col(ColumnDef::new(Shots::PlayerName).string().not_null())
                    .col(ColumnDef::new(Shots::GameId).uuid().not_null())
                    .col(ColumnDef::new(Shots::Timestamp).big_integer().not_null())
                    .col(
                        ColumnDef::new(Shots::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shots_game_id")
                            .from(Shots::Table, Shots::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on game_id for the games-with-shots join fetch
        manager
            .create_index(
                Index::create()
                    .name("idx_shots_game_id")
                    .table(Shots::Table)
                    .col(Shots::GameId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Shots::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Shots {
    Table,
    Id,
    Type,
    Result,
    PlayerName,
    GameId,
    Timestamp,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Games {
    Table,
    Id,
}
