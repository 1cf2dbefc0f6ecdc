use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Games::Name).string().not_null())
                    .col(ColumnDef::new(Games::Date).string().not_null())
                    .col(ColumnDef::new(Games::TeamId).uuid().not_null())
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_team_id")
                            .from(Games::Table, Games::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on team_id for game-list loading
        manager
            .create_index(
                Index::create()
                    .name("idx_games_team_id")
                    .table(Games::Table)
                    .col(Games::TeamId)
                    .to_owned(),
            )
            .await?;

        // Create index on created_at for most-recent-first ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_games_created_at")
                    .table(Games::Table)
                    .col(Games::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Games {
    Table,
    Id,
    Name,
    Date,
    TeamId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Teams {
    Table,
    Id,
}
