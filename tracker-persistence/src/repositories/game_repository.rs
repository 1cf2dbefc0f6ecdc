use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::{games, prelude::*, shots};
use crate::repositories::shot_repository::model_to_shot;
use tracker_types::Game;

pub struct GameRepository {
    db: DatabaseConnection,
}

impl GameRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, team_id: Uuid, name: &str, date: &str) -> Result<Game> {
        let game_model = games::ActiveModel {
            id: sea_orm::ActiveValue::Set(Uuid::new_v4()),
            name: sea_orm::ActiveValue::Set(name.to_string()),
            date: sea_orm::ActiveValue::Set(date.to_string()),
            team_id: sea_orm::ActiveValue::Set(team_id),
            created_at: sea_orm::ActiveValue::Set(chrono::Utc::now().into()),
        };

        let saved_model = Games::insert(game_model).exec(&self.db).await?;

        let created_game = Games::find_by_id(saved_model.last_insert_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created game"))?;

        Ok(Game {
            id: created_game.id,
            name: created_game.name,
            date: created_game.date,
            team_id: created_game.team_id,
            shots: Vec::new(),
        })
    }

    /// The join fetch backing session loading: every game of the team with
    /// its nested shot log, most recent game first, shots in insertion
    /// order.
    pub async fn find_by_team_with_shots(&self, team_id: Uuid) -> Result<Vec<Game>> {
        let rows = Games::find()
            .filter(games::Column::TeamId.eq(team_id))
            .find_with_related(Shots)
            .order_by_desc(games::Column::CreatedAt)
            .order_by_asc(games::Column::Id)
            .order_by_asc(shots::Column::Timestamp)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(game, shot_models)| {
                let shots = shot_models
                    .into_iter()
                    .map(model_to_shot)
                    .collect::<Result<Vec<_>>>()?;

                Ok(Game {
                    id: game.id,
                    name: game.name,
                    date: game.date,
                    team_id: game.team_id,
                    shots,
                })
            })
            .collect()
    }
}
