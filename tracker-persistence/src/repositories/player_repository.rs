use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::{players, prelude::*};
use tracker_types::Player;

pub struct PlayerRepository {
    db: DatabaseConnection,
}

impl PlayerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_player(model: players::Model) -> Player {
        Player {
            id: model.id,
            name: model.name,
            team_id: model.team_id,
        }
    }

    /// Roster in insertion order.
    pub async fn find_by_team(&self, team_id: Uuid) -> Result<Vec<Player>> {
        let player_models = Players::find()
            .filter(players::Column::TeamId.eq(team_id))
            .order_by_asc(players::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(player_models
            .into_iter()
            .map(Self::model_to_player)
            .collect())
    }

    pub async fn create(&self, team_id: Uuid, name: &str) -> Result<Player> {
        let player_model = players::ActiveModel {
            id: sea_orm::ActiveValue::Set(Uuid::new_v4()),
            name: sea_orm::ActiveValue::Set(name.to_string()),
            team_id: sea_orm::ActiveValue::Set(team_id),
            created_at: sea_orm::ActiveValue::Set(chrono::Utc::now().into()),
        };

        let saved_model = Players::insert(player_model).exec(&self.db).await?;

        let created_player = Players::find_by_id(saved_model.last_insert_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created player"))?;

        Ok(Self::model_to_player(created_player))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        Players::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
