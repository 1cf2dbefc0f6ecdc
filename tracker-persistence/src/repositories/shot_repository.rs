use anyhow::Result;
use sea_orm::DatabaseConnection;
use sea_orm::EntityTrait;
use uuid::Uuid;

use crate::entities::{prelude::*, shots};
use tracker_types::{Shot, ShotResult, ShotType};

/// Parses the wire strings back into the domain enums. A corrupted row
/// surfaces as an error, never a panic.
pub(crate) fn model_to_shot(model: shots::Model) -> Result<Shot> {
    Ok(Shot {
        id: model.id,
        shot_type: model
            .shot_type
            .parse::<ShotType>()
            .map_err(|e| anyhow::anyhow!(e))?,
        result: model
            .result
            .parse::<ShotResult>()
            .map_err(|e| anyhow::anyhow!(e))?,
        player_name: model.player_name,
        game_id: model.game_id,
        timestamp: model.timestamp,
    })
}

pub struct ShotRepository {
    db: DatabaseConnection,
}

impl ShotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        game_id: Uuid,
        shot_type: ShotType,
        result: ShotResult,
        player_name: &str,
        timestamp: i64,
    ) -> Result<Shot> {
        let shot_model = shots::ActiveModel {
            id: sea_orm::ActiveValue::Set(Uuid::new_v4()),
            shot_type: sea_orm::ActiveValue::Set(shot_type.as_str().to_string()),
            result: sea_orm::ActiveValue::Set(result.as_str().to_string()),
            player_name: sea_orm::ActiveValue::Set(player_name.to_string()),
            game_id: sea_orm::ActiveValue::Set(game_id),
            timestamp: sea_orm::ActiveValue::Set(timestamp),
            created_at: sea_orm::ActiveValue::Set(chrono::Utc::now().into()),
        };

        let saved_model = Shots::insert(shot_model).exec(&self.db).await?;

        let created_shot = Shots::find_by_id(saved_model.last_insert_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created shot"))?;

        model_to_shot(created_shot)
    }
}
