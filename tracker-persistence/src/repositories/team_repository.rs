use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};
use uuid::Uuid;

use crate::entities::{prelude::*, teams};
use tracker_types::Team;

pub struct TeamRepository {
    db: DatabaseConnection,
}

impl TeamRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_team(model: teams::Model) -> Team {
        Team {
            id: model.id,
            name: model.name,
            owner_user_id: model.owner_user_id,
        }
    }

    /// The one-team-per-user lookup: at most one row is ever read.
    pub async fn find_by_owner(&self, owner_user_id: Uuid) -> Result<Option<Team>> {
        let team_model = Teams::find()
            .filter(teams::Column::OwnerUserId.eq(owner_user_id))
            .limit(1)
            .one(&self.db)
            .await?;

        Ok(team_model.map(Self::model_to_team))
    }

    pub async fn create(&self, owner_user_id: Uuid, name: &str) -> Result<Team> {
        let now: chrono::DateTime<chrono::FixedOffset> = chrono::Utc::now().into();

        let team_model = teams::ActiveModel {
            id: sea_orm::ActiveValue::Set(Uuid::new_v4()),
            name: sea_orm::ActiveValue::Set(name.to_string()),
            owner_user_id: sea_orm::ActiveValue::Set(owner_user_id),
            created_at: sea_orm::ActiveValue::Set(now),
            updated_at: sea_orm::ActiveValue::Set(now),
        };

        let saved_model = Teams::insert(team_model).exec(&self.db).await?;

        // Fetch the created row so callers get the store-assigned id back
        let created_team = Teams::find_by_id(saved_model.last_insert_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created team"))?;

        Ok(Self::model_to_team(created_team))
    }

    pub async fn update_name(&self, id: Uuid, name: &str) -> Result<()> {
        let team = Teams::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Team not found"))?;

        let updated_team = teams::ActiveModel {
            id: sea_orm::ActiveValue::Unchanged(team.id),
            name: sea_orm::ActiveValue::Set(name.to_string()),
            owner_user_id: sea_orm::ActiveValue::Unchanged(team.owner_user_id),
            created_at: sea_orm::ActiveValue::Unchanged(team.created_at),
            updated_at: sea_orm::ActiveValue::Set(chrono::Utc::now().into()),
        };

        Teams::update(updated_team).exec(&self.db).await?;
        Ok(())
    }
}
