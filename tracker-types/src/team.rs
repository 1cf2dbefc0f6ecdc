use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's team. The system loads at most one per user; created on first
/// save of a non-empty name, then updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub owner_user_id: Uuid,
}

/// A roster entry. Name must be non-empty after trimming; uniqueness is not
/// enforced. Deleting a player does not remove historical shots recorded
/// under their name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub team_id: Uuid,
}
