use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shot::Shot;

/// A single game and its shot log.
///
/// `date` is the locale-formatted calendar date assigned at creation, kept
/// as a display string rather than a sortable timestamp. `shots` stays in
/// insertion order and is never reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    pub name: String,
    pub date: String,
    pub team_id: Uuid,
    pub shots: Vec<Shot>,
}
