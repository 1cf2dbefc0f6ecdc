use serde::{Deserialize, Serialize};

use tracker_types::{ShotResult, ShotType};

/// The shot-entry wizard: a strict linear sequence of selections.
///
/// Every path to a recorded shot passes through type, result and player in
/// that order; confirmation is only reachable from `PlayerChosen`. Invalid
/// transitions are silent no-ops, mirroring the validation-rejection policy
/// for the rest of the system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ShotEntry {
    #[default]
    Idle,
    TypeChosen {
        #[serde(rename = "type")]
        shot_type: ShotType,
    },
    ResultChosen {
        #[serde(rename = "type")]
        shot_type: ShotType,
        result: ShotResult,
    },
    PlayerChosen {
        #[serde(rename = "type")]
        shot_type: ShotType,
        result: ShotResult,
        player: String,
    },
}

impl ShotEntry {
    pub fn new() -> Self {
        ShotEntry::Idle
    }

    pub fn choose_type(&mut self, shot_type: ShotType) {
        if matches!(self, ShotEntry::Idle) {
            *self = ShotEntry::TypeChosen { shot_type };
        }
    }

    pub fn choose_result(&mut self, result: ShotResult) {
        if let ShotEntry::TypeChosen { shot_type } = *self {
            *self = ShotEntry::ResultChosen { shot_type, result };
        }
    }

    pub fn choose_player(&mut self, player: impl Into<String>) {
        if let ShotEntry::ResultChosen { shot_type, result } = *self {
            *self = ShotEntry::PlayerChosen {
                shot_type,
                result,
                player: player.into(),
            };
        }
    }

    /// Discard the most recent selection: the result while awaiting a
    /// player, or the type while awaiting a result.
    pub fn back(&mut self) {
        match self {
            ShotEntry::TypeChosen { .. } => *self = ShotEntry::Idle,
            ShotEntry::ResultChosen { shot_type, .. } => {
                *self = ShotEntry::TypeChosen {
                    shot_type: *shot_type,
                }
            }
            ShotEntry::Idle | ShotEntry::PlayerChosen { .. } => {}
        }
    }

    /// Abandon the entry and clear all selections.
    pub fn cancel(&mut self) {
        *self = ShotEntry::Idle;
    }

    /// Complete the entry: yields the full selection and resets to idle.
    /// Returns `None` (and stays put) unless all three choices were made.
    pub fn confirm(&mut self) -> Option<(ShotType, ShotResult, String)> {
        match std::mem::take(self) {
            ShotEntry::PlayerChosen {
                shot_type,
                result,
                player,
            } => Some((shot_type, result, player)),
            other => {
                *self = other;
                None
            }
        }
    }

    /// The completed selection, if any, without consuming it.
    pub fn selection(&self) -> Option<(ShotType, ShotResult, &str)> {
        match self {
            ShotEntry::PlayerChosen {
                shot_type,
                result,
                player,
            } => Some((*shot_type, *result, player.as_str())),
            _ => None,
        }
    }
}
