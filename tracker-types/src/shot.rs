use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The three shot categories, in the fixed order every breakdown uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotType {
    Triple,
    Doble,
    Libre,
}

impl ShotType {
    /// Fixed display/aggregation order: triple, doble, libre.
    pub const ALL: [ShotType; 3] = [ShotType::Triple, ShotType::Doble, ShotType::Libre];

    /// Point value of a made shot of this type. Kept as domain vocabulary
    /// for point-total displays; current aggregates count makes/attempts.
    pub fn points(&self) -> i32 {
        match self {
            ShotType::Triple => 3,
            ShotType::Doble => 2,
            ShotType::Libre => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShotType::Triple => "triple",
            ShotType::Doble => "doble",
            ShotType::Libre => "libre",
        }
    }
}

impl fmt::Display for ShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShotType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "triple" => Ok(ShotType::Triple),
            "doble" => Ok(ShotType::Doble),
            "libre" => Ok(ShotType::Libre),
            other => Err(format!("unknown shot type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotResult {
    Convertido,
    Fallado,
}

impl ShotResult {
    pub fn is_made(&self) -> bool {
        matches!(self, ShotResult::Convertido)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShotResult::Convertido => "convertido",
            ShotResult::Fallado => "fallado",
        }
    }
}

impl fmt::Display for ShotResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShotResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "convertido" => Ok(ShotResult::Convertido),
            "fallado" => Ok(ShotResult::Fallado),
            other => Err(format!("unknown shot result: {}", other)),
        }
    }
}

/// One recorded attempt. Immutable once created, append-only.
///
/// `player_name` is the attributing player's display name at recording time,
/// not a player id: renaming or deleting a roster entry leaves prior shots
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub shot_type: ShotType,
    pub result: ShotResult,
    pub player_name: String,
    pub game_id: Uuid,
    pub timestamp: i64, // milliseconds since epoch at creation
}
