use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use tracker_types::{Game, Player, Shot, ShotType};

/// Statistics selector: every game, or one specific game by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatScope {
    All,
    Game(Uuid),
}

impl FromStr for StatScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(StatScope::All);
        }
        Uuid::parse_str(s)
            .map(StatScope::Game)
            .map_err(|_| format!("invalid stats scope: {}", s))
    }
}

/// Made/attempts/percentage for one shot type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeBreakdown {
    #[serde(rename = "type")]
    pub shot_type: ShotType,
    pub attempts: u32,
    pub made: u32,
    pub percentage: u32,
}

/// Team-wide totals plus the per-type breakdown in fixed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub total_shots: u32,
    pub made_shots: u32,
    pub percentage: u32,
    pub by_type: Vec<TypeBreakdown>,
}

/// One roster entry's line: overall triple plus the per-type breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatLine {
    pub name: String,
    pub attempts: u32,
    pub made: u32,
    pub percentage: u32,
    pub by_type: Vec<TypeBreakdown>,
}

/// Pure aggregation over a snapshot of games and roster. Total over its
/// inputs: empty input yields zero-valued stats, never an error.
pub struct StatsEngine;

impl StatsEngine {
    /// Shots in scope: all games flattened in game-list order then insertion
    /// order, or one game's sequence verbatim. An unknown game id selects
    /// the empty sequence.
    pub fn select_shots<'a>(games: &'a [Game], scope: StatScope) -> Vec<&'a Shot> {
        match scope {
            StatScope::All => games.iter().flat_map(|game| game.shots.iter()).collect(),
            StatScope::Game(game_id) => games
                .iter()
                .find(|game| game.id == game_id)
                .map(|game| game.shots.iter().collect())
                .unwrap_or_default(),
        }
    }

    pub fn team_stats(games: &[Game], scope: StatScope) -> TeamStats {
        let shots = Self::select_shots(games, scope);
        let total_shots = shots.len() as u32;
        let made_shots = shots.iter().filter(|s| s.result.is_made()).count() as u32;

        TeamStats {
            total_shots,
            made_shots,
            percentage: Self::percentage(made_shots, total_shots),
            by_type: Self::breakdown_by_type(&shots),
        }
    }

    pub fn player_stats(games: &[Game], players: &[Player], scope: StatScope) -> Vec<PlayerStatLine> {
        let shots = Self::select_shots(games, scope);

        players
            .iter()
            .map(|player| {
                // Name-based join: shots recorded under a previous name stay
                // unattributed after a rename.
                let player_shots: Vec<&Shot> = shots
                    .iter()
                    .filter(|s| s.player_name == player.name)
                    .copied()
                    .collect();

                let attempts = player_shots.len() as u32;
                let made = player_shots.iter().filter(|s| s.result.is_made()).count() as u32;

                PlayerStatLine {
                    name: player.name.clone(),
                    attempts,
                    made,
                    percentage: Self::percentage(made, attempts),
                    by_type: Self::breakdown_by_type(&player_shots),
                }
            })
            .collect()
    }

    fn breakdown_by_type(shots: &[&Shot]) -> Vec<TypeBreakdown> {
        ShotType::ALL
            .iter()
            .map(|&shot_type| {
                let attempts =
                    shots.iter().filter(|s| s.shot_type == shot_type).count() as u32;
                let made = shots
                    .iter()
                    .filter(|s| s.shot_type == shot_type && s.result.is_made())
                    .count() as u32;

                TypeBreakdown {
                    shot_type,
                    attempts,
                    made,
                    percentage: Self::percentage(made, attempts),
                }
            })
            .collect()
    }

    /// Round-half-up percentage of `made` over `attempts`, 0 when there are
    /// no attempts.
    fn percentage(made: u32, attempts: u32) -> u32 {
        if attempts == 0 {
            return 0;
        }
        (100.0 * made as f64 / attempts as f64).round() as u32
    }
}
