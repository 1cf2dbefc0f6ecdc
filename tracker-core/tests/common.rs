use tracker_types::{Game, Player, Shot, ShotResult, ShotType};
use uuid::Uuid;

/// Creates a roster entry for a fresh team
pub fn create_test_player(name: &str) -> Player {
    Player {
        id: Uuid::new_v4(),
        name: name.to_string(),
        team_id: Uuid::new_v4(),
    }
}

/// Creates a shot attributed to `player` inside `game_id`
pub fn create_test_shot(
    game_id: Uuid,
    shot_type: ShotType,
    result: ShotResult,
    player: &str,
    timestamp: i64,
) -> Shot {
    Shot {
        id: Uuid::new_v4(),
        shot_type,
        result,
        player_name: player.to_string(),
        game_id,
        timestamp,
    }
}

/// Creates a game populated with the given shot specs, in order
pub fn create_game_with_shots(name: &str, specs: &[(ShotType, ShotResult, &str)]) -> Game {
    let id = Uuid::new_v4();
    Game {
        id,
        name: name.to_string(),
        date: "7/8/2026".to_string(),
        team_id: Uuid::new_v4(),
        shots: specs
            .iter()
            .enumerate()
            .map(|(i, (t, r, p))| create_test_shot(id, *t, *r, p, i as i64))
            .collect(),
    }
}

/// The two-shot fixture used by the end-to-end examples:
/// a made triple by Ana and a missed free throw by Leo
pub fn create_standard_game() -> Game {
    create_game_with_shots(
        "vs Rivals",
        &[
            (ShotType::Triple, ShotResult::Convertido, "Ana"),
            (ShotType::Libre, ShotResult::Fallado, "Leo"),
        ],
    )
}
