mod common;

use common::*;
use tracker_core::{ShotEntry, StatScope, StatsEngine};
use tracker_types::{ShotResult, ShotType};

#[test]
fn test_standard_game_team_stats() {
    let games = vec![create_standard_game()];

    let stats = StatsEngine::team_stats(&games, StatScope::All);
    assert_eq!(stats.total_shots, 2);
    assert_eq!(stats.made_shots, 1);
    assert_eq!(stats.percentage, 50);

    let triples = &stats.by_type[0];
    assert_eq!(triples.shot_type, ShotType::Triple);
    assert_eq!(triples.made, 1);
    assert_eq!(triples.attempts, 1);
    assert_eq!(triples.percentage, 100);

    let dobles = &stats.by_type[1];
    assert_eq!(dobles.attempts, 0);
    assert_eq!(dobles.made, 0);
    assert_eq!(dobles.percentage, 0);

    let libres = &stats.by_type[2];
    assert_eq!(libres.made, 0);
    assert_eq!(libres.attempts, 1);
    assert_eq!(libres.percentage, 0);
}

#[test]
fn test_standard_game_player_stats() {
    let games = vec![create_standard_game()];
    let players = vec![create_test_player("Ana"), create_test_player("Leo")];

    let lines = StatsEngine::player_stats(&games, &players, StatScope::All);
    assert_eq!(lines[0].name, "Ana");
    assert_eq!(lines[0].percentage, 100);
    assert_eq!(lines[1].name, "Leo");
    assert_eq!(lines[1].percentage, 0);
}

#[test]
fn test_wizard_feeds_complete_selection() {
    let mut entry = ShotEntry::new();
    entry.choose_type(ShotType::Triple);
    entry.choose_result(ShotResult::Convertido);
    entry.choose_player("Ana");

    let (shot_type, result, player) = entry.confirm().expect("entry was complete");
    assert_eq!(shot_type, ShotType::Triple);
    assert_eq!(result, ShotResult::Convertido);
    assert_eq!(player, "Ana");
}

#[test]
fn test_shot_serialization_uses_wire_names() {
    let game = create_standard_game();
    let json = serde_json::to_value(&game.shots[0]).unwrap();
    assert_eq!(json["type"], "triple");
    assert_eq!(json["result"], "convertido");
    assert_eq!(json["player_name"], "Ana");
}
