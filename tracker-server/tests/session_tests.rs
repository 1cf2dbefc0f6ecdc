
use test_helpers::*;

use sea_orm::{ConnectionTrait, EntityTrait};
use tracker_persistence::entities::prelude::{Players, Shots, Teams};
use tracker_server::session::SessionManager;
use tracker_types::{ShotResult, ShotType};
use uuid::Uuid;

async fn setup_team(manager: &std::sync::Arc<SessionManager>, user_id: Uuid) {
    manager.set_team_name(user_id, "Halcones".to_string()).await;
    wait_for_flush().await;
}

#[tokio::test]
async fn test_team_name_flush_creates_then_updates_in_place() {
    let (manager, db) = create_test_manager().await;
    let user_id = Uuid::new_v4();

    manager.set_team_name(user_id, "Hal".to_string()).await;
    manager.set_team_name(user_id, "Halcon".to_string()).await;
    manager.set_team_name(user_id, "Halcones".to_string()).await;

    // Nothing lands before the quiet period
    assert_eq!(Teams::find().all(&db).await.unwrap().len(), 0);

    wait_for_flush().await;
    let teams = Teams::find().all(&db).await.unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0].name, "Halcones");

    // The session captured the created id, so the next flush updates it
    manager
        .set_team_name(user_id, "Halcones Rojos".to_string())
        .await;
    wait_for_flush().await;

    let teams = Teams::find().all(&db).await.unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0].name, "Halcones Rojos");
}

#[tokio::test]
async fn test_empty_team_name_cancels_pending_write() {
    let (manager, db) = create_test_manager().await;
    let user_id = Uuid::new_v4();

    manager.set_team_name(user_id, "Halcones".to_string()).await;
    manager.set_team_name(user_id, "   ".to_string()).await;
    wait_for_flush().await;

    assert_eq!(Teams::find().all(&db).await.unwrap().len(), 0);

    let snapshot = manager.snapshot(user_id).await;
    assert_eq!(snapshot.team_name, "   ");
    assert!(snapshot.team_id.is_none());
}

#[tokio::test]
async fn test_add_player_applies_after_store_confirms() {
    let (manager, db) = create_test_manager().await;
    let user_id = Uuid::new_v4();
    setup_team(&manager, user_id).await;

    manager.add_player(user_id, "  Ana  ").await;

    let snapshot = manager.snapshot(user_id).await;
    assert_eq!(snapshot.players.len(), 1);
    assert_eq!(snapshot.players[0].name, "Ana");

    // The in-memory entry carries the store-assigned id
    let stored = Players::find().all(&db).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, snapshot.players[0].id);
}

#[tokio::test]
async fn test_add_player_rejects_blank_names_and_missing_team() {
    let (manager, db) = create_test_manager().await;
    let user_id = Uuid::new_v4();

    // No team yet
    manager.add_player(user_id, "Ana").await;
    assert_eq!(manager.snapshot(user_id).await.players.len(), 0);

    setup_team(&manager, user_id).await;
    manager.add_player(user_id, "   ").await;

    assert_eq!(manager.snapshot(user_id).await.players.len(), 0);
    assert_eq!(Players::find().all(&db).await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_remove_player_confirm_after_write() {
    let (manager, db) = create_test_manager().await;
    let user_id = Uuid::new_v4();
    setup_team(&manager, user_id).await;

    manager.add_player(user_id, "Ana").await;
    manager.add_player(user_id, "Leo").await;
    let snapshot = manager.snapshot(user_id).await;
    let ana_id = snapshot.players[0].id;

    manager.remove_player(user_id, ana_id).await;

    let snapshot = manager.snapshot(user_id).await;
    assert_eq!(snapshot.players.len(), 1);
    assert_eq!(snapshot.players[0].name, "Leo");
    assert_eq!(Players::find().all(&db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_game_prepends_and_sets_active() {
    let (manager, _db) = create_test_manager().await;
    let user_id = Uuid::new_v4();
    setup_team(&manager, user_id).await;

    manager.create_game(user_id, "primero").await;
    manager.create_game(user_id, "segundo").await;

    let snapshot = manager.snapshot(user_id).await;
    assert_eq!(snapshot.games.len(), 2);
    // Most recent first, and the new game became active
    assert_eq!(snapshot.games[0].name, "segundo");
    assert_eq!(snapshot.games[1].name, "primero");
    assert_eq!(snapshot.active_game_id, Some(snapshot.games[0].id));
    assert!(snapshot.games[0].shots.is_empty());
}

#[tokio::test]
async fn test_create_game_requires_team_and_name() {
    let (manager, _db) = create_test_manager().await;
    let user_id = Uuid::new_v4();

    manager.create_game(user_id, "vs Rivals").await;
    assert_eq!(manager.snapshot(user_id).await.games.len(), 0);

    setup_team(&manager, user_id).await;
    manager.create_game(user_id, "  ").await;
    assert_eq!(manager.snapshot(user_id).await.games.len(), 0);
}

#[tokio::test]
async fn test_select_game_moves_pointer_without_mutating_data() {
    let (manager, _db) = create_test_manager().await;
    let user_id = Uuid::new_v4();
    setup_team(&manager, user_id).await;

    manager.create_game(user_id, "primero").await;
    manager.create_game(user_id, "segundo").await;
    let before = manager.snapshot(user_id).await;
    let older_id = before.games[1].id;

    manager.select_game(user_id, older_id).await;

    let after = manager.snapshot(user_id).await;
    assert_eq!(after.active_game_id, Some(older_id));
    assert_eq!(after.games, before.games);

    // Unknown ids leave the pointer alone
    manager.select_game(user_id, Uuid::new_v4()).await;
    assert_eq!(manager.snapshot(user_id).await.active_game_id, Some(older_id));
}

#[tokio::test]
async fn test_record_shot_appends_to_active_game() {
    let (manager, db) = create_test_manager().await;
    let user_id = Uuid::new_v4();
    setup_team(&manager, user_id).await;
    manager.create_game(user_id, "vs Rivals").await;

    let recorded = manager
        .record_shot(user_id, ShotType::Triple, ShotResult::Convertido, "Ana")
        .await;
    assert!(recorded);

    let snapshot = manager.snapshot(user_id).await;
    let game = &snapshot.games[0];
    assert_eq!(game.shots.len(), 1);
    assert_eq!(game.shots[0].shot_type, ShotType::Triple);
    assert_eq!(game.shots[0].result, ShotResult::Convertido);
    assert_eq!(game.shots[0].player_name, "Ana");
    assert_eq!(game.shots[0].game_id, game.id);

    assert_eq!(Shots::find().all(&db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_record_shot_without_active_game_is_noop() {
    let (manager, db) = create_test_manager().await;
    let user_id = Uuid::new_v4();
    setup_team(&manager, user_id).await;

    let recorded = manager
        .record_shot(user_id, ShotType::Libre, ShotResult::Fallado, "Leo")
        .await;
    assert!(!recorded);
    assert_eq!(Shots::find().all(&db).await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_confirm_entry_records_and_resets_wizard() {
    let (manager, _db) = create_test_manager().await;
    let user_id = Uuid::new_v4();
    setup_team(&manager, user_id).await;
    manager.create_game(user_id, "vs Rivals").await;

    manager.choose_type(user_id, ShotType::Doble).await;
    manager.choose_result(user_id, ShotResult::Fallado).await;
    manager.choose_player(user_id, "Leo").await;
    manager.confirm_entry(user_id).await;

    let snapshot = manager.snapshot(user_id).await;
    assert_eq!(snapshot.games[0].shots.len(), 1);
    assert_eq!(snapshot.games[0].shots[0].player_name, "Leo");
    assert_eq!(snapshot.entry, tracker_core::ShotEntry::Idle);
}

#[tokio::test]
async fn test_confirm_entry_without_selection_is_noop() {
    let (manager, db) = create_test_manager().await;
    let user_id = Uuid::new_v4();
    setup_team(&manager, user_id).await;
    manager.create_game(user_id, "vs Rivals").await;

    // Straight to confirm, then with only a partial selection
    manager.confirm_entry(user_id).await;
    manager.choose_type(user_id, ShotType::Triple).await;
    manager.confirm_entry(user_id).await;

    let snapshot = manager.snapshot(user_id).await;
    assert_eq!(snapshot.games[0].shots.len(), 0);
    assert_eq!(Shots::find().all(&db).await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_store_failure_leaves_state_unchanged() {
    let (manager, db) = create_test_manager().await;
    let user_id = Uuid::new_v4();
    setup_team(&manager, user_id).await;
    manager.create_game(user_id, "vs Rivals").await;

    manager.choose_type(user_id, ShotType::Triple).await;
    manager.choose_result(user_id, ShotResult::Convertido).await;
    manager.choose_player(user_id, "Ana").await;

    // Break the store out from under the session
    db.execute_unprepared("DROP TABLE shots").await.unwrap();

    manager.confirm_entry(user_id).await;

    // No phantom shot, and the selection survives the failed write
    let snapshot = manager.snapshot(user_id).await;
    assert_eq!(snapshot.games[0].shots.len(), 0);
    assert!(snapshot.entry.selection().is_some());
}

#[tokio::test]
async fn test_fresh_manager_reloads_persisted_state() {
    let (manager, db) = create_test_manager().await;
    let user_id = Uuid::new_v4();
    setup_team(&manager, user_id).await;

    manager.add_player(user_id, "Ana").await;
    manager.create_game(user_id, "primero").await;
    manager
        .record_shot(user_id, ShotType::Triple, ShotResult::Convertido, "Ana")
        .await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    manager.create_game(user_id, "segundo").await;

    // A new manager over the same store sees everything, newest game first
    let reloaded = SessionManager::new(db, TEST_QUIET_PERIOD);
    let snapshot = reloaded.snapshot(user_id).await;

    assert_eq!(snapshot.team_name, "Halcones");
    assert!(snapshot.team_id.is_some());
    assert_eq!(snapshot.players.len(), 1);
    assert_eq!(snapshot.games.len(), 2);
    assert_eq!(snapshot.games[0].name, "segundo");
    assert_eq!(snapshot.games[1].name, "primero");
    assert_eq!(snapshot.games[1].shots.len(), 1);

    // The active-game pointer is session state, not store state
    assert!(snapshot.active_game_id.is_none());
}
