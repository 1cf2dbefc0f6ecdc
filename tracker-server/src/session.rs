use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::debounce::DebouncedSave;
use tracker_core::{ShotEntry, current_game_date, now_millis};
use tracker_persistence::repositories::{
    GameRepository, PlayerRepository, ShotRepository, TeamRepository,
};
use tracker_types::{Game, Player, ShotResult, ShotType};

/// One user's in-memory state: team, roster, game list with the active-game
/// pointer, and the shot-entry wizard. The active game is an id into
/// `games`, so the pointer and the list entry can never disagree.
#[derive(Debug, Default)]
struct TeamSession {
    team_id: Option<Uuid>,
    team_name: String,
    players: Vec<Player>,
    games: Vec<Game>,
    active_game_id: Option<Uuid>,
    entry: ShotEntry,
    save: DebouncedSave,
}

impl TeamSession {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            team_id: self.team_id,
            team_name: self.team_name.clone(),
            players: self.players.clone(),
            games: self.games.clone(),
            active_game_id: self.active_game_id,
            entry: self.entry.clone(),
        }
    }

    fn active_game_mut(&mut self) -> Option<&mut Game> {
        let active_game_id = self.active_game_id?;
        self.games.iter_mut().find(|g| g.id == active_game_id)
    }
}

/// The state a consumer renders from, captured under the session lock.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionSnapshot {
    pub team_id: Option<Uuid>,
    pub team_name: String,
    pub players: Vec<Player>,
    pub games: Vec<Game>,
    pub active_game_id: Option<Uuid>,
    pub entry: ShotEntry,
}

/// Owns every user's `TeamSession` and mediates all mutations against the
/// store. Store calls are awaited sequentially per operation, and in-memory
/// state changes apply only after the store confirms, so a failed write
/// never leaves phantom local state. Failures are logged and swallowed; the
/// session keeps whatever it had before the call.
pub struct SessionManager {
    sessions: RwLock<HashMap<Uuid, TeamSession>>,
    teams: TeamRepository,
    players: PlayerRepository,
    games: GameRepository,
    shots: ShotRepository,
    quiet_period: Duration,
}

impl SessionManager {
    pub fn new(db: DatabaseConnection, quiet_period: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            teams: TeamRepository::new(db.clone()),
            players: PlayerRepository::new(db.clone()),
            games: GameRepository::new(db.clone()),
            shots: ShotRepository::new(db),
            quiet_period,
        }
    }

    /// Loads team, roster and games on the user's first touch. Data loading
    /// only ever happens for an authenticated user; the HTTP surface turns
    /// anonymous requests away before reaching this layer.
    async fn ensure_loaded(&self, user_id: Uuid) {
        if self.sessions.read().await.contains_key(&user_id) {
            return;
        }

        let mut session = TeamSession::default();
        match self.teams.find_by_owner(user_id).await {
            Ok(Some(team)) => {
                session.team_id = Some(team.id);
                session.team_name = team.name;

                match self.players.find_by_team(team.id).await {
                    Ok(players) => session.players = players,
                    Err(err) => tracing::error!("Error loading players: {}", err),
                }

                match self.games.find_by_team_with_shots(team.id).await {
                    Ok(games) => session.games = games,
                    Err(err) => tracing::error!("Error loading games: {}", err),
                }
            }
            Ok(None) => {}
            Err(err) => tracing::error!("Error loading team data: {}", err),
        }

        self.sessions.write().await.entry(user_id).or_insert(session);
    }

    pub async fn snapshot(&self, user_id: Uuid) -> SessionSnapshot {
        self.ensure_loaded(user_id).await;
        self.sessions
            .read()
            .await
            .get(&user_id)
            .map(TeamSession::snapshot)
            .unwrap_or_default()
    }

    /// Updates the in-memory name immediately and schedules the persistence
    /// write behind the quiet period. Each change cancels and replaces the
    /// pending write, so a burst of keystrokes produces exactly one store
    /// call, carrying the last value.
    pub async fn set_team_name(self: &Arc<Self>, user_id: Uuid, name: String) {
        self.ensure_loaded(user_id).await;

        let mut sessions = self.sessions.write().await;
        let Some(session) = sessions.get_mut(&user_id) else {
            return;
        };

        session.team_name = name.clone();
        if name.trim().is_empty() {
            session.save.cancel();
            return;
        }

        let manager = Arc::clone(self);
        session.save.schedule(self.quiet_period, async move {
            manager.flush_team_name(user_id, name).await;
        });
    }

    async fn flush_team_name(&self, user_id: Uuid, name: String) {
        match self.team_id_of(user_id).await {
            Some(team_id) => {
                if let Err(err) = self.teams.update_name(team_id, &name).await {
                    tracing::error!("Error saving team: {}", err);
                }
            }
            None => match self.teams.create(user_id, &name).await {
                Ok(team) => {
                    if let Some(session) = self.sessions.write().await.get_mut(&user_id) {
                        session.team_id = Some(team.id);
                    }
                }
                Err(err) => tracing::error!("Error saving team: {}", err),
            },
        }
    }

    /// No-op when the trimmed name is empty or no team exists yet. The
    /// roster grows only once the store has handed back the created row.
    pub async fn add_player(&self, user_id: Uuid, name: &str) {
        self.ensure_loaded(user_id).await;

        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let Some(team_id) = self.team_id_of(user_id).await else {
            return;
        };

        match self.players.create(team_id, name).await {
            Ok(player) => {
                if let Some(session) = self.sessions.write().await.get_mut(&user_id) {
                    session.players.push(player);
                }
            }
            Err(err) => tracing::error!("Error adding player: {}", err),
        }
    }

    /// The delete is confirmed by the store before the roster mutates; a
    /// failed delete leaves the player in place.
    pub async fn remove_player(&self, user_id: Uuid, player_id: Uuid) {
        self.ensure_loaded(user_id).await;

        match self.players.delete(player_id).await {
            Ok(()) => {
                if let Some(session) = self.sessions.write().await.get_mut(&user_id) {
                    session.players.retain(|p| p.id != player_id);
                }
            }
            Err(err) => tracing::error!("Error removing player: {}", err),
        }
    }

    /// Creates a game dated today, prepends it (most recent first) and
    /// makes it the active game. No-op on empty name or missing team.
    pub async fn create_game(&self, user_id: Uuid, name: &str) {
        self.ensure_loaded(user_id).await;

        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let Some(team_id) = self.team_id_of(user_id).await else {
            return;
        };

        match self.games.create(team_id, name, &current_game_date()).await {
            Ok(game) => {
                if let Some(session) = self.sessions.write().await.get_mut(&user_id) {
                    session.active_game_id = Some(game.id);
                    session.games.insert(0, game);
                }
            }
            Err(err) => tracing::error!("Error creating game: {}", err),
        }
    }

    /// Repoints the active game at an existing list entry. Unknown ids are
    /// ignored; no data is mutated either way.
    pub async fn select_game(&self, user_id: Uuid, game_id: Uuid) {
        self.ensure_loaded(user_id).await;

        if let Some(session) = self.sessions.write().await.get_mut(&user_id) {
            if session.games.iter().any(|g| g.id == game_id) {
                session.active_game_id = Some(game_id);
            }
        }
    }

    /// Persists a shot against the active game and appends it to the game's
    /// sequence once the store confirms. Returns whether the shot was
    /// recorded.
    pub async fn record_shot(
        &self,
        user_id: Uuid,
        shot_type: ShotType,
        result: ShotResult,
        player_name: &str,
    ) -> bool {
        self.ensure_loaded(user_id).await;

        if player_name.is_empty() {
            return false;
        }
        let Some(game_id) = self.active_game_of(user_id).await else {
            return false;
        };

        match self
            .shots
            .create(game_id, shot_type, result, player_name, now_millis())
            .await
        {
            Ok(shot) => {
                if let Some(session) = self.sessions.write().await.get_mut(&user_id) {
                    if let Some(game) = session.active_game_mut() {
                        game.shots.push(shot);
                    }
                }
                true
            }
            Err(err) => {
                tracing::error!("Error saving shot: {}", err);
                false
            }
        }
    }

    pub async fn choose_type(&self, user_id: Uuid, shot_type: ShotType) {
        self.ensure_loaded(user_id).await;
        if let Some(session) = self.sessions.write().await.get_mut(&user_id) {
            session.entry.choose_type(shot_type);
        }
    }

    pub async fn choose_result(&self, user_id: Uuid, result: ShotResult) {
        self.ensure_loaded(user_id).await;
        if let Some(session) = self.sessions.write().await.get_mut(&user_id) {
            session.entry.choose_result(result);
        }
    }

    pub async fn choose_player(&self, user_id: Uuid, player: &str) {
        self.ensure_loaded(user_id).await;
        if let Some(session) = self.sessions.write().await.get_mut(&user_id) {
            session.entry.choose_player(player);
        }
    }

    pub async fn entry_back(&self, user_id: Uuid) {
        self.ensure_loaded(user_id).await;
        if let Some(session) = self.sessions.write().await.get_mut(&user_id) {
            session.entry.back();
        }
    }

    pub async fn cancel_entry(&self, user_id: Uuid) {
        self.ensure_loaded(user_id).await;
        if let Some(session) = self.sessions.write().await.get_mut(&user_id) {
            session.entry.cancel();
        }
    }

    /// Hands the wizard's completed selection to `record_shot`. The wizard
    /// resets only once the shot is stored; a failed write keeps the
    /// selection so nothing is silently lost.
    pub async fn confirm_entry(&self, user_id: Uuid) {
        self.ensure_loaded(user_id).await;

        let selection = self
            .sessions
            .read()
            .await
            .get(&user_id)
            .and_then(|s| s.entry.selection().map(|(t, r, p)| (t, r, p.to_string())));
        let Some((shot_type, result, player)) = selection else {
            return;
        };

        if self.record_shot(user_id, shot_type, result, &player).await {
            if let Some(session) = self.sessions.write().await.get_mut(&user_id) {
                session.entry.confirm();
            }
        }
    }

    async fn team_id_of(&self, user_id: Uuid) -> Option<Uuid> {
        self.sessions
            .read()
            .await
            .get(&user_id)
            .and_then(|s| s.team_id)
    }

    async fn active_game_of(&self, user_id: Uuid) -> Option<Uuid> {
        self.sessions
            .read()
            .await
            .get(&user_id)
            .and_then(|s| s.active_game_id)
    }
}
