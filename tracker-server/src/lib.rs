use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use warp::Filter;
use warp::http::Uri;

use crate::auth::{AuthError, AuthService};
use crate::session::SessionManager;
use tracker_core::{PlayerStatLine, StatScope, StatsEngine, TeamStats};
use tracker_types::{ShotResult, ShotType, User};

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct ShotTypeBody {
    #[serde(rename = "type")]
    shot_type: ShotType,
}

#[derive(Deserialize)]
struct ShotResultBody {
    result: ShotResult,
}

#[derive(Deserialize)]
struct PlayerBody {
    player: String,
}

#[derive(Deserialize)]
struct StatsQuery {
    scope: Option<String>,
}

#[derive(Deserialize)]
struct CallbackQuery {
    code: Option<String>,
    next: Option<String>,
}

#[derive(serde::Serialize)]
struct StatsResponse {
    team: TeamStats,
    players: Vec<PlayerStatLine>,
}

pub mod auth;
pub mod config;
pub mod debounce;
pub mod session;

pub fn create_routes(
    session_manager: Arc<SessionManager>,
    auth_service: Arc<AuthService>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // Clone for filters
    let session_filter = warp::any().map({
        let session_manager = session_manager.clone();
        move || session_manager.clone()
    });

    let auth_filter = warp::any().map({
        let auth_service = auth_service.clone();
        move || auth_service.clone()
    });

    let auth_header = warp::header::optional::<String>("authorization");

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", warp::http::StatusCode::OK));

    // OAuth-style callback: exchanges the code and redirects
    let auth_callback = warp::path!("auth" / "callback")
        .and(warp::get())
        .and(warp::query::<CallbackQuery>())
        .and(auth_filter.clone())
        .and_then(handle_auth_callback);

    let signout = warp::path!("auth" / "signout")
        .and(warp::post())
        .and(auth_header.clone())
        .and(auth_filter.clone())
        .and_then(handle_signout);

    // Session snapshot; loads the user's data on first touch
    let team = warp::path!("team")
        .and(warp::get())
        .and(auth_header.clone())
        .and(session_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_team_request);

    let team_name = warp::path!("team" / "name")
        .and(warp::put())
        .and(auth_header.clone())
        .and(warp::body::json::<NameBody>())
        .and(session_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_set_team_name);

    let add_player = warp::path!("players")
        .and(warp::post())
        .and(auth_header.clone())
        .and(warp::body::json::<NameBody>())
        .and(session_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_add_player);

    let remove_player = warp::path!("players" / Uuid)
        .and(warp::delete())
        .and(auth_header.clone())
        .and(session_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_remove_player);

    let create_game = warp::path!("games")
        .and(warp::post())
        .and(auth_header.clone())
        .and(warp::body::json::<NameBody>())
        .and(session_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_create_game);

    let select_game = warp::path!("games" / Uuid / "select")
        .and(warp::post())
        .and(auth_header.clone())
        .and(session_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_select_game);

    // Shot-entry wizard: type, result, player, then confirm
    let entry_type = warp::path!("entry" / "type")
        .and(warp::post())
        .and(auth_header.clone())
        .and(warp::body::json::<ShotTypeBody>())
        .and(session_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_entry_type);

    let entry_result = warp::path!("entry" / "result")
        .and(warp::post())
        .and(auth_header.clone())
        .and(warp::body::json::<ShotResultBody>())
        .and(session_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_entry_result);

    let entry_player = warp::path!("entry" / "player")
        .and(warp::post())
        .and(auth_header.clone())
        .and(warp::body::json::<PlayerBody>())
        .and(session_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_entry_player);

    let entry_back = warp::path!("entry" / "back")
        .and(warp::post())
        .and(auth_header.clone())
        .and(session_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_entry_back);

    let entry_cancel = warp::path!("entry" / "cancel")
        .and(warp::post())
        .and(auth_header.clone())
        .and(session_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_entry_cancel);

    let entry_confirm = warp::path!("entry" / "confirm")
        .and(warp::post())
        .and(auth_header.clone())
        .and(session_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_entry_confirm);

    // Statistics endpoint, scoped to all games or one game id
    let stats = warp::path!("stats")
        .and(warp::get())
        .and(auth_header.clone())
        .and(warp::query::<StatsQuery>())
        .and(session_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_stats_request);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type", "authorization"])
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE"]);

    health
        .or(auth_callback)
        .or(signout)
        .or(team)
        .or(team_name)
        .or(add_player)
        .or(remove_player)
        .or(create_game)
        .or(select_game)
        .or(entry_type)
        .or(entry_result)
        .or(entry_player)
        .or(entry_back)
        .or(entry_cancel)
        .or(entry_confirm)
        .or(stats)
        .with(cors)
        .with(warp::log("shot_tracker"))
}

/// Resolves the bearer token to a user, or yields the 401 reply to return.
async fn authorize(
    auth_header: Option<String>,
    auth_service: &AuthService,
) -> Result<User, warp::reply::WithStatus<warp::reply::Json>> {
    let Some(header) = auth_header else {
        return Err(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({
                "error": "Authentication required"
            })),
            warp::http::StatusCode::UNAUTHORIZED,
        ));
    };

    let token = header.strip_prefix("Bearer ").unwrap_or(&header);
    match auth_service.validate_token(token).await {
        Ok(user) => Ok(user),
        Err(_) => Err(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({
                "error": "Invalid authentication token"
            })),
            warp::http::StatusCode::UNAUTHORIZED,
        )),
    }
}

fn snapshot_reply(
    snapshot: &session::SessionSnapshot,
) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(warp::reply::json(snapshot), warp::http::StatusCode::OK)
}

fn error_uri(message: &str) -> Uri {
    let encoded = utf8_percent_encode(message, NON_ALPHANUMERIC).to_string();
    format!("/auth/error?message={}", encoded)
        .parse::<Uri>()
        .unwrap_or_else(|_| Uri::from_static("/auth/error"))
}

async fn handle_auth_callback(
    query: CallbackQuery,
    auth_service: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let target = if let Some(code) = query.code {
        match auth_service.exchange_code(&code).await {
            Ok(_session) => {
                let next = query.next.unwrap_or_else(|| "/".to_string());
                tracing::info!("OAuth success, redirecting to: {}", next);
                next.parse::<Uri>().unwrap_or_else(|_| Uri::from_static("/"))
            }
            Err(err) => {
                tracing::error!("OAuth error: {}", err);
                error_uri(&err.to_string())
            }
        }
    } else {
        tracing::warn!("No code parameter found in OAuth callback");
        error_uri(&AuthError::MissingCode.to_string())
    };

    Ok(warp::redirect::see_other(target))
}

async fn handle_signout(
    auth_header: Option<String>,
    auth_service: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let Some(header) = auth_header else {
        return Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({
                "error": "Authentication required"
            })),
            warp::http::StatusCode::UNAUTHORIZED,
        ));
    };

    let token = header.strip_prefix("Bearer ").unwrap_or(&header);
    if let Err(err) = auth_service.sign_out(token).await {
        tracing::error!("Error signing out: {}", err);
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({ "ok": true })),
        warp::http::StatusCode::OK,
    ))
}

async fn handle_team_request(
    auth_header: Option<String>,
    session_manager: Arc<SessionManager>,
    auth_service: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match authorize(auth_header, &auth_service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    let snapshot = session_manager.snapshot(user.id).await;
    Ok(snapshot_reply(&snapshot))
}

async fn handle_set_team_name(
    auth_header: Option<String>,
    body: NameBody,
    session_manager: Arc<SessionManager>,
    auth_service: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match authorize(auth_header, &auth_service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    session_manager.set_team_name(user.id, body.name).await;
    let snapshot = session_manager.snapshot(user.id).await;
    Ok(snapshot_reply(&snapshot))
}

async fn handle_add_player(
    auth_header: Option<String>,
    body: NameBody,
    session_manager: Arc<SessionManager>,
    auth_service: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match authorize(auth_header, &auth_service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    session_manager.add_player(user.id, &body.name).await;
    let snapshot = session_manager.snapshot(user.id).await;
    Ok(snapshot_reply(&snapshot))
}

async fn handle_remove_player(
    player_id: Uuid,
    auth_header: Option<String>,
    session_manager: Arc<SessionManager>,
    auth_service: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match authorize(auth_header, &auth_service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    session_manager.remove_player(user.id, player_id).await;
    let snapshot = session_manager.snapshot(user.id).await;
    Ok(snapshot_reply(&snapshot))
}

async fn handle_create_game(
    auth_header: Option<String>,
    body: NameBody,
    session_manager: Arc<SessionManager>,
    auth_service: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match authorize(auth_header, &auth_service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    session_manager.create_game(user.id, &body.name).await;
    let snapshot = session_manager.snapshot(user.id).await;
    Ok(snapshot_reply(&snapshot))
}

async fn handle_select_game(
    game_id: Uuid,
    auth_header: Option<String>,
    session_manager: Arc<SessionManager>,
    auth_service: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match authorize(auth_header, &auth_service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    session_manager.select_game(user.id, game_id).await;
    let snapshot = session_manager.snapshot(user.id).await;
    Ok(snapshot_reply(&snapshot))
}

async fn handle_entry_type(
    auth_header: Option<String>,
    body: ShotTypeBody,
    session_manager: Arc<SessionManager>,
    auth_service: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match authorize(auth_header, &auth_service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    session_manager.choose_type(user.id, body.shot_type).await;
    let snapshot = session_manager.snapshot(user.id).await;
    Ok(snapshot_reply(&snapshot))
}

async fn handle_entry_result(
    auth_header: Option<String>,
    body: ShotResultBody,
    session_manager: Arc<SessionManager>,
    auth_service: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match authorize(auth_header, &auth_service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    session_manager.choose_result(user.id, body.result).await;
    let snapshot = session_manager.snapshot(user.id).await;
    Ok(snapshot_reply(&snapshot))
}

async fn handle_entry_player(
    auth_header: Option<String>,
    body: PlayerBody,
    session_manager: Arc<SessionManager>,
    auth_service: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match authorize(auth_header, &auth_service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    session_manager.choose_player(user.id, &body.player).await;
    let snapshot = session_manager.snapshot(user.id).await;
    Ok(snapshot_reply(&snapshot))
}

async fn handle_entry_back(
    auth_header: Option<String>,
    session_manager: Arc<SessionManager>,
    auth_service: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match authorize(auth_header, &auth_service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    session_manager.entry_back(user.id).await;
    let snapshot = session_manager.snapshot(user.id).await;
    Ok(snapshot_reply(&snapshot))
}

async fn handle_entry_cancel(
    auth_header: Option<String>,
    session_manager: Arc<SessionManager>,
    auth_service: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match authorize(auth_header, &auth_service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    session_manager.cancel_entry(user.id).await;
    let snapshot = session_manager.snapshot(user.id).await;
    Ok(snapshot_reply(&snapshot))
}

async fn handle_entry_confirm(
    auth_header: Option<String>,
    session_manager: Arc<SessionManager>,
    auth_service: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match authorize(auth_header, &auth_service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    session_manager.confirm_entry(user.id).await;
    let snapshot = session_manager.snapshot(user.id).await;
    Ok(snapshot_reply(&snapshot))
}

async fn handle_stats_request(
    auth_header: Option<String>,
    query: StatsQuery,
    session_manager: Arc<SessionManager>,
    auth_service: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match authorize(auth_header, &auth_service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    let scope_param = query.scope.unwrap_or_else(|| "all".to_string());
    let scope = match scope_param.parse::<StatScope>() {
        Ok(scope) => scope,
        Err(_) => {
            return Ok(warp::reply::with_status(
                warp::reply::json(&serde_json::json!({
                    "error": "Invalid stats scope"
                })),
                warp::http::StatusCode::BAD_REQUEST,
            ));
        }
    };

    let snapshot = session_manager.snapshot(user.id).await;
    let response = StatsResponse {
        team: StatsEngine::team_stats(&snapshot.games, scope),
        players: StatsEngine::player_stats(&snapshot.games, &snapshot.players, scope),
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&response),
        warp::http::StatusCode::OK,
    ))
}
