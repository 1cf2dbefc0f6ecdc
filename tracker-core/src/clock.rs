//! Creation-time helpers shared by the session layer and tests.

use chrono::Local;

/// Display-formatted calendar date assigned to a game at creation.
/// Day-first without leading zeros, matching the es-ES locale rendering.
pub fn current_game_date() -> String {
    Local::now().format("%-d/%-m/%Y").to_string()
}

/// Current instant in milliseconds since the epoch, the shot timestamp unit.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
