use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated identity as reported by the identity provider. Never
/// persisted by this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub created_at: String, // ISO 8601 string for simplicity
}
