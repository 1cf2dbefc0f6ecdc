use reqwest::Client;
use serde::Deserialize;
use uuid::Uuid;

use tracker_types::User;

/// Identity as the provider reports it on token validation and code
/// exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderUser {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub user: ProviderUser,
}

/// A freshly exchanged session: the bearer token plus the user it belongs
/// to.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub user: User,
}

/// Client for the identity provider. The provider owns sessions and
/// credentials entirely; this service only resolves tokens to users,
/// exchanges callback codes and revokes sessions.
pub struct AuthService {
    client: Client,
    base_url: String,
    dev_mode: bool,
}

impl AuthService {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            dev_mode: false,
        }
    }

    pub fn new_dev_mode() -> Self {
        Self {
            client: Client::new(),
            base_url: "dev".to_string(),
            dev_mode: true,
        }
    }

    /// Resolve the user behind a bearer token, or fail if the provider does
    /// not recognize it.
    pub async fn validate_token(&self, token: &str) -> Result<User, AuthError> {
        if self.dev_mode {
            return Self::validate_dev_token(token);
        }

        let url = format!("{}/auth/v1/user", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Failed to reach identity provider: {}", e);
                AuthError::ProviderUnreachable
            })?;

        if !response.status().is_success() {
            tracing::warn!("Identity provider rejected token: {}", response.status());
            return Err(AuthError::InvalidToken);
        }

        let provider_user: ProviderUser = response.json().await.map_err(|e| {
            tracing::warn!("Failed to parse identity response: {}", e);
            AuthError::InvalidToken
        })?;

        Ok(Self::user_from_provider(provider_user))
    }

    /// OAuth-style code exchange backing the callback route.
    pub async fn exchange_code(&self, code: &str) -> Result<AuthSession, AuthError> {
        if self.dev_mode {
            let user = Self::validate_dev_token(code).map_err(|_| AuthError::ExchangeFailed {
                message: "Invalid authorization code".to_string(),
            })?;
            return Ok(AuthSession {
                access_token: code.to_string(),
                user,
            });
        }

        let url = format!("{}/auth/v1/token?grant_type=authorization_code", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "auth_code": code }))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Failed to reach identity provider: {}", e);
                AuthError::ProviderUnreachable
            })?;

        if !response.status().is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "code exchange rejected".to_string());
            return Err(AuthError::ExchangeFailed { message });
        }

        let token: TokenResponse = response.json().await.map_err(|_| AuthError::ExchangeFailed {
            message: "malformed token response".to_string(),
        })?;

        let user = Self::user_from_provider(token.user);
        Ok(AuthSession {
            access_token: token.access_token,
            user,
        })
    }

    /// Best-effort session revocation; the provider forgets the token.
    pub async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        if self.dev_mode {
            return Ok(());
        }

        let url = format!("{}/auth/v1/logout", self.base_url);
        self.client
            .post(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Failed to reach identity provider: {}", e);
                AuthError::ProviderUnreachable
            })?;

        Ok(())
    }

    fn user_from_provider(provider_user: ProviderUser) -> User {
        User {
            id: Uuid::parse_str(&provider_user.id).unwrap_or_else(|_| Uuid::new_v4()),
            email: provider_user
                .email
                .unwrap_or_else(|| "unknown@example.com".to_string()),
            display_name: provider_user
                .name
                .unwrap_or_else(|| "Unknown User".to_string()),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    // Simple string format: "user_id:email:name"
    fn validate_dev_token(token: &str) -> Result<User, AuthError> {
        let parts: Vec<&str> = token.split(':').collect();
        if parts.len() >= 3 {
            Ok(User {
                id: Uuid::parse_str(parts[0]).unwrap_or_else(|_| Uuid::new_v4()),
                email: parts[1].to_string(),
                display_name: parts[2].to_string(),
                created_at: chrono::Utc::now().to_rfc3339(),
            })
        } else {
            Err(AuthError::InvalidToken)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("No authorization code received")]
    MissingCode,
    #[error("Code exchange failed: {message}")]
    ExchangeFailed { message: String },
    #[error("Identity provider unreachable")]
    ProviderUnreachable,
}
