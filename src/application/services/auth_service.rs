//! Registration, login and bearer token authentication.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, info};

use crate::application::services::credential_service::{
    derive_user_id, hash_password, verify_password,
};
use crate::application::services::token_service::{Claims, TokenService};
use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// A freshly issued session.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Service for account registration and session authentication.
///
/// Composes the user repository, the credential functions and the
/// [`TokenService`]. Argon2 work runs on the blocking pool so request tasks
/// are never starved by hashing.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Registers a new user and issues a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username is already registered,
    /// either by the pre-check or by a concurrent registration hitting the
    /// storage uniqueness constraint.
    ///
    /// Returns [`AppError::Internal`] on hashing or storage failures.
    pub async fn register(&self, username: &str, password: &str) -> Result<Session, AppError> {
        if self.users.find_by_username(username).await?.is_some() {
            return Err(username_taken(username));
        }

        let password_hash = hash_blocking(password.to_string()).await?;
        let user = User::new(derive_user_id(username), username.to_string(), password_hash);

        let user = self.users.create(user).await.map_err(|e| match e {
            AppError::Conflict { .. } => username_taken(username),
            other => other,
        })?;

        info!(user_id = %user.id, username = %user.username, "User registered");

        let token = self.tokens.issue(&user.id, &user.username)?;
        Ok(Session { token, user })
    }

    /// Verifies credentials and issues a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the user does not exist or the
    /// password does not match. Both cases produce the same error.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AppError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            debug!(username = %username, "login for unknown user");
            return Err(invalid_credentials());
        };

        if !verify_blocking(password.to_string(), user.password_hash.clone()).await? {
            debug!(username = %username, "login with wrong password");
            return Err(invalid_credentials());
        }

        let token = self.tokens.issue(&user.id, &user.username)?;
        Ok(Session { token, user })
    }

    /// Validates a raw bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is expired, tampered or malformed.
    pub fn authenticate(&self, token: &str) -> Result<Claims, AppError> {
        self.tokens.validate(token)
    }
}

fn username_taken(username: &str) -> AppError {
    AppError::conflict(
        "Username already taken",
        json!({ "username": username }),
    )
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized(
        "Unauthorized",
        json!({ "reason": "Invalid username or password" }),
    )
}

async fn hash_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            error!(error = %e, "password hashing task failed");
            AppError::internal("Failed to hash password", json!({}))
        })?
}

async fn verify_blocking(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| {
            error!(error = %e, "password verification task failed");
            AppError::internal("Failed to verify password", json!({}))
        })
}
