//! Authentication service: login, logout, token resolution

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Duration, Utc};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{Claims, User},
    repository::Repository,
};

const TOKEN_ISSUER: &str = "libris-server";

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate by username/password and issue a bearer token.
    /// `remember` extends the token lifetime from one day to seven.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        remember: bool,
    ) -> AppResult<(String, DateTime<Utc>)> {
        // Expired sessions are pruned here rather than by a background job
        self.repository.sessions.delete_expired().await?;

        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !verify_password(&user.password_hash, password)? {
            return Err(AppError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        let ttl_days = if remember {
            self.config.remember_token_ttl_days
        } else {
            self.config.token_ttl_days
        };
        let now = Utc::now();
        let expires_at = now + Duration::days(ttl_days);

        let claims = Claims {
            sub: user.username.clone(),
            iss: TOKEN_ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        self.repository.users.set_active(user.id, true).await?;
        self.repository
            .sessions
            .record(user.id, &token, expires_at)
            .await?;

        tracing::info!(user_id = user.id, "user logged in");

        Ok((token, expires_at))
    }

    /// Invalidate a token: drop its session row and mark the user logged
    /// out. Goes through the session ledger rather than the token claims, so
    /// an already-expired token can still be logged out cleanly.
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        if let Some(session) = self.repository.sessions.get_by_token(token).await? {
            self.repository.users.set_active(session.user_id, false).await?;
            tracing::info!(user_id = session.user_id, "user logged out");
        }
        self.repository.sessions.delete_by_token(token).await?;

        Ok(())
    }

    /// Map a bearer token to the user it names. Rejects bad signatures,
    /// expired tokens, unknown subjects, and logged-out users.
    pub async fn resolve_user(&self, token: &str) -> AppResult<User> {
        let claims = Claims::from_token(token, &self.config.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        let user = self
            .repository
            .users
            .get_by_username(&claims.sub)
            .await?
            .ok_or_else(|| AppError::Authentication("User not found".to_string()))?;

        if !user.active {
            return Err(AppError::Authentication(
                "You are not logged in".to_string(),
            ));
        }

        Ok(user)
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against its stored argon2 hash
pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("password123").unwrap();
        assert!(verify_password(&hash, "password123").unwrap());
        assert!(!verify_password(&hash, "password124").unwrap());
    }

    #[test]
    fn malformed_hash_is_an_internal_error() {
        assert!(verify_password("not-a-phc-string", "whatever").is_err());
    }
}
