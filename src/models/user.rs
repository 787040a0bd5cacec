//! User model and JWT claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Full user model from database.
///
/// `borrowed_book_id` is the loan pointer: 0 means no outstanding loan,
/// anything else is the id of the single book this user holds.
/// `borrow_date` is set iff a loan is outstanding. `active` tracks login
/// state and is independent of the loan state.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub borrowed_book_id: i32,
    pub borrow_date: Option<DateTime<Utc>>,
    pub active: bool,
}

impl User {
    /// Whether this user currently holds a loan
    pub fn has_active_loan(&self) -> bool {
        self.borrowed_book_id != 0
    }
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
    /// Extends the token lifetime from one day to seven
    #[serde(default)]
    pub remember: bool,
}

/// Token payload returned on successful login
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenData {
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

/// JWT claims carried by bearer tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the username
    pub sub: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and verify a JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_expiring_in(seconds: i64) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: "admin".to_string(),
            iss: "libris-server".to_string(),
            iat: now,
            exp: now + seconds,
        }
    }

    #[test]
    fn token_round_trip_preserves_claims() {
        let claims = claims_expiring_in(3600);
        let token = claims.create_token("test-secret").unwrap();
        let decoded = Claims::from_token(&token, "test-secret").unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let token = claims_expiring_in(3600).create_token("test-secret").unwrap();
        assert!(Claims::from_token(&token, "other-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // Well past the default validation leeway
        let token = claims_expiring_in(-3600).create_token("test-secret").unwrap();
        assert!(Claims::from_token(&token, "test-secret").is_err());
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: 1,
            username: "admin".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            borrowed_book_id: 0,
            borrow_date: None,
            active: true,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
    }
}
