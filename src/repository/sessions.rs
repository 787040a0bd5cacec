//! Login-session repository: the ledger of issued tokens

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::session::LoginSession};

#[derive(Clone)]
pub struct SessionsRepository {
    pool: Pool<Postgres>,
}

impl SessionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Record an issued token
    pub async fn record(
        &self,
        user_id: i32,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO login_history (user_id, token, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Look up the session recorded for a token
    pub async fn get_by_token(&self, token: &str) -> AppResult<Option<LoginSession>> {
        let session =
            sqlx::query_as::<_, LoginSession>("SELECT * FROM login_history WHERE token = $1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;
        Ok(session)
    }

    /// Invalidate a token (logout)
    pub async fn delete_by_token(&self, token: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM login_history WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Prune sessions whose tokens have expired
    pub async fn delete_expired(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM login_history WHERE expires_at < $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
