//! First-run data seeding.
//!
//! The service has no signup endpoint, so an empty database gets three
//! accounts and a small starter catalog. Both inserts are skipped as soon as
//! the tables have rows.

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::error::AppResult;

/// Seed example users and books when the respective tables are empty.
/// `password_hash` is the argon2 hash shared by the seeded accounts.
pub async fn seed_initial_data(pool: &Pool<Postgres>, password_hash: &str) -> AppResult<()> {
    let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    if user_count == 0 {
        for username in ["admin", "user1", "user2"] {
            sqlx::query(
                r#"
                INSERT INTO users (username, password_hash, borrowed_book_id, borrow_date, active)
                VALUES ($1, $2, 0, NULL, false)
                "#,
            )
            .bind(username)
            .bind(password_hash)
            .execute(pool)
            .await?;
        }
        tracing::info!("Seeded initial user accounts");
    }

    let book_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(pool)
        .await?;

    if book_count == 0 {
        let now = Utc::now();
        let books = [
            (
                "The Pragmatic Programmer",
                "From journeyman to master",
                "Andrew Hunt",
                10,
            ),
            (
                "Designing Data-Intensive Applications",
                "Reliable, scalable, maintainable systems",
                "Martin Kleppmann",
                15,
            ),
            (
                "The Rust Programming Language",
                "The official book on Rust",
                "Steve Klabnik",
                20,
            ),
        ];

        for (title, description, author, stock) in books {
            sqlx::query(
                r#"
                INSERT INTO books (title, description, author, stock, borrowed, created_at, active)
                VALUES ($1, $2, $3, $4, 0, $5, true)
                "#,
            )
            .bind(title)
            .bind(description)
            .bind(author)
            .bind(stock)
            .bind(now)
            .execute(pool)
            .await?;
        }
        tracing::info!("Seeded starter catalog");
    }

    Ok(())
}
