//! Loan ledger: the transactional borrow/return core.
//!
//! A naive read-then-write here loses updates: two borrows against the same
//! book can both see `stock > 0` and both decrement, and two borrows by the
//! same user can both see a free loan slot. Each operation therefore runs in
//! a single transaction that locks the user row and then the book row with
//! `FOR UPDATE` before re-validating, and commits both row updates together.
//! Lock order is always user first, book second.

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{book::Book, loan, user::User},
};

/// Upper bound on lock waits; hitting it rolls the transaction back and
/// surfaces as a storage error, which the caller may retry.
const LOCK_TIMEOUT: &str = "SET LOCAL lock_timeout = '5s'";

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Borrow `book_id` for `user_id`.
    ///
    /// Checked on the locked rows, in order: user exists, user holds no
    /// loan, book exists, stock is positive.
    pub async fn borrow(&self, user_id: i32, book_id: i32) -> AppResult<(User, Book)> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(LOCK_TIMEOUT).execute(&mut *tx).await?;

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AppError::UserNotFound(user_id))?;

        loan::ensure_can_borrow(&user)?;

        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1 FOR UPDATE")
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AppError::BookNotFound(book_id))?;

        let (user, book) = loan::apply_borrow(user, book, Utc::now())?;

        self.persist_pair(&mut tx, &user, &book).await?;
        tx.commit().await?;

        Ok((user, book))
    }

    /// Return `book_id` for `user_id`.
    ///
    /// Checked on the locked user row, in order: the id matches the loan on
    /// record, a loan exists at all; then the book row is locked and both
    /// rows are updated.
    pub async fn return_book(&self, user_id: i32, book_id: i32) -> AppResult<(User, Book)> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(LOCK_TIMEOUT).execute(&mut *tx).await?;

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AppError::UserNotFound(user_id))?;

        loan::ensure_can_return(&user, book_id)?;

        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1 FOR UPDATE")
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AppError::BookNotFound(book_id))?;

        let (user, book) = loan::apply_return(user, book)?;

        self.persist_pair(&mut tx, &user, &book).await?;
        tx.commit().await?;

        Ok((user, book))
    }

    /// Write both sides of a transition inside the caller's transaction
    async fn persist_pair(
        &self,
        tx: &mut sqlx::Transaction<'_, Postgres>,
        user: &User,
        book: &Book,
    ) -> AppResult<()> {
        sqlx::query("UPDATE users SET borrowed_book_id = $1, borrow_date = $2 WHERE id = $3")
            .bind(user.borrowed_book_id)
            .bind(user.borrow_date)
            .bind(user.id)
            .execute(&mut **tx)
            .await?;

        sqlx::query("UPDATE books SET stock = $1, borrowed = $2 WHERE id = $3")
            .bind(book.stock)
            .bind(book.borrowed)
            .bind(book.id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}
