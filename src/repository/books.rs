//! Books repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get all books
    pub async fn get_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::BookNotFound(id))
    }

    /// Create a new book
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, description, author, stock, borrowed, created_at, active)
            VALUES ($1, $2, $3, $4, 0, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.description)
        .bind(&book.author)
        .bind(book.stock)
        .bind(Utc::now())
        .bind(book.active)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Partially update a book. Fields absent from the patch keep their
    /// stored value.
    pub async fn update(&self, id: i32, patch: &UpdateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                author = COALESCE($3, author),
                stock = COALESCE($4, stock),
                active = COALESCE($5, active)
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(&patch.author)
        .bind(patch.stock)
        .bind(patch.active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::BookNotFound(id))
    }

    /// Delete a book by ID. Unconditional: a borrowed copy is not checked
    /// for, so an outstanding loan keeps pointing at the deleted id.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
