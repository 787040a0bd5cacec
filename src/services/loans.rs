//! Loan service: borrow/return orchestration

use crate::{
    error::AppResult,
    models::{book::Book, user::User},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow a book for a user
    pub async fn borrow(&self, user_id: i32, book_id: i32) -> AppResult<(User, Book)> {
        let (user, book) = self.repository.loans.borrow(user_id, book_id).await?;
        tracing::info!(user_id, book_id, stock = book.stock, "book borrowed");
        Ok((user, book))
    }

    /// Return a borrowed book
    pub async fn return_book(&self, user_id: i32, book_id: i32) -> AppResult<(User, Book)> {
        let (user, book) = self.repository.loans.return_book(user_id, book_id).await?;
        tracing::info!(user_id, book_id, stock = book.stock, "book returned");
        Ok((user, book))
    }
}
