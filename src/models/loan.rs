//! Borrow/return state transitions.
//!
//! A user moves between two states over `borrowed_book_id`: free (0) and
//! holding exactly one book. Borrowing moves one copy from `stock` to
//! `borrowed`; returning moves it back. The functions here validate and
//! apply those transitions on in-memory rows; the repository runs them on
//! rows it has locked inside a transaction, so the checks and the writes
//! are atomic as a unit.

use chrono::{DateTime, Utc};

use crate::error::{AppError, AppResult};
use crate::models::book::Book;
use crate::models::user::User;

/// Check that a user may take out a new loan
pub fn ensure_can_borrow(user: &User) -> AppResult<()> {
    if user.has_active_loan() {
        return Err(AppError::AlreadyBorrowing);
    }
    Ok(())
}

/// Check that a user may return `book_id`.
///
/// The mismatch check runs before the empty-loan check: a loan-free user
/// returning id 0 gets `NoActiveLoan`, any other id gets `BookMismatch`.
pub fn ensure_can_return(user: &User, book_id: i32) -> AppResult<()> {
    if user.borrowed_book_id != book_id {
        return Err(AppError::BookMismatch);
    }
    if user.borrowed_book_id == 0 {
        return Err(AppError::NoActiveLoan);
    }
    Ok(())
}

/// Apply a borrow: point the user at the book, stamp the borrow date and
/// move one copy from `stock` to `borrowed`.
pub fn apply_borrow(
    mut user: User,
    mut book: Book,
    now: DateTime<Utc>,
) -> AppResult<(User, Book)> {
    ensure_can_borrow(&user)?;
    if book.stock <= 0 {
        return Err(AppError::OutOfStock);
    }

    user.borrowed_book_id = book.id;
    user.borrow_date = Some(now);
    book.stock -= 1;
    book.borrowed += 1;

    Ok((user, book))
}

/// Apply a return: clear the loan pointer and borrow date, move one copy
/// from `borrowed` back to `stock`.
pub fn apply_return(mut user: User, mut book: Book) -> AppResult<(User, Book)> {
    ensure_can_return(&user, book.id)?;

    user.borrowed_book_id = 0;
    user.borrow_date = None;
    book.stock += 1;
    book.borrowed -= 1;

    Ok((user, book))
}
