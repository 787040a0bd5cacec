//! Book catalog and borrow/return endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, CreateBook, UpdateBook},
        response::ApiResponse,
    },
};

use super::AuthenticatedUser;

/// Path ids arrive as text; anything that is not an integer is a client
/// error, not a routing miss.
fn parse_book_id(raw: &str) -> AppResult<i32> {
    raw.parse::<i32>()
        .map_err(|_| AppError::Validation("Invalid book ID".to_string()))
}

/// Get all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All catalog books", body = Vec<Book>),
        (status = 401, description = "Not authenticated"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
) -> AppResult<Json<ApiResponse<Vec<Book>>>> {
    let books = state.services.catalog.list_books().await?;
    let count = books.len();

    Ok(Json(ApiResponse::success_with_count(
        StatusCode::OK,
        "Books retrieved successfully",
        books,
        count,
    )))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 400, description = "Invalid book ID"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Book>>> {
    let id = parse_book_id(&id)?;
    let book = state.services.catalog.get_book(id).await?;

    Ok(Json(ApiResponse::success(
        StatusCode::OK,
        "Book retrieved successfully",
        Some(book),
    )))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid payload"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    payload: Result<Json<CreateBook>, axum::extract::rejection::JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Book>>)> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.to_string()))?;
    let book = state.services.catalog.create_book(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            StatusCode::CREATED,
            "Book created successfully",
            Some(book),
        )),
    ))
}

/// Partially update a book by ID
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid payload or ID"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateBook>, axum::extract::rejection::JsonRejection>,
) -> AppResult<Json<ApiResponse<Book>>> {
    let id = parse_book_id(&id)?;
    let Json(patch) = payload.map_err(|e| AppError::Validation(e.to_string()))?;
    let book = state.services.catalog.update_book(id, patch).await?;

    Ok(Json(ApiResponse::success(
        StatusCode::OK,
        "Book updated successfully",
        Some(book),
    )))
}

/// Delete a book by ID
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 400, description = "Invalid book ID"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let id = parse_book_id(&id)?;
    state.services.catalog.delete_book(id).await?;

    Ok(Json(ApiResponse::success(
        StatusCode::OK,
        "Book deleted successfully",
        None,
    )))
}

/// Borrow a book for the authenticated user
#[utoipa::path(
    post,
    path = "/books/borrow/{id}",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book borrowed"),
        (status = 400, description = "Invalid ID, loan already open, or out of stock"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let book_id = parse_book_id(&id)?;
    state.services.loans.borrow(user.id, book_id).await?;

    Ok(Json(ApiResponse::success(
        StatusCode::OK,
        "Book borrowed successfully",
        None,
    )))
}

/// Return the authenticated user's borrowed book
#[utoipa::path(
    post,
    path = "/books/return/{id}",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book returned"),
        (status = 400, description = "Invalid ID, wrong book, or no open loan"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let book_id = parse_book_id(&id)?;
    state.services.loans.return_book(user.id, book_id).await?;

    Ok(Json(ApiResponse::success(
        StatusCode::OK,
        "Book returned successfully",
        None,
    )))
}
