//! API integration tests.
//!
//! These run against a live server seeded with the default data
//! (`admin`/`user1`/`user2`, password `password123`, three books).

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

/// Helper to log a seeded user in and get a bearer token
async fn get_auth_token(client: &Client, username: &str) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["data"]["token"]
        .as_str()
        .expect("No token in response")
        .to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    assert!(body["data"]["token"].is_string());
    assert_eq!(body["data"]["token_type"], "Bearer");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "error");
    assert_eq!(body["code"], 401);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let client = Client::new();
    let token = get_auth_token(&client, "admin").await;

    let response = client
        .get(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    assert!(body["data"].is_array());
    assert!(body["count"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_get_book_invalid_id() {
    let client = Client::new();
    let token = get_auth_token(&client, "admin").await;

    let response = client
        .get(format!("{}/books/not-a-number", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Invalid book ID");
}

#[tokio::test]
#[ignore]
async fn test_create_update_and_delete_book() {
    let client = Client::new();
    let token = get_auth_token(&client, "admin").await;

    // Create
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Test Book",
            "description": "A throwaway record",
            "author": "Nobody",
            "stock": 2
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let book_id = body["data"]["id"].as_i64().expect("No book ID");

    // Partial update: only the title changes
    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "title": "Renamed Book" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["title"], "Renamed Book");
    assert_eq!(body["data"]["stock"], 2);

    // Delete
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_borrow_and_return_cycle() {
    let client = Client::new();
    let token = get_auth_token(&client, "user1").await;

    let stock_of = |body: &Value, id: i64| -> i64 {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|b| b["id"].as_i64() == Some(id))
            .and_then(|b| b["stock"].as_i64())
            .expect("book missing from list")
    };

    // Snapshot stock before
    let before: Value = client
        .get(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let book_id = before["data"][0]["id"].as_i64().expect("No seeded books");
    let initial_stock = stock_of(&before, book_id);

    // Borrow
    let response = client
        .post(format!("{}/books/borrow/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // A second borrow by the same user is a state conflict
    let response = client
        .post(format!("{}/books/borrow/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "User already has a borrowed book");

    // Returning a different book is rejected
    let response = client
        .post(format!("{}/books/return/{}", BASE_URL, book_id + 1))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Invalid book returned");

    // Return the right one
    let response = client
        .post(format!("{}/books/return/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Stock is restored exactly
    let after: Value = client
        .get(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(stock_of(&after, book_id), initial_stock);
}

#[tokio::test]
#[ignore]
async fn test_return_without_loan() {
    let client = Client::new();
    let token = get_auth_token(&client, "user2").await;

    let response = client
        .post(format!("{}/books/return/1", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Invalid book returned");
}

#[tokio::test]
#[ignore]
async fn test_logout_invalidates_token() {
    let client = Client::new();
    let token = get_auth_token(&client, "user2").await;

    let response = client
        .post(format!("{}/auth/logout", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // The token no longer authenticates
    let response = client
        .get(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);
}
