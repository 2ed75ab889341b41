//! API integration tests, run in-process against the router

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use library_server::{api::create_router, AppConfig, AppState};

const BASE_URL: &str = "/api/v1";

fn app() -> Router {
    create_router(AppState::new(AppConfig::default()))
}

/// Send one request and decode the JSON body (Null when empty)
async fn send(app: &Router, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(format!("{}{}", BASE_URL, path));
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, value)
}

async fn create_user(app: &Router, name: &str, registration_number: &str, email: Option<&str>) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/users",
        Some(json!({
            "name": name,
            "registrationNumber": registration_number,
            "role": "STUDENT",
            "email": email,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body
}

async fn create_book(app: &Router, id: i32, title: &str, copies: u32) {
    let (status, _) = send(
        app,
        Method::POST,
        "/books",
        Some(json!({ "id": id, "title": title, "author": "Autor", "inventoryCount": copies })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert!(status.is_success());
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_user_crud() {
    let app = app();
    let user = create_user(&app, "Teste Usuario", "TST12345", Some("teste@email.com")).await;
    assert_eq!(user["id"], 1);
    assert_eq!(user["status"], "ACTIVE");
    assert_eq!(user["role"], "STUDENT");
    assert!(user["registrationTimestamp"].is_string());

    let (status, body) = send(&app, Method::GET, "/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["registrationNumber"], "TST12345");

    let (status, body) = send(&app, Method::GET, "/users/registration/TST12345", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/users/1",
        Some(json!({ "name": "Renamed", "status": "SUSPENDED" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Renamed");
    assert_eq!(body["status"], "SUSPENDED");
    assert_eq!(body["email"], "teste@email.com");

    let (status, _) = send(&app, Method::DELETE, "/users/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = send(&app, Method::GET, "/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchUser");
    let (status, _) = send(&app, Method::DELETE, "/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // registration number and email are free again
    let again = create_user(&app, "Teste Usuario", "TST12345", Some("teste@email.com")).await;
    assert_eq!(again["id"], 2);
}

#[tokio::test]
async fn test_user_validation_errors() {
    let app = app();
    create_user(&app, "First", "REG00001", None).await;

    for body in [
        json!({ "name": "Dup", "registrationNumber": "REG00001", "role": "STAFF" }),
        json!({ "name": "", "registrationNumber": "REG00002", "role": "STAFF" }),
        json!({ "name": "Short", "registrationNumber": "R1", "role": "STAFF" }),
        json!({ "name": "Mail", "registrationNumber": "REG00003", "role": "STAFF", "email": "nope" }),
    ] {
        let (status, error) = send(&app, Method::POST, "/users", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", error);
        assert_eq!(error["error"], "BadValue");
    }

    let (_, users) = send(&app, Method::GET, "/users", None).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_books() {
    let app = app();
    create_book(&app, 7, "Dom Casmurro", 1).await;

    let (status, body) = send(&app, Method::GET, "/books/7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["inventoryCount"], 1);
    assert_eq!(body["status"], "available");

    let (status, body) = send(&app, Method::GET, "/books/7/availability", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], true);

    let (status, _) = send(&app, Method::DELETE, "/books/7", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, "/books/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::GET, "/books/7/availability", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_loan_lifecycle() {
    let app = app();
    create_user(&app, "Reader", "RDR00001", None).await;
    create_book(&app, 1, "Livro Teste", 1).await;

    let (status, loan) = send(&app, Method::POST, "/loans", Some(json!({ "userId": 1, "bookId": 1 }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(loan["loanId"], 1);
    assert!(loan["borrowedAt"].is_string());
    assert!(loan["returnedAt"].is_null());

    let (status, body) = send(&app, Method::POST, "/loans", Some(json!({ "userId": 1, "bookId": 1 }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "ItemNotAvailable");

    let (_, book) = send(&app, Method::GET, "/books/1", None).await;
    assert_eq!(book["status"], "loaned");

    let (status, returned) = send(&app, Method::POST, "/returns", Some(json!({ "userId": 1, "bookId": 1 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(returned["returnedAt"].is_string());

    let (status, body) = send(&app, Method::POST, "/returns", Some(json!({ "userId": 1, "bookId": 1 }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "NoActiveLoan");

    let (_, book) = send(&app, Method::GET, "/books/1", None).await;
    assert_eq!(book["inventoryCount"], 1);

    let (status, body) = send(&app, Method::GET, "/loans/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["loanId"], 1);
    let (status, _) = send(&app, Method::GET, "/loans/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, loans) = send(&app, Method::GET, "/loans", None).await;
    assert_eq!(loans.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_loan_reference_errors() {
    let app = app();
    create_user(&app, "Reader", "RDR00001", None).await;
    create_book(&app, 1, "Livro", 1).await;

    let (status, _) = send(&app, Method::POST, "/loans", Some(json!({ "userId": 0, "bookId": 1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::POST, "/loans", Some(json!({ "userId": 9, "bookId": 1 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::POST, "/loans", Some(json!({ "userId": 1, "bookId": 9 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reports() {
    let app = app();
    create_user(&app, "Teste Usuario", "TST12345", None).await;
    create_book(&app, 10, "Livro Popular", 5).await;
    create_book(&app, 11, "Livro Menos", 1).await;

    for book_id in [10, 10, 11] {
        let (status, _) = send(&app, Method::POST, "/loans", Some(json!({ "userId": 1, "bookId": book_id }))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, books) = send(&app, Method::GET, "/reports/most-borrowed-books", None).await;
    assert_eq!(books[0]["title"], "Livro Popular");
    assert_eq!(books[0]["count"], 2);
    assert_eq!(books[1]["count"], 1);

    let (_, users) = send(&app, Method::GET, "/reports/most-active-users", None).await;
    assert_eq!(users[0]["registrationNumber"], "TST12345");
    assert_eq!(users[0]["count"], 3);

    let (_, status) = send(&app, Method::GET, "/reports/collection-status", None).await;
    assert_eq!(status, json!({ "available": 1, "loaned": 1, "total": 2 }));

    let (_, details) = send(&app, Method::GET, "/reports/loans", None).await;
    assert_eq!(details.as_array().unwrap().len(), 3);
    assert_eq!(details[0]["status"], "In progress");
    assert_eq!(details[0]["book"]["title"], "Livro Popular");
}

#[tokio::test]
async fn test_period_report_parameters() {
    let app = app();

    let (status, _) = send(&app, Method::GET, "/reports/period?start=2024-01-01", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::GET, "/reports/period", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::GET, "/reports/period?start=&end=2024-01-31", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, body) = send(&app, Method::GET, "/reports/period?start=jan&end=2024-01-31", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(&app, Method::GET, "/reports/period?start=2024-01-01&end=2024-01-31", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_period_report_includes_todays_loans() {
    let app = app();
    create_user(&app, "Reader", "RDR00001", None).await;
    create_book(&app, 1, "Livro", 1).await;
    let (_, loan) = send(&app, Method::POST, "/loans", Some(json!({ "userId": 1, "bookId": 1 }))).await;
    let day = &loan["borrowedAt"].as_str().unwrap()[..10];

    let path = format!("/reports/period?start={}&end={}", day, day);
    let (status, body) = send(&app, Method::GET, &path, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["loanId"], 1);

    // a shorter prefix still sorts before the full day
    let path = format!("/reports/period?start={}&end={}", &day[..7], day);
    let (_, body) = send(&app, Method::GET, &path, None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}
