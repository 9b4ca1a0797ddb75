//! Integration tests for the `/users` routes.

use axum::http::StatusCode;
use coffee_integration_tests::TestApp;
use serde_json::{Value, json};

fn find_by_email<'a>(users: &'a Value, email: &str) -> Option<&'a Value> {
    users
        .as_array()?
        .iter()
        .find(|user| user["email"] == json!(email))
}

#[tokio::test]
async fn test_create_and_list_users() {
    let app = TestApp::new();

    let created = app
        .post(
            "/users",
            json!({ "email": "a@x.com", "createdAt": "2024-01-01", "lastSignIn": "2024-01-01" }),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);
    let id = created.inserted_id();

    let users = app.get("/users").await.json();
    assert_eq!(
        users,
        json!([{
            "_id": id,
            "email": "a@x.com",
            "createdAt": "2024-01-01",
            "lastSignIn": "2024-01-01"
        }])
    );
}

#[tokio::test]
async fn test_patch_updates_only_last_sign_in() {
    let app = TestApp::new();
    app.post(
        "/users",
        json!({ "email": "a@x.com", "name": "Ada", "lastSignIn": "2024-01-01T08:00:00Z" }),
    )
    .await;
    app.post(
        "/users",
        json!({ "email": "b@x.com", "name": "Bo", "lastSignIn": "2024-01-01T08:00:00Z" }),
    )
    .await;

    let response = app
        .patch(
            "/users",
            json!({ "email": "a@x.com", "lastSignIn": "2024-02-02T09:30:00Z", "name": "Ignored" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let outcome = response.json();
    assert_eq!(outcome["matchedCount"], json!(1));
    assert_eq!(outcome["modifiedCount"], json!(1));

    let users = app.get("/users").await.json();
    let ada = find_by_email(&users, "a@x.com").expect("ada");
    assert_eq!(ada["lastSignIn"], json!("2024-02-02T09:30:00Z"));
    assert_eq!(ada["name"], json!("Ada"));

    let bo = find_by_email(&users, "b@x.com").expect("bo");
    assert_eq!(bo["lastSignIn"], json!("2024-01-01T08:00:00Z"));
}

#[tokio::test]
async fn test_patch_unknown_email_creates_nothing() {
    let app = TestApp::new();
    app.post("/users", json!({ "email": "a@x.com" })).await;

    let response = app
        .patch("/users", json!({ "email": "ghost@x.com", "lastSignIn": "2024-02-02" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({
            "acknowledged": true,
            "matchedCount": 0,
            "modifiedCount": 0,
            "upsertedCount": 0,
            "upsertedId": null
        })
    );

    let users = app.get("/users").await.json();
    assert_eq!(users.as_array().map(Vec::len), Some(1));
    assert!(find_by_email(&users, "ghost@x.com").is_none());
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::new();
    let id = app.post("/users", json!({ "email": "a@x.com" })).await.inserted_id();

    let deleted = app.delete(&format!("/users/{id}")).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.json()["deletedCount"], json!(1));
    assert_eq!(app.get("/users").await.json(), json!([]));

    let again = app.delete(&format!("/users/{id}")).await;
    assert_eq!(again.json()["deletedCount"], json!(0));
}

#[tokio::test]
async fn test_delete_user_with_malformed_id_fails() {
    let app = TestApp::new();

    let response = app.delete("/users/12345").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_collections_are_independent() {
    let app = TestApp::new();
    let id = app.post("/users", json!({ "email": "a@x.com" })).await.inserted_id();

    assert_eq!(app.get("/coffee").await.json(), json!([]));

    let response = app.delete(&format!("/coffee/{id}")).await;
    assert_eq!(response.json()["deletedCount"], json!(0));
    assert_eq!(app.get("/users").await.json().as_array().map(Vec::len), Some(1));
}
