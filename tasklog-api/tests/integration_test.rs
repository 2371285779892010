/// Integration tests for the Tasklog API
///
/// These drive the full router (routing, extraction, validation, error
/// mapping, middleware) over an in-memory store.

mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::json;
use tasklog_shared::store::TaskStore;

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send("GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "memory");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_sample_users_listed() {
    let ctx = TestContext::with_sample_users();

    let (status, body) = ctx.send("GET", "/api/users", None).await;

    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(users[0]["name"], "John Doe");
    assert_eq!(users[0]["tasks"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_full_user_and_log_flow() {
    let ctx = TestContext::new();

    // Create
    let (status, user) = ctx
        .send(
            "POST",
            "/api/users",
            Some(json!({ "name": "Ann", "project": "P", "tasks": ["A", "B"] })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["name"], "Ann");
    assert_eq!(user["project"], "P");
    assert_eq!(user["tasks"], json!(["A", "B"]));
    assert!(uuid::Uuid::parse_str(user["id"].as_str().unwrap()).is_ok());

    // Read tasks
    let (status, body) = ctx.send("GET", "/api/tasks/Ann", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "tasks": ["A", "B"] }));

    // Replace tasks
    let (status, body) = ctx
        .send("POST", "/api/tasks/Ann", Some(json!({ "tasks": ["C"] })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tasks"], json!(["C"]));
    assert_eq!(body["id"], user["id"]);

    // Submit logs
    let (status, first) = ctx
        .send("POST", "/api/logs", Some(json!({ "user": "Ann", "task": "C" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["status"], "COMPLETED");
    assert!(first["comment"].is_null());
    assert!(first["timestamp"].is_string());

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let (status, second) = ctx
        .send(
            "POST",
            "/api/logs",
            Some(json!({
                "user": "Ann",
                "task": "C",
                "status": "NOT COMPLETED",
                "comment": "blocked"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["status"], "NOT COMPLETED");
    assert_eq!(second["comment"], "blocked");

    // Newest first
    let (status, logs) = ctx.send("GET", "/api/logs?user=Ann", None).await;
    assert_eq!(status, StatusCode::OK);
    let logs = logs.as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["id"], second["id"]);
    assert_eq!(logs[1]["id"], first["id"]);

    // Delete user; logs survive
    let (status, body) = ctx.send("DELETE", "/api/users/Ann", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");

    let (status, _) = ctx.send("GET", "/api/tasks/Ann", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, logs) = ctx.send("GET", "/api/logs", None).await;
    assert_eq!(logs.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_user_validation() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send("POST", "/api/users", Some(json!({ "name": "" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "project"]);

    let (_, users) = ctx.send("GET", "/api/users", None).await;
    assert!(users.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_user_malformed_body() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send_raw("POST", "/api/users", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_duplicate_user_conflict() {
    let ctx = TestContext::new();
    let payload = json!({ "name": "Ann", "project": "P" });

    let (status, user) = ctx.send("POST", "/api/users", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["tasks"], json!([]));

    let (status, body) = ctx.send("POST", "/api/users", Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    assert_eq!(ctx.store.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_percent_encoded_names() {
    let ctx = TestContext::with_sample_users();

    let (status, body) = ctx.send("GET", "/api/tasks/Jane%20Smith", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["tasks"],
        json!(["Design Documentation", "User Research", "Prototype Testing"])
    );

    let (status, _) = ctx.send("DELETE", "/api/users/Jane%20Smith", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(ctx.store.get_user("Jane Smith").await.unwrap().is_none());
}

#[tokio::test]
async fn test_missing_user_returns_not_found() {
    let ctx = TestContext::with_sample_users();

    let (status, body) = ctx.send("DELETE", "/api/users/Nobody", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (status, _) = ctx.send("GET", "/api/tasks/Nobody", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx
        .send("POST", "/api/tasks/Nobody", Some(json!({ "tasks": [] })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(ctx.store.list_users().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_update_tasks_requires_array() {
    let ctx = TestContext::with_sample_users();

    let (status, body) = ctx
        .send("POST", "/api/tasks/John%20Doe", Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "tasks");

    let (status, _) = ctx
        .send("POST", "/api/tasks/John%20Doe", Some(json!({ "tasks": "A" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let user = ctx.store.get_user("John Doe").await.unwrap().unwrap();
    assert_eq!(user.tasks.len(), 3);
}

#[tokio::test]
async fn test_task_log_validation() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send("POST", "/api/logs", Some(json!({ "user": "Ann" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "task");

    let (status, body) = ctx
        .send(
            "POST",
            "/api/logs",
            Some(json!({ "user": "Ann", "task": "A", "status": "DONE" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "status");

    assert!(ctx.store.list_task_logs().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_log_filter_and_clear() {
    let ctx = TestContext::new();

    for user in ["Ann", "Bob", "Ann"] {
        let (status, _) = ctx
            .send("POST", "/api/logs", Some(json!({ "user": user, "task": "T" })))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, logs) = ctx.send("GET", "/api/logs?user=Bob", None).await;
    assert_eq!(logs.as_array().unwrap().len(), 1);

    // Empty filter means all logs
    let (_, logs) = ctx.send("GET", "/api/logs?user=", None).await;
    assert_eq!(logs.as_array().unwrap().len(), 3);

    let (_, logs) = ctx.send("GET", "/api/logs?user=Nobody", None).await;
    assert!(logs.as_array().unwrap().is_empty());

    let (status, body) = ctx.send("DELETE", "/api/logs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task logs cleared");

    let (_, logs) = ctx.send("GET", "/api/logs", None).await;
    assert!(logs.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_path_segment_returns_json_error() {
    let ctx = TestContext::with_sample_users();

    for (method, uri) in [
        ("GET", "/api/tasks/%FF"),
        ("DELETE", "/api/users/%FF"),
    ] {
        let (status, body) = ctx.send(method, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
        assert_eq!(body["error"], "bad_request");
        assert!(body["message"].is_string());
    }

    let (status, body) = ctx
        .send("POST", "/api/tasks/%FF", Some(json!({ "tasks": [] })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    assert_eq!(ctx.store.list_users().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_duplicate_query_key_returns_json_error() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send("GET", "/api/logs?user=a&user=b", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"].as_str().unwrap().contains("user"));
}
