use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use punch_clock::{
    api::create_router,
    services::{InMemoryStore, RecordStore, RetryPolicy},
    state::{AppState, SessionTracker, WorkSession},
};
use serde_json::Value;
use tower::ServiceExt;

fn app() -> (Router, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let tracker = Arc::new(
        SessionTracker::new("jules", store.clone()).with_retry(RetryPolicy::no_retry()),
    );
    let state = Arc::new(AppState::new(
        tracker,
        20554,
        "127.0.0.1".to_string(),
        7.5,
    ));
    (create_router(state), store)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn session_lifecycle_over_http() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::POST, "/session/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "running");
    let session_id = body["session"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        "/break/start",
        Some(serde_json::json!({ "break_type": "lunch" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "break");
    assert_eq!(body["timer"]["current_break_type"], "lunch");
    assert_eq!(body["break"]["break_type"], "lunch");

    let (status, body) = send(&app, Method::POST, "/break/end", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "running");
    assert_eq!(body["break"]["duration_minutes"], 0);

    let (status, body) = send(&app, Method::POST, "/session/stop", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["status"], "completed");
    assert_eq!(body["session"]["net_work_minutes"], 0);

    let (status, body) = send(&app, Method::GET, &format!("/sessions/{}", session_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["id"], session_id.as_str());
    assert_eq!(body["breaks"].as_array().map(|b| b.len()), Some(1));
}

#[tokio::test]
async fn precondition_failures_are_conflicts() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::POST, "/break/end", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
    assert_eq!(body["timer"]["status"], "idle");

    send(&app, Method::POST, "/session/start", None).await;
    let (status, _) = send(&app, Method::POST, "/session/start", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn persistence_failures_are_bad_gateway() {
    let (app, store) = app();
    store.set_offline(true);

    let (status, body) = send(&app, Method::POST, "/session/start", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["status"], "error");
    assert_eq!(body["timer"]["status"], "idle");
}

#[tokio::test]
async fn unknown_break_type_is_rejected() {
    let (app, _) = app();
    send(&app, Method::POST, "/session/start", None).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/break/start",
        Some(serde_json::json!({ "break_type": "nap" })),
    )
    .await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn status_reports_timer_and_expected_minutes() {
    let (app, _) = app();
    send(&app, Method::POST, "/session/start", None).await;
    send(&app, Method::POST, "/session/pause", None).await;

    let (status, body) = send(&app, Method::GET, "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"], "jules");
    assert_eq!(body["timer"]["status"], "paused");
    assert_eq!(body["elapsed"], "00:00:00");
    assert_eq!(body["expected_daily_minutes"], 450);
    assert_eq!(body["sync"]["state"], "synced");
    assert_eq!(body["last_action"], "pause");
    assert_eq!(body["current_session"]["status"], "paused");
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let (app, _) = app();
    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/sessions/{}", uuid::Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn restore_adopts_a_session_left_in_the_store() {
    let (app, store) = app();
    let (status, body) = send(&app, Method::POST, "/session/restore", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "idle");

    let orphan = WorkSession::start("jules", chrono::Utc::now());
    store.insert_session(&orphan).await.unwrap();
    let (status, _) = send(&app, Method::POST, "/session/start", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, Method::POST, "/session/restore", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "running");
    assert_eq!(body["session"]["id"], orphan.id.to_string());

    let (status, body) = send(&app, Method::POST, "/session/stop", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["status"], "completed");
}
