//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    error::TrackerError,
    state::AppState,
    utils::format_clock,
};
use super::responses::{
    ApiResponse, HealthResponse, SessionResponse, StartBreakRequest, StatusResponse,
};

type HandlerResult = Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)>;

/// Map a tracker error onto an HTTP status and an error body
fn reject(state: &AppState, action: &str, err: TrackerError) -> (StatusCode, Json<ApiResponse>) {
    let code = if err.is_precondition() {
        warn!("{} rejected: {}", action, err);
        StatusCode::CONFLICT
    } else {
        error!("{} failed: {}", action, err);
        StatusCode::BAD_GATEWAY
    };
    (code, Json(ApiResponse::error(err.to_string(), state.timer.view())))
}

/// Handle POST /session/start - Start a work session
pub async fn start_session_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    match state.timer.start_session().await {
        Ok(session) => {
            state.record_action("start-session");
            info!("Session start endpoint called - session {} running", session.id);
            Ok(Json(
                ApiResponse::ok("Session started".to_string(), state.timer.view())
                    .with_session(session),
            ))
        }
        Err(e) => Err(reject(&state, "start session", e)),
    }
}

/// Handle POST /session/stop - Stop the current work session
pub async fn stop_session_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    match state.timer.stop_session().await {
        Ok(session) => {
            state.record_action("stop-session");
            info!("Session stop endpoint called - session {} completed", session.id);
            Ok(Json(
                ApiResponse::ok("Session stopped".to_string(), state.timer.view())
                    .with_session(session),
            ))
        }
        Err(e) => Err(reject(&state, "stop session", e)),
    }
}

/// Handle POST /session/pause - Pause the running session
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    match state.timer.pause().await {
        Ok(session) => {
            state.record_action("pause");
            Ok(Json(
                ApiResponse::ok("Session paused".to_string(), state.timer.view())
                    .with_session(session),
            ))
        }
        Err(e) => Err(reject(&state, "pause", e)),
    }
}

/// Handle POST /session/resume - Resume a paused session
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    match state.timer.resume().await {
        Ok(session) => {
            state.record_action("resume");
            Ok(Json(
                ApiResponse::ok("Session resumed".to_string(), state.timer.view())
                    .with_session(session),
            ))
        }
        Err(e) => Err(reject(&state, "resume", e)),
    }
}

/// Handle POST /session/restore - Adopt the session left open in the record store
pub async fn restore_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    match state.timer.restore().await {
        Ok(Some(session)) => {
            state.record_action("restore");
            info!("Restore endpoint called - session {} adopted", session.id);
            Ok(Json(
                ApiResponse::ok("Session restored".to_string(), state.timer.view())
                    .with_session(session),
            ))
        }
        Ok(None) => Ok(Json(ApiResponse::ok(
            "No open session to restore".to_string(),
            state.timer.view(),
        ))),
        Err(e) => Err(reject(&state, "restore", e)),
    }
}

/// Handle POST /break/start - Start a break of the requested type
pub async fn start_break_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartBreakRequest>,
) -> HandlerResult {
    match state.timer.start_break(request.break_type).await {
        Ok(record) => {
            state.record_action("start-break");
            info!("Break start endpoint called - {} break started", record.break_type);
            Ok(Json(
                ApiResponse::ok(
                    format!("{} break started", record.break_type),
                    state.timer.view(),
                )
                .with_break(record),
            ))
        }
        Err(e) => Err(reject(&state, "start break", e)),
    }
}

/// Handle POST /break/end - End the break in progress
pub async fn end_break_handler(State(state): State<Arc<AppState>>) -> HandlerResult {
    match state.timer.end_break().await {
        Ok(record) => {
            state.record_action("end-break");
            info!(
                "Break end endpoint called - break lasted {} min",
                record.duration_minutes.unwrap_or(0)
            );
            Ok(Json(
                ApiResponse::ok("Break ended".to_string(), state.timer.view()).with_break(record),
            ))
        }
        Err(e) => Err(reject(&state, "end break", e)),
    }
}

/// Handle GET /sessions/:id - Look up a session and its breaks
pub async fn session_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, StatusCode> {
    match state.timer.tracker().session_with_breaks(id).await {
        Ok(Some((session, breaks))) => Ok(Json(SessionResponse { session, breaks })),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!("Failed to look up session {}: {}", id, e);
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}

/// Handle GET /status - Return the timer and session state
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let tracker = state.timer.tracker();
    let snapshot = tracker.snapshot();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        user: tracker.user_id().to_string(),
        timer: (&snapshot).into(),
        elapsed: format_clock(snapshot.seconds as i64),
        break_elapsed: format_clock(snapshot.break_seconds as i64),
        current_session: snapshot.current_session,
        current_break: snapshot.current_break,
        last_completed: snapshot.last_completed,
        sync: snapshot.sync,
        expected_daily_minutes: state.expected_daily_minutes(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
