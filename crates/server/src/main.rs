// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod live;
mod schedule;

use autosub::NoticeSink;
use autosub_api::{
    ApiError, ApplyLeaveRequest, AssignSubstitutesRequest, AssignmentResponse,
    ConflictReportResponse, CreateScheduleSlotRequest, CreateSchoolRequest, CreateTeacherRequest,
    DecideLeaveRequest, DecideLeaveResponse, LeaveResponse, ScanResponse, ScheduleSlotResponse,
    SchoolResponse, SetTeacherActiveRequest, SubstitutionHistoryRequest,
    SubstitutionHistoryResponse, TeacherResponse, WithNotices, apply_leave, assign_substitutes,
    create_schedule_slot, create_school, create_teacher, decide_leave, detect_conflicts,
    list_substitution_history, list_teacher_substitutions, run_conflict_scan, set_teacher_active,
};
use autosub_persistence::Persistence;
use axum::{
    Json, Router,
    extract::{FromRef, Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::live::{LiveNoticeBroadcaster, live_notices_handler};

/// Autosub Server - substitute assignment and conflict detection over HTTP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// UTC hour (0-23) at which the daily conflict scan runs
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u8).range(0..24))]
    scan_hour: u8,

    /// Disable the daily conflict scan
    #[arg(long)]
    no_scan: bool,
}

/// Application state shared across handlers.
///
/// The persistence handle sits behind one mutex. Approvals and assignment
/// runs hold it for their whole run, so runs never interleave.
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    persistence: Arc<Mutex<Persistence>>,
    /// Live notice stream.
    live: Arc<LiveNoticeBroadcaster>,
}

impl FromRef<AppState> for Arc<LiveNoticeBroadcaster> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.live)
    }
}

/// Query parameters for `GET /conflicts`.
#[derive(Debug, Deserialize)]
struct ConflictsQuery {
    /// The school to check.
    school_id: i64,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for POST `/schools` endpoint.
async fn handle_create_school(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateSchoolRequest>,
) -> Result<Json<SchoolResponse>, HttpError> {
    info!(name = %req.name, "Handling create_school request");

    let mut persistence = app_state.persistence.lock().await;
    let response: SchoolResponse = create_school(&mut persistence, &req)?;
    drop(persistence);

    info!(school_id = response.school_id, "Created school");
    Ok(Json(response))
}

/// Handler for POST `/teachers` endpoint.
async fn handle_create_teacher(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateTeacherRequest>,
) -> Result<Json<TeacherResponse>, HttpError> {
    info!(
        school_id = req.school_id,
        email = %req.email,
        "Handling create_teacher request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: TeacherResponse = create_teacher(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/teachers/{teacher_id}/active` endpoint.
async fn handle_set_teacher_active(
    AxumState(app_state): AxumState<AppState>,
    Path(teacher_id): Path<i64>,
    Json(req): Json<SetTeacherActiveRequest>,
) -> Result<Json<TeacherResponse>, HttpError> {
    info!(
        teacher_id,
        is_active = req.is_active,
        "Handling set_teacher_active request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: TeacherResponse = set_teacher_active(&mut persistence, teacher_id, req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/schedule_slots` endpoint.
async fn handle_create_schedule_slot(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateScheduleSlotRequest>,
) -> Result<Json<ScheduleSlotResponse>, HttpError> {
    info!(
        teacher_id = req.teacher_id,
        weekday = req.weekday,
        period_index = req.period_index,
        "Handling create_schedule_slot request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ScheduleSlotResponse = create_schedule_slot(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/leaves` endpoint.
async fn handle_apply_leave(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ApplyLeaveRequest>,
) -> Result<Json<LeaveResponse>, HttpError> {
    info!(
        teacher_id = req.teacher_id,
        from = %req.from_date,
        to = %req.to_date,
        "Handling apply_leave request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: LeaveResponse = apply_leave(&mut persistence, &req)?;
    drop(persistence);

    info!(leave_id = response.leave_id, "Recorded leave request");
    Ok(Json(response))
}

/// Handler for POST `/leaves/{leave_id}/decision` endpoint.
///
/// Approval runs substitute assignment while the lock is held. Notices are
/// published after it is released.
async fn handle_decide_leave(
    AxumState(app_state): AxumState<AppState>,
    Path(leave_id): Path<i64>,
    Json(req): Json<DecideLeaveRequest>,
) -> Result<Json<DecideLeaveResponse>, HttpError> {
    info!(leave_id, decision = %req.decision, "Handling decide_leave request");

    let mut persistence = app_state.persistence.lock().await;
    let result: WithNotices<DecideLeaveResponse> = decide_leave(&mut persistence, leave_id, &req)?;
    drop(persistence);

    if let Some(err) = &result.response.assignment_error {
        warn!(leave_id, error = %err, "Leave decided but assignment failed");
    }
    app_state.live.publish_all(&result.notices);

    info!(message = %result.response.message, "Decided leave");
    Ok(Json(result.response))
}

/// Handler for POST `/substitutions/assign` endpoint.
///
/// An interrupted run answers `503` with the partial result as the body.
async fn handle_assign_substitutes(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AssignSubstitutesRequest>,
) -> Result<(StatusCode, Json<AssignmentResponse>), HttpError> {
    info!(
        school_id = req.school_id,
        teacher_id = req.teacher_id,
        "Handling assign_substitutes request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let result: WithNotices<AssignmentResponse> = assign_substitutes(&mut persistence, &req)?;
    drop(persistence);

    app_state.live.publish_all(&result.notices);

    let status: StatusCode = if result.response.interrupted.is_some() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    info!(
        assigned = result.response.assignments.len(),
        uncovered = result.response.uncovered.len(),
        status = %status,
        "Finished assignment run"
    );
    Ok((status, Json(result.response)))
}

/// Handler for GET `/substitutions` endpoint.
async fn handle_list_substitutions(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<SubstitutionHistoryRequest>,
) -> Result<Json<SubstitutionHistoryResponse>, HttpError> {
    info!(
        school_id = query.school_id,
        substitute_teacher_id = ?query.substitute_teacher_id,
        "Handling list_substitution_history request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: SubstitutionHistoryResponse =
        list_substitution_history(&mut persistence, &query)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/teachers/{teacher_id}/substitutions` endpoint.
async fn handle_list_teacher_substitutions(
    AxumState(app_state): AxumState<AppState>,
    Path(teacher_id): Path<i64>,
) -> Result<Json<SubstitutionHistoryResponse>, HttpError> {
    info!(teacher_id, "Handling list_teacher_substitutions request");

    let mut persistence = app_state.persistence.lock().await;
    let response: SubstitutionHistoryResponse =
        list_teacher_substitutions(&mut persistence, teacher_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/conflicts` endpoint.
async fn handle_detect_conflicts(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ConflictsQuery>,
) -> Result<Json<ConflictReportResponse>, HttpError> {
    info!(school_id = query.school_id, "Handling detect_conflicts request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ConflictReportResponse = detect_conflicts(&mut persistence, query.school_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/conflicts/scan` endpoint.
///
/// Runs the daily scan on demand.
async fn handle_run_conflict_scan(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ScanResponse>, HttpError> {
    info!("Handling run_conflict_scan request");

    let mut persistence = app_state.persistence.lock().await;
    let result: WithNotices<ScanResponse> = run_conflict_scan(&mut persistence)?;
    drop(persistence);

    app_state.live.publish_all(&result.notices);
    Ok(Json(result.response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/schools", post(handle_create_school))
        .route("/teachers", post(handle_create_teacher))
        .route(
            "/teachers/{teacher_id}/active",
            post(handle_set_teacher_active),
        )
        .route(
            "/teachers/{teacher_id}/substitutions",
            get(handle_list_teacher_substitutions),
        )
        .route("/schedule_slots", post(handle_create_schedule_slot))
        .route("/leaves", post(handle_apply_leave))
        .route("/leaves/{leave_id}/decision", post(handle_decide_leave))
        .route("/substitutions", get(handle_list_substitutions))
        .route("/substitutions/assign", post(handle_assign_substitutes))
        .route("/conflicts", get(handle_detect_conflicts))
        .route("/conflicts/scan", post(handle_run_conflict_scan))
        .route("/live", get(live_notices_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Autosub Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        live: Arc::new(LiveNoticeBroadcaster::new()),
    };

    if args.no_scan {
        info!("Daily conflict scan disabled");
    } else {
        tokio::spawn(schedule::run_daily_scan(app_state.clone(), args.scan_hour));
    }

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
