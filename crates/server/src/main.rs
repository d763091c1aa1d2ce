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

mod catalog;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use decom_api::{
    ActivityResponse, ActivitySummaryResponse, ApiError, ApiResult, AuditEventResponse,
    CatalogResponse, CreateActivityRequest, DismantlingSetupRequest, FailureReason,
    MaterialsResponse, SaveAssignmentRequest, SaveNotesRequest, SaveSurveyRequest,
    SubmitMaterialsRequest,
};
use decom_audit::{Actor, Cause};
use decom_domain::{ActivityId, MaterialCatalog};
use decom_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Site decommissioning server - HTTP server for survey and dismantling activities
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// JSON material catalog. If not provided, uses the built-in catalog.
    #[arg(short, long)]
    catalog: Option<PathBuf>,
}

/// Application state shared across handlers.
///
/// Store access is serialized behind the mutex, so only one write to an
/// activity is ever in flight.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    catalog: Arc<MaterialCatalog>,
}

/// A mutating request: who acts, why, and the operation body.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct MutationRequest<T> {
    /// The actor ID performing this action.
    actor_id: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    #[serde(flatten)]
    body: T,
}

/// Body of operations that take no input beyond actor and cause.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct NoBody {}

impl<T> MutationRequest<T> {
    fn into_parts(self) -> Result<(Actor, Cause, T), HttpError> {
        if self.actor_id.trim().is_empty() {
            return Err(ApiError::MissingField {
                field: String::from("actor_id"),
            }
            .into());
        }
        let actor: Actor = Actor::new(self.actor_id, String::from("user"));
        let cause: Cause = Cause::new(self.cause_id, self.cause_description);
        Ok((actor, cause, self.body))
    }
}

/// Response to a successful mutation.
#[derive(Debug, Clone, Serialize)]
struct MutationResponse {
    activity: ActivityResponse,
    audit: AuditEventResponse,
}

impl From<ApiResult<ActivityResponse>> for MutationResponse {
    fn from(result: ApiResult<ActivityResponse>) -> Self {
        Self {
            audit: AuditEventResponse::from(&result.audit_event),
            activity: result.response,
        }
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    /// The typed failure reason.
    reason: FailureReason,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    reason: FailureReason,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            reason: self.reason,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let reason: FailureReason = err.reason();
        let status: StatusCode = match reason {
            FailureReason::MissingField | FailureReason::InvalidInput => StatusCode::BAD_REQUEST,
            FailureReason::LockedByCompletion => StatusCode::CONFLICT,
            FailureReason::NotFound => StatusCode::NOT_FOUND,
            FailureReason::PersistenceError => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %err, "Request failed");
        } else {
            warn!(reason = %reason, error = %err, "Request rejected");
        }
        Self {
            status,
            reason,
            message: err.to_string(),
        }
    }
}

type HttpResult<T> = Result<Json<T>, HttpError>;

/// Handler for POST `/activities` endpoint.
async fn handle_create_activity(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<MutationRequest<CreateActivityRequest>>,
) -> HttpResult<ActivityResponse> {
    let (actor, cause, body) = req.into_parts()?;
    info!(actor_id = %actor.id, site_code = %body.site_code, "Handling create_activity request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ActivityResponse =
        decom_api::create_activity(&mut *persistence, &body, &actor, &cause)?;
    Ok(Json(response))
}

/// Handler for GET `/activities` endpoint.
async fn handle_list_activities(
    AxumState(app_state): AxumState<AppState>,
) -> HttpResult<Vec<ActivitySummaryResponse>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(decom_api::list_activities(&mut *persistence)?))
}

/// Handler for GET `/activities/{id}` endpoint.
async fn handle_get_activity(
    AxumState(app_state): AxumState<AppState>,
    Path(activity_id): Path<i64>,
) -> HttpResult<ActivityResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(decom_api::get_activity(
        &mut *persistence,
        ActivityId::new(activity_id),
    )?))
}

/// Handler for POST `/activities/{id}/survey` endpoint.
async fn handle_save_survey(
    AxumState(app_state): AxumState<AppState>,
    Path(activity_id): Path<i64>,
    Json(req): Json<MutationRequest<SaveSurveyRequest>>,
) -> HttpResult<MutationResponse> {
    let (actor, cause, body) = req.into_parts()?;
    info!(activity_id, actor_id = %actor.id, "Handling save_survey request");

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ActivityResponse> = decom_api::save_survey(
        &mut *persistence,
        Arc::clone(&app_state.catalog),
        ActivityId::new(activity_id),
        &body,
        actor,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(result.into()))
}

/// Handler for POST `/activities/{id}/survey/complete` endpoint.
async fn handle_mark_survey_completed(
    AxumState(app_state): AxumState<AppState>,
    Path(activity_id): Path<i64>,
    Json(req): Json<MutationRequest<NoBody>>,
) -> HttpResult<MutationResponse> {
    let (actor, cause, NoBody {}) = req.into_parts()?;
    info!(activity_id, actor_id = %actor.id, "Handling mark_survey_completed request");

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ActivityResponse> = decom_api::mark_survey_completed(
        &mut *persistence,
        Arc::clone(&app_state.catalog),
        ActivityId::new(activity_id),
        actor,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(result.into()))
}

/// Handler for POST `/activities/{id}/dismantling/setup` endpoint.
async fn handle_save_dismantling_setup(
    AxumState(app_state): AxumState<AppState>,
    Path(activity_id): Path<i64>,
    Json(req): Json<MutationRequest<DismantlingSetupRequest>>,
) -> HttpResult<MutationResponse> {
    let (actor, cause, body) = req.into_parts()?;
    info!(activity_id, actor_id = %actor.id, "Handling save_dismantling_setup request");

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ActivityResponse> = decom_api::save_dismantling_setup(
        &mut *persistence,
        Arc::clone(&app_state.catalog),
        ActivityId::new(activity_id),
        &body,
        actor,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(result.into()))
}

/// Handler for POST `/activities/{id}/assignments` endpoint.
async fn handle_save_assignment(
    AxumState(app_state): AxumState<AppState>,
    Path(activity_id): Path<i64>,
    Json(req): Json<MutationRequest<SaveAssignmentRequest>>,
) -> HttpResult<MutationResponse> {
    let (actor, cause, body) = req.into_parts()?;
    info!(activity_id, actor_id = %actor.id, phase = %body.phase, "Handling save_assignment request");

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ActivityResponse> = decom_api::save_assignment(
        &mut *persistence,
        Arc::clone(&app_state.catalog),
        ActivityId::new(activity_id),
        &body,
        actor,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(result.into()))
}

/// Handler for POST `/activities/{id}/dismantling/materials` endpoint.
async fn handle_submit_dismantling_materials(
    AxumState(app_state): AxumState<AppState>,
    Path(activity_id): Path<i64>,
    Json(req): Json<MutationRequest<SubmitMaterialsRequest>>,
) -> HttpResult<MutationResponse> {
    let (actor, cause, body) = req.into_parts()?;
    info!(
        activity_id,
        actor_id = %actor.id,
        drafts = body.drafts.len(),
        manual = body.manual.len(),
        "Handling submit_dismantling_materials request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ActivityResponse> = decom_api::submit_dismantling_materials(
        &mut *persistence,
        Arc::clone(&app_state.catalog),
        ActivityId::new(activity_id),
        &body,
        actor,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(result.into()))
}

/// Handler for POST `/activities/{id}/dismantling/complete` endpoint.
async fn handle_complete_dismantling(
    AxumState(app_state): AxumState<AppState>,
    Path(activity_id): Path<i64>,
    Json(req): Json<MutationRequest<NoBody>>,
) -> HttpResult<MutationResponse> {
    let (actor, cause, NoBody {}) = req.into_parts()?;
    info!(activity_id, actor_id = %actor.id, "Handling complete_dismantling request");

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ActivityResponse> = decom_api::complete_dismantling(
        &mut *persistence,
        Arc::clone(&app_state.catalog),
        ActivityId::new(activity_id),
        actor,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(result.into()))
}

/// Handler for POST `/activities/{id}/notes` endpoint.
async fn handle_save_notes(
    AxumState(app_state): AxumState<AppState>,
    Path(activity_id): Path<i64>,
    Json(req): Json<MutationRequest<SaveNotesRequest>>,
) -> HttpResult<MutationResponse> {
    let (actor, cause, body) = req.into_parts()?;
    info!(activity_id, actor_id = %actor.id, "Handling save_notes request");

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ActivityResponse> = decom_api::save_notes(
        &mut *persistence,
        Arc::clone(&app_state.catalog),
        ActivityId::new(activity_id),
        &body,
        actor,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(result.into()))
}

/// Handler for GET `/activities/{id}/materials` endpoint.
async fn handle_get_materials(
    AxumState(app_state): AxumState<AppState>,
    Path(activity_id): Path<i64>,
) -> HttpResult<MaterialsResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(decom_api::get_materials(
        &mut *persistence,
        Arc::clone(&app_state.catalog),
        ActivityId::new(activity_id),
    )?))
}

/// Handler for GET `/activities/{id}/audit` endpoint.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Path(activity_id): Path<i64>,
) -> HttpResult<Vec<AuditEventResponse>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(decom_api::get_audit_timeline(
        &mut *persistence,
        ActivityId::new(activity_id),
    )?))
}

/// Handler for GET `/catalog` endpoint.
async fn handle_get_catalog(AxumState(app_state): AxumState<AppState>) -> Json<CatalogResponse> {
    Json(decom_api::get_catalog(&app_state.catalog))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/activities",
            post(handle_create_activity).get(handle_list_activities),
        )
        .route("/activities/{id}", get(handle_get_activity))
        .route("/activities/{id}/survey", post(handle_save_survey))
        .route(
            "/activities/{id}/survey/complete",
            post(handle_mark_survey_completed),
        )
        .route(
            "/activities/{id}/dismantling/setup",
            post(handle_save_dismantling_setup),
        )
        .route("/activities/{id}/assignments", post(handle_save_assignment))
        .route(
            "/activities/{id}/dismantling/materials",
            post(handle_submit_dismantling_materials),
        )
        .route(
            "/activities/{id}/dismantling/complete",
            post(handle_complete_dismantling),
        )
        .route("/activities/{id}/notes", post(handle_save_notes))
        .route("/activities/{id}/materials", get(handle_get_materials))
        .route("/activities/{id}/audit", get(handle_get_audit_timeline))
        .route("/catalog", get(handle_get_catalog))
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

    info!("Initializing site decommissioning server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!(path = %db_path.display(), "Using file-based database");
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let catalog: MaterialCatalog = match &args.catalog {
        Some(path) => catalog::load_catalog(path)?,
        None => {
            info!("Using built-in material catalog");
            catalog::default_catalog()?
        }
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        catalog: Arc::new(catalog),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            catalog: Arc::new(catalog::default_catalog().unwrap()),
        }
    }

    fn with_actor(body: Value) -> Value {
        let mut request: Value = json!({
            "actor_id": "planner-7",
            "cause_id": "ticket-88",
            "cause_description": "Site handover",
        });
        if let (Some(target), Value::Object(fields)) = (request.as_object_mut(), body) {
            target.extend(fields);
        }
        request
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (HttpStatusCode, Value) {
        let request: Request<Body> = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };
        let response: Response = app.clone().oneshot(request).await.unwrap();
        let status: HttpStatusCode = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn create_site(app: &Router) -> i64 {
        let (status, body) = send(
            app,
            "POST",
            "/activities",
            Some(with_actor(json!({ "siteCode": "SITE-100" }))),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        body["activity"]["activityId"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_activity() {
        let app: Router = build_router(create_test_app_state());
        let id: i64 = create_site(&app).await;

        let (status, body) = send(&app, "GET", &format!("/activities/{id}"), None).await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["activity"]["siteCode"], "SITE-100");
        assert_eq!(body["reconciliationMode"], "manual");
        assert_eq!(body["capabilities"]["canEditSurvey"], true);

        let (status, body) = send(&app, "GET", "/activities", None).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_activity_is_404() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(&app, "GET", "/activities/404", None).await;

        assert_eq!(status, HttpStatusCode::NOT_FOUND);
        assert_eq!(body["reason"], "not-found");
    }

    #[tokio::test]
    async fn test_missing_assignee_is_400() {
        let app: Router = build_router(create_test_app_state());
        let id: i64 = create_site(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            &format!("/activities/{id}/assignments"),
            Some(with_actor(json!({ "phase": "survey", "dueDate": "2026-04-01" }))),
        )
        .await;

        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(body["reason"], "missing-field");
    }

    #[tokio::test]
    async fn test_survey_locked_after_completion_is_409() {
        let app: Router = build_router(create_test_app_state());
        let id: i64 = create_site(&app).await;

        let (status, _) = send(
            &app,
            "POST",
            &format!("/activities/{id}/survey"),
            Some(with_actor(json!({
                "materials": [{ "materialId": "rru", "quantity": 2 }]
            }))),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let (status, body) = send(
            &app,
            "POST",
            &format!("/activities/{id}/dismantling/complete"),
            Some(with_actor(json!({}))),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(
            body["activity"]["activity"]["dismantling"]["materials"][0]["quantityDismantled"],
            2
        );
        assert_eq!(body["audit"]["action"], "CompleteDismantling");

        let (status, body) = send(
            &app,
            "POST",
            &format!("/activities/{id}/survey/complete"),
            Some(with_actor(json!({}))),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CONFLICT);
        assert_eq!(body["reason"], "locked-by-completion");
    }

    #[tokio::test]
    async fn test_materials_and_audit_routes() {
        let app: Router = build_router(create_test_app_state());
        let id: i64 = create_site(&app).await;

        let (status, _) = send(
            &app,
            "POST",
            &format!("/activities/{id}/dismantling/materials"),
            Some(with_actor(json!({
                "manual": [{ "materialId": "bbu", "quantity": 1 }]
            }))),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let (status, body) = send(&app, "GET", &format!("/activities/{id}/materials"), None).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["source"], "dismantled");
        assert_eq!(body["rows"][0]["materialId"], "bbu");

        let (status, body) = send(&app, "GET", &format!("/activities/{id}/audit"), None).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_blank_actor_is_rejected() {
        let app: Router = build_router(create_test_app_state());
        let id: i64 = create_site(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            &format!("/activities/{id}/notes"),
            Some(json!({
                "actor_id": " ",
                "cause_id": "c",
                "cause_description": "d",
                "notes": "x"
            })),
        )
        .await;

        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(body["reason"], "missing-field");
    }

    #[tokio::test]
    async fn test_catalog_route() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(&app, "GET", "/catalog", None).await;

        assert_eq!(status, HttpStatusCode::OK);
        assert!(body["materials"].as_array().unwrap().len() > 1);
    }
}
