use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post, put},
    Router,
};
use serde_json::Value;

use crate::errors::ServiceError;
use crate::middleware_helpers::MaybeUser;
use crate::models::ProjectRequirements;
use crate::pipeline::steps::{parse_step_key, StepInfo};
use crate::services::step_details::{
    ClientInfoRequest, PoVerificationResponse, ProjectDetailsRequest,
};
use crate::services::step_tracker::{
    AddStepNoteRequest, AssignStepRequest, ProgressSummary, StepListResponse,
    StepTrackerResponse, UpdateStepStatusRequest,
};
use crate::{ApiResponse, ApiResult, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders/:id/steps", get(list_steps))
        .route("/orders/:id/progress", get(order_progress))
        .route("/orders/:id/steps/:key", post(submit_step).get(get_step))
        .route("/orders/:id/steps/:key", delete(delete_step_detail))
        .route("/orders/:id/steps/:key/detail", get(get_step_detail))
        .route("/orders/:id/steps/:key/status", put(update_step_status))
        .route("/orders/:id/steps/:key/assign", post(assign_step))
        .route("/orders/:id/steps/:key/notes", post(add_step_note))
        .route(
            "/orders/:id/client-po/client-info",
            put(update_client_info).get(get_client_info),
        )
        .route(
            "/orders/:id/client-po/project-details",
            put(update_project_details).get(get_project_details),
        )
        .route(
            "/orders/:id/client-po/project-requirements",
            put(update_project_requirements).get(get_project_requirements),
        )
        .route("/client-po/verify/:po_number", get(verify_po_number))
}

fn resolve_step(key: &str) -> Result<&'static StepInfo, ServiceError> {
    parse_step_key(key)
        .ok_or_else(|| ServiceError::BadRequest(format!("Unknown pipeline step: {}", key)))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}/steps",
    responses((status = 200, body = ApiResponse<StepListResponse>)),
    tag = "steps"
)]
pub async fn list_steps(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StepListResponse> {
    let steps = state.services.step_tracker.list_for_order(id).await?;
    Ok(Json(ApiResponse::success(steps)))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}/progress",
    responses((status = 200, body = ApiResponse<ProgressSummary>)),
    tag = "steps"
)]
pub async fn order_progress(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<ProgressSummary> {
    let progress = state.services.step_tracker.progress(id).await?;
    Ok(Json(ApiResponse::success(progress)))
}

/// Submits a step's detail payload. The body shape depends on the step key;
/// the tracker moves to in_progress as a side effect.
#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/steps/{key}",
    request_body = Value,
    responses(
        (status = 200, description = "Detail stored", body = ApiResponse<Value>),
        (status = 400, description = "Unknown step key or malformed payload"),
        (status = 404, description = "Order not found")
    ),
    tag = "steps"
)]
pub async fn submit_step(
    State(state): State<AppState>,
    Path((id, key)): Path<(i32, String)>,
    user: MaybeUser,
    Json(payload): Json<Value>,
) -> ApiResult<Value> {
    let step = resolve_step(&key)?;
    tracing::debug!(sales_order_id = id, step = %key, user = ?user.as_deref(), "step submission");
    let detail = state.services.step_details.submit(id, step, payload).await?;
    Ok(Json(ApiResponse::success(detail)))
}

pub async fn get_step(
    State(state): State<AppState>,
    Path((id, key)): Path<(i32, String)>,
) -> ApiResult<StepTrackerResponse> {
    let tracker = state.services.step_tracker.get_by_key(id, &key).await?;
    Ok(Json(ApiResponse::success(tracker)))
}

pub async fn get_step_detail(
    State(state): State<AppState>,
    Path((id, key)): Path<(i32, String)>,
) -> ApiResult<Value> {
    let step = resolve_step(&key)?;
    let detail = state
        .services
        .step_details
        .get_detail(id, step)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!("No {} detail for sales order {}", key, id))
        })?;
    Ok(Json(ApiResponse::success(detail)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/orders/{id}/steps/{key}",
    responses(
        (status = 200, description = "Detail deleted and tracker reset to pending"),
        (status = 404, description = "Order or detail not found")
    ),
    tag = "steps"
)]
pub async fn delete_step_detail(
    State(state): State<AppState>,
    Path((id, key)): Path<(i32, String)>,
) -> Result<impl IntoResponse, ServiceError> {
    let step = resolve_step(&key)?;
    state.services.step_details.delete_detail(id, step).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(serde_json::json!({
            "salesOrderId": id,
            "step": key,
            "reset": true
        }))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/orders/{id}/steps/{key}/status",
    request_body = UpdateStepStatusRequest,
    responses(
        (status = 200, body = ApiResponse<StepTrackerResponse>),
        (status = 400, description = "Unknown status value"),
        (status = 404, description = "Step not started")
    ),
    tag = "steps"
)]
pub async fn update_step_status(
    State(state): State<AppState>,
    Path((id, key)): Path<(i32, String)>,
    user: MaybeUser,
    Json(request): Json<UpdateStepStatusRequest>,
) -> ApiResult<StepTrackerResponse> {
    tracing::debug!(sales_order_id = id, step = %key, user = ?user.as_deref(), "step status change");
    let tracker = state
        .services
        .step_tracker
        .update_status(id, &key, request)
        .await?;
    Ok(Json(ApiResponse::success(tracker)))
}

pub async fn assign_step(
    State(state): State<AppState>,
    Path((id, key)): Path<(i32, String)>,
    Json(request): Json<AssignStepRequest>,
) -> ApiResult<StepTrackerResponse> {
    let tracker = state.services.step_tracker.assign(id, &key, request).await?;
    Ok(Json(ApiResponse::success(tracker)))
}

pub async fn add_step_note(
    State(state): State<AppState>,
    Path((id, key)): Path<(i32, String)>,
    Json(request): Json<AddStepNoteRequest>,
) -> ApiResult<StepTrackerResponse> {
    let tracker = state
        .services
        .step_tracker
        .add_note(id, &key, request)
        .await?;
    Ok(Json(ApiResponse::success(tracker)))
}

// -- Client PO partial slices ----------------------------------------------

pub async fn update_client_info(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<ClientInfoRequest>,
) -> ApiResult<Value> {
    let slice = state
        .services
        .step_details
        .update_client_info(id, request)
        .await?;
    Ok(Json(ApiResponse::success(slice)))
}

pub async fn get_client_info(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Value> {
    let slice = state
        .services
        .step_details
        .get_client_info(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("No client PO for sales order {}", id)))?;
    Ok(Json(ApiResponse::success(slice)))
}

pub async fn update_project_details(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<ProjectDetailsRequest>,
) -> ApiResult<Value> {
    let slice = state
        .services
        .step_details
        .update_project_details(id, request)
        .await?;
    Ok(Json(ApiResponse::success(slice)))
}

pub async fn get_project_details(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Value> {
    let slice = state
        .services
        .step_details
        .get_project_details(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("No client PO for sales order {}", id)))?;
    Ok(Json(ApiResponse::success(slice)))
}

pub async fn update_project_requirements(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<ProjectRequirements>,
) -> ApiResult<Value> {
    let requirements = state
        .services
        .step_details
        .update_project_requirements(id, request)
        .await?;
    Ok(Json(ApiResponse::success(requirements)))
}

pub async fn get_project_requirements(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Value> {
    let requirements = state
        .services
        .step_details
        .get_project_requirements(id)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!(
                "No project requirements recorded for sales order {}",
                id
            ))
        })?;
    Ok(Json(ApiResponse::success(requirements)))
}

/// Checks whether a PO number is already registered, for client-side
/// duplicate warnings.
#[utoipa::path(
    get,
    path = "/api/v1/client-po/verify/{po_number}",
    responses((status = 200, body = ApiResponse<PoVerificationResponse>)),
    tag = "steps"
)]
pub async fn verify_po_number(
    State(state): State<AppState>,
    Path(po_number): Path<String>,
) -> ApiResult<PoVerificationResponse> {
    let verification = state
        .services
        .step_details
        .verify_po_number(&po_number)
        .await?;
    Ok(Json(ApiResponse::success(verification)))
}
