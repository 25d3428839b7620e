use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post, put},
    Router,
};

use crate::services::production_phases::{
    EditPhaseRequest, PhaseTrackingResponse, SavePhaseRequest, StartPhaseRequest,
};
use crate::{ApiResponse, ApiResult, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders/:id/phases", post(save_phase).get(list_phases))
        .route("/phases/:tracking_id", get(get_phase))
        .route("/phases/:tracking_id", put(edit_phase))
        .route("/phases/:tracking_id/start", post(start_phase))
        .route("/phases/:tracking_id/finish", post(finish_phase))
        .route("/phases/:tracking_id/hold", post(hold_phase))
        .route("/phases/:tracking_id/cancel", post(cancel_phase))
}

/// Saves a production phase's detail. The first save for a sub-task also
/// creates its tracking row in "Not Started".
#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/phases",
    request_body = SavePhaseRequest,
    responses(
        (status = 200, body = ApiResponse<PhaseTrackingResponse>),
        (status = 404, description = "Order not found")
    ),
    tag = "phases"
)]
pub async fn save_phase(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<SavePhaseRequest>,
) -> ApiResult<PhaseTrackingResponse> {
    let phase = state.services.phases.save_phase(id, request).await?;
    Ok(Json(ApiResponse::success(phase)))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}/phases",
    responses((status = 200, body = ApiResponse<Vec<PhaseTrackingResponse>>)),
    tag = "phases"
)]
pub async fn list_phases(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Vec<PhaseTrackingResponse>> {
    let phases = state.services.phases.list_phases(id).await?;
    Ok(Json(ApiResponse::success(phases)))
}

pub async fn get_phase(
    State(state): State<AppState>,
    Path(tracking_id): Path<i32>,
) -> ApiResult<PhaseTrackingResponse> {
    let phase = state.services.phases.get_phase(tracking_id).await?;
    Ok(Json(ApiResponse::success(phase)))
}

pub async fn edit_phase(
    State(state): State<AppState>,
    Path(tracking_id): Path<i32>,
    Json(request): Json<EditPhaseRequest>,
) -> ApiResult<PhaseTrackingResponse> {
    let phase = state.services.phases.edit_phase(tracking_id, request).await?;
    Ok(Json(ApiResponse::success(phase)))
}

pub async fn start_phase(
    State(state): State<AppState>,
    Path(tracking_id): Path<i32>,
    Json(request): Json<StartPhaseRequest>,
) -> ApiResult<PhaseTrackingResponse> {
    let phase = state
        .services
        .phases
        .start_phase(tracking_id, request)
        .await?;
    Ok(Json(ApiResponse::success(phase)))
}

pub async fn finish_phase(
    State(state): State<AppState>,
    Path(tracking_id): Path<i32>,
) -> ApiResult<PhaseTrackingResponse> {
    let phase = state.services.phases.finish_phase(tracking_id).await?;
    Ok(Json(ApiResponse::success(phase)))
}

pub async fn hold_phase(
    State(state): State<AppState>,
    Path(tracking_id): Path<i32>,
) -> ApiResult<PhaseTrackingResponse> {
    let phase = state.services.phases.hold_phase(tracking_id).await?;
    Ok(Json(ApiResponse::success(phase)))
}

pub async fn cancel_phase(
    State(state): State<AppState>,
    Path(tracking_id): Path<i32>,
) -> ApiResult<PhaseTrackingResponse> {
    let phase = state.services.phases.cancel_phase(tracking_id).await?;
    Ok(Json(ApiResponse::success(phase)))
}
