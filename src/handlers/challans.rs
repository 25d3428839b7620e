use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};

use crate::entities::{inward_challan, outward_challan};
use crate::services::challans::{
    CreateInwardChallanRequest, CreateOutwardChallanRequest, UpdateInwardChallanRequest,
    UpdateOutwardChallanRequest,
};
use crate::{ApiResponse, ApiResult, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/challans/outward", post(create_outward_challan))
        .route("/challans/inward", post(create_inward_challan))
        .route("/orders/:id/challans/outward", get(list_outward_challans))
        .route(
            "/challans/outward/:challan_id/inward",
            get(list_inward_challans),
        )
        .route("/challans/outward/:challan_id", put(update_outward_challan))
        .route("/challans/inward/:challan_id", put(update_inward_challan))
}

/// Issues an outward challan and marks the phase Outsourced.
#[utoipa::path(
    post,
    path = "/api/v1/challans/outward",
    request_body = CreateOutwardChallanRequest,
    responses(
        (status = 201, description = "Challan issued", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Phase tracking not found")
    ),
    tag = "challans"
)]
pub async fn create_outward_challan(
    State(state): State<AppState>,
    Json(request): Json<CreateOutwardChallanRequest>,
) -> Result<impl IntoResponse, crate::errors::ServiceError> {
    let challan = state.services.challans.create_outward(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(challan))))
}

/// Records outsourced work coming back and completes the phase.
#[utoipa::path(
    post,
    path = "/api/v1/challans/inward",
    request_body = CreateInwardChallanRequest,
    responses(
        (status = 201, description = "Challan recorded", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Outward challan not found")
    ),
    tag = "challans"
)]
pub async fn create_inward_challan(
    State(state): State<AppState>,
    Json(request): Json<CreateInwardChallanRequest>,
) -> Result<impl IntoResponse, crate::errors::ServiceError> {
    let challan = state.services.challans.create_inward(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(challan))))
}

pub async fn list_outward_challans(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Vec<outward_challan::Model>> {
    let challans = state.services.challans.list_outward(id).await?;
    Ok(Json(ApiResponse::success(challans)))
}

pub async fn list_inward_challans(
    State(state): State<AppState>,
    Path(challan_id): Path<i32>,
) -> ApiResult<Vec<inward_challan::Model>> {
    let challans = state.services.challans.list_inward(challan_id).await?;
    Ok(Json(ApiResponse::success(challans)))
}

pub async fn update_outward_challan(
    State(state): State<AppState>,
    Path(challan_id): Path<i32>,
    Json(request): Json<UpdateOutwardChallanRequest>,
) -> ApiResult<outward_challan::Model> {
    let challan = state
        .services
        .challans
        .update_outward(challan_id, request)
        .await?;
    Ok(Json(ApiResponse::success(challan)))
}

pub async fn update_inward_challan(
    State(state): State<AppState>,
    Path(challan_id): Path<i32>,
    Json(request): Json<UpdateInwardChallanRequest>,
) -> ApiResult<inward_challan::Model> {
    let challan = state
        .services
        .challans
        .update_inward(challan_id, request)
        .await?;
    Ok(Json(ApiResponse::success(challan)))
}
