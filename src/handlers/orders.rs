use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::services::sales_orders::{
    CreateOrderRequest, OrderListResponse, OrderResponse, OrderStatsResponse,
};
use crate::{ApiResponse, ApiResult, AppState, ListQuery};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/stats", get(order_stats))
        .route("/orders/check-number/:order_number", get(check_order_number))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id", delete(delete_order))
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderNumberCheckResponse {
    pub order_number: String,
    pub exists: bool,
}

#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Sales order created", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Invalid payload")
    ),
    tag = "orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, crate::errors::ServiceError> {
    let order = state.services.orders.create_order(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(order))))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders",
    responses(
        (status = 200, description = "Paginated order list", body = ApiResponse<OrderListResponse>)
    ),
    tag = "orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<OrderListResponse> {
    let orders = state
        .services
        .orders
        .list_orders(query.page, query.limit)
        .await?;
    Ok(Json(ApiResponse::success(orders)))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    responses(
        (status = 200, body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found")
    ),
    tag = "orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<OrderResponse> {
    let order = state.services.orders.get_order(id).await?;
    Ok(Json(ApiResponse::success(order)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/orders/{id}",
    responses(
        (status = 200, description = "Order and all dependent records deleted"),
        (status = 404, description = "Order not found")
    ),
    tag = "orders"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<serde_json::Value> {
    state.services.orders.delete_order(id).await?;
    Ok(Json(ApiResponse::success(serde_json::json!({
        "deleted": id
    }))))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/stats",
    responses((status = 200, body = ApiResponse<OrderStatsResponse>)),
    tag = "orders"
)]
pub async fn order_stats(State(state): State<AppState>) -> ApiResult<OrderStatsResponse> {
    let stats = state.services.orders.order_stats().await?;
    Ok(Json(ApiResponse::success(stats)))
}

pub async fn check_order_number(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> ApiResult<OrderNumberCheckResponse> {
    let exists = state
        .services
        .orders
        .order_number_exists(&order_number)
        .await?;
    Ok(Json(ApiResponse::success(OrderNumberCheckResponse {
        order_number,
        exists,
    })))
}
