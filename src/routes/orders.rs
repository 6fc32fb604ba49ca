use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
};

use crate::{
    dto::orders::{CreateOrderRequest, OrderResponse, OrderSummaryList, UpdateOrderStatusRequest},
    error::AppResult,
    middleware::user::CurrentUser,
    response::ApiResponse,
    routes::params::OrderListQuery,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/{id}", get(get_order))
        .route("/{id}/status", patch(update_order_status))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    params(
        ("x-user-id" = i32, Header, description = "Caller user id")
    ),
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order accepted", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Validation failed, every violation listed"),
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderResponse>>)> {
    let resp = order_service::create_order(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    params(
        ("x-user-id" = i32, Header, description = "Caller user id"),
        OrderListQuery
    ),
    responses(
        (status = 200, description = "Order summaries, newest first", body = ApiResponse<OrderSummaryList>),
        (status = 400, description = "Unknown status filter"),
    ),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderSummaryList>>> {
    let resp = order_service::list_orders(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = i32, Path, description = "Order ID"),
        ("x-user-id" = i32, Header, description = "Caller user id")
    ),
    responses(
        (status = 200, description = "Order with items", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<OrderResponse>>> {
    let resp = order_service::get_order(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    params(
        ("id" = i32, Path, description = "Order ID"),
        ("x-user-id" = i32, Header, description = "Caller user id")
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Update order status", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<OrderResponse>>> {
    let resp = order_service::update_order_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
