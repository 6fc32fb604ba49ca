use async_trait::async_trait;

use crate::{
    dto::orders::{
        CreateOrderRequest, OrderResponse, OrderSummaryList, OrderSummaryResponse,
        UpdateOrderStatusRequest,
    },
    error::{AppError, AppResult},
    middleware::user::CurrentUser,
    models::OrderStatus,
    response::{ApiResponse, Meta},
    routes::params::OrderListQuery,
    state::AppState,
    validation::{ValidatedOrder, ValidationError, validate_creation, validate_status_update},
};

/// Listing criteria passed to [`OrderBackend::list_orders`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub limit: i64,
    pub offset: i64,
}

/// The order-processing collaborator: prices, stores and transitions orders
/// that already passed validation.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    async fn create_order(&self, user_id: i32, order: ValidatedOrder) -> AppResult<OrderResponse>;

    /// Changes the status of one of `user_id`'s orders; other users' orders are not found.
    async fn update_status(
        &self,
        user_id: i32,
        order_id: i32,
        status: OrderStatus,
    ) -> AppResult<OrderResponse>;

    async fn find_order(&self, user_id: i32, order_id: i32) -> AppResult<Option<OrderResponse>>;

    /// Returns one page of summaries and the total number of matches.
    async fn list_orders(
        &self,
        user_id: i32,
        filter: OrderFilter,
    ) -> AppResult<(Vec<OrderSummaryResponse>, i64)>;
}

pub async fn create_order(
    state: &AppState,
    user: &CurrentUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderResponse>> {
    let order = validate_creation(&payload).inspect_err(|err| log_rejected("create", err))?;

    let created = state.orders.create_order(user.user_id, order).await?;
    tracing::info!(
        order_id = created.id,
        user_id = user.user_id,
        total_amount = created.total_amount,
        "order created"
    );

    Ok(ApiResponse::success(
        "Order created",
        created,
        Some(Meta::empty()),
    ))
}

pub async fn update_order_status(
    state: &AppState,
    user: &CurrentUser,
    id: i32,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<OrderResponse>> {
    let status =
        validate_status_update(&payload).inspect_err(|err| log_rejected("status_update", err))?;

    let order = state.orders.update_status(user.user_id, id, status).await?;
    tracing::info!(order_id = order.id, status = %status, "order status updated");

    Ok(ApiResponse::success(
        "Order updated",
        order,
        Some(Meta::empty()),
    ))
}

pub async fn get_order(
    state: &AppState,
    user: &CurrentUser,
    id: i32,
) -> AppResult<ApiResponse<OrderResponse>> {
    let order = match state.orders.find_order(user.user_id, id).await? {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    Ok(ApiResponse::success("OK", order, Some(Meta::empty())))
}

pub async fn list_orders(
    state: &AppState,
    user: &CurrentUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderSummaryList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let status = match query.status_value() {
        Some(value) => Some(
            validate_status_update(&UpdateOrderStatusRequest {
                status: Some(value),
            })
            .inspect_err(|err| log_rejected("list", err))?,
        ),
        None => None,
    };

    let filter = OrderFilter {
        status,
        limit,
        offset,
    };
    let (items, total) = state.orders.list_orders(user.user_id, filter).await?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Ok",
        OrderSummaryList { items },
        Some(meta),
    ))
}

fn log_rejected(operation: &str, err: &ValidationError) {
    tracing::debug!(
        operation,
        violations = err.violations().len(),
        "order submission rejected"
    );
}
