use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::orders::{
        CreateOrderRequest, OrderItemRequest, OrderItemResponse, OrderResponse,
        OrderSummaryList, OrderSummaryResponse, UpdateOrderStatusRequest,
    },
    models::{OrderStatus, Product},
    response::{ApiResponse, Meta},
    routes::{health, orders, params},
    validation::Violation,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        orders::update_order_status
    ),
    components(
        schemas(
            OrderStatus,
            Product,
            CreateOrderRequest,
            OrderItemRequest,
            UpdateOrderStatusRequest,
            OrderResponse,
            OrderItemResponse,
            OrderSummaryResponse,
            OrderSummaryList,
            Violation,
            params::Pagination,
            params::OrderListQuery,
            health::HealthData,
            Meta,
            ApiResponse<OrderResponse>,
            ApiResponse<OrderSummaryList>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Orders", description = "Order endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
