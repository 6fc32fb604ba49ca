use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::models::OrderStatus;

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<OrderItemRequest>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub shipping_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub shipping_postal_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub shipping_prefecture: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub shipping_city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub shipping_address_line: String,
    #[serde(default)]
    pub shipping_phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// An explicit `null` on a required field is treated like an absent field, so it
/// surfaces as a violation instead of a deserialization error.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    #[serde(default)]
    pub product_id: Option<i32>,
    #[serde(default)]
    pub quantity: Option<i32>,
}

/// Raw status update as received from the client.
///
/// `status` stays untyped until validated so that unknown values are reported
/// back by name instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Shipped")]
    pub status: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i32,
    pub user_id: i32,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub status_text: String,
    pub total_amount: i64,
    pub shipping_name: String,
    pub shipping_postal_code: String,
    pub shipping_prefecture: String,
    pub shipping_city: String,
    pub shipping_address_line: String,
    pub shipping_phone: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderItemResponse>,
}

impl OrderResponse {
    pub fn item_count(&self) -> i32 {
        i32::try_from(self.items.len()).unwrap_or(i32::MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub product_description: Option<String>,
    pub quantity: i32,
    pub price: i64,
    pub subtotal: i64,
}

impl OrderItemResponse {
    /// Builds a line view with `subtotal = quantity * price`, or `None` when the
    /// subtotal does not fit in an `i64`.
    pub fn new(
        id: i32,
        product_id: i32,
        product_name: impl Into<String>,
        product_description: Option<String>,
        quantity: i32,
        price: i64,
    ) -> Option<Self> {
        let subtotal = price.checked_mul(i64::from(quantity))?;
        Some(Self {
            id,
            product_id,
            product_name: product_name.into(),
            product_description,
            quantity,
            price,
            subtotal,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryResponse {
    pub id: i32,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub status_text: String,
    pub total_amount: i64,
    pub item_count: i32,
}

impl From<&OrderResponse> for OrderSummaryResponse {
    fn from(order: &OrderResponse) -> Self {
        Self {
            id: order.id,
            order_date: order.order_date,
            status: order.status,
            status_text: order.status.display_text().to_string(),
            total_amount: order.total_amount,
            item_count: order.item_count(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderSummaryList {
    pub items: Vec<OrderSummaryResponse>,
}
