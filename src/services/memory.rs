//! Process-local [`OrderBackend`] used by the binary and the tests when no
//! external order-processing service is wired in. Orders live only as long as
//! the process.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    dto::orders::{OrderItemResponse, OrderResponse, OrderSummaryResponse},
    error::{AppError, AppResult},
    models::{OrderStatus, Product},
    services::order_service::{OrderBackend, OrderFilter},
    validation::ValidatedOrder,
};

pub fn default_catalog() -> Vec<Product> {
    [
        (1, "Axum Hoodie", "Warm hoodie for Rustaceans", 550000),
        (2, "Ferris Mug", "Coffee tastes better with Ferris", 120000),
        (3, "Rust Sticker Pack", "Decorate your laptop", 50000),
        (4, "E-book: Async Rust", "Learn async Rust patterns", 250000),
    ]
    .into_iter()
    .map(|(id, name, description, price)| Product {
        id,
        name: name.to_string(),
        description: Some(description.to_string()),
        price,
    })
    .collect()
}

#[derive(Default)]
struct Store {
    orders: Vec<OrderResponse>,
    next_order_id: i32,
    next_item_id: i32,
}

pub struct MemoryOrderBackend {
    catalog: HashMap<i32, Product>,
    store: RwLock<Store>,
}

impl MemoryOrderBackend {
    pub fn new(catalog: impl IntoIterator<Item = Product>) -> Self {
        Self {
            catalog: catalog.into_iter().map(|p| (p.id, p)).collect(),
            store: RwLock::new(Store {
                next_order_id: 1,
                next_item_id: 1,
                ..Store::default()
            }),
        }
    }

    fn product(&self, id: i32) -> AppResult<&Product> {
        self.catalog
            .get(&id)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown product {id}")))
    }
}

impl Default for MemoryOrderBackend {
    fn default() -> Self {
        Self::new(default_catalog())
    }
}

#[async_trait]
impl OrderBackend for MemoryOrderBackend {
    async fn create_order(&self, user_id: i32, order: ValidatedOrder) -> AppResult<OrderResponse> {
        // Resolve and price every line before taking the lock so a bad line leaves no trace.
        let mut lines = Vec::with_capacity(order.lines.len());
        let mut total_amount: i64 = 0;
        for line in &order.lines {
            let quantity = i32::try_from(line.quantity).map_err(|_| {
                AppError::BadRequest(format!("Quantity too large for product {}", line.product_id))
            })?;
            let product = self.product(line.product_id)?;
            total_amount = product
                .price
                .checked_mul(i64::from(quantity))
                .and_then(|subtotal| total_amount.checked_add(subtotal))
                .ok_or_else(|| AppError::BadRequest("Order total is too large".into()))?;
            lines.push((product, quantity));
        }

        let mut store = self.store.write().await;
        let now = Utc::now();

        let mut items = Vec::with_capacity(lines.len());
        for (product, quantity) in lines {
            let item = OrderItemResponse::new(
                store.next_item_id,
                product.id,
                product.name.clone(),
                product.description.clone(),
                quantity,
                product.price,
            )
            .ok_or_else(|| AppError::BadRequest("Order total is too large".into()))?;
            items.push(item);
            store.next_item_id += 1;
        }

        let status = OrderStatus::Pending;
        let created = OrderResponse {
            id: store.next_order_id,
            user_id,
            order_date: now,
            status,
            status_text: status.display_text().to_string(),
            total_amount,
            shipping_name: order.shipping.name,
            shipping_postal_code: order.shipping.postal_code,
            shipping_prefecture: order.shipping.prefecture,
            shipping_city: order.shipping.city,
            shipping_address_line: order.shipping.address_line,
            shipping_phone: order.shipping.phone,
            notes: order.notes,
            created_at: now,
            updated_at: now,
            items,
        };
        store.next_order_id += 1;
        store.orders.push(created.clone());

        Ok(created)
    }

    async fn update_status(
        &self,
        user_id: i32,
        order_id: i32,
        status: OrderStatus,
    ) -> AppResult<OrderResponse> {
        let mut store = self.store.write().await;
        let order = match store
            .orders
            .iter_mut()
            .find(|o| o.id == order_id && o.user_id == user_id)
        {
            Some(o) => o,
            None => return Err(AppError::NotFound),
        };

        order.status = status;
        order.status_text = status.display_text().to_string();
        order.updated_at = Utc::now();

        Ok(order.clone())
    }

    async fn find_order(&self, user_id: i32, order_id: i32) -> AppResult<Option<OrderResponse>> {
        let store = self.store.read().await;
        Ok(store
            .orders
            .iter()
            .find(|o| o.id == order_id && o.user_id == user_id)
            .cloned())
    }

    async fn list_orders(
        &self,
        user_id: i32,
        filter: OrderFilter,
    ) -> AppResult<(Vec<OrderSummaryResponse>, i64)> {
        let store = self.store.read().await;
        let mut matching: Vec<&OrderResponse> = store
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .filter(|o| filter.status.is_none_or(|status| o.status == status))
            .collect();
        matching.sort_by(|a, b| b.order_date.cmp(&a.order_date).then(b.id.cmp(&a.id)));

        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(filter.offset.max(0) as usize)
            .take(filter.limit.max(0) as usize)
            .map(OrderSummaryResponse::from)
            .collect();

        Ok((page, total))
    }
}
