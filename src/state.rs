use std::sync::Arc;

use crate::services::order_service::OrderBackend;

#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn OrderBackend>,
}

impl AppState {
    pub fn new(orders: impl OrderBackend + 'static) -> Self {
        Self {
            orders: Arc::new(orders),
        }
    }
}
