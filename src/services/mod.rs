pub mod memory;
pub mod order_service;
