//! Structural checks applied to order submissions before they reach the
//! order-processing backend.
//!
//! Every check runs regardless of earlier failures, so a rejected submission
//! reports all of its problems at once.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

use crate::{
    dto::orders::{CreateOrderRequest, OrderItemRequest, UpdateOrderStatusRequest},
    models::OrderStatus,
};

pub const SHIPPING_NAME_MAX: usize = 100;
pub const SHIPPING_POSTAL_CODE_MAX: usize = 10;
pub const SHIPPING_PREFECTURE_MAX: usize = 50;
pub const SHIPPING_CITY_MAX: usize = 100;
pub const SHIPPING_ADDRESS_LINE_MAX: usize = 200;
pub const SHIPPING_PHONE_MAX: usize = 20;
pub const NOTES_MAX: usize = 500;

/// One failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Violation {
    pub field: String,
    pub reason: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// A rejected submission. Always carries at least one violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", summary(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

fn summary(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn single(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation::new(field, reason)],
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

#[derive(Debug, Default)]
struct Violations(Vec<Violation>);

impl Violations {
    fn push(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.0.push(Violation::new(field, reason));
    }

    fn required_text(&mut self, field: &str, value: &str, max: usize) {
        if value.trim().is_empty() {
            self.push(field, "is required");
        } else {
            self.max_length(field, value, max);
        }
    }

    fn optional_text(&mut self, field: &str, value: Option<&str>, max: usize) {
        if let Some(value) = value {
            self.max_length(field, value, max);
        }
    }

    fn max_length(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.push(field, format!("must be at most {max} characters"));
        }
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationError> {
        if self.0.is_empty() {
            Ok(value())
        } else {
            Err(ValidationError { violations: self.0 })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: i32,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingAddress {
    pub name: String,
    pub postal_code: String,
    pub prefecture: String,
    pub city: String,
    pub address_line: String,
    pub phone: Option<String>,
}

/// A creation request that passed every check, ready for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    pub lines: Vec<OrderLine>,
    pub shipping: ShippingAddress,
    pub notes: Option<String>,
}

pub fn validate_creation(request: &CreateOrderRequest) -> Result<ValidatedOrder, ValidationError> {
    let mut violations = Violations::default();

    if request.items.is_empty() {
        violations.push("items", "must contain at least one item");
    }
    let lines: Vec<Option<OrderLine>> = request
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| check_item(&mut violations, index, item))
        .collect();

    violations.required_text("shippingName", &request.shipping_name, SHIPPING_NAME_MAX);
    violations.required_text(
        "shippingPostalCode",
        &request.shipping_postal_code,
        SHIPPING_POSTAL_CODE_MAX,
    );
    violations.required_text(
        "shippingPrefecture",
        &request.shipping_prefecture,
        SHIPPING_PREFECTURE_MAX,
    );
    violations.required_text("shippingCity", &request.shipping_city, SHIPPING_CITY_MAX);
    violations.required_text(
        "shippingAddressLine",
        &request.shipping_address_line,
        SHIPPING_ADDRESS_LINE_MAX,
    );
    violations.optional_text(
        "shippingPhone",
        request.shipping_phone.as_deref(),
        SHIPPING_PHONE_MAX,
    );
    violations.optional_text("notes", request.notes.as_deref(), NOTES_MAX);

    violations.finish(|| ValidatedOrder {
        // No violations means every line parsed.
        lines: lines.into_iter().flatten().collect(),
        shipping: ShippingAddress {
            name: request.shipping_name.clone(),
            postal_code: request.shipping_postal_code.clone(),
            prefecture: request.shipping_prefecture.clone(),
            city: request.shipping_city.clone(),
            address_line: request.shipping_address_line.clone(),
            phone: request.shipping_phone.clone(),
        },
        notes: request.notes.clone(),
    })
}

fn check_item(
    violations: &mut Violations,
    index: usize,
    item: &OrderItemRequest,
) -> Option<OrderLine> {
    if item.product_id.is_none() {
        violations.push(format!("items[{index}].productId"), "is required");
    }
    let quantity = match item.quantity {
        None => {
            violations.push(format!("items[{index}].quantity"), "is required");
            None
        }
        Some(quantity) if quantity < 1 => {
            violations.push(format!("items[{index}].quantity"), "must be at least 1");
            None
        }
        Some(quantity) => u32::try_from(quantity).ok(),
    };

    Some(OrderLine {
        product_id: item.product_id?,
        quantity: quantity?,
    })
}

pub fn validate_status_update(
    request: &UpdateOrderStatusRequest,
) -> Result<OrderStatus, ValidationError> {
    match &request.status {
        None | Some(Value::Null) => Err(ValidationError::single("status", "is required")),
        Some(value) => parse_status(value).ok_or_else(|| {
            ValidationError::single("status", format!("unrecognized order status `{}`", raw(value)))
        }),
    }
}

/// Parses a status given either by name or by numeric code.
pub fn parse_status(value: &Value) -> Option<OrderStatus> {
    match value {
        Value::String(name) => name.parse().ok(),
        Value::Number(number) => number.as_i64().and_then(OrderStatus::from_code),
        _ => None,
    }
}

fn raw(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
