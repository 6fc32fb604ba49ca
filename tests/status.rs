use ecshop_orders::{
    dto::orders::UpdateOrderStatusRequest, models::OrderStatus,
    validation::validate_status_update,
};
use serde_json::{Value, json};

fn update(status: Value) -> UpdateOrderStatusRequest {
    UpdateOrderStatusRequest {
        status: Some(status),
    }
}

#[test]
fn every_status_maps_to_its_display_text() {
    let expected = [
        (OrderStatus::Pending, "Pending"),
        (OrderStatus::Confirmed, "Confirmed"),
        (OrderStatus::Processing, "Processing"),
        (OrderStatus::Shipped, "Shipped"),
        (OrderStatus::Delivered, "Delivered"),
        (OrderStatus::Cancelled, "Cancelled"),
    ];

    assert_eq!(OrderStatus::ALL.len(), expected.len());
    for (status, text) in expected {
        assert_eq!(status.display_text(), text);
        assert_eq!(status.to_string(), text);
    }
}

#[test]
fn accepts_every_status_by_name() {
    for status in OrderStatus::ALL {
        let accepted = validate_status_update(&update(json!(status.display_text())));
        assert_eq!(accepted, Ok(status));
    }
}

#[test]
fn names_are_case_insensitive() {
    assert_eq!(
        validate_status_update(&update(json!("shipped"))),
        Ok(OrderStatus::Shipped)
    );
    assert_eq!(
        validate_status_update(&update(json!("CANCELLED"))),
        Ok(OrderStatus::Cancelled)
    );
}

#[test]
fn accepts_numeric_codes() {
    for status in OrderStatus::ALL {
        let accepted = validate_status_update(&update(json!(status.code())));
        assert_eq!(accepted, Ok(status));
    }
}

#[test]
fn rejects_unknown_name_by_value() {
    let err = validate_status_update(&update(json!("Returned"))).unwrap_err();

    assert_eq!(err.violations().len(), 1);
    assert_eq!(err.violations()[0].field, "status");
    assert!(err.violations()[0].reason.contains("Returned"));
}

#[test]
fn rejects_out_of_range_and_odd_values() {
    for value in [
        json!(6),
        json!(-1),
        json!(2.5),
        json!(true),
        json!(["Pending"]),
        json!({ "status": "Pending" }),
        json!(""),
        json!(" Pending"),
    ] {
        let err = validate_status_update(&update(value.clone())).unwrap_err();
        assert_eq!(err.violations().len(), 1, "value {value}");
    }
}

#[test]
fn missing_or_null_status_is_required() {
    for request in [UpdateOrderStatusRequest::default(), update(Value::Null)] {
        let err = validate_status_update(&request).unwrap_err();
        assert_eq!(err.violations()[0].field, "status");
        assert_eq!(err.violations()[0].reason, "is required");
    }
}

#[test]
fn status_round_trips_through_json_by_name() {
    let encoded = serde_json::to_value(OrderStatus::Processing).unwrap();
    assert_eq!(encoded, json!("Processing"));

    let decoded: Result<OrderStatus, _> = serde_json::from_value(json!("Refunded"));
    assert!(decoded.is_err());
}
