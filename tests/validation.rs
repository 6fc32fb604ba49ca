use ecshop_orders::{
    dto::orders::{CreateOrderRequest, OrderItemRequest},
    validation::{
        NOTES_MAX, OrderLine, SHIPPING_ADDRESS_LINE_MAX, SHIPPING_CITY_MAX, SHIPPING_NAME_MAX,
        SHIPPING_PHONE_MAX, SHIPPING_POSTAL_CODE_MAX, SHIPPING_PREFECTURE_MAX, validate_creation,
    },
};

fn item(product_id: i32, quantity: i32) -> OrderItemRequest {
    OrderItemRequest {
        product_id: Some(product_id),
        quantity: Some(quantity),
    }
}

fn valid_request() -> CreateOrderRequest {
    CreateOrderRequest {
        items: vec![item(7, 2)],
        shipping_name: "Yamada Taro".into(),
        shipping_postal_code: "100-0001".into(),
        shipping_prefecture: "Tokyo".into(),
        shipping_city: "Chiyoda".into(),
        shipping_address_line: "1-1 Chiyoda".into(),
        shipping_phone: None,
        notes: None,
    }
}

fn fields(request: &CreateOrderRequest) -> Vec<String> {
    validate_creation(request)
        .expect_err("request should be rejected")
        .violations()
        .iter()
        .map(|v| v.field.clone())
        .collect()
}

#[test]
fn accepts_single_item_without_phone_or_notes() {
    let order = validate_creation(&valid_request()).expect("valid request");

    assert_eq!(
        order.lines,
        vec![OrderLine {
            product_id: 7,
            quantity: 2
        }]
    );
    assert_eq!(order.shipping.postal_code, "100-0001");
    assert_eq!(order.shipping.phone, None);
    assert_eq!(order.notes, None);
}

#[test]
fn empty_items_is_a_single_violation_on_items() {
    let request = CreateOrderRequest {
        items: vec![],
        ..valid_request()
    };

    let err = validate_creation(&request).unwrap_err();
    assert_eq!(err.violations().len(), 1);
    assert_eq!(err.violations()[0].field, "items");
}

#[test]
fn postal_code_over_limit_is_a_single_violation() {
    let request = CreateOrderRequest {
        shipping_postal_code: "1".repeat(11),
        ..valid_request()
    };

    let err = validate_creation(&request).unwrap_err();
    assert_eq!(err.violations().len(), 1);
    assert_eq!(err.violations()[0].field, "shippingPostalCode");
    assert_eq!(err.violations()[0].reason, "must be at most 10 characters");
}

#[test]
fn non_positive_quantity_names_the_item() {
    for quantity in [0, -1, i32::MIN] {
        let request = CreateOrderRequest {
            items: vec![item(1, 1), item(2, quantity)],
            ..valid_request()
        };

        assert_eq!(fields(&request), vec!["items[1].quantity"]);
    }
}

#[test]
fn missing_product_id_and_quantity_are_required() {
    let request = CreateOrderRequest {
        items: vec![OrderItemRequest::default()],
        ..valid_request()
    };

    let err = validate_creation(&request).unwrap_err();
    let reported: Vec<(&str, &str)> = err
        .violations()
        .iter()
        .map(|v| (v.field.as_str(), v.reason.as_str()))
        .collect();
    assert_eq!(
        reported,
        vec![
            ("items[0].productId", "is required"),
            ("items[0].quantity", "is required"),
        ]
    );
}

#[test]
fn strings_at_limit_are_accepted() {
    let request = CreateOrderRequest {
        shipping_name: "a".repeat(SHIPPING_NAME_MAX),
        shipping_postal_code: "1".repeat(SHIPPING_POSTAL_CODE_MAX),
        shipping_prefecture: "b".repeat(SHIPPING_PREFECTURE_MAX),
        shipping_city: "c".repeat(SHIPPING_CITY_MAX),
        shipping_address_line: "d".repeat(SHIPPING_ADDRESS_LINE_MAX),
        shipping_phone: Some("0".repeat(SHIPPING_PHONE_MAX)),
        notes: Some("n".repeat(NOTES_MAX)),
        ..valid_request()
    };

    assert!(validate_creation(&request).is_ok());
}

#[test]
fn strings_one_over_limit_are_each_reported() {
    let request = CreateOrderRequest {
        shipping_name: "a".repeat(SHIPPING_NAME_MAX + 1),
        shipping_postal_code: "1".repeat(SHIPPING_POSTAL_CODE_MAX + 1),
        shipping_prefecture: "b".repeat(SHIPPING_PREFECTURE_MAX + 1),
        shipping_city: "c".repeat(SHIPPING_CITY_MAX + 1),
        shipping_address_line: "d".repeat(SHIPPING_ADDRESS_LINE_MAX + 1),
        shipping_phone: Some("0".repeat(SHIPPING_PHONE_MAX + 1)),
        notes: Some("n".repeat(NOTES_MAX + 1)),
        ..valid_request()
    };

    assert_eq!(
        fields(&request),
        vec![
            "shippingName",
            "shippingPostalCode",
            "shippingPrefecture",
            "shippingCity",
            "shippingAddressLine",
            "shippingPhone",
            "notes",
        ]
    );
}

#[test]
fn length_counts_characters_not_bytes() {
    // Ten multi-byte characters fit a ten character limit.
    let request = CreateOrderRequest {
        shipping_postal_code: "〒".repeat(SHIPPING_POSTAL_CODE_MAX),
        shipping_prefecture: "東京都".into(),
        ..valid_request()
    };

    assert!(validate_creation(&request).is_ok());
}

#[test]
fn blank_required_fields_are_required() {
    let request = CreateOrderRequest {
        shipping_name: String::new(),
        shipping_city: "   ".into(),
        ..valid_request()
    };

    let err = validate_creation(&request).unwrap_err();
    assert_eq!(err.violations().len(), 2);
    assert!(err.violations().iter().all(|v| v.reason == "is required"));
}

#[test]
fn empty_optional_strings_are_accepted() {
    let request = CreateOrderRequest {
        shipping_phone: Some(String::new()),
        notes: Some(String::new()),
        ..valid_request()
    };

    let order = validate_creation(&request).expect("empty optionals are allowed");
    assert_eq!(order.shipping.phone.as_deref(), Some(""));
    assert_eq!(order.notes.as_deref(), Some(""));
}

#[test]
fn every_violation_is_reported_in_field_order() {
    let request = CreateOrderRequest {
        items: vec![],
        shipping_name: String::new(),
        shipping_postal_code: "1".repeat(20),
        notes: Some("n".repeat(NOTES_MAX + 1)),
        ..valid_request()
    };

    assert_eq!(
        fields(&request),
        vec!["items", "shippingName", "shippingPostalCode", "notes"]
    );
}

#[test]
fn validation_is_repeatable() {
    let good = valid_request();
    assert_eq!(validate_creation(&good), validate_creation(&good));

    let bad = CreateOrderRequest {
        items: vec![item(1, 0)],
        shipping_city: String::new(),
        ..valid_request()
    };
    assert_eq!(validate_creation(&bad), validate_creation(&bad));
}

#[test]
fn missing_json_fields_become_violations() {
    let request: CreateOrderRequest =
        serde_json::from_str(r#"{ "items": [{ "productId": 7 }] }"#).unwrap();

    assert_eq!(
        fields(&request),
        vec![
            "items[0].quantity",
            "shippingName",
            "shippingPostalCode",
            "shippingPrefecture",
            "shippingCity",
            "shippingAddressLine",
        ]
    );
}

#[test]
fn null_json_fields_become_violations() {
    let request: CreateOrderRequest = serde_json::from_str(
        r#"{
            "items": null,
            "shippingName": null,
            "shippingPostalCode": null,
            "shippingPrefecture": null,
            "shippingCity": null,
            "shippingAddressLine": null,
            "shippingPhone": null,
            "notes": null
        }"#,
    )
    .expect("nulls deserialize");

    assert_eq!(request.shipping_phone, None);
    assert_eq!(request.notes, None);
    assert_eq!(
        fields(&request),
        vec![
            "items",
            "shippingName",
            "shippingPostalCode",
            "shippingPrefecture",
            "shippingCity",
            "shippingAddressLine",
        ]
    );
}

#[test]
fn error_message_lists_violations() {
    let request = CreateOrderRequest {
        items: vec![],
        ..valid_request()
    };

    let err = validate_creation(&request).unwrap_err();
    assert_eq!(
        err.to_string(),
        "validation failed: items: must contain at least one item"
    );
}
