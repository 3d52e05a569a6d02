//! End-to-end bills for the documented order scenarios, through the public
//! API only.

use orderbill_core::{compute_order, compute_order_json, CartItem, CoreError, Coupon, Money};
use serde_json::json;

fn single(cents: i64) -> Vec<CartItem> {
    vec![CartItem::new("Combo", Money::from_cents(cents), 1)]
}

#[test]
fn delivery_fee_tier_boundaries() {
    let cases = [
        (49_999, 3_000),
        (50_000, 1_500),
        (99_999, 1_500),
        (100_000, 0),
    ];

    for (subtotal, fee) in cases {
        let bill = compute_order(&single(subtotal), None).unwrap();
        assert_eq!(bill.subtotal.cents(), subtotal);
        assert_eq!(bill.delivery_fee.cents(), fee, "subtotal {}", subtotal);
    }
}

#[test]
fn json_decimal_prices_tier_on_exact_subtotal() {
    let cases = [
        (499.995, 30),
        (499.999999, 30),
        (500.0, 15),
        (999.995, 15),
        (1000.0, 0),
    ];

    for (price, fee) in cases {
        let cart = json!([{ "name": "Thali", "price": price, "qty": 1 }]);
        let bill = compute_order_json(&cart, None).unwrap();
        let output = serde_json::to_value(&bill).unwrap();

        assert_eq!(output["subtotal"], price, "price {}", price);
        assert_eq!(output["items"][0]["basePrice"], price);
        assert_eq!(bill.delivery_fee, Money::from_rupees(fee), "price {}", price);
    }
}

#[test]
fn json_sub_paisa_price_rounds_only_gst_and_grand_total() {
    let cart = json!([{ "name": "Saffron", "price": 499.995, "qty": 1 }]);
    let output = serde_json::to_value(compute_order_json(&cart, None).unwrap()).unwrap();

    assert_eq!(output["subtotal"], 499.995);
    assert_eq!(output["deliveryFee"], 30.0);
    assert_eq!(output["gst"], 25.0);
    assert_eq!(output["grandTotal"], 555.0);
}

#[test]
fn json_tiny_price_times_large_quantity() {
    let cart = json!([{ "name": "Cardamom", "price": 0.004, "qty": 1000 }]);
    let bill = compute_order_json(&cart, None).unwrap();

    assert_eq!(bill.items[0].item_total, Money::from_rupees(4));
    assert_eq!(bill.subtotal, Money::from_rupees(4));
    assert_eq!(bill.gst, Money::from_cents(20));
    assert_eq!(bill.grand_total, Money::from_cents(3420));
}

#[test]
fn first50_on_1000_is_capped_at_150() {
    let bill = compute_order(&single(100_000), Some("FIRST50")).unwrap();
    assert_eq!(bill.discount, Money::from_rupees(150));
}

#[test]
fn freeship_with_base_fee_30() {
    let bill = compute_order(&single(20_000), Some("FREESHIP")).unwrap();
    assert!(bill.delivery_fee.is_zero());
    assert_eq!(bill.discount, Money::from_rupees(30));
    assert_eq!(bill.coupon, Some(Coupon::FreeShip));
}

#[test]
fn empty_cart_with_coupon_is_invalid() {
    let err = compute_order(&[], Some("FLAT100")).unwrap_err();
    assert!(err.is_invalid_cart());
}

#[test]
fn biryani_raita_flat100_json_round_trip() {
    let request = json!({
        "cart": [{ "name": "Biryani", "price": 300, "qty": 1, "addons": ["Raita:30"] }],
        "coupon": "FLAT100"
    });

    let bill = compute_order_json(&request["cart"], request.get("coupon")).unwrap();
    let output = serde_json::to_value(&bill).unwrap();

    assert_eq!(
        output,
        json!({
            "items": [{
                "name": "Biryani",
                "qty": 1,
                "basePrice": 300.0,
                "addonTotal": 30.0,
                "itemTotal": 330.0
            }],
            "subtotal": 330.0,
            "deliveryFee": 30.0,
            "gst": 16.5,
            "discount": 100.0,
            "grandTotal": 276.5,
            "coupon": "FLAT100"
        })
    );
}

#[test]
fn mixed_quantities_only_bill_positive_lines() {
    let cart = vec![
        CartItem::new("Vada Pav", Money::from_rupees(25), 4),
        CartItem::new("Cutting Chai", Money::from_rupees(15), 0),
        CartItem::new("Misal", Money::from_rupees(90), -2),
    ];

    let bill = compute_order(&cart, None).unwrap();
    assert_eq!(bill.item_count(), 1);
    assert_eq!(bill.total_quantity(), 4);
    assert_eq!(bill.subtotal, Money::from_rupees(100));
}

#[test]
fn discount_larger_than_bill_floors_at_zero() {
    let cart = vec![CartItem::new("Toffee", Money::from_rupees(1), 1)];
    let bill = compute_order(&cart, Some("flat100")).unwrap();
    assert!(bill.grand_total.is_zero());
}

#[test]
fn json_cart_must_be_a_list() {
    let err = compute_order_json(&json!({ "items": [] }), None).unwrap_err();
    assert!(matches!(err, CoreError::CartNotSequence));
}
