//! Property tests for the order bill calculator: purity, the line and
//! subtotal identities, add-on leniency, quantity filtering and the
//! zero floor on the grand total.

use orderbill_core::cart::addon_total;
use orderbill_core::{compute_order, compute_order_json, CartItem, Money};
use proptest::prelude::*;
use serde_json::{json, Value};

/// One add-on string together with the paise it should contribute.
fn addon_strategy() -> impl Strategy<Value = (String, i64)> {
    let name = "[A-Za-z ]{1,10}";
    prop_oneof![
        // Well-formed "Name:Price"
        (name, 0i64..10_000).prop_map(|(name, cents)| {
            (format!("{}:{}.{:02}", name, cents / 100, cents % 100), cents)
        }),
        // No separator
        name.prop_map(|name| (name, 0i64)),
        // Two separators
        (name, 0i64..10_000).prop_map(|(name, cents)| (format!("{}:{}:extra", name, cents), 0i64)),
        // Non-numeric price
        (name, "[a-z]{1,6}").prop_map(|(name, price)| (format!("{}:{}", name, price), 0i64)),
    ]
}

fn item_strategy() -> impl Strategy<Value = CartItem> {
    (
        "[A-Za-z ]{1,16}",
        0i64..100_000,
        -3i64..10,
        prop::collection::vec(addon_strategy(), 0..4),
    )
        .prop_map(|(name, cents, qty, addons)| CartItem {
            name,
            price: Money::from_cents(cents),
            qty,
            addons: addons.into_iter().map(|(raw, _)| raw).collect(),
        })
}

fn coupon_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("FIRST50".to_string())),
        Just(Some("flat100".to_string())),
        Just(Some("FreeShip".to_string())),
        "[A-Z0-9]{0,8}".prop_map(Some),
    ]
}

proptest! {
    /// Same cart and coupon always produce the same bill.
    #[test]
    fn prop_compute_order_is_deterministic(
        cart in prop::collection::vec(item_strategy(), 1..8),
        coupon in coupon_strategy()
    ) {
        let first = compute_order(&cart, coupon.as_deref()).unwrap();
        let second = compute_order(&cart, coupon.as_deref()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Without add-ons and with positive quantities, subtotal is Σ price × qty.
    #[test]
    fn prop_subtotal_is_sum_of_price_times_qty(
        lines in prop::collection::vec((0i64..100_000, 1i64..20), 1..10)
    ) {
        let cart: Vec<CartItem> = lines
            .iter()
            .map(|&(cents, qty)| CartItem::new("Dish", Money::from_cents(cents), qty))
            .collect();
        let expected: i64 = lines.iter().map(|&(cents, qty)| cents * qty).sum();

        let bill = compute_order(&cart, None).unwrap();
        prop_assert_eq!(bill.subtotal.cents(), expected);
    }

    /// Only add-ons with exactly one ':' and a numeric price contribute.
    #[test]
    fn prop_addon_total_counts_only_well_formed(
        addons in prop::collection::vec(addon_strategy(), 0..8)
    ) {
        let raw: Vec<String> = addons.iter().map(|(raw, _)| raw.clone()).collect();
        let expected: i64 = addons.iter().map(|(_, cents)| cents).sum();

        prop_assert_eq!(addon_total(&raw).cents(), expected);
    }

    /// Every line obeys item_total = (base + addons) × qty and the subtotal
    /// is the sum of the lines.
    #[test]
    fn prop_line_and_subtotal_identities(
        cart in prop::collection::vec(item_strategy(), 1..8),
        coupon in coupon_strategy()
    ) {
        let bill = compute_order(&cart, coupon.as_deref()).unwrap();

        for line in &bill.items {
            prop_assert_eq!(
                line.item_total,
                (line.base_price + line.addon_total).multiply_quantity(line.qty)
            );
        }

        let sum: Money = bill.items.iter().map(|line| line.item_total).sum();
        prop_assert_eq!(bill.subtotal, sum);
    }

    /// Items with qty <= 0 never reach the bill; the rest keep their order.
    #[test]
    fn prop_non_positive_quantities_excluded(
        cart in prop::collection::vec(item_strategy(), 1..10)
    ) {
        let bill = compute_order(&cart, None).unwrap();

        let expected: Vec<(&str, i64)> = cart
            .iter()
            .filter(|item| item.qty > 0)
            .map(|item| (item.name.as_str(), item.qty))
            .collect();
        let actual: Vec<(&str, i64)> = bill
            .items
            .iter()
            .map(|line| (line.name.as_str(), line.qty))
            .collect();

        prop_assert_eq!(actual, expected);
    }

    /// The grand total is never negative and otherwise equals the charges
    /// minus the discount, rounded to the paisa.
    #[test]
    fn prop_grand_total_floored_at_zero(
        cart in prop::collection::vec(item_strategy(), 1..6),
        coupon in coupon_strategy()
    ) {
        let bill = compute_order(&cart, coupon.as_deref()).unwrap();
        let raw = bill.subtotal + bill.delivery_fee + bill.gst - bill.discount;

        prop_assert!(!bill.grand_total.is_negative());
        prop_assert_eq!(bill.grand_total, raw.clamp_non_negative().round_to_paisa());
    }

    /// Decimal rupee prices sent as JSON keep every digit: the subtotal is
    /// exact and the delivery tier follows it, while GST and the grand
    /// total land on whole paise.
    #[test]
    fn prop_json_decimal_prices_tier_on_exact_subtotal(
        lines in prop::collection::vec((0i64..700_000_000, 1i64..4), 1..4)
    ) {
        let cart: Vec<Value> = lines
            .iter()
            .map(|&(micros, qty)| {
                let price = micros as f64 / 1_000_000.0;
                json!({ "name": "Dish", "price": price, "qty": qty })
            })
            .collect();
        let expected: i64 = lines.iter().map(|&(micros, qty)| micros * qty).sum();

        let bill = compute_order_json(&Value::Array(cart), None).unwrap();

        prop_assert_eq!(bill.subtotal.micros(), expected);
        for (line, &(micros, _)) in bill.items.iter().zip(&lines) {
            prop_assert_eq!(line.base_price.micros(), micros);
        }

        let fee = if expected < 500_000_000 {
            30
        } else if expected < 1_000_000_000 {
            15
        } else {
            0
        };
        prop_assert_eq!(bill.delivery_fee, Money::from_rupees(fee));
        prop_assert!(bill.gst.is_whole_paise());
        prop_assert!(bill.grand_total.is_whole_paise());
    }
}
