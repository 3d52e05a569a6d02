//! # Order Bill Calculator
//!
//! Turns a cart and an optional coupon code into an itemized [`Bill`].
//!
//! ## Computation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cart ──► drop qty <= 0 ──► per line:                                   │
//! │                              addon_total = Σ "Name:Price" prices        │
//! │                              item_total  = (price + addons) × qty       │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                  subtotal = Σ item_total (unrounded)                    │
//! │                                   │                                     │
//! │                ┌──────────────────┼──────────────────┐                  │
//! │                ▼                  ▼                  ▼                  │
//! │         delivery tier      GST (5%, to     coupon (needs the           │
//! │          (base fee)         the paisa)     base delivery fee)          │
//! │                └──────────────────┼──────────────────┘                  │
//! │                                   ▼                                     │
//! │  grand_total = max(0, subtotal + delivery + gst - discount), to paisa  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculator is a pure function: same cart, same coupon, same bill.
//!
//! ## Example
//! ```rust
//! use orderbill_core::{compute_order, CartItem, Money};
//!
//! let cart = vec![CartItem::new("Biryani", Money::from_rupees(300), 1).with_addon("Raita:30")];
//! let bill = compute_order(&cart, Some("FLAT100")).unwrap();
//!
//! assert_eq!(bill.subtotal, Money::from_rupees(330));
//! assert_eq!(bill.delivery_fee, Money::from_rupees(30));
//! assert_eq!(bill.gst, Money::from_cents(1650));
//! assert_eq!(bill.discount, Money::from_rupees(100));
//! assert_eq!(bill.grand_total, Money::from_cents(27650));
//! ```

use serde_json::Value;
use tracing::{debug, trace};

use crate::cart::CartItem;
use crate::coupon::{Coupon, CouponEffect};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::policy::BillingPolicy;
use crate::types::{Bill, LineResult};

/// Computes a bill with the default [`BillingPolicy`].
///
/// ## Errors
/// [`CoreError::EmptyCart`] when `cart` has no entries. Nothing else fails:
/// items with `qty <= 0` are dropped and unknown coupons are ignored.
pub fn compute_order(cart: &[CartItem], coupon: Option<&str>) -> CoreResult<Bill> {
    compute_order_with_policy(cart, coupon, &BillingPolicy::default())
}

/// Computes a bill under a custom policy.
pub fn compute_order_with_policy(
    cart: &[CartItem],
    coupon: Option<&str>,
    policy: &BillingPolicy,
) -> CoreResult<Bill> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    Ok(build_bill(cart, cart.len(), coupon, policy))
}

/// Computes a bill from untyped JSON with the default policy.
///
/// Mirrors the checks a dynamically typed caller needs:
/// - `cart` that is not an array → [`CoreError::CartNotSequence`]
/// - empty array → [`CoreError::EmptyCart`]
/// - array entries that are not objects are dropped
/// - `coupon` that is not a string counts as no coupon
///
/// ## Example
/// ```rust
/// use orderbill_core::{compute_order_json, CoreError};
/// use serde_json::json;
///
/// let cart = json!([{ "name": "Pizza", "price": 500, "qty": 2, "addons": [] }]);
/// let bill = compute_order_json(&cart, Some(&json!("first50"))).unwrap();
/// assert_eq!(bill.grand_total.cents(), 90000);
///
/// let err = compute_order_json(&json!("not a cart"), None).unwrap_err();
/// assert!(matches!(err, CoreError::CartNotSequence));
/// ```
pub fn compute_order_json(cart: &Value, coupon: Option<&Value>) -> CoreResult<Bill> {
    compute_order_json_with_policy(cart, coupon, &BillingPolicy::default())
}

/// Computes a bill from untyped JSON under a custom policy.
pub fn compute_order_json_with_policy(
    cart: &Value,
    coupon: Option<&Value>,
    policy: &BillingPolicy,
) -> CoreResult<Bill> {
    let entries = cart.as_array().ok_or(CoreError::CartNotSequence)?;
    if entries.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let items: Vec<CartItem> = entries
        .iter()
        .filter_map(|entry| {
            let item = CartItem::from_value(entry);
            if item.is_none() {
                trace!(%entry, "Dropping cart entry that is not an object");
            }
            item
        })
        .collect();

    // A cart whose entries were all dropped is billed, not rejected
    Ok(build_bill(&items, entries.len(), coupon.and_then(Value::as_str), policy))
}

/// Bills a cart that has already passed the structural checks.
///
/// `submitted` counts the entries the caller sent, including any already
/// dropped before they became [`CartItem`]s.
fn build_bill(
    cart: &[CartItem],
    submitted: usize,
    coupon: Option<&str>,
    policy: &BillingPolicy,
) -> Bill {
    let items: Vec<LineResult> = cart
        .iter()
        .filter(|item| {
            if !item.is_billable() {
                trace!(name = %item.name, qty = item.qty, "Dropping item with non-positive quantity");
            }
            item.is_billable()
        })
        .map(bill_line)
        .collect();

    let subtotal: Money = items.iter().map(|line| line.item_total).sum();
    let base_delivery_fee = policy.delivery.fee_for(subtotal);
    let gst = subtotal.calculate_tax(policy.gst_rate);

    let applied = coupon.and_then(Coupon::from_code);
    let effect = match applied {
        Some(code) => code.apply(subtotal, base_delivery_fee, &policy.coupons),
        None => CouponEffect::none(base_delivery_fee),
    };

    let grand_total = (subtotal + effect.delivery_fee + gst - effect.discount)
        .clamp_non_negative()
        .round_to_paisa();

    debug!(
        lines = items.len(),
        dropped = submitted.saturating_sub(items.len()),
        %subtotal,
        delivery_fee = %effect.delivery_fee,
        %gst,
        discount = %effect.discount,
        %grand_total,
        coupon = ?applied,
        "Computed order bill"
    );

    Bill {
        items,
        subtotal,
        delivery_fee: effect.delivery_fee,
        gst,
        discount: effect.discount,
        grand_total,
        coupon: applied,
    }
}

/// Bills one retained cart item.
fn bill_line(item: &CartItem) -> LineResult {
    let addon_total = item.addon_total();
    let item_total = (item.price + addon_total).multiply_quantity(item.qty);

    LineResult {
        name: item.name.clone(),
        qty: item.qty,
        base_price: item.price,
        addon_total,
        item_total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
