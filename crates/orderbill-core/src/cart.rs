//! # Cart Input
//!
//! The cart a customer submits, and the lenient parsing rules applied to it.
//!
//! ## Leniency Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Input                               Treatment                          │
//! │  ──────────────────────────────────  ────────────────────────────────   │
//! │  addon "Raita:30"                    +Rs 30.00 per unit                 │
//! │  addon "Raita:30abc"                 +Rs 30.00 (leading number wins)    │
//! │  addon "Raita" / "Raita:30:extra"    skipped (not exactly one ':')      │
//! │  addon "Raita:free"                  skipped (no leading number)        │
//! │  qty <= 0                            item dropped from the bill         │
//! │  qty missing / not an integer        treated as 0, so dropped           │
//! │  price missing / not numeric         treated as Rs 0.00                 │
//! │  price 499.995                       kept exactly, not rounded          │
//! │  item that is not an object          dropped                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these raise errors. Only an empty or non-list cart is invalid.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Cart Item
// =============================================================================

/// An item in the customer's cart.
///
/// ## JSON Shape
/// ```json
/// { "name": "Butter Chicken", "price": 350, "qty": 2,
///   "addons": ["Extra Butter:50", "Naan:40"] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    #[serde(default)]
    pub name: String,

    /// Unit price in rupees on the JSON surface.
    #[serde(with = "crate::money::decimal", default)]
    #[ts(type = "number")]
    pub price: Money,

    #[serde(default)]
    pub qty: i64,

    /// Add-on strings in `"Name:Price"` form.
    #[serde(default)]
    pub addons: Vec<String>,
}

impl CartItem {
    /// Creates an item without add-ons.
    pub fn new(name: impl Into<String>, price: Money, qty: i64) -> Self {
        CartItem {
            name: name.into(),
            price,
            qty,
            addons: Vec::new(),
        }
    }

    /// Appends one `"Name:Price"` add-on.
    pub fn with_addon(mut self, addon: impl Into<String>) -> Self {
        self.addons.push(addon.into());
        self
    }

    /// Whether this item appears on the bill.
    #[inline]
    pub fn is_billable(&self) -> bool {
        self.qty > 0
    }

    /// Sum of the well-formed add-on prices for one unit.
    pub fn addon_total(&self) -> Money {
        addon_total(&self.addons)
    }

    /// Builds an item from untyped JSON, applying the leniency rules.
    ///
    /// Returns `None` when `value` is not a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;

        let name = match fields.get("name") {
            Some(Value::String(name)) => name.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        let addons = fields
            .get("addons")
            .and_then(Value::as_array)
            .map(|raw| {
                raw.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Some(CartItem {
            name,
            price: fields.get("price").map(lenient_price).unwrap_or_default(),
            qty: fields.get("qty").map(lenient_qty).unwrap_or(0),
            addons,
        })
    }
}

/// Numeric price, or zero when it cannot be read as one.
fn lenient_price(value: &Value) -> Money {
    let parsed = match value {
        Value::Number(number) => number.as_f64().and_then(Money::from_major),
        Value::String(text) => Money::parse_decimal(text),
        _ => None,
    };

    parsed.unwrap_or_else(|| {
        trace!(%value, "Unreadable price, using zero");
        Money::zero()
    })
}

/// Integer quantity, or zero when it cannot be read as one.
fn lenient_qty(value: &Value) -> i64 {
    let parsed = match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|q| q.fract() == 0.0 && q.abs() < i64::MAX as f64)
                .map(|q| q as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };

    parsed.unwrap_or_else(|| {
        trace!(%value, "Unreadable quantity, item will be dropped");
        0
    })
}

// =============================================================================
// Add-ons
// =============================================================================

/// A parsed `"Name:Price"` add-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addon<'a> {
    pub name: &'a str,
    pub price: Money,
}

impl<'a> Addon<'a> {
    /// Parses one add-on string.
    ///
    /// The string must split on `:` into exactly two parts and the second
    /// part must start with a number; otherwise `None`. Trailing text after
    /// the number is ignored, so `"Raita:30abc"` is Rs 30.
    ///
    /// ## Example
    /// ```rust
    /// use orderbill_core::cart::Addon;
    /// use orderbill_core::Money;
    ///
    /// let naan = Addon::parse("Naan:40").unwrap();
    /// assert_eq!(naan.name, "Naan");
    /// assert_eq!(naan.price, Money::from_rupees(40));
    ///
    /// assert!(Addon::parse("Naan").is_none());
    /// assert!(Addon::parse("Naan:40:butter").is_none());
    /// ```
    pub fn parse(raw: &'a str) -> Option<Self> {
        let mut parts = raw.split(':');
        let name = parts.next()?;
        let price = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        Some(Addon {
            name,
            price: Money::parse_leading(price)?,
        })
    }
}

/// Sums the prices of the well-formed add-ons; malformed ones add nothing.
pub fn addon_total<S: AsRef<str>>(addons: &[S]) -> Money {
    addons
        .iter()
        .map(AsRef::as_ref)
        .filter_map(|raw| {
            let parsed = Addon::parse(raw);
            if parsed.is_none() {
                trace!(addon = raw, "Skipping malformed addon");
            }
            parsed
        })
        .map(|addon| addon.price)
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
