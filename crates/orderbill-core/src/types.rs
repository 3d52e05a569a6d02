//! # Domain Types
//!
//! Output-side domain types used throughout OrderBill.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    CartItem     │   │   LineResult    │   │      Bill       │       │
//! │  │   (cart.rs)     │──►│  ─────────────  │──►│  ─────────────  │       │
//! │  │  name, price    │   │  base_price     │   │  items          │       │
//! │  │  qty, addons    │   │  addon_total    │   │  subtotal       │       │
//! │  └─────────────────┘   │  item_total     │   │  delivery_fee   │       │
//! │                        └─────────────────┘   │  gst, discount  │       │
//! │  ┌─────────────────┐                         │  grand_total    │       │
//! │  │    TaxRate      │                         └─────────────────┘       │
//! │  │  bps (u32)      │                                                    │
//! │  │  500 = 5% GST   │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Money fields serialize as decimal rupees with camelCase keys, so a bill
//! reads `{"subtotal": 330.0, "deliveryFee": 30.0, "gst": 16.5, ...}`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coupon::Coupon;
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 500 bps = 5% (food-delivery GST).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(crate::DEFAULT_GST_BPS)
    }
}

// =============================================================================
// Line Result
// =============================================================================

/// One billed line, derived from a retained cart item (qty > 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineResult {
    pub name: String,
    pub qty: i64,

    /// Item price as given on the cart.
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub base_price: Money,

    /// Sum of the well-formed add-on prices for ONE unit.
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub addon_total: Money,

    /// `(base_price + addon_total) × qty`.
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub item_total: Money,
}

impl LineResult {
    /// Price of a single unit including add-ons.
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.base_price + self.addon_total
    }
}

// =============================================================================
// Bill
// =============================================================================

/// The itemized bill for one order.
///
/// ## Invariants
/// - `subtotal` is the sum of every `item_total`, unrounded
/// - `gst` is rounded to the paisa
/// - `grand_total = max(0, subtotal + delivery_fee + gst - discount)`,
///   rounded to the paisa
/// - With FREESHIP applied, `delivery_fee` is zero and `discount` holds the
///   fee that would have been charged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Bill {
    pub items: Vec<LineResult>,

    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub subtotal: Money,

    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub delivery_fee: Money,

    /// Rounded to the paisa.
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub gst: Money,

    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub discount: Money,

    /// Rounded to the paisa.
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub grand_total: Money,

    /// The coupon that was recognized and applied, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub coupon: Option<Coupon>,
}

impl Bill {
    /// Number of billed lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all billed lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|line| line.qty).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(500);
        assert_eq!(rate.bps(), 500);
        assert!((rate.percentage() - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        let rate = TaxRate::from_percentage(5.0);
        assert_eq!(rate.bps(), 500);
    }

    #[test]
    fn test_tax_rate_default_is_gst() {
        assert_eq!(TaxRate::default().bps(), 500);
        assert!(TaxRate::zero().is_zero());
    }

    #[test]
    fn test_line_result_serializes_camel_case_rupees() {
        let line = LineResult {
            name: "Biryani".to_string(),
            qty: 1,
            base_price: Money::from_rupees(300),
            addon_total: Money::from_rupees(30),
            item_total: Money::from_rupees(330),
        };

        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["basePrice"], 300.0);
        assert_eq!(json["addonTotal"], 30.0);
        assert_eq!(json["itemTotal"], 330.0);
        assert_eq!(line.unit_price(), Money::from_rupees(330));
    }

    #[test]
    fn test_bill_omits_absent_coupon() {
        let bill = Bill {
            items: Vec::new(),
            subtotal: Money::zero(),
            delivery_fee: Money::from_rupees(30),
            gst: Money::zero(),
            discount: Money::zero(),
            grand_total: Money::from_rupees(30),
            coupon: None,
        };

        let json = serde_json::to_value(&bill).unwrap();
        assert!(json.get("coupon").is_none());
        assert_eq!(json["deliveryFee"], 30.0);
        assert_eq!(json["grandTotal"], 30.0);
    }
}
