//! # Coupons
//!
//! The fixed set of coupon codes and what each one does to a bill.
//!
//! | Code       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `FIRST50`  | 50% off the subtotal, capped at Rs 150                  |
//! | `FLAT100`  | Rs 100 off                                              |
//! | `FREESHIP` | delivery fee becomes 0, discount = the fee it replaced |
//!
//! Codes match case-insensitively. Unknown codes behave exactly like no
//! coupon at all: zero discount, delivery fee untouched, no error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Coupon
// =============================================================================

/// A recognized coupon code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Coupon {
    /// Percentage off the subtotal, capped.
    First50,
    /// Fixed amount off.
    Flat100,
    /// Delivery fee waived.
    FreeShip,
}

impl Coupon {
    /// Every coupon, in display order.
    pub const ALL: [Coupon; 3] = [Coupon::First50, Coupon::Flat100, Coupon::FreeShip];

    /// The canonical (upper-case) code.
    pub const fn code(&self) -> &'static str {
        match self {
            Coupon::First50 => "FIRST50",
            Coupon::Flat100 => "FLAT100",
            Coupon::FreeShip => "FREESHIP",
        }
    }

    /// Resolves a code case-insensitively; `None` for anything unknown.
    ///
    /// ## Example
    /// ```rust
    /// use orderbill_core::Coupon;
    ///
    /// assert_eq!(Coupon::from_code("flat100"), Some(Coupon::Flat100));
    /// assert_eq!(Coupon::from_code("FreeShip"), Some(Coupon::FreeShip));
    /// assert_eq!(Coupon::from_code("DIWALI20"), None);
    /// ```
    pub fn from_code(code: &str) -> Option<Coupon> {
        Coupon::ALL
            .into_iter()
            .find(|coupon| coupon.code().eq_ignore_ascii_case(code))
    }

    /// Applies this coupon to a subtotal and the base delivery fee.
    ///
    /// `delivery_fee` must be the tiered fee before any coupon, since
    /// FREESHIP turns exactly that amount into the discount.
    pub fn apply(&self, subtotal: Money, delivery_fee: Money, terms: &CouponTerms) -> CouponEffect {
        match self {
            Coupon::First50 => CouponEffect {
                discount: subtotal
                    .percentage(terms.first_order_rate_bps)
                    .min(terms.first_order_cap),
                delivery_fee,
            },
            Coupon::Flat100 => CouponEffect {
                discount: terms.flat_amount,
                delivery_fee,
            },
            Coupon::FreeShip => CouponEffect {
                discount: delivery_fee,
                delivery_fee: Money::zero(),
            },
        }
    }
}

impl fmt::Display for Coupon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Coupon {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coupon::from_code(s).ok_or_else(|| ValidationError::NotAllowed {
            field: "coupon".to_string(),
            allowed: Coupon::ALL.iter().map(|c| c.code().to_string()).collect(),
        })
    }
}

// =============================================================================
// Coupon Terms
// =============================================================================

/// The amounts behind each coupon code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CouponTerms {
    /// FIRST50 rate in basis points (5000 = 50%).
    pub first_order_rate_bps: u32,

    /// FIRST50 maximum discount.
    #[serde(with = "crate::money::decimal")]
    pub first_order_cap: Money,

    /// FLAT100 discount.
    #[serde(with = "crate::money::decimal")]
    pub flat_amount: Money,
}

impl Default for CouponTerms {
    fn default() -> Self {
        CouponTerms {
            first_order_rate_bps: 5000,
            first_order_cap: Money::from_rupees(150),
            flat_amount: Money::from_rupees(100),
        }
    }
}

/// What a coupon did: the discount and the delivery fee left to charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CouponEffect {
    pub discount: Money,
    pub delivery_fee: Money,
}

impl CouponEffect {
    /// The effect of no coupon.
    pub const fn none(delivery_fee: Money) -> Self {
        CouponEffect {
            discount: Money::zero(),
            delivery_fee,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
