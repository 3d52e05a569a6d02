//! # Billing Policy
//!
//! The tunable numbers behind a bill: delivery tiers, GST rate and coupon
//! terms. [`BillingPolicy::default`] is the standard schedule; hosts may
//! load an override (the CLI reads it from TOML).
//!
//! ## Default Schedule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Subtotal              Delivery fee                                     │
//! │  ─────────────────     ────────────                                     │
//! │  < Rs 500              Rs 30                                            │
//! │  Rs 500 – Rs 999.99    Rs 15                                            │
//! │  ≥ Rs 1000             FREE                                             │
//! │                                                                         │
//! │  GST: 5% of subtotal                                                    │
//! │  FIRST50: 50% off, max Rs 150 · FLAT100: Rs 100 off · FREESHIP          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## TOML Shape
//! ```toml
//! gst_rate_bps = 500
//!
//! [delivery]
//! otherwise = 0
//! tiers = [
//!     { below = 500, fee = 30 },
//!     { below = 1000, fee = 15 },
//! ]
//!
//! [coupons]
//! first_order_rate_bps = 5000
//! first_order_cap = 150
//! flat_amount = 100
//! ```

use serde::{Deserialize, Serialize};

use crate::coupon::CouponTerms;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::TaxRate;
use crate::validation::{validate_non_negative_amount, validate_rate_bps, validate_tax_rate_bps};

// =============================================================================
// Delivery Schedule
// =============================================================================

/// One delivery tier: subtotals strictly below `below` pay `fee`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryTier {
    #[serde(with = "crate::money::decimal")]
    pub below: Money,

    #[serde(with = "crate::money::decimal")]
    pub fee: Money,
}

impl DeliveryTier {
    pub fn new(below: Money, fee: Money) -> Self {
        DeliveryTier { below, fee }
    }
}

/// Tiered delivery fees, checked in ascending order of `below`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliverySchedule {
    pub tiers: Vec<DeliveryTier>,

    /// Fee once the subtotal clears every tier.
    #[serde(with = "crate::money::decimal")]
    pub otherwise: Money,
}

impl DeliverySchedule {
    /// Base delivery fee for a subtotal, before any coupon.
    ///
    /// ## Example
    /// ```rust
    /// use orderbill_core::policy::DeliverySchedule;
    /// use orderbill_core::Money;
    ///
    /// let schedule = DeliverySchedule::default();
    /// assert_eq!(schedule.fee_for(Money::from_cents(49999)), Money::from_rupees(30));
    /// assert_eq!(schedule.fee_for(Money::from_rupees(500)), Money::from_rupees(15));
    /// assert_eq!(schedule.fee_for(Money::from_rupees(1000)), Money::zero());
    /// ```
    pub fn fee_for(&self, subtotal: Money) -> Money {
        self.tiers
            .iter()
            .find(|tier| subtotal < tier.below)
            .map(|tier| tier.fee)
            .unwrap_or(self.otherwise)
    }
}

impl Default for DeliverySchedule {
    fn default() -> Self {
        DeliverySchedule {
            tiers: vec![
                DeliveryTier::new(Money::from_rupees(500), Money::from_rupees(30)),
                DeliveryTier::new(Money::from_rupees(1000), Money::from_rupees(15)),
            ],
            otherwise: Money::zero(),
        }
    }
}

// =============================================================================
// Billing Policy
// =============================================================================

/// Everything the calculator needs besides the cart and coupon.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingPolicy {
    pub delivery: DeliverySchedule,

    #[serde(rename = "gst_rate_bps")]
    pub gst_rate: TaxRate,

    pub coupons: CouponTerms,
}

impl BillingPolicy {
    /// Checks that the policy can produce sensible bills.
    ///
    /// ## Rules
    /// - Tier thresholds strictly ascending
    /// - Fees, caps and flat amounts non-negative
    /// - Rates within 0% to 100%
    pub fn validate(&self) -> CoreResult<()> {
        self.check().map_err(CoreError::InvalidPolicy)
    }

    fn check(&self) -> Result<(), ValidationError> {
        for pair in self.delivery.tiers.windows(2) {
            if pair[1].below <= pair[0].below {
                return Err(ValidationError::InvalidFormat {
                    field: "delivery.tiers".to_string(),
                    reason: "thresholds must be strictly ascending".to_string(),
                });
            }
        }

        for tier in &self.delivery.tiers {
            validate_non_negative_amount("delivery.tiers.fee", tier.fee)?;
        }
        validate_non_negative_amount("delivery.otherwise", self.delivery.otherwise)?;

        validate_tax_rate_bps(self.gst_rate.bps())?;
        validate_rate_bps("coupons.first_order_rate_bps", self.coupons.first_order_rate_bps)?;
        validate_non_negative_amount("coupons.first_order_cap", self.coupons.first_order_cap)?;
        validate_non_negative_amount("coupons.flat_amount", self.coupons.flat_amount)?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delivery_boundaries() {
        let schedule = DeliverySchedule::default();
        assert_eq!(schedule.fee_for(Money::zero()), Money::from_rupees(30));
        assert_eq!(schedule.fee_for(Money::from_cents(49999)), Money::from_rupees(30));
        assert_eq!(schedule.fee_for(Money::from_micros(499_999_999)), Money::from_rupees(30));
        assert_eq!(schedule.fee_for(Money::from_rupees(500)), Money::from_rupees(15));
        assert_eq!(schedule.fee_for(Money::from_cents(99999)), Money::from_rupees(15));
        assert_eq!(schedule.fee_for(Money::from_rupees(1000)), Money::zero());
        assert_eq!(schedule.fee_for(Money::from_rupees(5000)), Money::zero());
    }

    #[test]
    fn test_default_policy_is_valid() {
        let policy = BillingPolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.gst_rate.bps(), 500);
    }

    #[test]
    fn test_rejects_unordered_tiers() {
        let mut policy = BillingPolicy::default();
        policy.delivery.tiers.reverse();
        assert!(matches!(policy.validate(), Err(CoreError::InvalidPolicy(_))));
    }

    #[test]
    fn test_rejects_negative_fee_and_bad_rate() {
        let mut policy = BillingPolicy::default();
        policy.delivery.otherwise = Money::from_rupees(-5);
        assert!(policy.validate().is_err());

        let mut policy = BillingPolicy::default();
        policy.gst_rate = TaxRate::from_bps(20_000);
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_override() {
        let policy: BillingPolicy = serde_json::from_str(
            r#"{ "gst_rate_bps": 1200, "coupons": { "flat_amount": 75 } }"#,
        )
        .unwrap();

        assert_eq!(policy.gst_rate.bps(), 1200);
        assert_eq!(policy.coupons.flat_amount, Money::from_rupees(75));
        assert_eq!(policy.coupons.first_order_cap, Money::from_rupees(150));
        assert_eq!(policy.delivery, DeliverySchedule::default());
    }
}
