//! # Validation Module
//!
//! Numeric checks applied to a [`BillingPolicy`](crate::policy::BillingPolicy)
//! before it is used. Cart input is never validated here: the calculator
//! absorbs malformed items leniently.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Config load (CLI)                                                     │
//! │  └── BillingPolicy::validate                                           │
//! │        ├── validate_non_negative_amount  (fees, caps, flat amount)     │
//! │        ├── validate_rate_bps             (coupon rate)                 │
//! │        └── validate_tax_rate_bps         (GST)                         │
//! │                                                                         │
//! │  Calculator                                                            │
//! │  └── empty / non-list cart is the only hard failure                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use orderbill_core::validation::validate_tax_rate_bps;
//!
//! assert!(validate_tax_rate_bps(500).is_ok());
//! assert!(validate_tax_rate_bps(10_001).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that an amount is zero or more.
///
/// ## Example
/// ```rust
/// use orderbill_core::validation::validate_non_negative_amount;
/// use orderbill_core::Money;
///
/// assert!(validate_non_negative_amount("price", Money::from_rupees(300)).is_ok());
/// assert!(validate_non_negative_amount("price", Money::zero()).is_ok());
/// assert!(validate_non_negative_amount("price", Money::from_cents(-1)).is_err());
/// ```
pub fn validate_non_negative_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_rate_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    validate_rate_bps("tax_rate", bps)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_negative_amount() {
        assert!(validate_non_negative_amount("fee", Money::zero()).is_ok());
        assert_eq!(
            validate_non_negative_amount("fee", Money::from_cents(-100)),
            Err(ValidationError::MustNotBeNegative {
                field: "fee".to_string()
            })
        );
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(500).is_ok());
        assert!(validate_tax_rate_bps(10_000).is_ok());
        assert!(validate_tax_rate_bps(10_001).is_err());
    }

    #[test]
    fn test_validate_rate_bps_names_field() {
        assert_eq!(
            validate_rate_bps("coupons.first_order_rate_bps", 12_000),
            Err(ValidationError::OutOfRange {
                field: "coupons.first_order_rate_bps".to_string(),
                min: 0,
                max: 10_000,
            })
        );
    }
}
