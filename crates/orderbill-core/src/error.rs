//! # Error Types
//!
//! Domain-specific error types for orderbill-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  orderbill-core errors (this file)                                     │
//! │  ├── CoreError        - Structural failures (the "invalid" result)     │
//! │  └── ValidationError  - Policy and coupon-code validation failures     │
//! │                                                                         │
//! │  orderbill-cli errors (separate crate)                                 │
//! │  └── CliError         - Usage, I/O, config and parse failures          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError::InvalidPolicy → CliError → exit    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT An Error
//! Malformed add-on strings, unknown coupons and items with `qty <= 0` are
//! absorbed by the calculator and never surface here.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core billing errors.
///
/// Any `Err(CoreError)` returned by the calculator is the "invalid order"
/// result: no partial bill exists alongside it.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The cart value is not a list at all.
    ///
    /// ## When This Occurs
    /// Only reachable through the JSON entry point, e.g. a caller posting
    /// `{"cart": "pizza"}` or `{"cart": null}`.
    #[error("Cart must be a list of items")]
    CartNotSequence,

    /// The cart has no items.
    #[error("Cart is empty")]
    EmptyCart,

    /// The billing policy failed validation.
    #[error("Invalid billing policy: {0}")]
    InvalidPolicy(ValidationError),
}

impl CoreError {
    /// True for the structural "invalid cart" failures.
    pub fn is_invalid_cart(&self) -> bool {
        matches!(self, CoreError::CartNotSequence | CoreError::EmptyCart)
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g. delivery tiers out of order).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
