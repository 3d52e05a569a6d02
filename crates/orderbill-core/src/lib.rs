//! # orderbill-core: Pure Billing Logic for Food Orders
//!
//! This crate turns a food-delivery cart into an itemized bill. It contains
//! all billing rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        OrderBill Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               orderbill-cli (or any other host)                 │   │
//! │  │        read cart JSON ──► compute ──► print bill / receipt      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ orderbill-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌────────┐ │   │
//! │  │  │   cart   │ │  money   │ │  coupon  │ │  policy  │ │ calc.  │ │   │
//! │  │  │ CartItem │ │  Money   │ │ FIRST50  │ │ delivery │ │ Bill   │ │   │
//! │  │  │  Addon   │ │ TaxRate  │ │ FLAT100  │ │   GST    │ │        │ │   │
//! │  │  └──────────┘ └──────────┘ └──────────┘ └──────────┘ └────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SHARED STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`calculator`] - `compute_order` and friends
//! - [`cart`] - Cart items and add-on parsing
//! - [`coupon`] - Coupon codes and their effects
//! - [`policy`] - Delivery tiers, GST rate, coupon terms
//! - [`types`] - Output types (Bill, LineResult) and TaxRate
//! - [`money`] - Money type with integer micro-rupee arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Policy validation helpers
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same cart and coupon, same bill
//! 2. **No I/O**: file system, network and env access are FORBIDDEN here
//! 3. **Integer Money**: amounts are micro-rupees (i64); GST and the grand
//!    total are rounded to the paisa, nothing else is
//! 4. **Lenient Items, Strict Carts**: only an empty or non-list cart fails
//!
//! ## Example Usage
//!
//! ```rust
//! use orderbill_core::{compute_order, CartItem, Money};
//!
//! let cart = vec![CartItem::new("Pizza", Money::from_rupees(500), 2)];
//! let bill = compute_order(&cart, Some("FIRST50")).unwrap();
//!
//! // 1000 + 0 delivery + 50 GST - 150 (capped) = 900
//! assert_eq!(bill.grand_total, Money::from_rupees(900));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod cart;
pub mod coupon;
pub mod error;
pub mod money;
pub mod policy;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{
    compute_order, compute_order_json, compute_order_json_with_policy, compute_order_with_policy,
};
pub use cart::CartItem;
pub use coupon::Coupon;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use policy::BillingPolicy;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// GST on food delivery, in basis points (5%).
pub const DEFAULT_GST_BPS: u32 = 500;

