//! # OrderBill CLI Library
//!
//! Everything the `orderbill` binary does, minus process setup, so it can be
//! driven from tests with in-memory input and output.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  read input ──► split {cart, coupon} ──► --coupon override              │
//! │                                               │                         │
//! │                                               ▼                         │
//! │                          orderbill_core::compute_order_json_with_policy │
//! │                                               │                         │
//! │                     ┌─────────────────────────┴──────────┐              │
//! │                     ▼                                    ▼              │
//! │               Ok(bill) ──► json / text          invalid cart ──► null   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod args;
pub mod config;
pub mod error;
pub mod receipt;

use std::io::{Read, Write};

use orderbill_core::compute_order_json_with_policy;
use serde_json::Value;
use tracing::{info, warn};

use crate::args::CliArgs;
use crate::config::{CliConfig, OutputFormat};
use crate::error::{CliError, CliResult};

/// How a run ended, when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A bill was printed.
    Billed,
    /// The cart was empty or not a list; the invalid marker was printed.
    InvalidCart,
}

/// Splits the input document into cart and embedded coupon.
///
/// `{"cart": ..., "coupon": ...}` is unwrapped; anything else is the cart.
pub fn split_request(input: Value) -> (Value, Option<Value>) {
    match input {
        Value::Object(mut fields) if fields.contains_key("cart") => {
            let coupon = fields.remove("coupon");
            let cart = fields.remove("cart").unwrap_or(Value::Null);
            (cart, coupon)
        }
        other => (other, None),
    }
}

/// Reads the request, computes the bill and writes it to `out`.
pub fn run<R, W>(args: &CliArgs, config: &CliConfig, input: R, mut out: W) -> CliResult<Outcome>
where
    R: Read,
    W: Write,
{
    let request: Value = serde_json::from_reader(input)?;
    let (cart, embedded_coupon) = split_request(request);
    let coupon = args.coupon.clone().map(Value::String).or(embedded_coupon);

    let format = args.format.unwrap_or(config.output.format);

    match compute_order_json_with_policy(&cart, coupon.as_ref(), &config.policy) {
        Ok(bill) => {
            info!(
                lines = bill.item_count(),
                grand_total = %bill.grand_total,
                "Order billed"
            );
            match format {
                OutputFormat::Json => {
                    serde_json::to_writer_pretty(&mut out, &bill)?;
                    writeln!(out)?;
                }
                OutputFormat::Text => {
                    write!(out, "{}", receipt::render(&bill, config.policy.gst_rate))?;
                }
            }
            Ok(Outcome::Billed)
        }
        Err(e) if e.is_invalid_cart() => {
            warn!(error = %e, "Invalid order");
            match format {
                OutputFormat::Json => writeln!(out, "null")?,
                OutputFormat::Text => writeln!(out, "Invalid order: {}", e)?,
            }
            Ok(Outcome::InvalidCart)
        }
        Err(e) => Err(CliError::Core(e)),
    }
}

/// Opens the cart source named by the arguments.
pub fn open_input(args: &CliArgs) -> CliResult<Box<dyn Read>> {
    match &args.cart {
        Some(path) if !args.reads_stdin() => Ok(Box::new(std::fs::File::open(path)?)),
        _ => Ok(Box::new(std::io::stdin())),
    }
}
