//! # Command-Line Arguments
//!
//! ```text
//! Usage: orderbill [OPTIONS]
//!
//!   -f, --cart <PATH>      Cart JSON file, or "-" for stdin (default: stdin)
//!   -c, --coupon <CODE>    Coupon code (overrides one embedded in the input)
//!       --config <PATH>    TOML config file
//!   -o, --format <FORMAT>  json | text
//!   -h, --help             Show this help message
//! ```

use std::path::PathBuf;

use crate::config::OutputFormat;
use crate::error::{CliError, CliResult};

pub const USAGE: &str = "\
OrderBill - itemized bills for food orders

Usage: orderbill [OPTIONS]

Options:
  -f, --cart <PATH>      Cart JSON file, or \"-\" for stdin (default: stdin)
  -c, --coupon <CODE>    Coupon code (overrides one embedded in the input)
      --config <PATH>    TOML config file
  -o, --format <FORMAT>  Output format: json | text
  -h, --help             Show this help message

Input is either a cart array or {\"cart\": [...], \"coupon\": \"...\"}.
Exit status: 0 billed, 1 error, 2 invalid cart.";

/// Parsed command-line arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    /// `None` or `-` means stdin.
    pub cart: Option<PathBuf>,
    pub coupon: Option<String>,
    pub config: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub help: bool,
}

impl CliArgs {
    /// Parses arguments, excluding the program name.
    pub fn parse<I>(args: I) -> CliResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--cart" | "-f" => parsed.cart = Some(PathBuf::from(value_for(&arg, &mut args)?)),
                "--coupon" | "-c" => parsed.coupon = Some(value_for(&arg, &mut args)?),
                "--config" => parsed.config = Some(PathBuf::from(value_for(&arg, &mut args)?)),
                "--format" | "-o" => {
                    let raw = value_for(&arg, &mut args)?;
                    parsed.format = Some(raw.parse().map_err(CliError::Usage)?);
                }
                "--help" | "-h" => parsed.help = true,
                other => {
                    return Err(CliError::Usage(format!("Unknown argument: {}", other)));
                }
            }
        }

        Ok(parsed)
    }

    /// Whether the cart comes from stdin.
    pub fn reads_stdin(&self) -> bool {
        match &self.cart {
            None => true,
            Some(path) => path.as_os_str() == "-",
        }
    }
}

fn value_for<I>(flag: &str, args: &mut I) -> CliResult<String>
where
    I: Iterator<Item = String>,
{
    args.next()
        .ok_or_else(|| CliError::Usage(format!("{} requires a value", flag)))
}
