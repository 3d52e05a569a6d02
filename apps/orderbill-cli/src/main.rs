//! # OrderBill CLI
//!
//! ## Usage
//! ```bash
//! # Bill a cart file with a coupon
//! orderbill --cart order.json --coupon FLAT100
//!
//! # Pipe a request in, print a receipt
//! echo '{"cart":[{"name":"Biryani","price":300,"qty":1,"addons":["Raita:30"]}]}' \
//!     | orderbill --format text
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging to stderr)
//! 2. Parse arguments
//! 3. Load configuration (file → env)
//! 4. Read the cart, compute, print

use std::io;
use std::process::ExitCode;

use orderbill_cli::args::{CliArgs, USAGE};
use orderbill_cli::config::CliConfig;
use orderbill_cli::error::{CliError, CliResult};
use orderbill_cli::{open_input, run, Outcome};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();

    match try_main() {
        Ok(Outcome::Billed) => ExitCode::SUCCESS,
        Ok(Outcome::InvalidCart) => ExitCode::from(2),
        Err(e) => {
            error!(error = %e, "orderbill failed");
            eprintln!("error: {}", e);
            if matches!(e, CliError::Usage(_)) {
                eprintln!();
                eprintln!("{}", USAGE);
            }
            ExitCode::from(1)
        }
    }
}

fn try_main() -> CliResult<Outcome> {
    let args = CliArgs::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{}", USAGE);
        return Ok(Outcome::Billed);
    }

    let config = CliConfig::load(args.config.as_deref())?;
    let input = open_input(&args)?;

    run(&args, &config, input, io::stdout().lock())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show per-bill breakdowns
/// - `RUST_LOG=orderbill=trace` - Also show skipped items and add-ons
/// - Default: WARN, with INFO for orderbill crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,orderbill=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
