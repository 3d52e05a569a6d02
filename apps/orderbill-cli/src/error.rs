//! # CLI Errors
//!
//! Everything that can stop the CLI before a bill is printed.
//!
//! An invalid cart is NOT one of these: it is a normal outcome
//! ([`crate::Outcome::InvalidCart`]) with its own exit status.

use orderbill_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Bad command-line arguments.
    #[error("{0}")]
    Usage(String),

    /// Reading the cart or config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cart input is not valid JSON.
    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// The config file is not valid TOML.
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// The config file was named explicitly but does not exist.
    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    /// Core failure other than an invalid cart (e.g. a bad billing policy).
    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_is_transparent() {
        let err: CliError = CoreError::EmptyCart.into();
        assert_eq!(err.to_string(), "Cart is empty");
    }

    #[test]
    fn test_json_error_message() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CliError = parse.into();
        assert!(err.to_string().starts_with("Invalid JSON input"));
    }
}
