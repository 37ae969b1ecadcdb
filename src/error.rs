//! Error Types
//!
//! Typed errors for the two places callers must branch explicitly:
//! credential resolution at startup and tool-schema validation at
//! registration. Everything else flows through `anyhow`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TroveError {
    #[error("API credential missing: set TROVE_API_KEY (or a .env file) or add apiKey to trove.json")]
    MissingCredential,

    #[error("config error: {0}")]
    Config(String),
}

/// Rejection reasons for a tool registration. The declared parameter schema
/// is checked when the tool is added, not when it is invoked.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolError {
    #[error("tool '{name}' declares an invalid parameter schema: {reason}")]
    InvalidSchema { name: String, reason: String },
}
