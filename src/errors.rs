//! Mulescan error types.

use thiserror::Error;

/// Errors raised inside the entitlement and coverage pipelines.
///
/// None of these cross the public entry points: the verifier turns them
/// into a disabled result and the coverage sensor logs them and skips.
#[derive(Debug, Error)]
pub enum MulescanError {
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A host or proxy URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP transport error talking to the billing endpoint.
    #[error("Billing transport error: {0}")]
    Transport(String),

    /// Billing response body could not be decoded.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Coverage report could not be read.
    #[error("Coverage report I/O error: {0}")]
    ReportIO(String),

    /// Coverage report is malformed or missing an expected key.
    #[error("Coverage report format error: {0}")]
    ReportFormat(String),

    /// Logging subsystem could not be configured.
    #[error("Logging error: {0}")]
    Logging(String),
}
