//! Error types for EdgeForge

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum EdgeError {
    /// The supplied parameters cannot produce a meaningful estimate.
    ///
    /// Covers degenerate wager totals, non-positive trial counts and
    /// out-of-domain probabilities. Never retried by the balancer.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type alias
pub type EdgeResult<T> = Result<T, EdgeError>;
