//! Error taxonomy for the market pulse engine.
//!
//! All variants are local, recoverable conditions. Per-indicator and
//! per-reminder failures are reported as partial results (missing map
//! entries, skipped reminders); only total failure surfaces an error.

use thiserror::Error;

/// Core engine error.
#[derive(Debug, Error)]
pub enum PulseError {
    /// No usable indicators for a scoring pass (empty input or zero total weight).
    #[error("insufficient data: {supplied} readings supplied, total weight {total_weight}")]
    InsufficientData { supplied: usize, total_weight: f64 },

    /// No historical baseline available for a z-score computation.
    #[error("insufficient history for indicator {indicator_id}")]
    InsufficientHistory { indicator_id: String },

    /// A single risk-level fetch failed.
    #[error("risk level provider unavailable for {symbol}: {reason}")]
    ProviderUnavailable { symbol: String, reason: String },

    /// Cannot finalize an investment record at an invalid price.
    #[error("price unavailable for {symbol}")]
    PriceUnavailable { symbol: String },

    /// A reminder action was invoked in the wrong state.
    #[error("invalid reminder transition: {0}")]
    InvalidTransition(String),

    /// Configuration could not be loaded or validated.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for engine operations.
pub type PulseResult<T> = Result<T, PulseError>;

impl PulseError {
    /// Returns true if the caller can recover by retrying or degrading
    /// (cached readings, partial output, skipped reminder).
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Config(_))
    }
}
