//! Composite score aggregator.
//!
//! Combines whatever subset of the indicator catalog is currently available
//! into a single 0-100 sentiment score. A missing indicator's nominal weight
//! is implicitly redistributed proportionally among the indicators that are
//! present, because the weighted sum is normalized by the sum of present
//! weights rather than by the catalog's fixed 1.0.

use chrono::Utc;
use market_pulse_core::{CompositeScore, IndicatorReading, PulseError, PulseResult, SentimentTier};

/// Stateless aggregator for composite sentiment scoring.
///
/// `compute_score` is a pure function of its input apart from the output
/// timestamp; it may be called from any thread without locking.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeScorer;

impl CompositeScorer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Computes the composite score over the supplied readings.
    ///
    /// Input values are assumed pre-clamped to [0, 1]; out-of-range inputs
    /// produce an out-of-range weighted sum, which is clamped only at the
    /// final integer step to guard floating-point overshoot.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` when `readings` is empty or the total
    /// weight is zero. Callers must surface "score unavailable" in that
    /// case, never a fabricated score.
    pub fn compute_score(&self, readings: &[IndicatorReading]) -> PulseResult<CompositeScore> {
        let total_weight: f64 = readings.iter().map(|r| r.weight).sum();

        if readings.is_empty() || total_weight <= f64::EPSILON {
            return Err(PulseError::InsufficientData {
                supplied: readings.len(),
                total_weight,
            });
        }

        let weighted_sum: f64 = readings.iter().map(|r| r.value * r.weight).sum();
        let normalized = weighted_sum / total_weight;

        // Round, then clamp: rounding alone can land on 101 for inputs that
        // overshoot 1.0 by a ulp.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let score = (normalized * 100.0).round().clamp(0.0, 100.0) as u8;

        let tier = SentimentTier::from_score(score);

        tracing::debug!(
            score,
            ?tier,
            components = readings.len(),
            total_weight,
            "composite scoring pass"
        );

        Ok(CompositeScore {
            score,
            tier,
            components: readings.to_vec(),
            recommendation: tier.recommendation().to_string(),
            timestamp: Utc::now(),
        })
    }
}
