//! Indicator readings and composite sentiment score types.
//!
//! An [`IndicatorReading`] is one independently-sourced market signal
//! normalized to [0, 1] (0 = maximally bearish/fearful, 1 = maximally
//! bullish/greedy). A scoring pass combines the readings that are actually
//! present into a single [`CompositeScore`] on a 0-100 scale with a
//! five-bucket [`SentimentTier`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification tag for a single indicator, independent of its numeric value.
///
/// Used for display and per-indicator breakdowns only; the composite score is
/// computed from the numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalTag {
    /// Indicator leans bullish/greedy
    Bullish,
    /// Indicator leans bearish/fearful
    Bearish,
    /// No directional lean
    Neutral,
}

/// One normalized market signal contributing to the composite score.
///
/// Readings are constructed fresh for every scoring pass and never mutated.
/// `value` is expected to be pre-clamped to [0, 1] by the caller; the
/// aggregator does not reject out-of-range values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReading {
    /// Identifier, unique within a scoring pass (e.g. "fear_greed")
    pub name: String,
    /// Normalized value in [0, 1]
    pub value: f64,
    /// Nominal share of total influence; non-negative
    pub weight: f64,
    /// Display classification
    pub signal: SignalTag,
}

impl IndicatorReading {
    /// Creates a new reading.
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64, weight: f64, signal: SignalTag) -> Self {
        Self {
            name: name.into(),
            value,
            weight,
            signal,
        }
    }
}

/// Five discrete sentiment buckets derived from a 0-100 composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentTier {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
}

impl SentimentTier {
    /// Maps a composite score to its tier using fixed inclusive bands:
    /// [0, 20] `ExtremeFear`, [21, 40] `Fear`, [41, 60] `Neutral`,
    /// [61, 80] `Greed`, [81, 100] `ExtremeGreed`.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=20 => Self::ExtremeFear,
            21..=40 => Self::Fear,
            41..=60 => Self::Neutral,
            61..=80 => Self::Greed,
            _ => Self::ExtremeGreed,
        }
    }

    /// Fixed recommendation text for this tier.
    #[must_use]
    pub fn recommendation(self) -> &'static str {
        match self {
            Self::ExtremeFear => {
                "Extreme fear in the market. Historically a zone for staged accumulation; \
                 keep position sizes small and spread entries over time."
            }
            Self::Fear => {
                "Fear dominates. Favor defensive allocations and gradual dollar-cost \
                 averaging over lump-sum entries."
            }
            Self::Neutral => {
                "Sentiment is balanced. Maintain existing allocations and wait for a \
                 clearer signal before adjusting exposure."
            }
            Self::Greed => {
                "Greed is building. Consider taking partial profits and tightening \
                 risk limits on new positions."
            }
            Self::ExtremeGreed => {
                "Extreme greed. Crowded positioning raises correction risk; avoid \
                 chasing and review exit plans."
            }
        }
    }
}

/// Output of one composite scoring pass.
///
/// Created once per evaluation and immutable afterwards. Callers may cache
/// it; the engine itself does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeScore {
    /// Composite sentiment score in [0, 100]
    pub score: u8,
    /// Tier derived deterministically from `score`
    pub tier: SentimentTier,
    /// The readings actually used, in input order
    pub components: Vec<IndicatorReading>,
    /// Recommendation text bucketed by tier
    pub recommendation: String,
    /// Creation time of this scoring pass
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_inclusive() {
        let cases = [
            (0, SentimentTier::ExtremeFear),
            (20, SentimentTier::ExtremeFear),
            (21, SentimentTier::Fear),
            (40, SentimentTier::Fear),
            (41, SentimentTier::Neutral),
            (60, SentimentTier::Neutral),
            (61, SentimentTier::Greed),
            (80, SentimentTier::Greed),
            (81, SentimentTier::ExtremeGreed),
            (100, SentimentTier::ExtremeGreed),
        ];

        for (score, expected) in cases {
            assert_eq!(
                SentimentTier::from_score(score),
                expected,
                "score {score} mapped to wrong tier"
            );
        }
    }

    #[test]
    fn each_tier_has_distinct_recommendation() {
        let tiers = [
            SentimentTier::ExtremeFear,
            SentimentTier::Fear,
            SentimentTier::Neutral,
            SentimentTier::Greed,
            SentimentTier::ExtremeGreed,
        ];

        let texts: std::collections::HashSet<_> =
            tiers.iter().map(|t| t.recommendation()).collect();
        assert_eq!(texts.len(), tiers.len());
    }

    #[test]
    fn reading_serializes_round_trip() {
        let reading = IndicatorReading::new("fear_greed", 0.49, 0.20, SignalTag::Neutral);
        let json = serde_json::to_string(&reading).unwrap();
        let back: IndicatorReading = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reading);
    }
}
