//! The indicator catalog with nominal weights.
//!
//! Nominal weights across the full catalog sum to 1.0. A scoring pass may
//! receive any subset; missing weight is redistributed by the aggregator's
//! normalize-by-present-weight step, never re-assigned here.

use market_pulse_core::{IndicatorReading, SignalTag};

pub const FEAR_GREED: &str = "fear_greed";
pub const APP_STORE: &str = "app_store";
pub const FUNDING: &str = "funding";
pub const ETF_FLOWS: &str = "etf";
pub const GOOGLE_TRENDS: &str = "trends";
pub const LIQUIDATION: &str = "liquidation";
pub const BTC_DOMINANCE: &str = "dominance";

/// Full catalog with nominal weights (sum 1.0).
pub const CATALOG: [(&str, f64); 7] = [
    (FEAR_GREED, 0.20),
    (APP_STORE, 0.15),
    (FUNDING, 0.15),
    (ETF_FLOWS, 0.15),
    (GOOGLE_TRENDS, 0.15),
    (LIQUIDATION, 0.10),
    (BTC_DOMINANCE, 0.10),
];

/// Nominal catalog weight for an indicator, if it is part of the catalog.
#[must_use]
pub fn nominal_weight(name: &str) -> Option<f64> {
    CATALOG
        .iter()
        .find(|(id, _)| *id == name)
        .map(|(_, weight)| *weight)
}

/// Display classification for a normalized [0, 1] value.
///
/// Values at or above 0.6 read bullish, at or below 0.4 bearish. The tag is
/// informational only; the composite score uses the numeric value.
#[must_use]
pub fn classify(value: f64) -> SignalTag {
    if value >= 0.6 {
        SignalTag::Bullish
    } else if value <= 0.4 {
        SignalTag::Bearish
    } else {
        SignalTag::Neutral
    }
}

/// Builds a catalog reading from a raw provider value, clamping into [0, 1].
///
/// Returns `None` for names outside the catalog; callers assembling ad-hoc
/// readings construct [`IndicatorReading`] directly.
#[must_use]
pub fn reading(name: &str, value: f64) -> Option<IndicatorReading> {
    let weight = nominal_weight(name)?;
    let clamped = value.clamp(0.0, 1.0);
    Some(IndicatorReading::new(name, clamped, weight, classify(clamped)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_weights_sum_to_one() {
        let total: f64 = CATALOG.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9, "total was {total}");
    }

    #[test]
    fn classify_thresholds() {
        assert_eq!(classify(0.6), SignalTag::Bullish);
        assert_eq!(classify(0.4), SignalTag::Bearish);
        assert_eq!(classify(0.5), SignalTag::Neutral);
    }

    #[test]
    fn reading_clamps_out_of_range_values() {
        let r = reading(FEAR_GREED, 1.7).unwrap();
        assert!((r.value - 1.0).abs() < f64::EPSILON);

        let r = reading(FEAR_GREED, -0.3).unwrap();
        assert!(r.value.abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_indicator_has_no_reading() {
        assert!(reading("moon_phase", 0.5).is_none());
    }
}
