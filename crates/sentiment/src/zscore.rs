//! Time-series z-score anomaly detection.
//!
//! Computes a standardized deviation of a current observation against a
//! caller-supplied historical window and flags statistical extremes. The
//! detector is stateless: it keeps no memory of past calls.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use market_pulse_core::{PulseError, PulseResult};

/// |z| at or above this is flagged extreme; roughly the 97.5th percentile
/// under a normality assumption.
pub const DEFAULT_EXTREME_THRESHOLD: f64 = 2.0;

/// Macro indicator identifiers evaluated by [`MacroAnomalyDetector`].
pub const MACRO_INDICATORS: [&str; 3] = ["vix", "dxy", "m2"];

/// Anomaly-detection output for one indicator series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZScoreRecord {
    pub indicator_id: String,
    pub current_value: f64,
    /// Mean of the historical window
    pub mean: f64,
    /// Population standard deviation of the historical window
    pub std_dev: f64,
    /// `(current_value - mean) / std_dev`; infinite when a non-constant
    /// observation deviates from a zero-variance history
    pub z_score: f64,
    /// True when `|z_score|` is at or above the extreme threshold
    pub is_extreme: bool,
}

/// Stateless z-score detector with a configurable extreme threshold.
#[derive(Debug, Clone, Copy)]
pub struct ZScoreDetector {
    extreme_threshold: f64,
}

impl Default for ZScoreDetector {
    fn default() -> Self {
        Self::new(DEFAULT_EXTREME_THRESHOLD)
    }
}

impl ZScoreDetector {
    #[must_use]
    pub fn new(extreme_threshold: f64) -> Self {
        Self {
            extreme_threshold: extreme_threshold.abs(),
        }
    }

    /// Computes the z-score of `current` against `history`.
    ///
    /// `history` is the baseline and must not include `current`: including
    /// the observation in its own baseline leaks it into the mean and
    /// dampens detection.
    ///
    /// Zero-variance edge case: a constant history defines `z = 0` when
    /// `current` equals the mean, and treats any deviation as maximally
    /// extreme, since any move off a constant series is anomalous by
    /// construction.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientHistory` when `history` is empty; the caller
    /// must treat the indicator as unknown, not as non-extreme.
    pub fn compute(
        &self,
        indicator_id: &str,
        history: &[f64],
        current: f64,
    ) -> PulseResult<ZScoreRecord> {
        if history.is_empty() {
            return Err(PulseError::InsufficientHistory {
                indicator_id: indicator_id.to_string(),
            });
        }

        #[allow(clippy::cast_precision_loss)]
        let n = history.len() as f64;
        let mean = history.iter().sum::<f64>() / n;
        let variance = history.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();

        let (z_score, is_extreme) = if std_dev < f64::EPSILON {
            let deviation = current - mean;
            if deviation.abs() < f64::EPSILON {
                (0.0, false)
            } else {
                (deviation.signum() * f64::INFINITY, true)
            }
        } else {
            let z = (current - mean) / std_dev;
            (z, z.abs() >= self.extreme_threshold)
        };

        tracing::debug!(indicator_id, z_score, is_extreme, "z-score computed");

        Ok(ZScoreRecord {
            indicator_id: indicator_id.to_string(),
            current_value: current,
            mean,
            std_dev,
            z_score,
            is_extreme,
        })
    }
}

/// One macro indicator series plus its current observation.
#[derive(Debug, Clone)]
pub struct MacroSeries {
    pub indicator_id: String,
    pub history: Vec<f64>,
    pub current: f64,
}

/// Result of a macro anomaly pass.
///
/// Indicators whose computation failed are absent from `records`; a partial
/// report is still usable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroAnomalyReport {
    pub records: HashMap<String, ZScoreRecord>,
    pub has_extreme_move: bool,
}

/// Fan-out evaluator running the z-score detector over a catalog of macro
/// indicator series. Each z-score is independent; there is no
/// cross-indicator coupling.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacroAnomalyDetector {
    detector: ZScoreDetector,
}

impl MacroAnomalyDetector {
    #[must_use]
    pub fn new(detector: ZScoreDetector) -> Self {
        Self { detector }
    }

    /// Evaluates every supplied series, skipping those without a usable
    /// baseline rather than aborting the pass.
    #[must_use]
    pub fn evaluate(&self, series: &[MacroSeries]) -> MacroAnomalyReport {
        let mut records = HashMap::with_capacity(series.len());

        for s in series {
            match self
                .detector
                .compute(&s.indicator_id, &s.history, s.current)
            {
                Ok(record) => {
                    records.insert(s.indicator_id.clone(), record);
                }
                Err(e) => {
                    tracing::warn!(indicator_id = %s.indicator_id, "skipping indicator: {e}");
                }
            }
        }

        let has_extreme_move = records.values().any(|r| r.is_extreme);

        MacroAnomalyReport {
            records,
            has_extreme_move,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zscore_against_known_window() {
        // Mean 50, population std dev sqrt(50) ~= 7.07
        let history = [40.0, 50.0, 60.0, 45.0, 55.0];
        let record = ZScoreDetector::default()
            .compute("fear_greed", &history, 50.0)
            .unwrap();

        assert!((record.mean - 50.0).abs() < 1e-9);
        assert!((record.std_dev - 50.0f64.sqrt()).abs() < 1e-9);
        assert!(record.z_score.abs() < 1e-9);
        assert!(!record.is_extreme);
    }

    #[test]
    fn deviation_from_constant_history_is_extreme() {
        let history = [50.0; 5];
        let record = ZScoreDetector::default()
            .compute("fear_greed", &history, 55.0)
            .unwrap();

        assert!(record.is_extreme);
        assert!(record.z_score.is_infinite());
        assert!(record.z_score > 0.0);
    }

    #[test]
    fn constant_history_at_mean_is_not_extreme() {
        let history = [50.0; 5];
        let record = ZScoreDetector::default()
            .compute("fear_greed", &history, 50.0)
            .unwrap();

        assert!(record.z_score.abs() < f64::EPSILON);
        assert!(!record.is_extreme);
    }

    #[test]
    fn two_sigma_move_is_flagged() {
        let history = [40.0, 50.0, 60.0, 45.0, 55.0];
        let two_sigma = 50.0 + 2.0 * 50.0f64.sqrt();
        let record = ZScoreDetector::default()
            .compute("vix", &history, two_sigma)
            .unwrap();

        assert!(record.is_extreme);
        assert!((record.z_score - 2.0).abs() < 1e-9);
    }

    #[test]
    fn negative_deviation_counts_too() {
        let history = [40.0, 50.0, 60.0, 45.0, 55.0];
        let record = ZScoreDetector::default()
            .compute("dxy", &history, 50.0 - 3.0 * 50.0f64.sqrt())
            .unwrap();

        assert!(record.is_extreme);
        assert!(record.z_score < 0.0);
    }

    #[test]
    fn empty_history_is_insufficient() {
        let result = ZScoreDetector::default().compute("m2", &[], 10.0);
        assert!(matches!(
            result,
            Err(PulseError::InsufficientHistory { .. })
        ));
    }

    #[test]
    fn threshold_is_configurable() {
        let history = [40.0, 50.0, 60.0, 45.0, 55.0];
        let current = 50.0 + 1.5 * 50.0f64.sqrt();

        let strict = ZScoreDetector::new(1.0)
            .compute("vix", &history, current)
            .unwrap();
        assert!(strict.is_extreme);

        let lenient = ZScoreDetector::default()
            .compute("vix", &history, current)
            .unwrap();
        assert!(!lenient.is_extreme);
    }

    fn series(id: &str, history: Vec<f64>, current: f64) -> MacroSeries {
        MacroSeries {
            indicator_id: id.to_string(),
            history,
            current,
        }
    }

    #[test]
    fn macro_pass_flags_any_extreme() {
        let detector = MacroAnomalyDetector::default();
        let report = detector.evaluate(&[
            series("vix", vec![18.0, 20.0, 22.0, 19.0, 21.0], 20.0),
            series("dxy", vec![100.0; 5], 104.0),
            series("m2", vec![20.8, 20.9, 21.0, 20.9, 21.1], 21.0),
        ]);

        assert_eq!(report.records.len(), 3);
        assert!(report.has_extreme_move);
        assert!(report.records["dxy"].is_extreme);
        assert!(!report.records["vix"].is_extreme);
    }

    #[test]
    fn macro_pass_skips_failed_indicator() {
        let detector = MacroAnomalyDetector::default();
        let report = detector.evaluate(&[
            series("vix", vec![18.0, 20.0, 22.0, 19.0, 21.0], 20.0),
            series("dxy", vec![], 104.0),
        ]);

        assert_eq!(report.records.len(), 1);
        assert!(!report.records.contains_key("dxy"));
        assert!(!report.has_extreme_move);
    }

    #[test]
    fn record_serializes_with_finite_values() {
        let history = [40.0, 50.0, 60.0, 45.0, 55.0];
        let record = ZScoreDetector::default()
            .compute("vix", &history, 62.0)
            .unwrap();

        let json = serde_json::to_string(&record).unwrap();
        let back: ZScoreRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.indicator_id, "vix");
        assert!((back.z_score - record.z_score).abs() < 1e-12);
    }

    #[test]
    fn all_quiet_reports_no_extreme_move() {
        let detector = MacroAnomalyDetector::default();
        let report = detector.evaluate(&[series(
            "vix",
            vec![18.0, 20.0, 22.0, 19.0, 21.0],
            20.5,
        )]);

        assert!(!report.has_extreme_move);
    }
}
