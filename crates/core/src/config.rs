use serde::{Deserialize, Serialize};

use crate::risk::RiskBands;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub scoring: ScoringConfig,
    pub risk: RiskBands,
    pub automation: AutomationConfig,
}

/// Tunables for the z-score anomaly detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// |z| at or above this is flagged extreme (~97.5th percentile at 2.0
    /// under a normality assumption)
    pub extreme_zscore_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationConfig {
    /// Capacity of the automation event broadcast channel
    pub event_buffer: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig {
                extreme_zscore_threshold: 2.0,
            },
            risk: RiskBands::default(),
            automation: AutomationConfig { event_buffer: 256 },
        }
    }
}
