pub mod catalog;
pub mod composite;
pub mod zscore;

pub use composite::CompositeScorer;
pub use zscore::{
    MacroAnomalyDetector, MacroAnomalyReport, MacroSeries, ZScoreDetector, ZScoreRecord,
    DEFAULT_EXTREME_THRESHOLD, MACRO_INDICATORS,
};
