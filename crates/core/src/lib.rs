pub mod config;
pub mod config_loader;
pub mod error;
pub mod fanout;
pub mod indicator;
pub mod risk;
pub mod traits;

pub use config::{AppConfig, AutomationConfig, ScoringConfig};
pub use config_loader::ConfigLoader;
pub use error::{PulseError, PulseResult};
pub use fanout::fan_out;
pub use indicator::{CompositeScore, IndicatorReading, SentimentTier, SignalTag};
pub use risk::{
    ReminderState, RiskBands, RiskBasedReminder, RiskCategory, RiskCondition, RiskDcaInvestment,
    RiskLevel,
};
pub use traits::{ReminderStore, RiskLevelProvider};
