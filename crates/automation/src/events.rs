use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Events emitted by the trigger engine for downstream notification layers.
///
/// Delivery is broadcast and lossy: a slow subscriber may miss events, and
/// the engine's own state transitions never depend on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AutomationEvent {
    /// A reminder's condition fired this evaluation pass
    ReminderTriggered {
        reminder_id: String,
        symbol: String,
        risk_level: f64,
        timestamp: DateTime<Utc>,
    },

    /// An invest action completed and produced an investment record
    InvestmentRecorded {
        reminder_id: String,
        investment_id: String,
        amount: Decimal,
        quantity: Decimal,
        timestamp: DateTime<Utc>,
    },

    /// A triggered reminder was re-armed without investing
    ReminderReset {
        reminder_id: String,
        timestamp: DateTime<Utc>,
    },

    /// A risk-level fetch failed; affected reminders were skipped this pass
    ProviderError {
        symbol: String,
        message: String,
        timestamp: DateTime<Utc>,
    },
}
