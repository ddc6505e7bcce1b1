use crate::error::PulseResult;
use crate::risk::{RiskBasedReminder, RiskDcaInvestment, RiskLevel};
use async_trait::async_trait;

/// External collaborator supplying current per-asset risk readings.
///
/// Implementations must fail explicitly when a reading is unavailable,
/// never silently return a default. Throttling is a provider concern; the
/// engine issues several calls per evaluation pass.
#[async_trait]
pub trait RiskLevelProvider: Send + Sync {
    async fn fetch_risk_level(&self, symbol: &str) -> PulseResult<RiskLevel>;
}

/// Persistence seam for reminders and their investment history.
///
/// The engine assumes load-all/save-changed semantics and never retains
/// references across calls. Deleting a reminder cascades to its investments.
#[async_trait]
pub trait ReminderStore: Send + Sync {
    async fn load_reminders(&self, user_id: &str) -> PulseResult<Vec<RiskBasedReminder>>;
    async fn save_reminder(&self, reminder: &RiskBasedReminder) -> PulseResult<()>;
    async fn record_investment(&self, investment: &RiskDcaInvestment) -> PulseResult<()>;
    async fn delete_reminder(&self, reminder_id: &str) -> PulseResult<()>;
}
