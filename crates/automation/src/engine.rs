//! Threshold trigger engine.
//!
//! Evaluates user-defined risk reminders against current per-asset risk
//! levels supplied by a [`RiskLevelProvider`]. The engine runs on a
//! caller-controlled clock (periodic poll or manual refresh); it schedules
//! nothing itself.
//!
//! Evaluation is two-phase: risk fetches for the distinct symbols fan out
//! concurrently, then all transitions are applied sequentially under a
//! single lock. Fan-in completes before any reminder is mutated, so a pass
//! never leaves a partially-updated set behind a failed fetch.

use chrono::Utc;
use market_pulse_core::{
    fan_out, PulseResult, RiskBasedReminder, RiskDcaInvestment, RiskLevel, RiskLevelProvider,
};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

use crate::actions;
use crate::events::AutomationEvent;

const DEFAULT_EVENT_BUFFER: usize = 256;

pub struct TriggerEngine<P> {
    provider: Arc<P>,
    event_tx: broadcast::Sender<AutomationEvent>,
    /// Serializes the check-then-set transition step across in-flight
    /// evaluation passes so the same reminder cannot double-trigger.
    transition_lock: Mutex<()>,
}

impl<P: RiskLevelProvider + 'static> TriggerEngine<P> {
    #[must_use]
    pub fn new(provider: Arc<P>) -> Self {
        Self::with_event_buffer(provider, DEFAULT_EVENT_BUFFER)
    }

    #[must_use]
    pub fn with_event_buffer(provider: Arc<P>, capacity: usize) -> Self {
        let (event_tx, _) = broadcast::channel(capacity.max(1));
        Self {
            provider,
            event_tx,
            transition_lock: Mutex::new(()),
        }
    }

    /// Subscribes to the automation event stream.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AutomationEvent> {
        self.event_tx.subscribe()
    }

    /// Evaluates the supplied reminders and returns the subset that newly
    /// transitioned to Triggered in this pass.
    ///
    /// Only Armed, active reminders are considered; Triggered reminders are
    /// short-circuited (hysteresis), so repeated passes are idempotent. A
    /// failed fetch for one symbol skips only that symbol's reminders and
    /// leaves their state unchanged.
    ///
    /// The engine mutates the caller's working copy in place and retains no
    /// reference to it after the call.
    pub async fn evaluate(&self, reminders: &mut [RiskBasedReminder]) -> Vec<RiskBasedReminder> {
        let symbols: Vec<String> = reminders
            .iter()
            .filter(|r| r.is_armed())
            .map(|r| r.symbol.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        if symbols.is_empty() {
            return Vec::new();
        }

        let levels = self.fetch_levels(symbols).await;

        let _guard = self.transition_lock.lock().await;
        let mut newly_triggered = Vec::new();

        for reminder in reminders.iter_mut() {
            if !reminder.is_armed() {
                continue;
            }

            let Some(Ok(level)) = levels.get(&reminder.symbol) else {
                // Fetch failed for this symbol; no state change this pass.
                continue;
            };

            if reminder.condition_met(level.score) && reminder.trigger(level.score).is_ok() {
                tracing::info!(
                    reminder_id = %reminder.id,
                    symbol = %reminder.symbol,
                    risk_level = level.score,
                    threshold = reminder.risk_threshold,
                    "reminder triggered"
                );
                let _ = self.event_tx.send(AutomationEvent::ReminderTriggered {
                    reminder_id: reminder.id.clone(),
                    symbol: reminder.symbol.clone(),
                    risk_level: level.score,
                    timestamp: Utc::now(),
                });
                newly_triggered.push(reminder.clone());
            }
        }

        newly_triggered
    }

    /// Fulfills a triggered reminder at the current market price.
    ///
    /// # Errors
    ///
    /// See [`actions::invest`]; the reminder is untouched on failure.
    pub fn invest(
        &self,
        reminder: &mut RiskBasedReminder,
        price: Decimal,
    ) -> PulseResult<RiskDcaInvestment> {
        let investment = actions::invest(reminder, price)?;
        let _ = self.event_tx.send(AutomationEvent::InvestmentRecorded {
            reminder_id: investment.reminder_id.clone(),
            investment_id: investment.id.clone(),
            amount: investment.amount,
            quantity: investment.quantity,
            timestamp: investment.purchase_date,
        });
        Ok(investment)
    }

    /// Re-arms a triggered reminder without investing.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the reminder is Triggered.
    pub fn reset(&self, reminder: &mut RiskBasedReminder) -> PulseResult<()> {
        actions::reset(reminder)?;
        let _ = self.event_tx.send(AutomationEvent::ReminderReset {
            reminder_id: reminder.id.clone(),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Concurrent fetch of risk levels for the distinct symbols, one call
    /// per symbol regardless of how many reminders share it.
    async fn fetch_levels(
        &self,
        symbols: Vec<String>,
    ) -> HashMap<String, PulseResult<RiskLevel>> {
        let provider = Arc::clone(&self.provider);
        let levels = fan_out(symbols, move |symbol: String| {
            let provider = Arc::clone(&provider);
            async move { provider.fetch_risk_level(&symbol).await }
        })
        .await;

        for (symbol, result) in &levels {
            if let Err(e) = result {
                tracing::warn!(%symbol, "risk level fetch failed: {e}");
                let _ = self.event_tx.send(AutomationEvent::ProviderError {
                    symbol: symbol.clone(),
                    message: e.to_string(),
                    timestamp: Utc::now(),
                });
            }
        }

        levels
    }
}
