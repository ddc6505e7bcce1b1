//! User actions on triggered reminders.
//!
//! Both actions complete a Triggered -> Armed cycle: `invest` records an
//! immutable [`RiskDcaInvestment`] at the current market price, `reset`
//! re-arms without a record. On any failure the reminder is left untouched.

use chrono::Utc;
use market_pulse_core::{PulseError, PulseResult, ReminderState, RiskBasedReminder, RiskDcaInvestment};
use rust_decimal::Decimal;

/// Fulfills a triggered reminder at `price`, producing exactly one
/// investment record and re-arming the reminder.
///
/// The record uses the risk level captured at trigger time, not a fresh
/// reading, with `quantity = amount / price`.
///
/// # Errors
///
/// * `PriceUnavailable` when `price` is zero or negative; the reminder
///   stays Triggered so the user can retry once a price is known.
/// * `InvalidTransition` when the reminder is not in the Triggered state.
pub fn invest(
    reminder: &mut RiskBasedReminder,
    price: Decimal,
) -> PulseResult<RiskDcaInvestment> {
    if reminder.state() != ReminderState::Triggered {
        return Err(PulseError::InvalidTransition(format!(
            "reminder {} is not triggered",
            reminder.id
        )));
    }

    if price <= Decimal::ZERO {
        return Err(PulseError::PriceUnavailable {
            symbol: reminder.symbol.clone(),
        });
    }

    let risk_level_at_purchase =
        reminder
            .last_triggered_risk_level
            .ok_or_else(|| {
                PulseError::InvalidTransition(format!(
                    "reminder {} is triggered without a captured risk level",
                    reminder.id
                ))
            })?;

    let purchase_date = Utc::now();
    let investment = RiskDcaInvestment {
        id: format!("{}:{}", reminder.id, purchase_date.timestamp_millis()),
        reminder_id: reminder.id.clone(),
        amount: reminder.amount,
        price_at_purchase: price,
        quantity: reminder.amount / price,
        risk_level_at_purchase,
        purchase_date,
    };

    reminder.rearm()?;

    tracing::info!(
        reminder_id = %reminder.id,
        symbol = %reminder.symbol,
        %price,
        quantity = %investment.quantity,
        "investment recorded, reminder re-armed"
    );

    Ok(investment)
}

/// Re-arms a triggered reminder without investing.
///
/// # Errors
///
/// Returns `InvalidTransition` unless the reminder is Triggered.
pub fn reset(reminder: &mut RiskBasedReminder) -> PulseResult<()> {
    reminder.rearm()?;
    tracing::info!(reminder_id = %reminder.id, "reminder reset without investment");
    Ok(())
}
