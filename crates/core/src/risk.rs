//! Per-asset risk readings and risk-based automation entities.
//!
//! A [`RiskLevel`] is a point-in-time reading produced by an external
//! provider and read-only to this core. A [`RiskBasedReminder`] is the only
//! entity with a true state machine: Armed -> Triggered -> (invest | reset)
//! -> Armed, with an Inactive state that excludes it from evaluation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PulseError, PulseResult};

/// Category boundaries for risk scores.
///
/// Defaults: Low < 40, Moderate 40-69, High >= 70. The boundaries were
/// chosen from observed display behavior rather than a statistical
/// rationale, so they are configurable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RiskBands {
    /// Scores at or above this are at least Moderate
    pub moderate_floor: f64,
    /// Scores at or above this are High
    pub high_floor: f64,
}

impl Default for RiskBands {
    fn default() -> Self {
        Self {
            moderate_floor: 40.0,
            high_floor: 70.0,
        }
    }
}

/// Discrete risk bucket for one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
}

impl RiskCategory {
    /// Buckets a 0-100 risk score using the default [`RiskBands`].
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        Self::from_score_with(score, RiskBands::default())
    }

    /// Buckets a 0-100 risk score using custom band boundaries.
    #[must_use]
    pub fn from_score_with(score: f64, bands: RiskBands) -> Self {
        if score >= bands.high_floor {
            Self::High
        } else if score >= bands.moderate_floor {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

/// A point-in-time risk reading for one asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskLevel {
    pub asset_id: String,
    pub symbol: String,
    /// Risk score in [0, 100]
    pub score: f64,
    pub category: RiskCategory,
    pub timestamp: DateTime<Utc>,
}

impl RiskLevel {
    /// Creates a reading with the category derived from `score` using
    /// default bands.
    #[must_use]
    pub fn from_score(asset_id: impl Into<String>, symbol: impl Into<String>, score: f64) -> Self {
        Self {
            asset_id: asset_id.into(),
            symbol: symbol.into(),
            score,
            category: RiskCategory::from_score(score),
            timestamp: Utc::now(),
        }
    }
}

/// Direction of a reminder's threshold condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCondition {
    /// Fires when current risk drops to or below the threshold
    Below,
    /// Fires when current risk rises to or above the threshold
    Above,
}

/// Derived evaluation state of a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderState {
    /// Active and eligible for evaluation
    Armed,
    /// Condition fired; waiting for the user to invest or reset
    Triggered,
    /// User-paused; excluded from evaluation regardless of trigger flag
    Inactive,
}

/// A persistent, user-owned automation rule.
///
/// Invariant: `last_triggered_risk_level` is `Some` if and only if
/// `is_triggered` is true. Only the transition methods on this type mutate
/// the trigger fields, which keeps the invariant mechanically checkable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskBasedReminder {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub name: String,
    /// Currency units to invest when the reminder fires
    pub amount: Decimal,
    /// Threshold in [0, 100]
    pub risk_threshold: f64,
    pub risk_condition: RiskCondition,
    pub is_triggered: bool,
    /// Risk score captured at the moment of triggering
    pub last_triggered_risk_level: Option<f64>,
    /// User can disable without deleting
    pub is_active: bool,
}

impl RiskBasedReminder {
    /// Creates a new reminder in the Armed state.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
        amount: Decimal,
        risk_threshold: f64,
        risk_condition: RiskCondition,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            symbol: symbol.into(),
            name: name.into(),
            amount,
            risk_threshold,
            risk_condition,
            is_triggered: false,
            last_triggered_risk_level: None,
            is_active: true,
        }
    }

    /// Derived state from the flag pair.
    #[must_use]
    pub fn state(&self) -> ReminderState {
        if !self.is_active {
            ReminderState::Inactive
        } else if self.is_triggered {
            ReminderState::Triggered
        } else {
            ReminderState::Armed
        }
    }

    /// True when active and not yet triggered.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.state() == ReminderState::Armed
    }

    /// Whether `current_score` satisfies this reminder's condition.
    ///
    /// Threshold comparisons are inclusive in both directions.
    #[must_use]
    pub fn condition_met(&self, current_score: f64) -> bool {
        match self.risk_condition {
            RiskCondition::Below => current_score <= self.risk_threshold,
            RiskCondition::Above => current_score >= self.risk_threshold,
        }
    }

    /// Armed -> Triggered, capturing the risk score at trigger time.
    ///
    /// # Errors
    /// Returns `InvalidTransition` unless the reminder is Armed. Triggered
    /// reminders are deliberately not re-armed here (hysteresis): a score
    /// oscillating around the threshold must not re-fire every pass.
    pub fn trigger(&mut self, current_score: f64) -> PulseResult<()> {
        if self.state() != ReminderState::Armed {
            return Err(PulseError::InvalidTransition(format!(
                "reminder {} cannot trigger from {:?}",
                self.id,
                self.state()
            )));
        }
        self.is_triggered = true;
        self.last_triggered_risk_level = Some(current_score);
        Ok(())
    }

    /// Triggered -> Armed, clearing the captured risk level.
    ///
    /// # Errors
    /// Returns `InvalidTransition` unless the reminder is Triggered.
    pub fn rearm(&mut self) -> PulseResult<()> {
        if self.state() != ReminderState::Triggered {
            return Err(PulseError::InvalidTransition(format!(
                "reminder {} cannot re-arm from {:?}",
                self.id,
                self.state()
            )));
        }
        self.is_triggered = false;
        self.last_triggered_risk_level = None;
        Ok(())
    }
}

/// An immutable record created exactly once per successful invest action on
/// a triggered reminder. Append-only; never mutated or recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskDcaInvestment {
    pub id: String,
    pub reminder_id: String,
    pub amount: Decimal,
    pub price_at_purchase: Decimal,
    /// `amount / price_at_purchase`
    pub quantity: Decimal,
    /// Risk score captured when the reminder triggered
    pub risk_level_at_purchase: f64,
    pub purchase_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn reminder() -> RiskBasedReminder {
        RiskBasedReminder::new(
            "r1",
            "u1",
            "BTC",
            "buy the dip",
            dec!(100),
            30.0,
            RiskCondition::Below,
        )
    }

    #[test]
    fn category_boundaries() {
        assert_eq!(RiskCategory::from_score(0.0), RiskCategory::Low);
        assert_eq!(RiskCategory::from_score(39.9), RiskCategory::Low);
        assert_eq!(RiskCategory::from_score(40.0), RiskCategory::Moderate);
        assert_eq!(RiskCategory::from_score(69.9), RiskCategory::Moderate);
        assert_eq!(RiskCategory::from_score(70.0), RiskCategory::High);
        assert_eq!(RiskCategory::from_score(100.0), RiskCategory::High);
    }

    #[test]
    fn custom_bands_shift_boundaries() {
        let bands = RiskBands {
            moderate_floor: 50.0,
            high_floor: 80.0,
        };
        assert_eq!(
            RiskCategory::from_score_with(45.0, bands),
            RiskCategory::Low
        );
        assert_eq!(
            RiskCategory::from_score_with(79.0, bands),
            RiskCategory::Moderate
        );
    }

    #[test]
    fn new_reminder_is_armed() {
        let r = reminder();
        assert_eq!(r.state(), ReminderState::Armed);
        assert!(r.is_armed());
        assert!(r.last_triggered_risk_level.is_none());
    }

    #[test]
    fn condition_is_inclusive() {
        let r = reminder();
        assert!(r.condition_met(30.0));
        assert!(r.condition_met(25.0));
        assert!(!r.condition_met(30.1));

        let mut above = reminder();
        above.risk_condition = RiskCondition::Above;
        above.risk_threshold = 70.0;
        assert!(above.condition_met(70.0));
        assert!(!above.condition_met(69.9));
    }

    #[test]
    fn trigger_captures_risk_level() {
        let mut r = reminder();
        r.trigger(25.0).unwrap();
        assert_eq!(r.state(), ReminderState::Triggered);
        assert_eq!(r.last_triggered_risk_level, Some(25.0));
    }

    #[test]
    fn trigger_twice_is_rejected() {
        let mut r = reminder();
        r.trigger(25.0).unwrap();
        assert!(matches!(
            r.trigger(20.0),
            Err(PulseError::InvalidTransition(_))
        ));
        // First capture survives
        assert_eq!(r.last_triggered_risk_level, Some(25.0));
    }

    #[test]
    fn inactive_reminder_cannot_trigger() {
        let mut r = reminder();
        r.is_active = false;
        assert_eq!(r.state(), ReminderState::Inactive);
        assert!(r.trigger(25.0).is_err());
    }

    #[test]
    fn rearm_clears_capture() {
        let mut r = reminder();
        r.trigger(25.0).unwrap();
        r.rearm().unwrap();
        assert_eq!(r.state(), ReminderState::Armed);
        assert!(r.last_triggered_risk_level.is_none());
    }

    #[test]
    fn rearm_from_armed_is_rejected() {
        let mut r = reminder();
        assert!(r.rearm().is_err());
    }
}
