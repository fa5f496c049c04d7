//! Game parameter configuration

use serde::{Deserialize, Serialize};

use crate::error::{EdgeError, EdgeResult};

/// Sane domain for the base payout multiplier.
///
/// The balancer clamps adjusted values into this range; a multiplier
/// below 1.0 would pay wins smaller than the stake.
pub const PAYOUT_MULTIPLIER_DOMAIN: (f64, f64) = (1.0, 50.0);

/// Sane domain for the base win probability.
pub const WIN_PROBABILITY_DOMAIN: (f64, f64) = (0.01, 0.95);

/// Tunable inputs to one simulation run.
///
/// Immutable once constructed: every balancing attempt derives a new
/// instance rather than mutating a shared one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameParameters {
    /// Stake per trial (currency units)
    pub bet: f64,

    /// Probability that a trial pays the base win
    pub win_probability: f64,

    /// Base win payout (bet multiplier)
    pub payout_multiplier: f64,

    /// Probability that a trial pays the bonus tier instead
    pub bonus_probability: f64,

    /// Bonus tier payout (bet multiplier)
    pub bonus_multiplier: f64,

    /// Number of independent trials per run
    pub trial_count: u64,
}

impl GameParameters {
    /// Standard profile — expected edge 5%, mid of the standard band
    pub fn standard() -> Self {
        Self {
            bet: 1.0,
            win_probability: 0.30,
            payout_multiplier: 3.0,  // 0.30 × 3.0 = 0.90 base return
            bonus_probability: 0.01, // 1 in 100
            bonus_multiplier: 5.0,   // +0.05 bonus return
            trial_count: 100_000,
        }
    }

    /// Loose profile — expected edge 2%, pays below the standard band
    pub fn loose() -> Self {
        Self {
            bet: 1.0,
            win_probability: 0.30,
            payout_multiplier: 3.2,
            bonus_probability: 0.01,
            bonus_multiplier: 2.0,
            trial_count: 100_000,
        }
    }

    /// Tight profile — expected edge 20%, far above the standard band
    pub fn tight() -> Self {
        Self {
            bet: 1.0,
            win_probability: 0.25,
            payout_multiplier: 3.0,
            bonus_probability: 0.01,
            bonus_multiplier: 5.0,
            trial_count: 100_000,
        }
    }

    /// Expected per-unit return paid back to the player
    pub fn expected_return(&self) -> f64 {
        self.win_probability * self.payout_multiplier
            + self.bonus_probability * self.bonus_multiplier
    }

    /// Expected house edge under the tiered payout model
    pub fn expected_edge(&self) -> f64 {
        1.0 - self.expected_return()
    }

    /// Derive a copy with a different trial count
    pub fn with_trial_count(mut self, trial_count: u64) -> Self {
        self.trial_count = trial_count;
        self
    }

    /// Domain-safety check performed by the engine before a run.
    ///
    /// Range validation proper is the configuration loader's job; this
    /// only rejects inputs that would make the estimate meaningless.
    pub fn validate(&self) -> EdgeResult<()> {
        if self.trial_count == 0 {
            return Err(EdgeError::InvalidConfiguration(
                "trial_count must be at least 1".into(),
            ));
        }
        if !self.bet.is_finite() || self.bet <= 0.0 {
            return Err(EdgeError::InvalidConfiguration(format!(
                "bet must be positive and finite, got {}",
                self.bet
            )));
        }
        for (name, p) in [
            ("win_probability", self.win_probability),
            ("bonus_probability", self.bonus_probability),
        ] {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(EdgeError::InvalidConfiguration(format!(
                    "{} must be within [0, 1], got {}",
                    name, p
                )));
            }
        }
        if self.win_probability + self.bonus_probability > 1.0 {
            return Err(EdgeError::InvalidConfiguration(format!(
                "win_probability + bonus_probability must not exceed 1, got {}",
                self.win_probability + self.bonus_probability
            )));
        }
        for (name, m) in [
            ("payout_multiplier", self.payout_multiplier),
            ("bonus_multiplier", self.bonus_multiplier),
        ] {
            if !m.is_finite() || m < 0.0 {
                return Err(EdgeError::InvalidConfiguration(format!(
                    "{} must be non-negative and finite, got {}",
                    name, m
                )));
            }
        }
        Ok(())
    }
}

impl Default for GameParameters {
    fn default() -> Self {
        Self::standard()
    }
}
