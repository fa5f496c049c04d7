//! Pluggable game model — one trial at a time

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameParameters;

/// Money flow of a single trial
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    /// Amount staked by the player
    pub wagered: f64,
    /// Amount paid back to the player
    pub returned: f64,
}

impl TrialOutcome {
    /// Operator net for this trial (positive = house profit)
    pub fn net(&self) -> f64 {
        self.wagered - self.returned
    }

    /// Did the player get anything back?
    pub fn is_win(&self) -> bool {
        self.returned > 0.0
    }
}

/// Outcome generation capability.
///
/// The exact payout rules of the simulated game live behind this trait
/// so concrete rules can be swapped without touching the engine or the
/// balancing loop.
pub trait Game: Sync {
    /// Play one independent trial
    fn play(&self, params: &GameParameters, rng: &mut impl Rng) -> TrialOutcome;
}

/// Default two-tier payout game.
///
/// A trial pays the bonus tier with `bonus_probability`, the base win
/// with `win_probability`, and nothing otherwise. All knobs come from
/// [`GameParameters`]; the struct itself carries no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct TieredPayoutGame;

impl Game for TieredPayoutGame {
    fn play(&self, params: &GameParameters, rng: &mut impl Rng) -> TrialOutcome {
        let roll: f64 = rng.random();
        let returned = if roll < params.bonus_probability {
            params.bet * params.bonus_multiplier
        } else if roll < params.bonus_probability + params.win_probability {
            params.bet * params.payout_multiplier
        } else {
            0.0
        };
        TrialOutcome {
            wagered: params.bet,
            returned,
        }
    }
}
