//! Adjustment policy — how parameters are nudged per attempt

use ef_sim::{GameParameters, PAYOUT_MULTIPLIER_DOMAIN, WIN_PROBABILITY_DOMAIN};

use crate::band::TargetBand;

/// Proportional approach: x' = clamp(x + k * (target - x)).
#[inline]
fn approach(x: f64, target: f64, k: f64, lo: f64, hi: f64) -> f64 {
    (x + k * (target - x)).clamp(lo, hi)
}

/// Parameter adjustment step.
///
/// Separated from the balancing loop so the step function can be
/// tested in isolation from simulation noise.
pub trait AdjustPolicy {
    /// Derive the next parameter set from the current one and the
    /// observed (out-of-band) edge.
    fn adjust(&self, params: &GameParameters, edge: f64, band: &TargetBand) -> GameParameters;
}

/// Proportional control toward the band midpoint.
///
/// The expected player return of the tiered game is
/// `r = p·m + q·B`, so shifting the edge by `Δ = edge − midpoint`
/// means shifting the return by `Δ`, i.e. moving the payout
/// multiplier toward `m + Δ/p`. The step is scaled by `gain` and
/// clamped to the multiplier's sane domain; a clamped value is still
/// worth simulating, so clamping never aborts an attempt. When the
/// multiplier is pinned at a domain boundary (or the win probability
/// is too small to carry the correction), the same approach is
/// applied to the win probability instead, whose slope is `m`.
#[derive(Debug, Clone, Copy)]
pub struct ProportionalAdjust {
    /// Step gain in (0, 1]; 1.0 jumps straight at the midpoint target
    pub gain: f64,
}

impl ProportionalAdjust {
    pub fn new(gain: f64) -> Self {
        Self {
            gain: gain.clamp(f64::EPSILON, 1.0),
        }
    }
}

impl Default for ProportionalAdjust {
    fn default() -> Self {
        Self { gain: 0.7 }
    }
}

impl AdjustPolicy for ProportionalAdjust {
    fn adjust(&self, params: &GameParameters, edge: f64, band: &TargetBand) -> GameParameters {
        let violation = edge - band.midpoint();
        let (m_lo, m_hi) = PAYOUT_MULTIPLIER_DOMAIN;
        let (p_lo, p_hi) = WIN_PROBABILITY_DOMAIN;

        let mut next = params.clone();

        // Primary knob: payout multiplier, slope dr/dm = p
        if params.win_probability > f64::EPSILON {
            let target = params.payout_multiplier + violation / params.win_probability;
            next.payout_multiplier =
                approach(params.payout_multiplier, target, self.gain, m_lo, m_hi);
            if (next.payout_multiplier - params.payout_multiplier).abs() > 1e-12 {
                return next;
            }
        }

        // Multiplier pinned: move the win probability, slope dr/dp = m.
        // The bonus tier keeps its probability mass; when it owns
        // nearly all of it the knob has no room and the step degrades
        // to a no-op, which is still worth simulating.
        let p_hi = p_hi.min(1.0 - params.bonus_probability);
        if p_hi >= p_lo {
            let m = params.payout_multiplier.max(m_lo);
            let target = params.win_probability + violation / m;
            next.win_probability = approach(params.win_probability, target, self.gain, p_lo, p_hi);
        }
        next
    }
}
