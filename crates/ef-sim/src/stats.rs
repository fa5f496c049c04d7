//! Aggregate trial statistics

use serde::{Deserialize, Serialize};

use crate::error::{EdgeError, EdgeResult};
use crate::game::TrialOutcome;

/// Running accumulator over a partition of trials.
///
/// Partitions are merged in partition order, so a parallel run reduces
/// to the same totals as a sequential one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationStats {
    pub trials: u64,
    pub wins: u64,
    pub total_wagered: f64,
    pub total_returned: f64,
    /// Sum of squared per-trial operator net (for variance)
    pub total_net_sq: f64,
}

impl SimulationStats {
    /// Fold one trial into the accumulator
    pub fn record(&mut self, outcome: TrialOutcome) {
        let net = outcome.net();
        self.trials += 1;
        self.total_wagered += outcome.wagered;
        self.total_returned += outcome.returned;
        self.total_net_sq += net * net;
        if outcome.is_win() {
            self.wins += 1;
        }
    }

    /// Merge another partition's totals into this one
    pub fn merge(&mut self, other: &SimulationStats) {
        self.trials += other.trials;
        self.wins += other.wins;
        self.total_wagered += other.total_wagered;
        self.total_returned += other.total_returned;
        self.total_net_sq += other.total_net_sq;
    }

    /// Mean per-trial operator net
    fn mean_net(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            (self.total_wagered - self.total_returned) / self.trials as f64
        }
    }

    /// Variance of per-trial operator net
    pub fn net_variance(&self) -> f64 {
        if self.trials <= 1 {
            return 0.0;
        }
        let mean = self.mean_net();
        let var = (self.total_net_sq / self.trials as f64) - mean * mean;
        var.max(0.0)
    }

    /// Finalize the run into a result.
    ///
    /// A zero wager total cannot yield an edge ratio; that is reported
    /// as a configuration fault, not a division by zero.
    pub fn finish(&self) -> EdgeResult<SimulationResult> {
        if self.trials == 0 || self.total_wagered <= 0.0 {
            return Err(EdgeError::InvalidConfiguration(format!(
                "degenerate run: {} trials, {} total wagered",
                self.trials, self.total_wagered
            )));
        }
        let variance = self.net_variance();
        Ok(SimulationResult {
            house_edge: (self.total_wagered - self.total_returned) / self.total_wagered,
            trials: self.trials,
            total_wagered: self.total_wagered,
            total_returned: self.total_returned,
            hit_rate: self.wins as f64 / self.trials as f64,
            net_variance: variance,
            std_error: (variance / self.trials as f64).sqrt(),
        })
    }
}

/// Output of one engine run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Operator profit per unit wagered. Dimensionless; the band
    /// check, not this type, enforces any acceptable range.
    pub house_edge: f64,
    pub trials: u64,
    pub total_wagered: f64,
    pub total_returned: f64,
    /// Fraction of trials that paid anything back
    pub hit_rate: f64,
    /// Variance of per-trial operator net
    pub net_variance: f64,
    /// Standard error of the mean per-trial net
    pub std_error: f64,
}

impl SimulationResult {
    /// Return-to-player ratio (1 − house edge)
    pub fn rtp(&self) -> f64 {
        1.0 - self.house_edge
    }
}
