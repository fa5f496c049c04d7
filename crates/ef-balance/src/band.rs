//! Target band for acceptable house-edge values

use serde::{Deserialize, Serialize};

use ef_sim::{EdgeError, EdgeResult};

/// Closed interval `[low, high]` of acceptable house-edge values.
///
/// Both bounds are in-band; a run landing exactly on a bound passes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetBand {
    pub low: f64,
    pub high: f64,
}

impl TargetBand {
    /// Create a band, rejecting inverted or non-finite bounds
    pub fn new(low: f64, high: f64) -> EdgeResult<Self> {
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(EdgeError::InvalidConfiguration(format!(
                "target band [{}, {}] is not a valid closed interval",
                low, high
            )));
        }
        Ok(Self { low, high })
    }

    /// Standard acceptable band: 3% to 7% edge
    pub fn standard() -> Self {
        Self {
            low: 0.03,
            high: 0.07,
        }
    }

    /// Closed-interval membership check
    pub fn contains(&self, edge: f64) -> bool {
        edge >= self.low && edge <= self.high
    }

    /// Midpoint the balancer steers toward
    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
}

impl Default for TargetBand {
    fn default() -> Self {
        Self::standard()
    }
}
