//! Auto-balancer — bounded corrective search over game parameters

use serde::{Deserialize, Serialize};

use ef_sim::{EdgeResult, Game, GameParameters, SimulationEngine, SimulationResult};

use crate::band::TargetBand;
use crate::policy::{AdjustPolicy, ProportionalAdjust};

/// Default retry budget
pub const MAX_ATTEMPTS: u32 = 10;

/// Edge estimation capability.
///
/// The balancing loop only needs "parameters in, estimate out", so it
/// is generic over this seam; tests substitute deterministic stubs.
pub trait EdgeEstimator {
    fn estimate(&self, params: &GameParameters) -> EdgeResult<SimulationResult>;
}

impl<G: Game> EdgeEstimator for SimulationEngine<G> {
    fn estimate(&self, params: &GameParameters) -> EdgeResult<SimulationResult> {
        self.simulate(params)
    }
}

/// Terminal outcome of a balancing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BalanceOutcome {
    /// An attempt landed in the target band
    Accepted {
        result: SimulationResult,
        params: GameParameters,
        attempts: u32,
    },
    /// The retry budget ran out; the last attempt is carried for
    /// diagnostics and is explicitly not in-band
    Exhausted {
        last_result: SimulationResult,
        last_params: GameParameters,
        attempts: u32,
    },
}

impl BalanceOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, BalanceOutcome::Accepted { .. })
    }

    /// The accepted or last-attempted result
    pub fn result(&self) -> &SimulationResult {
        match self {
            BalanceOutcome::Accepted { result, .. } => result,
            BalanceOutcome::Exhausted { last_result, .. } => last_result,
        }
    }

    /// The parameters that produced [`Self::result`]
    pub fn params(&self) -> &GameParameters {
        match self {
            BalanceOutcome::Accepted { params, .. } => params,
            BalanceOutcome::Exhausted { last_params, .. } => last_params,
        }
    }

    pub fn attempts(&self) -> u32 {
        match self {
            BalanceOutcome::Accepted { attempts, .. }
            | BalanceOutcome::Exhausted { attempts, .. } => *attempts,
        }
    }
}

/// Corrective search: adjust → evaluate → check, at most
/// `max_attempts` times.
///
/// Holds no state beyond one invocation of [`Self::balance`]; every
/// attempt derives a fresh parameter snapshot.
pub struct AutoBalancer<'e, E, P = ProportionalAdjust> {
    estimator: &'e E,
    band: TargetBand,
    policy: P,
    max_attempts: u32,
}

impl<'e, E: EdgeEstimator> AutoBalancer<'e, E> {
    /// Create with the default proportional policy and retry budget
    pub fn new(estimator: &'e E, band: TargetBand) -> Self {
        Self {
            estimator,
            band,
            policy: ProportionalAdjust::default(),
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

impl<'e, E: EdgeEstimator, P: AdjustPolicy> AutoBalancer<'e, E, P> {
    /// Replace the adjustment policy
    pub fn with_policy<Q: AdjustPolicy>(self, policy: Q) -> AutoBalancer<'e, E, Q> {
        AutoBalancer {
            estimator: self.estimator,
            band: self.band,
            policy,
            max_attempts: self.max_attempts,
        }
    }

    /// Replace the retry budget
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Search from an initial parameter set whose estimate failed the
    /// band check.
    ///
    /// Each iteration derives adjusted parameters from the current
    /// baseline, re-runs the estimator, and accepts on the first
    /// in-band estimate. An `InvalidConfiguration` from the estimator
    /// propagates unchanged — a structurally broken configuration is
    /// not something adjustment can fix.
    pub fn balance(
        &self,
        params: &GameParameters,
        initial: &SimulationResult,
    ) -> EdgeResult<BalanceOutcome> {
        let mut current_params = params.clone();
        let mut last_result = initial.clone();

        for attempt in 1..=self.max_attempts {
            let next_params = self
                .policy
                .adjust(&current_params, last_result.house_edge, &self.band);
            let result = self.estimator.estimate(&next_params)?;

            log::debug!(
                "balance attempt {}/{}: edge {:.5} (band [{}, {}])",
                attempt,
                self.max_attempts,
                result.house_edge,
                self.band.low,
                self.band.high
            );

            if self.band.contains(result.house_edge) {
                return Ok(BalanceOutcome::Accepted {
                    result,
                    params: next_params,
                    attempts: attempt,
                });
            }

            current_params = next_params;
            last_result = result;
        }

        log::warn!(
            "balance exhausted after {} attempts, last edge {:.5}",
            self.max_attempts,
            last_result.house_edge
        );
        Ok(BalanceOutcome::Exhausted {
            last_result,
            last_params: current_params,
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ef_sim::{EdgeError, TieredPayoutGame};
    use std::cell::Cell;

    /// Noise-free estimator: reports the exact expected edge of the
    /// tiered payout model.
    struct ExactEstimator;

    impl EdgeEstimator for ExactEstimator {
        fn estimate(&self, params: &GameParameters) -> EdgeResult<SimulationResult> {
            Ok(synthetic(params.expected_edge()))
        }
    }

    /// Estimator that always reports the same edge, counting calls.
    struct FixedEstimator {
        edge: f64,
        calls: Cell<u32>,
    }

    impl FixedEstimator {
        fn new(edge: f64) -> Self {
            Self {
                edge,
                calls: Cell::new(0),
            }
        }
    }

    impl EdgeEstimator for FixedEstimator {
        fn estimate(&self, _params: &GameParameters) -> EdgeResult<SimulationResult> {
            self.calls.set(self.calls.get() + 1);
            Ok(synthetic(self.edge))
        }
    }

    struct FailingEstimator;

    impl EdgeEstimator for FailingEstimator {
        fn estimate(&self, _params: &GameParameters) -> EdgeResult<SimulationResult> {
            Err(EdgeError::InvalidConfiguration("broken".into()))
        }
    }

    fn synthetic(edge: f64) -> SimulationResult {
        SimulationResult {
            house_edge: edge,
            trials: 1,
            total_wagered: 1.0,
            total_returned: 1.0 - edge,
            hit_rate: 0.0,
            net_variance: 0.0,
            std_error: 0.0,
        }
    }

    #[test]
    fn test_converges_from_above_the_band() {
        let estimator = ExactEstimator;
        let balancer = AutoBalancer::new(&estimator, TargetBand::standard());

        let params = GameParameters::tight();
        let initial = synthetic(params.expected_edge());
        let outcome = balancer.balance(&params, &initial).unwrap();

        assert!(outcome.is_accepted());
        assert!(TargetBand::standard().contains(outcome.result().house_edge));
        assert!(outcome.attempts() <= MAX_ATTEMPTS);
    }

    #[test]
    fn test_converges_from_below_the_band() {
        let estimator = ExactEstimator;
        let balancer = AutoBalancer::new(&estimator, TargetBand::standard());

        let params = GameParameters::loose();
        let initial = synthetic(params.expected_edge());
        let outcome = balancer.balance(&params, &initial).unwrap();

        assert!(outcome.is_accepted());
        assert!(TargetBand::standard().contains(outcome.result().house_edge));
    }

    #[test]
    fn test_exhausts_after_exactly_max_attempts() {
        let estimator = FixedEstimator::new(0.5);
        let balancer = AutoBalancer::new(&estimator, TargetBand::standard());

        let params = GameParameters::standard();
        let outcome = balancer.balance(&params, &synthetic(0.5)).unwrap();

        assert!(!outcome.is_accepted());
        assert_eq!(outcome.attempts(), MAX_ATTEMPTS);
        assert_eq!(estimator.calls.get(), MAX_ATTEMPTS);
    }

    #[test]
    fn test_respects_custom_attempt_budget() {
        let estimator = FixedEstimator::new(0.5);
        let balancer =
            AutoBalancer::new(&estimator, TargetBand::standard()).with_max_attempts(3);

        let outcome = balancer
            .balance(&GameParameters::standard(), &synthetic(0.5))
            .unwrap();

        assert_eq!(outcome.attempts(), 3);
        assert_eq!(estimator.calls.get(), 3);
    }

    #[test]
    fn test_band_boundary_is_accepted() {
        for edge in [0.03, 0.07] {
            let estimator = FixedEstimator::new(edge);
            let balancer = AutoBalancer::new(&estimator, TargetBand::standard());

            let outcome = balancer
                .balance(&GameParameters::standard(), &synthetic(0.5))
                .unwrap();
            assert!(outcome.is_accepted(), "edge {} should be in-band", edge);
            assert_eq!(outcome.attempts(), 1);
        }
    }

    #[test]
    fn test_invalid_configuration_is_never_masked() {
        let estimator = FailingEstimator;
        let balancer = AutoBalancer::new(&estimator, TargetBand::standard());

        let err = balancer
            .balance(&GameParameters::standard(), &synthetic(0.5))
            .unwrap_err();
        assert!(matches!(err, EdgeError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_exhausted_carries_last_attempt() {
        let estimator = FixedEstimator::new(0.42);
        let balancer =
            AutoBalancer::new(&estimator, TargetBand::standard()).with_max_attempts(2);

        let params = GameParameters::standard();
        let outcome = balancer.balance(&params, &synthetic(0.9)).unwrap();

        match outcome {
            BalanceOutcome::Exhausted {
                last_result,
                last_params,
                attempts,
            } => {
                assert_eq!(attempts, 2);
                assert!((last_result.house_edge - 0.42).abs() < 1e-12);
                // Parameters were actually adjusted away from the start
                assert!(
                    (last_params.payout_multiplier - params.payout_multiplier).abs() > 1e-9
                        || (last_params.win_probability - params.win_probability).abs() > 1e-9
                );
            }
            BalanceOutcome::Accepted { .. } => panic!("expected exhaustion"),
        }
    }

    #[test]
    fn test_end_to_end_with_real_engine() {
        // Tight parameters sit at a 20% expected edge; the balancer
        // should pull a real noisy run into the standard band.
        let engine = SimulationEngine::with_partitions(TieredPayoutGame, 2);
        let params = GameParameters::tight().with_trial_count(200_000);

        let initial = engine.simulate_seeded(&params, 7).unwrap();
        assert!(!TargetBand::standard().contains(initial.house_edge));

        let balancer = AutoBalancer::new(&engine, TargetBand::standard());
        let outcome = balancer.balance(&params, &initial).unwrap();

        assert!(outcome.is_accepted());
        assert!(TargetBand::standard().contains(outcome.result().house_edge));
    }
}
