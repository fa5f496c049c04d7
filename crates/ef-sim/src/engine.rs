//! Simulation engine — partitioned Monte Carlo estimation

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::config::GameParameters;
use crate::error::EdgeResult;
use crate::game::Game;
use crate::stats::{SimulationResult, SimulationStats};

/// Monte Carlo house-edge estimator.
///
/// Runs `trial_count` independent trials of the configured game and
/// aggregates wagered/returned totals into a [`SimulationResult`].
/// Trials are statistically independent, so the batch is partitioned
/// across worker threads; each partition owns its own ChaCha stream
/// and partial sums merge in partition order, making a fixed seed
/// reproducible regardless of scheduling.
pub struct SimulationEngine<G: Game> {
    game: G,
    partitions: usize,
}

impl<G: Game> SimulationEngine<G> {
    /// Create an engine sized to the available cores
    pub fn new(game: G) -> Self {
        Self {
            game,
            partitions: num_cpus::get().max(1),
        }
    }

    /// Create with an explicit partition count
    pub fn with_partitions(game: G, partitions: usize) -> Self {
        Self {
            game,
            partitions: partitions.max(1),
        }
    }

    /// Run one simulation with a fresh entropy seed
    pub fn simulate(&self, params: &GameParameters) -> EdgeResult<SimulationResult> {
        let seed: u64 = rand::rng().random();
        self.simulate_seeded(params, seed)
    }

    /// Run one simulation with a fixed seed.
    ///
    /// For a fixed seed and fixed parameters the result is identical
    /// across calls; independent seeds vary with sampling noise on the
    /// order of 1/√trial_count.
    pub fn simulate_seeded(
        &self,
        params: &GameParameters,
        seed: u64,
    ) -> EdgeResult<SimulationResult> {
        params.validate()?;
        log::debug!(
            "simulating {} trials over {} partitions (seed {})",
            params.trial_count,
            self.partitions.min(params.trial_count as usize),
            seed
        );

        let partials: Vec<SimulationStats> = self
            .partition_sizes(params.trial_count)
            .into_par_iter()
            .enumerate()
            .map(|(index, trials)| {
                // One independent ChaCha stream per partition
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                rng.set_stream(index as u64);

                let mut stats = SimulationStats::default();
                for _ in 0..trials {
                    stats.record(self.game.play(params, &mut rng));
                }
                stats
            })
            .collect();

        // Ordered reduction keeps the aggregate deterministic
        let mut total = SimulationStats::default();
        for partial in &partials {
            total.merge(partial);
        }

        let result = total.finish()?;
        log::debug!(
            "estimated edge {:.5} over {} trials (stderr {:.5})",
            result.house_edge,
            result.trials,
            result.std_error
        );
        Ok(result)
    }

    /// Split the trial budget across partitions, remainder first
    fn partition_sizes(&self, trial_count: u64) -> Vec<u64> {
        let parts = self.partitions.min(trial_count as usize).max(1) as u64;
        let base = trial_count / parts;
        let remainder = trial_count % parts;
        (0..parts)
            .map(|i| if i < remainder { base + 1 } else { base })
            .collect()
    }
}
