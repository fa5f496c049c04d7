//! EdgeForge — house-edge simulation & auto-balancing CLI
//!
//! The dispatcher: builds a parameter set, runs one simulation,
//! applies the band check, invokes the auto-balancer on failure and
//! renders whichever result it ends up with as JSON.

use clap::Parser;
use serde::Serialize;

use ef_balance::{AutoBalancer, BalanceOutcome, TargetBand, MAX_ATTEMPTS};
use ef_sim::{GameParameters, SimulationEngine, SimulationResult, TieredPayoutGame};

#[derive(Parser, Debug)]
#[command(name = "edgeforge", about = "Estimate and auto-balance a game's house edge")]
struct Args {
    /// Number of trials per simulation run
    #[arg(long, default_value_t = 100_000)]
    trials: u64,

    /// Fixed RNG seed (omit for a fresh entropy seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Lower bound of the acceptable house-edge band
    #[arg(long, default_value_t = 0.03)]
    band_low: f64,

    /// Upper bound of the acceptable house-edge band
    #[arg(long, default_value_t = 0.07)]
    band_high: f64,

    /// Stake per trial
    #[arg(long, default_value_t = 1.0)]
    bet: f64,

    /// Base win probability
    #[arg(long, default_value_t = 0.30)]
    win_prob: f64,

    /// Base win payout (bet multiplier)
    #[arg(long, default_value_t = 3.0)]
    payout: f64,

    /// Bonus tier probability
    #[arg(long, default_value_t = 0.01)]
    bonus_prob: f64,

    /// Bonus tier payout (bet multiplier)
    #[arg(long, default_value_t = 5.0)]
    bonus_payout: f64,

    /// Balancer retry budget
    #[arg(long, default_value_t = MAX_ATTEMPTS)]
    max_attempts: u32,
}

/// Rendered response shape
#[derive(Serialize)]
struct Report {
    status: &'static str,
    attempts: u32,
    result: SimulationResult,
    params: GameParameters,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let params = GameParameters {
        bet: args.bet,
        win_probability: args.win_prob,
        payout_multiplier: args.payout,
        bonus_probability: args.bonus_prob,
        bonus_multiplier: args.bonus_payout,
        trial_count: args.trials,
    };
    let band = TargetBand::new(args.band_low, args.band_high)?;

    let engine = SimulationEngine::new(TieredPayoutGame);
    let initial = match args.seed {
        Some(seed) => engine.simulate_seeded(&params, seed)?,
        None => engine.simulate(&params)?,
    };
    log::info!(
        "initial estimate: edge {:.5} over {} trials",
        initial.house_edge,
        initial.trials
    );

    let report = if band.contains(initial.house_edge) {
        Report {
            status: "in_band",
            attempts: 0,
            result: initial,
            params,
        }
    } else {
        log::info!(
            "edge outside [{}, {}], balancing (max {} attempts)",
            band.low,
            band.high,
            args.max_attempts
        );
        let balancer =
            AutoBalancer::new(&engine, band).with_max_attempts(args.max_attempts.max(1));
        match balancer.balance(&params, &initial)? {
            BalanceOutcome::Accepted {
                result,
                params,
                attempts,
            } => Report {
                status: "balanced",
                attempts,
                result,
                params,
            },
            BalanceOutcome::Exhausted {
                last_result,
                last_params,
                attempts,
            } => Report {
                status: "exhausted",
                attempts,
                result: last_result,
                params: last_params,
            },
        }
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
