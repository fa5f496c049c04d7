//! # ef-sim — Monte Carlo house-edge estimation for EdgeForge
//!
//! Estimates the expected operator margin ("house edge") of a game of
//! chance by running large batches of independent trials.
//!
//! ## Architecture
//!
//! ```text
//! SimulationEngine<G: Game>
//!     │
//!     ├── GameParameters (payouts, probabilities, trial budget)
//!     ├── Game (pluggable one-trial outcome generation)
//!     └── SimulationStats (per-partition accumulators)
//!           │
//!           v
//!     SimulationResult (house_edge + supporting statistics)
//! ```
//!
//! Trials are partitioned across worker threads; each partition owns
//! an independent ChaCha stream derived from the run seed, so a fixed
//! seed reproduces the exact same estimate.

pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod stats;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use game::*;
pub use stats::*;
