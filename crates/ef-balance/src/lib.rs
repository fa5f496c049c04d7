//! # ef-balance — Auto-balancer for EdgeForge
//!
//! Corrective search over game parameters: when an estimate falls
//! outside the acceptable house-edge band, the balancer repeatedly
//! derives adjusted parameters and re-simulates until an estimate
//! lands in-band or the retry budget is exhausted.
//!
//! ## Architecture
//!
//! ```text
//! AutoBalancer<E: EdgeEstimator, P: AdjustPolicy>
//!     │
//!     ├── TargetBand (closed [low, high] acceptance interval)
//!     ├── AdjustPolicy (proportional step toward the midpoint)
//!     └── EdgeEstimator (SimulationEngine, or a stub in tests)
//!           │
//!           v
//!     BalanceOutcome::{Accepted, Exhausted}
//! ```
//!
//! Exhaustion is a normal terminal value carrying the last attempt's
//! data; an `InvalidConfiguration` from the estimator propagates
//! unchanged and is never converted into an outcome.

pub mod balancer;
pub mod band;
pub mod policy;

pub use balancer::*;
pub use band::*;
pub use policy::*;
