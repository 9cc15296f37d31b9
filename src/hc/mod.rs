//! Hill Climbing (HC).
//!
//! Greedy steepest descent: from a random state, repeatedly move to the
//! best neighbor while it strictly improves the cost. Never escapes a
//! local optimum on its own; use restarts for diversification.
//!
//! # Reference
//!
//! Russell, S. & Norvig, P. (2010), *Artificial Intelligence: A Modern
//! Approach*, 3rd ed., §4.1.1 "Hill-climbing search".

mod config;
mod runner;

pub use config::HcConfig;
pub use runner::{hill_climbing, HcResult, HcRunner};
