//! Domain-agnostic local search optimization.
//!
//! Provides generic implementations of two single-solution local search
//! algorithms:
//!
//! - **Hill Climbing (HC)**: Steepest descent over a full neighborhood,
//!   stopping at the first local optimum, with optional random restarts.
//! - **Simulated Annealing (SA)**: Random-neighbor trajectory search with
//!   Metropolis acceptance and a pluggable temperature schedule. The
//!   default schedule calibrates its initial temperature from the cost
//!   spread of random states and cools harmonically.
//!
//! # Architecture
//!
//! Problems implement the capability traits in [`problem`]: [`Problem`]
//! for state sampling and cost, plus [`Neighborhood`] for hill climbing
//! or [`RandomNeighbor`] for simulated annealing. The algorithms are
//! stateless functions over a borrowed problem and an explicit random
//! generator, so a seeded generator makes every run reproducible.
//!
//! [`Problem`]: problem::Problem
//! [`Neighborhood`]: problem::Neighborhood
//! [`RandomNeighbor`]: problem::RandomNeighbor

pub mod error;
pub mod hc;
pub mod problem;
pub mod problems;
pub mod random;
pub mod sa;

pub use error::{LocalSearchError, Result};
