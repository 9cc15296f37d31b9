//! Simulated Annealing (SA).
//!
//! A single-solution trajectory metaheuristic inspired by the physical
//! annealing process. Accepts worsening moves with a probability that
//! decreases over time (temperature), allowing the search to escape
//! local optima.
//!
//! Without an explicit schedule the initial temperature is calibrated from
//! the cost spread of random states and cooled harmonically,
//! `T_0 / (1 + i)`, until it drops to the tolerance.
//!
//! The search returns the **last** state visited, not the best one seen.
//! [`SaRunner`] additionally reports the best state in its result.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast
//!   Computing Machines"

mod calibration;
mod config;
mod runner;
mod schedule;

pub use calibration::{calibrate_initial_temperature, SAMPLES_PER_DIMENSION};
pub use config::{InitialTemperature, SaConfig, DEFAULT_CALIBRATION_FACTOR, DEFAULT_TOLERANCE};
pub use runner::{
    metropolis_accept, simulated_annealing, simulated_annealing_with_schedule, SaResult, SaRunner,
};
pub use schedule::{harmonic, CoolingSchedule, Temperatures, MAX_SCHEDULE_STEPS};
