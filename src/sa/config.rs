//! SA configuration.

use super::schedule::{CoolingSchedule, MAX_SCHEDULE_STEPS};
use crate::error::{LocalSearchError, Result};

/// Tolerance below which the temperature counts as zero.
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// Calibration factor of the engine's default schedule.
pub const DEFAULT_CALIBRATION_FACTOR: f64 = 2.0;

/// How the initial temperature `T_0` is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitialTemperature {
    /// `T_0 = factor * (max_cost - min_cost)` over sampled random states.
    ///
    /// See [`calibrate_initial_temperature`](super::calibrate_initial_temperature).
    Calibrated {
        /// Multiplier of the sampled cost range. Must be non-negative.
        factor: f64,
    },

    /// A fixed, caller-chosen `T_0`.
    Fixed(f64),
}

impl Default for InitialTemperature {
    fn default() -> Self {
        InitialTemperature::Calibrated {
            factor: DEFAULT_CALIBRATION_FACTOR,
        }
    }
}

/// Configuration for the Simulated Annealing runner.
///
/// The default matches the engine's built-in behavior: calibrated `T_0`
/// with factor 2, harmonic cooling, tolerance `0.001`.
///
/// # Examples
///
/// ```
/// use u_localsearch::sa::{CoolingSchedule, InitialTemperature, SaConfig};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(InitialTemperature::Fixed(50.0))
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.99 })
///     .with_tolerance(0.01)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Initial temperature policy.
    pub initial_temperature: InitialTemperature,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// The run stops at the first temperature `<= tolerance`.
    pub tolerance: f64,

    /// Maximum number of temperatures drawn from the schedule.
    pub max_steps: u64,

    /// Record the best cost every this many iterations.
    pub history_interval: u64,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: InitialTemperature::default(),
            cooling: CoolingSchedule::default(),
            tolerance: DEFAULT_TOLERANCE,
            max_steps: MAX_SCHEDULE_STEPS,
            history_interval: 100,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: InitialTemperature) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_steps(mut self, n: u64) -> Self {
        self.max_steps = n;
        self
    }

    pub fn with_history_interval(mut self, n: u64) -> Self {
        self.history_interval = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Tolerance may be any non-NaN value: a schedule that never reaches it
    /// still ends after `max_steps` temperatures.
    pub fn validate(&self) -> Result<()> {
        match self.initial_temperature {
            InitialTemperature::Calibrated { factor } => {
                if !factor.is_finite() || factor < 0.0 {
                    return Err(invalid(format!(
                        "calibration factor must be finite and non-negative, got {factor}"
                    )));
                }
            }
            InitialTemperature::Fixed(t) => {
                if !t.is_finite() || t < 0.0 {
                    return Err(invalid(format!(
                        "initial temperature must be finite and non-negative, got {t}"
                    )));
                }
            }
        }
        if self.tolerance.is_nan() {
            return Err(invalid("tolerance must not be NaN".into()));
        }
        if self.history_interval == 0 {
            return Err(invalid("history_interval must be positive".into()));
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if !(alpha > 0.0 && alpha < 1.0) {
                    return Err(invalid(format!(
                        "geometric alpha must be in (0, 1), got {alpha}"
                    )));
                }
            }
            CoolingSchedule::Quadratic { coefficient } => {
                if !(coefficient > 0.0 && coefficient.is_finite()) {
                    return Err(invalid(format!(
                        "quadratic coefficient must be positive, got {coefficient}"
                    )));
                }
            }
            CoolingSchedule::Harmonic => {}
        }
        Ok(())
    }
}

fn invalid(msg: String) -> LocalSearchError {
    LocalSearchError::InvalidConfig(msg)
}
