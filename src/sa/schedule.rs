//! Lazy temperature schedules.

/// Upper bound on the number of temperatures a built-in schedule yields.
///
/// Guarantees termination even when the tolerance is never reached
/// (for example a negative tolerance).
pub const MAX_SCHEDULE_STEPS: u64 = 10_000_000_000;

/// Cooling schedule: how temperature `i` is derived from `T_0`.
///
/// # References
///
/// - Harmonic: the classic `T_0 / (1 + i)` logarithmic-like decay
/// - Geometric: standard textbook approach
/// - Quadratic: faster decay than harmonic for the same `T_0`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Harmonic cooling: `T_i = T_0 / (1 + i)`.
    ///
    /// Default schedule of the engine. Cools fast at first and then very
    /// slowly, leaving a long near-greedy tail.
    #[default]
    Harmonic,

    /// Geometric (exponential) cooling: `T_i = T_0 * alpha^i`.
    ///
    /// Typical `alpha`: 0.95–0.99.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Quadratic cooling: `T_i = T_0 / (1 + coefficient * i^2)`.
    Quadratic {
        /// Positive multiplier of the squared step.
        coefficient: f64,
    },
}

impl CoolingSchedule {
    /// Temperature at step `i` for initial temperature `t0`.
    pub fn temperature(&self, t0: f64, i: u64) -> f64 {
        let i = i as f64;
        match *self {
            CoolingSchedule::Harmonic => t0 / (1.0 + i),
            CoolingSchedule::Geometric { alpha } => t0 * alpha.powf(i),
            CoolingSchedule::Quadratic { coefficient } => t0 / (1.0 + coefficient * i * i),
        }
    }

    /// Lazily yields this schedule's temperatures starting at `t0`,
    /// capped at [`MAX_SCHEDULE_STEPS`] values.
    pub fn temperatures(self, t0: f64) -> Temperatures {
        Temperatures::new(self, t0, MAX_SCHEDULE_STEPS)
    }
}

/// Bounded iterator over the temperatures of a [`CoolingSchedule`].
///
/// Each value is computed on demand from its index; nothing is buffered.
///
/// # Examples
///
/// ```
/// use u_localsearch::sa::CoolingSchedule;
///
/// let temps: Vec<f64> = CoolingSchedule::Harmonic.temperatures(12.0).take(4).collect();
/// assert_eq!(temps, vec![12.0, 6.0, 4.0, 3.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Temperatures {
    cooling: CoolingSchedule,
    t0: f64,
    step: u64,
    max_steps: u64,
}

impl Temperatures {
    /// Creates a schedule yielding at most `max_steps` temperatures.
    pub fn new(cooling: CoolingSchedule, t0: f64, max_steps: u64) -> Self {
        Self {
            cooling,
            t0,
            step: 0,
            max_steps,
        }
    }

    /// Initial temperature of the schedule.
    pub fn initial_temperature(&self) -> f64 {
        self.t0
    }
}

impl Iterator for Temperatures {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.step >= self.max_steps {
            return None;
        }
        let t = self.cooling.temperature(self.t0, self.step);
        self.step += 1;
        Some(t)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.max_steps.saturating_sub(self.step);
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// `T_0 / (1 + i)`: the engine's default schedule.
pub fn harmonic(t0: f64) -> Temperatures {
    CoolingSchedule::Harmonic.temperatures(t0)
}
