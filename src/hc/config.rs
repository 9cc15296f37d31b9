//! Hill climbing configuration.

use crate::error::{LocalSearchError, Result};

/// Configuration parameters for hill climbing.
///
/// # Examples
///
/// ```
/// use u_localsearch::hc::HcConfig;
///
/// let config = HcConfig::default()
///     .with_max_iterations(10_000)
///     .with_restarts(10)
///     .with_seed(7);
/// assert_eq!(config.restarts, 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HcConfig {
    /// Maximum number of improving steps per descent.
    pub max_iterations: u64,
    /// Number of independent descents, each from a fresh random state.
    pub restarts: usize,
    /// Random seed (None for random).
    pub seed: Option<u64>,
}

impl Default for HcConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1_000_000,
            restarts: 1,
            seed: None,
        }
    }
}

impl HcConfig {
    /// Sets the step budget of each descent.
    pub fn with_max_iterations(mut self, n: u64) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the number of random restarts.
    pub fn with_restarts(mut self, n: usize) -> Self {
        self.restarts = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.restarts == 0 {
            return Err(LocalSearchError::InvalidConfig(
                "restarts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
