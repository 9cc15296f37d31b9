//! Error types for local search runs.

use thiserror::Error;

/// Errors raised by configuration, calibration and problem construction.
///
/// The search loops themselves are infallible; anything a concrete
/// problem panics with propagates to the caller untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LocalSearchError {
    /// A runner configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Temperature calibration drew a state of dimension zero, leaving
    /// no costs to sample.
    #[error("cannot calibrate temperature from an empty state")]
    EmptyState,

    /// A problem constructor rejected its parameters.
    #[error("invalid problem: {0}")]
    InvalidProblem(String),
}

/// Result type alias for local search operations.
pub type Result<T> = std::result::Result<T, LocalSearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = LocalSearchError::InvalidConfig("tolerance must not be NaN".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: tolerance must not be NaN"
        );
        assert_eq!(
            LocalSearchError::EmptyState.to_string(),
            "cannot calibrate temperature from an empty state"
        );
    }
}
