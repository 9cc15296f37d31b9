//! Initial temperature calibration from sampled costs.

use rand::Rng;

use crate::error::{LocalSearchError, Result};
use crate::problem::{Dimensioned, Problem};

/// Random states sampled per state dimension.
pub const SAMPLES_PER_DIMENSION: usize = 10;

/// Estimates an initial temperature as `factor * (max_cost - min_cost)`.
///
/// One random state is drawn to read the dimension `d`, then `10 * d`
/// independent random states are costed. A wide cost range gives a hot
/// start, so early worsening moves are accepted freely. A constant cost
/// gives `0.0`.
///
/// # Errors
///
/// [`LocalSearchError::EmptyState`] when the problem's states have
/// dimension zero.
///
/// # Examples
///
/// ```
/// use u_localsearch::problems::NQueens;
/// use u_localsearch::random::create_rng;
/// use u_localsearch::sa::calibrate_initial_temperature;
///
/// let mut rng = create_rng(Some(1));
/// let t0 = calibrate_initial_temperature(&NQueens::default(), 2.0, &mut rng).unwrap();
/// assert!(t0 > 0.0);
/// ```
pub fn calibrate_initial_temperature<P, R>(problem: &P, factor: f64, rng: &mut R) -> Result<f64>
where
    P: Problem,
    R: Rng,
{
    let samples = SAMPLES_PER_DIMENSION * problem.random_state(rng).dimension();
    if samples == 0 {
        return Err(LocalSearchError::EmptyState);
    }

    let mut min_cost = f64::INFINITY;
    let mut max_cost = f64::NEG_INFINITY;
    for _ in 0..samples {
        let cost = problem.cost(&problem.random_state(rng));
        min_cost = min_cost.min(cost);
        max_cost = max_cost.max(cost);
    }

    // All samples NaN leaves the bounds untouched.
    if min_cost > max_cost {
        return Ok(0.0);
    }
    Ok(factor * (max_cost - min_cost))
}
