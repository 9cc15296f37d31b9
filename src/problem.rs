//! Capability traits for local search problems.
//!
//! A problem implements only the capabilities required by the algorithm it
//! is handed to:
//!
//! | Capability        | Hill climbing | Simulated annealing |
//! |-------------------|:-------------:|:-------------------:|
//! | [`Problem`]       | required      | required            |
//! | [`Neighborhood`]  | required      |                     |
//! | [`RandomNeighbor`]|               | required            |
//!
//! Passing a problem that lacks a capability to an algorithm that needs it
//! is rejected at compile time.

use rand::Rng;

/// Length of a state sequence.
///
/// States are ordered, fixed-length sequences. Temperature calibration
/// uses the dimension to decide how many random states to sample.
pub trait Dimensioned {
    /// Number of positions in the state.
    fn dimension(&self) -> usize;
}

impl<T> Dimensioned for Vec<T> {
    fn dimension(&self) -> usize {
        self.len()
    }
}

impl<T> Dimensioned for Box<[T]> {
    fn dimension(&self) -> usize {
        self.len()
    }
}

impl<T, const N: usize> Dimensioned for [T; N] {
    fn dimension(&self) -> usize {
        N
    }
}

/// Defines a local search problem.
///
/// The user implements state generation and cost evaluation. The search
/// algorithms never mutate a state in place and never mutate the problem;
/// one instance can serve any number of sequential runs.
///
/// # Minimization
///
/// Lower cost is better. For maximization, negate the cost.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_localsearch::problem::{Problem, RandomNeighbor};
///
/// struct Parabola;
///
/// impl Problem for Parabola {
///     type State = [i64; 1];
///
///     fn random_state<R: Rng>(&self, rng: &mut R) -> [i64; 1] {
///         [rng.random_range(-100..100)]
///     }
///
///     fn cost(&self, x: &[i64; 1]) -> f64 {
///         (x[0] * x[0]) as f64
///     }
/// }
///
/// impl RandomNeighbor for Parabola {
///     fn random_neighbor<R: Rng>(&self, x: &[i64; 1], rng: &mut R) -> [i64; 1] {
///         if rng.random_bool(0.5) { [x[0] + 1] } else { [x[0] - 1] }
///     }
/// }
/// ```
pub trait Problem: Send + Sync {
    /// The state representation type.
    type State: Clone + Send + Dimensioned;

    /// Draws a starting state.
    ///
    /// Called for every search start and repeatedly during temperature
    /// calibration, so each call must be independent of the previous ones.
    fn random_state<R: Rng>(&self, rng: &mut R) -> Self::State;

    /// Computes the cost of a state. Lower is better.
    ///
    /// Must be a pure function of `state`.
    fn cost(&self, state: &Self::State) -> f64;
}

/// Full (or representative) neighborhood enumeration, used by hill climbing.
pub trait Neighborhood: Problem {
    /// Yields the neighbors of `state`.
    ///
    /// The sequence is finite and consumed at most once per call. Each
    /// item is a new state; prefer a lazy iterator over collecting the
    /// whole neighborhood when it is large.
    fn neighbors<'a>(
        &'a self,
        state: &'a Self::State,
    ) -> impl Iterator<Item = Self::State> + 'a;
}

/// Single random neighbor sampling, used by simulated annealing.
pub trait RandomNeighbor: Problem {
    /// Generates one neighbor of `state`.
    ///
    /// The choice should approximate a uniform draw over the neighborhood
    /// without enumerating it.
    fn random_neighbor<R: Rng>(&self, state: &Self::State, rng: &mut R) -> Self::State;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_of_sequences() {
        assert_eq!(vec![1, 2, 3].dimension(), 3);
        assert_eq!(Vec::<u8>::new().dimension(), 0);
        assert_eq!([0.5f64; 4].dimension(), 4);
        let boxed: Box<[u16]> = vec![1, 2].into_boxed_slice();
        assert_eq!(boxed.dimension(), 2);
    }
}
