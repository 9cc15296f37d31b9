//! N-queens as a permutation problem.
//!
//! State `p` places the queen of column `i` on row `p[i]`. Using a
//! permutation rules out row and column conflicts by construction, so the
//! cost only counts diagonal attacks.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{LocalSearchError, Result};
use crate::problem::{Neighborhood, Problem, RandomNeighbor};

/// The N-queens problem on an `n x n` board.
///
/// # Examples
///
/// ```
/// use u_localsearch::problem::Problem;
/// use u_localsearch::problems::NQueens;
///
/// let queens = NQueens::new(4).unwrap();
/// assert_eq!(queens.cost(&vec![1, 3, 0, 2]), 0.0);
/// assert_eq!(queens.cost(&vec![0, 1, 2, 3]), 6.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NQueens {
    n: usize,
}

impl NQueens {
    /// Creates an `n`-queens problem.
    ///
    /// Fails for `n < 2`: a swap neighbor needs two distinct columns.
    pub fn new(n: usize) -> Result<Self> {
        if n < 2 {
            return Err(LocalSearchError::InvalidProblem(format!(
                "n-queens needs at least 2 queens, got {n}"
            )));
        }
        Ok(Self { n })
    }

    /// Number of queens.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of attacking pairs in `state`.
    pub fn conflicts(&self, state: &[usize]) -> usize {
        let mut total = 0;
        for i in 0..state.len() {
            for j in (i + 1)..state.len() {
                if state[i].abs_diff(state[j]) == j - i {
                    total += 1;
                }
            }
        }
        total
    }
}

impl Default for NQueens {
    fn default() -> Self {
        Self { n: 8 }
    }
}

impl Problem for NQueens {
    type State = Vec<usize>;

    fn random_state<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        let mut state: Vec<usize> = (0..self.n).collect();
        state.shuffle(rng);
        state
    }

    fn cost(&self, state: &Vec<usize>) -> f64 {
        self.conflicts(state) as f64
    }
}

impl Neighborhood for NQueens {
    /// Every swap of two columns, in `(i, j)` lexicographic order.
    fn neighbors<'a>(
        &'a self,
        state: &'a Vec<usize>,
    ) -> impl Iterator<Item = Vec<usize>> + 'a {
        let n = self.n;
        (0..n).flat_map(move |i| {
            ((i + 1)..n).map(move |j| {
                let mut neighbor = state.clone();
                neighbor.swap(i, j);
                neighbor
            })
        })
    }
}

impl RandomNeighbor for NQueens {
    fn random_neighbor<R: Rng>(&self, state: &Vec<usize>, rng: &mut R) -> Vec<usize> {
        let i = rng.random_range(0..self.n);
        // Offset into the remaining n - 1 columns keeps i != j.
        let j = (i + rng.random_range(1..self.n)) % self.n;
        let mut neighbor = state.clone();
        neighbor.swap(i, j);
        neighbor
    }
}
