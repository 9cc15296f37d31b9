//! Hill climbing execution engine.
//!
//! # Algorithm (steepest descent)
//!
//! 1. Draw a random initial state
//! 2. At each iteration:
//!    a. Scan the whole neighborhood for the lowest-cost neighbor
//!    (ties keep the first one encountered)
//!    b. Stop if it does not strictly improve on the current cost
//!    c. Otherwise move to it
//! 3. Return the current state when a local optimum is reached or the
//!    iteration budget runs out
//!
//! With restarts, the descent is repeated from fresh random states and
//! the lowest-cost local optimum is kept.

use rand::Rng;
use tracing::{debug, info, trace};

use super::config::HcConfig;
use crate::error::Result;
use crate::problem::Neighborhood;
use crate::random::create_rng;

/// Result of a hill climbing run.
#[derive(Debug, Clone)]
pub struct HcResult<S: Clone> {
    /// Best state over all restarts.
    pub best: S,
    /// Cost of the best state.
    pub best_cost: f64,
    /// Improving steps taken, summed over all restarts.
    pub iterations: u64,
    /// Number of descents executed.
    pub restarts: usize,
    /// Descents that stopped on a local optimum rather than the budget.
    pub local_optima: usize,
    /// Current cost after every step of the descent that produced `best`,
    /// starting with its initial cost.
    pub cost_history: Vec<f64>,
}

/// Hill climbing runner.
pub struct HcRunner;

impl HcRunner {
    /// Executes hill climbing with random restarts.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_localsearch::hc::{HcConfig, HcRunner};
    /// use u_localsearch::problems::NQueens;
    ///
    /// let config = HcConfig::default().with_restarts(10).with_seed(3);
    /// let result = HcRunner::run(&NQueens::new(8).unwrap(), &config).unwrap();
    /// assert_eq!(result.restarts, 10);
    /// ```
    pub fn run<P: Neighborhood>(problem: &P, config: &HcConfig) -> Result<HcResult<P::State>> {
        config.validate()?;

        let mut rng = create_rng(config.seed);

        info!(
            event = "run_start",
            algorithm = "hill_climbing",
            max_iterations = config.max_iterations,
            restarts = config.restarts,
        );

        let mut winner = descend(problem, config.max_iterations, &mut rng);
        let mut iterations = winner.steps;
        let mut local_optima = usize::from(winner.local_optimum);
        log_restart(0, &winner);

        for restart in 1..config.restarts {
            let descent = descend(problem, config.max_iterations, &mut rng);
            iterations += descent.steps;
            local_optima += usize::from(descent.local_optimum);
            log_restart(restart, &descent);

            if descent.cost < winner.cost {
                winner = descent;
            }
        }

        info!(
            event = "run_end",
            algorithm = "hill_climbing",
            iterations,
            local_optima,
            best_cost = winner.cost,
        );

        Ok(HcResult {
            best: winner.state,
            best_cost: winner.cost,
            iterations,
            restarts: config.restarts,
            local_optima,
            cost_history: winner.cost_history,
        })
    }
}

/// Steepest-descent hill climbing from one random state.
///
/// Takes at most `max_iterations` improving steps and returns the state
/// where it stopped. Never accepts a non-improving move, so the returned
/// cost is at most the initial one.
///
/// # Examples
///
/// ```
/// use u_localsearch::hc::hill_climbing;
/// use u_localsearch::problem::Problem;
/// use u_localsearch::problems::NQueens;
/// use u_localsearch::random::create_rng;
///
/// let queens = NQueens::new(8).unwrap();
/// let state = hill_climbing(&queens, 1_000_000, &mut create_rng(Some(0)));
/// assert!(queens.cost(&state) <= 28.0);
/// ```
pub fn hill_climbing<P, R>(problem: &P, max_iterations: u64, rng: &mut R) -> P::State
where
    P: Neighborhood,
    R: Rng,
{
    descend(problem, max_iterations, rng).state
}

struct Descent<S> {
    state: S,
    cost: f64,
    steps: u64,
    local_optimum: bool,
    cost_history: Vec<f64>,
}

fn descend<P, R>(problem: &P, max_iterations: u64, rng: &mut R) -> Descent<P::State>
where
    P: Neighborhood,
    R: Rng,
{
    let mut state = problem.random_state(rng);
    let mut cost = problem.cost(&state);
    let mut cost_history = vec![cost];
    let mut steps = 0u64;
    let mut local_optimum = false;

    while steps < max_iterations {
        match best_neighbor(problem, &state) {
            Some((candidate, candidate_cost)) if candidate_cost < cost => {
                trace!(event = "step", step = steps, cost = candidate_cost);
                state = candidate;
                cost = candidate_cost;
                cost_history.push(cost);
                steps += 1;
            }
            _ => {
                local_optimum = true;
                break;
            }
        }
    }

    Descent {
        state,
        cost,
        steps,
        local_optimum,
        cost_history,
    }
}

fn log_restart<S>(restart: usize, descent: &Descent<S>) {
    debug!(
        event = "restart_end",
        restart,
        cost = descent.cost,
        steps = descent.steps,
        local_optimum = descent.local_optimum,
    );
}

/// Lowest-cost neighbor, first one on ties. `None` for an empty
/// neighborhood.
fn best_neighbor<P: Neighborhood>(problem: &P, state: &P::State) -> Option<(P::State, f64)> {
    let mut best: Option<(P::State, f64)> = None;
    for neighbor in problem.neighbors(state) {
        let cost = problem.cost(&neighbor);
        if best.as_ref().is_none_or(|&(_, c)| cost < c) {
            best = Some((neighbor, cost));
        }
    }
    best
}
