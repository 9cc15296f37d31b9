//! SA execution loop.

use rand::Rng;
use tracing::{debug, info, trace};

use super::calibration::calibrate_initial_temperature;
use super::config::{InitialTemperature, SaConfig, DEFAULT_CALIBRATION_FACTOR};
use super::schedule::{harmonic, Temperatures};
use crate::error::Result;
use crate::problem::RandomNeighbor;
use crate::random::create_rng;

const DEFAULT_HISTORY_INTERVAL: u64 = 100;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The last state visited when the schedule cooled down.
    ///
    /// This is what the search returns. It is not necessarily the best
    /// state seen; see [`best`](Self::best).
    pub state: S,

    /// Cost of `state`.
    pub cost: f64,

    /// The lowest-cost state visited during the run.
    pub best: S,

    /// Cost of `best`.
    pub best_cost: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: u64,

    /// First temperature drawn from the schedule, if any.
    pub initial_temperature: Option<f64>,

    /// Last temperature drawn from the schedule, if any. When the run
    /// stopped on tolerance this is the value that stopped it.
    pub final_temperature: Option<f64>,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: u64,

    /// Number of strictly improving moves.
    pub improving_moves: u64,

    /// Best cost sampled at regular intervals for history tracking.
    pub cost_history: Vec<f64>,
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA with a schedule built from `config`.
    ///
    /// # Errors
    ///
    /// Fails when the configuration is invalid or when calibration is
    /// requested on a problem with empty states.
    pub fn run<P: RandomNeighbor>(problem: &P, config: &SaConfig) -> Result<SaResult<P::State>> {
        config.validate()?;

        let mut rng = create_rng(config.seed);

        let t0 = match config.initial_temperature {
            InitialTemperature::Calibrated { factor } => {
                let t0 = calibrate_initial_temperature(problem, factor, &mut rng)?;
                debug!(event = "calibrated", factor, initial_temperature = t0);
                t0
            }
            InitialTemperature::Fixed(t0) => t0,
        };

        let schedule = Temperatures::new(config.cooling, t0, config.max_steps);
        Ok(anneal(
            problem,
            schedule,
            config.tolerance,
            config.history_interval,
            &mut rng,
        ))
    }

    /// Runs SA over a caller-supplied temperature schedule.
    ///
    /// The schedule is pulled one value per iteration and the run stops at
    /// the first value `<= tolerance`, or when the schedule is exhausted.
    /// Values after the stopping one are never requested.
    pub fn run_with_schedule<P, I, R>(
        problem: &P,
        schedule: I,
        tolerance: f64,
        rng: &mut R,
    ) -> SaResult<P::State>
    where
        P: RandomNeighbor,
        I: IntoIterator<Item = f64>,
        R: Rng,
    {
        anneal(problem, schedule, tolerance, DEFAULT_HISTORY_INTERVAL, rng)
    }
}

/// Simulated annealing with the auto-calibrated harmonic schedule.
///
/// `T_0` is calibrated with factor 2 (see
/// [`calibrate_initial_temperature`]) and the temperatures are
/// `T_0 / (1 + i)`. Returns the last visited state.
///
/// # Errors
///
/// [`LocalSearchError::EmptyState`](crate::error::LocalSearchError::EmptyState)
/// when the problem's states have dimension zero.
///
/// # Examples
///
/// ```
/// use u_localsearch::problem::Problem;
/// use u_localsearch::problems::NQueens;
/// use u_localsearch::random::create_rng;
/// use u_localsearch::sa::{simulated_annealing, DEFAULT_TOLERANCE};
///
/// let queens = NQueens::new(6).unwrap();
/// let mut rng = create_rng(Some(42));
/// let state = simulated_annealing(&queens, DEFAULT_TOLERANCE, &mut rng).unwrap();
/// assert_eq!(state.len(), 6);
/// ```
pub fn simulated_annealing<P, R>(problem: &P, tolerance: f64, rng: &mut R) -> Result<P::State>
where
    P: RandomNeighbor,
    R: Rng,
{
    let t0 = calibrate_initial_temperature(problem, DEFAULT_CALIBRATION_FACTOR, rng)?;
    Ok(simulated_annealing_with_schedule(
        problem,
        harmonic(t0),
        tolerance,
        rng,
    ))
}

/// Simulated annealing over a caller-supplied schedule. Returns the last
/// visited state.
pub fn simulated_annealing_with_schedule<P, I, R>(
    problem: &P,
    schedule: I,
    tolerance: f64,
    rng: &mut R,
) -> P::State
where
    P: RandomNeighbor,
    I: IntoIterator<Item = f64>,
    R: Rng,
{
    SaRunner::run_with_schedule(problem, schedule, tolerance, rng).state
}

/// Metropolis acceptance criterion.
///
/// Non-worsening moves (`delta <= 0`) are accepted without consuming a
/// random draw. Otherwise one uniform draw `u` in `[0, 1)` is taken and
/// the move is accepted iff `u < exp(-delta / temperature)`.
pub fn metropolis_accept<R: Rng>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    if delta <= 0.0 {
        return true;
    }
    let probability = (-delta / temperature).exp();
    rng.random::<f64>() < probability
}

fn anneal<P, I, R>(
    problem: &P,
    schedule: I,
    tolerance: f64,
    history_interval: u64,
    rng: &mut R,
) -> SaResult<P::State>
where
    P: RandomNeighbor,
    I: IntoIterator<Item = f64>,
    R: Rng,
{
    let mut current = problem.random_state(rng);
    let mut current_cost = problem.cost(&current);
    let mut best = current.clone();
    let mut best_cost = current_cost;

    let mut iterations = 0u64;
    let mut accepted_moves = 0u64;
    let mut improving_moves = 0u64;
    let mut initial_temperature = None;
    let mut final_temperature = None;

    let mut cost_history = vec![best_cost];

    info!(
        event = "run_start",
        algorithm = "simulated_annealing",
        tolerance,
        initial_cost = current_cost,
    );

    for temperature in schedule {
        initial_temperature.get_or_insert(temperature);
        final_temperature = Some(temperature);

        // NaN temperatures stop the run as well.
        let hot = temperature > tolerance;
        if !hot {
            break;
        }

        let neighbor = problem.random_neighbor(&current, rng);
        let neighbor_cost = problem.cost(&neighbor);
        let delta = neighbor_cost - current_cost;

        let accepted = metropolis_accept(delta, temperature, rng);
        trace!(
            event = "step",
            iteration = iterations,
            temperature,
            delta,
            accepted,
        );

        if accepted {
            if delta < 0.0 {
                improving_moves += 1;
            }
            current = neighbor;
            current_cost = neighbor_cost;
            accepted_moves += 1;

            if current_cost < best_cost {
                best = current.clone();
                best_cost = current_cost;
                debug!(event = "new_best", iteration = iterations, best_cost);
            }
        }

        iterations += 1;

        if iterations.is_multiple_of(history_interval) {
            cost_history.push(best_cost);
        }
    }

    if cost_history
        .last()
        .is_none_or(|&last| (last - best_cost).abs() > 1e-15)
    {
        cost_history.push(best_cost);
    }

    info!(
        event = "run_end",
        algorithm = "simulated_annealing",
        iterations,
        accepted_moves,
        improving_moves,
        cost = current_cost,
        best_cost,
    );

    SaResult {
        state: current,
        cost: current_cost,
        best,
        best_cost,
        iterations,
        initial_temperature,
        final_temperature,
        accepted_moves,
        improving_moves,
        cost_history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Problem;
    use crate::problems::NQueens;
    use crate::sa::{CoolingSchedule, DEFAULT_TOLERANCE};
    use proptest::prelude::*;

    // ---- Walk: every neighbor is one step uphill ----

    struct UphillWalk;

    impl Problem for UphillWalk {
        type State = [i64; 1];

        fn random_state<R: Rng>(&self, _rng: &mut R) -> [i64; 1] {
            [0]
        }

        fn cost(&self, x: &[i64; 1]) -> f64 {
            x[0] as f64
        }
    }

    impl RandomNeighbor for UphillWalk {
        fn random_neighbor<R: Rng>(&self, x: &[i64; 1], _rng: &mut R) -> [i64; 1] {
            [x[0] + 1]
        }
    }

    // ---- Constant cost ----

    struct Flat;

    impl Problem for Flat {
        type State = Vec<u32>;

        fn random_state<R: Rng>(&self, rng: &mut R) -> Vec<u32> {
            (0..4).map(|_| rng.random()).collect()
        }

        fn cost(&self, _state: &Vec<u32>) -> f64 {
            5.0
        }
    }

    impl RandomNeighbor for Flat {
        fn random_neighbor<R: Rng>(&self, state: &Vec<u32>, rng: &mut R) -> Vec<u32> {
            let mut next = state.clone();
            next[0] = rng.random();
            next
        }
    }

    #[test]
    fn test_returns_last_state_not_best() {
        // Infinite temperature accepts every move with probability 1.
        let mut rng = create_rng(Some(1));
        let result = SaRunner::run_with_schedule(
            &UphillWalk,
            vec![f64::INFINITY; 5],
            DEFAULT_TOLERANCE,
            &mut rng,
        );
        assert_eq!(result.state, [5]);
        assert_eq!(result.cost, 5.0);
        assert_eq!(result.best, [0]);
        assert_eq!(result.best_cost, 0.0);
        assert_eq!(result.accepted_moves, 5);
        assert_eq!(result.improving_moves, 0);
        assert_eq!(result.iterations, 5);
    }

    #[test]
    fn test_stops_at_first_cold_temperature() {
        let mut rng = create_rng(Some(1));
        let schedule = vec![f64::INFINITY, f64::INFINITY, 0.0005, f64::INFINITY];
        let result = SaRunner::run_with_schedule(&UphillWalk, schedule, 0.001, &mut rng);
        assert_eq!(result.state, [2]);
        assert_eq!(result.iterations, 2);
        assert_eq!(result.final_temperature, Some(0.0005));
    }

    #[test]
    fn test_schedule_pulled_lazily() {
        let mut pulled = 0;
        let schedule = std::iter::from_fn(|| {
            pulled += 1;
            Some(if pulled <= 3 { 1.0 } else { 0.0 })
        });
        let mut rng = create_rng(Some(1));
        let _ = simulated_annealing_with_schedule(&UphillWalk, schedule, 0.001, &mut rng);
        assert_eq!(pulled, 4);
    }

    #[test]
    fn test_cold_schedule_returns_initial_state() {
        let mut rng = create_rng(Some(3));
        let mut replay = rng.clone();
        let result = SaRunner::run_with_schedule(&Flat, vec![0.001, 10.0], 0.001, &mut rng);
        assert_eq!(result.state, Flat.random_state(&mut replay));
        assert_eq!(result.iterations, 0);
        assert_eq!(result.accepted_moves, 0);
    }

    #[test]
    fn test_empty_schedule_returns_initial_state() {
        let mut rng = create_rng(Some(3));
        let result = SaRunner::run_with_schedule(&UphillWalk, Vec::new(), 0.001, &mut rng);
        assert_eq!(result.state, [0]);
        assert_eq!(result.initial_temperature, None);
        assert_eq!(result.final_temperature, None);
    }

    #[test]
    fn test_constant_cost_calibrates_to_zero_and_stops() {
        let mut rng = create_rng(Some(8));
        let mut replay = rng.clone();
        let state = simulated_annealing(&Flat, DEFAULT_TOLERANCE, &mut rng).unwrap();

        // Replay the calibration draws: one sizing state plus 10 * 4 samples.
        for _ in 0..41 {
            Flat.random_state(&mut replay);
        }
        assert_eq!(state, Flat.random_state(&mut replay));

        let result = SaRunner::run(&Flat, &SaConfig::default().with_seed(8)).unwrap();
        assert_eq!(result.initial_temperature, Some(0.0));
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_eight_queens_converges() {
        let queens = NQueens::new(8).unwrap();
        let solved = (0..20u64)
            .filter(|&seed| {
                let mut rng = create_rng(Some(seed));
                let state = simulated_annealing(&queens, DEFAULT_TOLERANCE, &mut rng).unwrap();
                queens.cost(&state) == 0.0
            })
            .count();
        assert!(solved >= 18, "solved only {solved}/20 runs");
    }

    #[test]
    fn test_runner_deterministic_with_seed() {
        let queens = NQueens::new(10).unwrap();
        let config = SaConfig::default().with_seed(42);
        let a = SaRunner::run(&queens, &config).unwrap();
        let b = SaRunner::run(&queens, &config).unwrap();
        assert_eq!(a.state, b.state);
        assert_eq!(a.iterations, b.iterations);
        assert_eq!(a.accepted_moves, b.accepted_moves);
    }

    #[test]
    fn test_free_function_deterministic_with_seed() {
        let queens = NQueens::new(8).unwrap();
        let a = simulated_annealing(&queens, DEFAULT_TOLERANCE, &mut create_rng(Some(5))).unwrap();
        let b = simulated_annealing(&queens, DEFAULT_TOLERANCE, &mut create_rng(Some(5))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_max_steps_limit() {
        let config = SaConfig::default()
            .with_initial_temperature(InitialTemperature::Fixed(1e9))
            .with_cooling(CoolingSchedule::Geometric { alpha: 0.999 })
            .with_max_steps(100)
            .with_seed(2);
        let result = SaRunner::run(&NQueens::default(), &config).unwrap();
        assert_eq!(result.iterations, 100);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SaConfig::default().with_tolerance(f64::NAN);
        assert!(SaRunner::run(&NQueens::default(), &config).is_err());
    }

    #[test]
    fn test_cost_history_non_increasing() {
        let config = SaConfig::default()
            .with_initial_temperature(InitialTemperature::Fixed(10.0))
            .with_cooling(CoolingSchedule::Geometric { alpha: 0.99 })
            .with_history_interval(10)
            .with_seed(42);
        let result = SaRunner::run(&NQueens::new(12).unwrap(), &config).unwrap();

        assert!(result.cost_history.len() > 2);
        for window in result.cost_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
        assert!(result.best_cost <= result.cost);
    }

    #[test]
    fn test_non_worsening_moves_consume_no_draw() {
        let mut rng = create_rng(Some(4));
        let mut untouched = rng.clone();
        assert!(metropolis_accept(0.0, 1e-9, &mut rng));
        assert!(metropolis_accept(-3.0, 0.0, &mut rng));
        assert_eq!(rng.random::<u64>(), untouched.random::<u64>());
    }

    proptest! {
        #[test]
        fn prop_metropolis_matches_draw(
            delta in 1e-6f64..100.0,
            temperature in 1e-6f64..100.0,
            seed in any::<u64>(),
        ) {
            let mut rng = create_rng(Some(seed));
            let mut replay = rng.clone();
            let u: f64 = replay.random();
            let accepted = metropolis_accept(delta, temperature, &mut rng);
            prop_assert_eq!(accepted, u < (-delta / temperature).exp());
        }

        #[test]
        fn prop_reported_cost_matches_state(seed in any::<u64>(), n in 4usize..12) {
            let queens = NQueens::new(n).unwrap();
            let config = SaConfig::default()
                .with_initial_temperature(InitialTemperature::Fixed(5.0))
                .with_cooling(CoolingSchedule::Geometric { alpha: 0.9 })
                .with_seed(seed);
            let result = SaRunner::run(&queens, &config).unwrap();
            prop_assert_eq!(result.cost, queens.cost(&result.state));
            prop_assert_eq!(result.best_cost, queens.cost(&result.best));
            prop_assert!(result.best_cost <= result.cost);
        }
    }
}
