//! Random generator construction shared by the runners.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates the generator used by a run.
///
/// A fixed seed makes every draw of the run reproducible: the initial
/// state, each neighbor and each Metropolis draw. Without a seed the
/// generator is seeded from the operating system.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
