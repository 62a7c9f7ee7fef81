//! Multi-threaded backend for large registers
//!
//! Work is split three ways on a dedicated rayon pool sized to the thread
//! budget:
//! 1. probabilities are computed over disjoint amplitude chunks,
//! 2. the cumulative table is built with a chunked prefix sum,
//! 3. draws are split into independent tasks, each with its own generator
//!    seeded from the state space's generator, writing a disjoint slice of
//!    the pre-sized output.
//!
//! The amplitude store and the prepared sampler are only read while the
//! pool runs, so no locking is needed beyond rayon's join.

use crate::backend::Backend;
use crate::config::StateSpaceConfig;
use crate::error::{Result, StateError};
use crate::sampling::Sampler;
use crate::simd::probabilities_simd;
use crate::state_space::{impl_core_delegation, StateCore, StateSpace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};

/// Amplitudes per parallel probability / prefix-sum chunk
const AMPLITUDE_CHUNK: usize = 1 << 14;

/// State space that spreads sampling across a rayon thread pool
pub struct ParallelStateSpace {
    core: StateCore,
    pool: ThreadPool,
}

impl ParallelStateSpace {
    /// Create a parallel state space with its own pool of `num_threads`
    ///
    /// # Errors
    /// `InvalidConfiguration` if `num_threads` is zero or the pool cannot be
    /// built
    pub fn new(num_qubits: usize, num_threads: usize, config: StateSpaceConfig) -> Result<Self> {
        let core = StateCore::new(num_qubits, num_threads, config)?;

        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("simq-sample-{}", i))
            .build()
            .map_err(|e| StateError::invalid_config(format!("failed to build thread pool: {}", e)))?;

        debug!(num_qubits, num_threads, "built sampling thread pool");

        Ok(Self { core, pool })
    }

    /// Number of draws handed to each task for a batch of `count`
    fn draws_per_task(&self, count: usize) -> usize {
        let threads = self.core.num_threads;
        let even_split = (count + threads - 1) / threads;
        even_split.max(self.core.config.min_draws_per_task)
    }
}

impl StateSpace for ParallelStateSpace {
    impl_core_delegation!();

    fn backend(&self) -> Backend {
        Backend::Parallel
    }

    fn probabilities(&self) -> Result<Vec<f64>> {
        let amplitudes = self.core.store.amplitudes()?;
        let mut probabilities = vec![0.0; amplitudes.len()];

        self.pool.install(|| {
            probabilities
                .par_chunks_mut(AMPLITUDE_CHUNK)
                .zip(amplitudes.par_chunks(AMPLITUDE_CHUNK))
                .for_each(|(dst, src)| probabilities_simd(src, dst));
        });

        Ok(probabilities)
    }

    fn sample_state(&mut self, count: usize, out: &mut Vec<u64>) -> Result<()> {
        if !self.core.begin_sample(count, out)? {
            return Ok(());
        }

        let probabilities = self.probabilities()?;
        let strategy = self.core.config.strategy;
        let sampler = self
            .pool
            .install(|| Sampler::new_parallel(&probabilities, strategy, AMPLITUDE_CHUNK))?;

        let per_task = self.draws_per_task(count);
        let tasks = (count + per_task - 1) / per_task;
        let seeds: Vec<u64> = (0..tasks).map(|_| self.core.rng.gen()).collect();

        out.resize(count, 0);
        self.pool.install(|| {
            out.par_chunks_mut(per_task)
                .zip(seeds.par_iter())
                .for_each(|(slice, &seed)| {
                    let mut rng = StdRng::seed_from_u64(seed);
                    sampler.fill(&mut rng, slice);
                });
        });

        trace!(backend = "parallel", count, tasks, strategy = ?strategy, "sampled state");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex32;

    fn config() -> StateSpaceConfig {
        StateSpaceConfig::new()
            .with_seed(2020)
            .with_min_draws_per_task(64)
    }

    #[test]
    fn test_zero_threads_rejected() {
        assert!(matches!(
            ParallelStateSpace::new(3, 0, config()),
            Err(StateError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_draws_per_task() {
        let state = ParallelStateSpace::new(2, 4, config()).unwrap();
        assert_eq!(state.draws_per_task(10), 64);
        assert_eq!(state.draws_per_task(1000), 250);
        assert_eq!(state.draws_per_task(1001), 251);
    }

    #[test]
    fn test_sample_uneven_split() {
        let mut state = ParallelStateSpace::new(2, 3, config()).unwrap();
        state.create_state().unwrap();
        state.set_amplitude(0, Complex32::new(0.0, 0.0)).unwrap();
        state.set_amplitude(2, Complex32::new(1.0, 0.0)).unwrap();

        let samples = state.sample(1001).unwrap();
        assert_eq!(samples.len(), 1001);
        assert!(samples.iter().all(|&s| s == 2));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let amplitudes = vec![Complex32::new(0.5, 0.0); 4];
        let mut runs = Vec::new();
        for _ in 0..2 {
            let mut state = ParallelStateSpace::new(2, 4, config()).unwrap();
            state.create_state().unwrap();
            state.set_amplitudes(&amplitudes).unwrap();
            runs.push(state.sample(5000).unwrap());
        }
        assert_eq!(runs[0], runs[1]);
    }
}
