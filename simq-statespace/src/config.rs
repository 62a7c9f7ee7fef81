//! State space configuration

use crate::error::{Result, StateError};
use serde::{Deserialize, Serialize};

/// Largest register the dense store will allocate (2^30 amplitudes = 8 GiB)
pub const MAX_QUBITS: usize = 30;

/// Algorithm used to turn a probability table into outcome draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingStrategy {
    /// Cumulative distribution plus binary search, O(n) per draw
    #[default]
    Cdf,

    /// Walker's alias method, O(1) per draw after O(2^n) setup
    Alias,

    /// Sort all uniforms and walk the cumulative table once.
    /// Outcomes come back in ascending order (per task slice on the
    /// parallel backend).
    SortedSweep,
}

/// Configuration for state space construction and sampling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateSpaceConfig {
    /// Random number generator seed for reproducibility
    ///
    /// If None, the generator is seeded from OS entropy.
    ///
    /// Default: None
    pub seed: Option<u64>,

    /// Sampling algorithm
    ///
    /// Default: `SamplingStrategy::Cdf`
    pub strategy: SamplingStrategy,

    /// Minimum number of qubits to use the SIMD backend
    ///
    /// Smaller registers use the scalar backend; the vector kernels only
    /// pay off once there are a few full lanes to process.
    ///
    /// Default: 4
    pub simd_threshold: usize,

    /// Minimum number of qubits to use the parallel backend
    ///
    /// Only consulted when more than one thread is budgeted.
    ///
    /// Default: 12
    pub parallel_threshold: usize,

    /// Maximum number of qubits accepted by the factory
    ///
    /// Default: 30
    pub max_qubits: usize,

    /// Minimum number of draws handed to one parallel task
    ///
    /// Default: 4096
    pub min_draws_per_task: usize,
}

impl Default for StateSpaceConfig {
    fn default() -> Self {
        Self {
            seed: None,
            strategy: SamplingStrategy::Cdf,
            simd_threshold: 4,
            parallel_threshold: 12,
            max_qubits: MAX_QUBITS,
            min_draws_per_task: 4096,
        }
    }
}

impl StateSpaceConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_strategy(mut self, strategy: SamplingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_simd_threshold(mut self, qubits: usize) -> Self {
        self.simd_threshold = qubits;
        self
    }

    pub fn with_parallel_threshold(mut self, qubits: usize) -> Self {
        self.parallel_threshold = qubits;
        self
    }

    pub fn with_max_qubits(mut self, qubits: usize) -> Self {
        self.max_qubits = qubits;
        self
    }

    pub fn with_min_draws_per_task(mut self, draws: usize) -> Self {
        self.min_draws_per_task = draws;
        self
    }

    /// Check the configuration is usable
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `max_qubits` exceeds [`MAX_QUBITS`]
    /// or `min_draws_per_task` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_qubits > MAX_QUBITS {
            return Err(StateError::invalid_config(format!(
                "max_qubits {} exceeds the supported limit of {}",
                self.max_qubits, MAX_QUBITS
            )));
        }
        if self.min_draws_per_task == 0 {
            return Err(StateError::invalid_config(
                "min_draws_per_task must be at least 1",
            ));
        }
        Ok(())
    }
}
