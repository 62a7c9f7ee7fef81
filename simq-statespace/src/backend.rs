//! Concrete state space backends
//!
//! All three share amplitude storage and sampling semantics:
//!
//! | Backend | Probability kernel | Draws |
//! |---------|--------------------|-------|
//! | Scalar | one amplitude at a time | calling thread |
//! | Simd | AVX2 / lane-blocked | calling thread |
//! | Parallel | lane-blocked, split across a rayon pool | split across the pool |

pub mod parallel;
pub mod scalar;
pub mod simd;

pub use parallel::ParallelStateSpace;
pub use scalar::ScalarStateSpace;
pub use simd::SimdStateSpace;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend strategy chosen by the factory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Small registers, single thread
    Scalar,

    /// Vectorized probability kernel, single thread
    Simd,

    /// Multi-threaded probability, prefix sum and draws
    Parallel,
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Scalar => "scalar",
            Backend::Simd => "simd",
            Backend::Parallel => "parallel",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
