//! Born-rule sampling over a fixed probability table
//!
//! A [`Sampler`] is prepared once per `sample` call from the squared
//! magnitudes of the amplitude store, then used read-only to fill the output
//! buffer. Because it is `Sync`, the parallel backend shares one sampler
//! across worker threads, each writing a disjoint slice.

pub mod alias;
pub mod cdf;

pub use alias::AliasTable;
pub use cdf::CumulativeTable;

use crate::config::SamplingStrategy;
use crate::error::Result;
use rand::Rng;

/// Prepared sampler for one probability table
#[derive(Debug, Clone)]
pub enum Sampler {
    /// Binary search over the cumulative table
    Cdf(CumulativeTable),

    /// Walker alias table
    Alias(AliasTable),

    /// Sorted uniforms swept across the cumulative table
    SortedSweep(CumulativeTable),
}

impl Sampler {
    /// Prepare a sampler sequentially
    ///
    /// # Errors
    /// Returns `DegenerateDistribution` if the probabilities sum to zero or
    /// to a non-finite value
    pub fn new(probabilities: &[f64], strategy: SamplingStrategy) -> Result<Self> {
        Ok(match strategy {
            SamplingStrategy::Cdf => Sampler::Cdf(CumulativeTable::new(probabilities)?),
            SamplingStrategy::Alias => Sampler::Alias(AliasTable::new(probabilities)?),
            SamplingStrategy::SortedSweep => {
                Sampler::SortedSweep(CumulativeTable::new(probabilities)?)
            }
        })
    }

    /// Prepare a sampler using the current rayon pool for the prefix sum
    ///
    /// The alias table has no parallel construction and is built
    /// sequentially.
    pub fn new_parallel(
        probabilities: &[f64],
        strategy: SamplingStrategy,
        chunk_size: usize,
    ) -> Result<Self> {
        Ok(match strategy {
            SamplingStrategy::Cdf => {
                Sampler::Cdf(CumulativeTable::new_parallel(probabilities, chunk_size)?)
            }
            SamplingStrategy::Alias => Sampler::Alias(AliasTable::new(probabilities)?),
            SamplingStrategy::SortedSweep => {
                Sampler::SortedSweep(CumulativeTable::new_parallel(probabilities, chunk_size)?)
            }
        })
    }

    /// Strategy this sampler was prepared for
    pub fn strategy(&self) -> SamplingStrategy {
        match self {
            Sampler::Cdf(_) => SamplingStrategy::Cdf,
            Sampler::Alias(_) => SamplingStrategy::Alias,
            Sampler::SortedSweep(_) => SamplingStrategy::SortedSweep,
        }
    }

    /// Overwrite every slot of `out` with an independent draw
    pub fn fill<R: Rng + ?Sized>(&self, rng: &mut R, out: &mut [u64]) {
        match self {
            Sampler::Cdf(table) => {
                for slot in out.iter_mut() {
                    *slot = table.draw(rng) as u64;
                }
            }
            Sampler::Alias(table) => {
                for slot in out.iter_mut() {
                    *slot = table.draw(rng) as u64;
                }
            }
            Sampler::SortedSweep(table) => table.fill_sorted(rng, out),
        }
    }
}
