//! Cumulative probability table with inverse-transform lookup

use crate::error::{Result, StateError};
use rand::Rng;
use rayon::prelude::*;

/// Running sums of a probability table
///
/// `cumulative[i]` is Σ_{j ≤ i} pⱼ. Draws pick a uniform `u ∈ [0, total)`
/// and return the first index whose running sum is strictly greater than
/// `u`, so a draw landing exactly on a boundary belongs to the upper bucket
/// and zero-probability indices are never returned.
#[derive(Debug, Clone)]
pub struct CumulativeTable {
    cumulative: Vec<f64>,
    total: f64,
    /// Highest index with non-zero probability
    last_nonzero: usize,
}

impl CumulativeTable {
    /// Build the table sequentially
    ///
    /// # Errors
    /// Returns `DegenerateDistribution` if the probabilities sum to zero or
    /// to a non-finite value
    pub fn new(probabilities: &[f64]) -> Result<Self> {
        let mut running = 0.0;
        let cumulative = probabilities
            .iter()
            .map(|&p| {
                running += p;
                running
            })
            .collect();
        Self::finish(cumulative)
    }

    /// Build the table with a parallel prefix sum on the current rayon pool
    ///
    /// Each chunk of `chunk_size` entries is summed locally, chunk totals are
    /// scanned sequentially, and the offsets are added back in parallel.
    pub fn new_parallel(probabilities: &[f64], chunk_size: usize) -> Result<Self> {
        let chunk_size = chunk_size.max(1);
        let mut cumulative = probabilities.to_vec();

        let chunk_totals: Vec<f64> = cumulative
            .par_chunks_mut(chunk_size)
            .map(|chunk| {
                let mut running = 0.0;
                for p in chunk.iter_mut() {
                    running += *p;
                    *p = running;
                }
                running
            })
            .collect();

        let mut offsets = Vec::with_capacity(chunk_totals.len());
        let mut running = 0.0;
        for total in &chunk_totals {
            offsets.push(running);
            running += total;
        }

        cumulative
            .par_chunks_mut(chunk_size)
            .zip(offsets.par_iter())
            .skip(1)
            .for_each(|(chunk, &offset)| {
                for c in chunk.iter_mut() {
                    *c += offset;
                }
            });

        Self::finish(cumulative)
    }

    fn finish(cumulative: Vec<f64>) -> Result<Self> {
        let total = cumulative.last().copied().unwrap_or(0.0);
        if !total.is_finite() || total <= 0.0 {
            return Err(StateError::DegenerateDistribution { total });
        }

        let last_nonzero = cumulative.partition_point(|&c| c < total);

        Ok(Self {
            cumulative,
            total,
            last_nonzero,
        })
    }

    /// Sum of all probabilities
    #[inline]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Number of outcomes
    #[inline]
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Find the outcome whose interval contains `u` (0 ≤ u < total)
    ///
    /// Values at or above `total` (possible after rounding `rand * total`)
    /// map to the last outcome with non-zero probability.
    #[inline]
    pub fn locate(&self, u: f64) -> usize {
        self.cumulative
            .partition_point(|&c| c <= u)
            .min(self.last_nonzero)
    }

    /// Draw one outcome
    #[inline]
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.locate(rng.gen::<f64>() * self.total)
    }

    /// Fill `out` by drawing all uniforms, sorting them and walking the
    /// table once. The result is in ascending order within `out`.
    pub fn fill_sorted<R: Rng + ?Sized>(&self, rng: &mut R, out: &mut [u64]) {
        let mut draws: Vec<f64> = (0..out.len())
            .map(|_| rng.gen::<f64>() * self.total)
            .collect();
        draws.sort_unstable_by(f64::total_cmp);

        let mut index = 0;
        for (slot, u) in out.iter_mut().zip(draws) {
            while index < self.last_nonzero && self.cumulative[index] <= u {
                index += 1;
            }
            *slot = index as u64;
        }
    }
}
