//! Alias table for O(1) sampling from a discrete probability distribution
//!
//! Uses the alias method (Walker's algorithm) to sample from a discrete
//! distribution in O(1) time after O(n) setup.
//!
//! Reference: Walker, A. J. (1977). "An Efficient Method for Generating
//! Discrete Random Variables with General Distributions"

use crate::error::{Result, StateError};
use rand::Rng;

#[derive(Debug, Clone)]
pub struct AliasTable {
    /// Probability threshold for each index
    prob: Vec<f64>,

    /// Alias index for each index
    alias: Vec<usize>,
}

impl AliasTable {
    /// Create a new alias table from a probability distribution
    ///
    /// The probabilities need not sum to one; they are rescaled by their
    /// total.
    ///
    /// # Errors
    /// Returns `DegenerateDistribution` if the total is zero or not finite
    pub fn new(probabilities: &[f64]) -> Result<Self> {
        let n = probabilities.len();
        let total: f64 = probabilities.iter().sum();
        if n == 0 || !total.is_finite() || total <= 0.0 {
            return Err(StateError::DegenerateDistribution { total });
        }

        let mut prob = vec![0.0; n];
        let mut alias = vec![0; n];

        // Scale so the mean bucket holds exactly 1.0
        let scale = n as f64 / total;
        let mut scaled: Vec<f64> = probabilities.iter().map(|&p| p * scale).collect();

        // Separate into small and large
        let mut small = Vec::new();
        let mut large = Vec::new();
        for (i, &p) in scaled.iter().enumerate() {
            if p < 1.0 {
                small.push(i);
            } else {
                large.push(i);
            }
        }

        while let (Some(&s), Some(&l)) = (small.last(), large.last()) {
            small.pop();
            large.pop();

            prob[s] = scaled[s];
            alias[s] = l;

            scaled[l] = (scaled[l] + scaled[s]) - 1.0;

            if scaled[l] < 1.0 {
                small.push(l);
            } else {
                large.push(l);
            }
        }

        // Leftovers come from floating-point drift. A leftover that started
        // at zero must stay unreachable, so it defers to the heaviest outcome.
        let heaviest = probabilities
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map_or(0, |(i, _)| i);

        for l in large {
            prob[l] = 1.0;
        }
        for s in small {
            if probabilities[s] > 0.0 {
                prob[s] = 1.0;
            } else {
                prob[s] = 0.0;
                alias[s] = heaviest;
            }
        }

        Ok(Self { prob, alias })
    }

    /// Number of outcomes
    #[inline]
    pub fn len(&self) -> usize {
        self.prob.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prob.is_empty()
    }

    /// Sample an index from the distribution in O(1) time
    #[inline]
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let i = rng.gen_range(0..self.prob.len());
        if rng.gen::<f64>() < self.prob[i] {
            i
        } else {
            self.alias[i]
        }
    }
}
