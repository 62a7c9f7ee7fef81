//! Outcome histograms for sample batches

use std::collections::HashMap;

/// Counts per basis-state outcome over a batch of samples
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleCounts {
    /// Map from basis state index to count
    pub counts: HashMap<u64, usize>,

    /// Total number of samples
    pub shots: usize,
}

impl SampleCounts {
    /// Create an empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally a batch of sampled outcomes
    pub fn from_samples(samples: &[u64]) -> Self {
        let mut result = Self::new();
        for &outcome in samples {
            result.add_outcome(outcome);
        }
        result
    }

    /// Add a measurement outcome
    pub fn add_outcome(&mut self, outcome: u64) {
        *self.counts.entry(outcome).or_insert(0) += 1;
        self.shots += 1;
    }

    /// Get the count for a specific outcome
    pub fn get_count(&self, outcome: u64) -> usize {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Empirical frequency of an outcome (count / shots), 0 for an empty batch
    pub fn frequency(&self, outcome: u64) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.get_count(outcome) as f64 / self.shots as f64
    }

    /// Get all outcomes sorted by count (descending), ties by index
    pub fn sorted_outcomes(&self) -> Vec<(u64, usize)> {
        let mut outcomes: Vec<_> = self.counts.iter().map(|(&k, &v)| (k, v)).collect();
        outcomes.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        outcomes
    }

    /// Convert counts to bitstring format
    pub fn to_bitstring_counts(&self, num_qubits: usize) -> HashMap<String, usize> {
        self.counts
            .iter()
            .map(|(&outcome, &count)| (as_bitstring(outcome, num_qubits), count))
            .collect()
    }
}

/// Format an outcome as a bitstring, qubit 0 rightmost
pub fn as_bitstring(outcome: u64, num_qubits: usize) -> String {
    format!("{:0width$b}", outcome, width = num_qubits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sample_counts() {
        let mut samples = vec![0u64; 60];
        samples.extend(std::iter::repeat(1).take(40));
        let result = SampleCounts::from_samples(&samples);

        assert_eq!(result.shots, 100);
        assert_eq!(result.get_count(0), 60);
        assert_eq!(result.get_count(1), 40);
        assert_eq!(result.get_count(2), 0);
        assert_relative_eq!(result.frequency(0), 0.6);
        assert_relative_eq!(result.frequency(1), 0.4);

        let sorted = result.sorted_outcomes();
        assert_eq!(sorted[0], (0, 60));
        assert_eq!(sorted[1], (1, 40));
    }

    #[test]
    fn test_empty_counts() {
        let result = SampleCounts::from_samples(&[]);
        assert_eq!(result.shots, 0);
        assert_eq!(result.frequency(0), 0.0);
    }

    #[test]
    fn test_bitstring_conversion() {
        let result = SampleCounts::from_samples(&[0, 1, 2, 3, 3]);

        let bitstring_counts = result.to_bitstring_counts(2);
        assert_eq!(bitstring_counts.get("00"), Some(&1));
        assert_eq!(bitstring_counts.get("01"), Some(&1));
        assert_eq!(bitstring_counts.get("10"), Some(&1));
        assert_eq!(bitstring_counts.get("11"), Some(&2));
        assert_eq!(as_bitstring(5, 3), "101");
    }
}
