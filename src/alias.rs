//! Constant-time sampling from discrete non-uniform distributions.
use super::*;
use rand::Rng;

/// An alias table built with Vose's method.
///
/// For a distribution over `k` outcomes the table holds `k` alias indices
/// and `k` acceptance thresholds. Sampling draws two uniforms: the first
/// selects a column, the second decides between the column itself and its
/// alias. Construction is O(k), sampling is O(1).
#[derive(Clone, Debug, PartialEq)]
pub struct AliasTable {
    aliases: Vec<usize>,
    thresholds: Vec<f64>,
}

impl AliasTable {
    /// Build the table from probabilities that already sum to one.
    ///
    /// # Arguments
    ///
    /// * `probabilities`: &[f64] - Non-negative probabilities summing to one
    ///   within a tolerance of 1e-6.
    pub fn from_probabilities(probabilities: &[f64]) -> Result<AliasTable> {
        if probabilities.is_empty() {
            return Err(
                "Cannot build an alias table over an empty set of outcomes.".to_string(),
            );
        }
        if probabilities
            .iter()
            .any(|probability| !probability.is_finite() || *probability < 0.0)
        {
            return Err(format!(
                "The given probabilities contain a negative or non-finite value: {:?}.",
                probabilities
            ));
        }
        let total: f64 = probabilities.iter().sum();
        if (total - 1.0).abs() > 1e-6 {
            return Err(format!(
                "The given probabilities sum to {} instead of one.",
                total
            ));
        }

        let number_of_outcomes = probabilities.len();
        let mut thresholds: Vec<f64> = probabilities
            .iter()
            .map(|probability| probability * number_of_outcomes as f64)
            .collect();
        let mut aliases: Vec<usize> = (0..number_of_outcomes).collect();

        let mut smaller = Vec::with_capacity(number_of_outcomes);
        let mut larger = Vec::with_capacity(number_of_outcomes);
        for (outcome, threshold) in thresholds.iter().enumerate() {
            if *threshold < 1.0 {
                smaller.push(outcome);
            } else {
                larger.push(outcome);
            }
        }

        // Repeatedly move probability mass from an over-full column to an
        // under-full one. Leftover columns are capped at exactly 1.0, which
        // absorbs the floating point error accumulated while scaling.
        loop {
            let (small, large) = match (smaller.pop(), larger.pop()) {
                (Some(small), Some(large)) => (small, large),
                (Some(small), None) => {
                    thresholds[small] = 1.0;
                    continue;
                }
                (None, Some(large)) => {
                    thresholds[large] = 1.0;
                    continue;
                }
                (None, None) => break,
            };
            aliases[small] = large;
            thresholds[large] = (thresholds[large] + thresholds[small]) - 1.0;
            if thresholds[large] < 1.0 {
                smaller.push(large);
            } else {
                larger.push(large);
            }
        }

        Ok(AliasTable {
            aliases,
            thresholds,
        })
    }

    /// Build the table from unnormalized non-negative weights.
    ///
    /// Fails when the total mass is zero or not finite, which is the case of
    /// a node whose outgoing distribution degenerated to nothing.
    ///
    /// # Arguments
    ///
    /// * `weights`: &[f64] - Unnormalized weights of the outcomes.
    pub fn from_weights(weights: &[f64]) -> Result<AliasTable> {
        let total: f64 = weights.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(format!(
                "Cannot normalize a distribution over {} outcomes with total mass {}.",
                weights.len(),
                total
            ));
        }
        let probabilities: Vec<f64> = weights.iter().map(|weight| weight / total).collect();
        AliasTable::from_probabilities(&probabilities)
    }

    /// Draw one outcome index. Costs exactly two RNG calls.
    ///
    /// # Arguments
    ///
    /// * `rng`: &mut impl Rng - The random number generator to draw from.
    pub fn sample(&self, rng: &mut impl Rng) -> usize {
        let number_of_outcomes = self.aliases.len();
        let column = ((rng.gen::<f64>() * number_of_outcomes as f64) as usize)
            .min(number_of_outcomes - 1);
        if rng.gen::<f64>() < self.thresholds[column] {
            column
        } else {
            self.aliases[column]
        }
    }

    /// Return the alias indices of the table.
    pub fn aliases(&self) -> &[usize] {
        &self.aliases
    }

    /// Return the acceptance thresholds of the table.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
