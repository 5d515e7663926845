use super::ModelParams;
use crate::error::ParameterError;

/// Exact distribution by repeated convolution.
///
/// Trials, `min_count` and `max_count` are rounded to whole numbers. The
/// probability mass over totals `0..=trials * max_count` is convolved once per
/// trial with the single-trial outcome, then stored as a cumulative table that
/// serves every query.
#[derive(Clone, Debug, PartialEq)]
pub struct ExactModel {
    params: ModelParams,
    trials: usize,
    min_count: usize,
    max_count: usize,
    cumulative: Vec<f64>,
}

impl ExactModel {
    /// Builds the cumulative table.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::TableTooLarge`] when `trials * max_count + 1`
    /// exceeds `max_table_len`.
    pub fn new(params: ModelParams, max_table_len: usize) -> Result<Self, ParameterError> {
        let trials = params.trials.round() as usize;
        let min_count = params.min_count.round() as usize;
        let max_count = params.max_count.round() as usize;

        let len = trials
            .checked_mul(max_count)
            .and_then(|n| n.checked_add(1))
            .unwrap_or(usize::MAX);
        if len > max_table_len {
            return Err(ParameterError::TableTooLarge {
                len,
                limit: max_table_len,
            });
        }

        let mass = convolve(trials, params.probability, min_count, max_count);
        let mut running = 0.0;
        let cumulative = mass
            .into_iter()
            .map(|m| {
                running += m;
                running
            })
            .collect();
        tracing::trace!(trials, min_count, max_count, len, "built convolution table");

        Ok(Self {
            params,
            trials,
            min_count,
            max_count,
            cumulative,
        })
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// `(trials, min_count, max_count)` after rounding.
    pub fn grid(&self) -> (usize, usize, usize) {
        (self.trials, self.min_count, self.max_count)
    }

    /// `P(total <= i)` for every total `i`.
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    /// Sum of the probability mass, one up to rounding error.
    pub fn total_mass(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Largest possible total, returned when no entry reaches a target.
    pub fn max_value(&self) -> f64 {
        (self.trials * self.max_count) as f64
    }

    pub fn quantile(&self, p: f64) -> f64 {
        // The table is non-decreasing, so the partition point is the first
        // index whose cumulative mass reaches `p`.
        let index = self.cumulative.partition_point(|&c| c < p);
        if index < self.cumulative.len() {
            index as f64
        } else {
            self.max_value()
        }
    }

    pub fn quantile_batch(&self, sorted: &[f64]) -> Vec<f64> {
        sorted.iter().map(|&p| self.quantile(p)).collect()
    }
}

/// Probability mass of the total after `trials` trials.
fn convolve(trials: usize, probability: f64, min_count: usize, max_count: usize) -> Vec<f64> {
    let width = (max_count - min_count + 1) as f64;
    let unit = probability / width;
    let miss = 1.0 - probability;

    let mut previous = vec![1.0];
    for _ in 0..trials {
        let mut current = vec![0.0; previous.len() + max_count];
        for (count, &mass) in previous.iter().enumerate() {
            if mass == 0.0 {
                continue;
            }
            current[count] += mass * miss;
            let share = mass * unit;
            for dropped in min_count..=max_count {
                current[count + dropped] += share;
            }
        }
        previous = current;
    }
    previous
}
