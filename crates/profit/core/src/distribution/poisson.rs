use statrs::distribution::{Discrete, Poisson};

use super::ModelParams;

/// Poisson approximation for rare drops over many trials.
///
/// Quantiles come from summing the PMF upward from zero. The sweep is bounded
/// by [`Self::cutoff`], the 0.999 quantile computed once at construction;
/// targets the sweep does not reach resolve to the cutoff.
#[derive(Clone, Debug, PartialEq)]
pub struct PoissonModel {
    params: ModelParams,
    mean: f64,
    poisson: Option<Poisson>,
    cutoff: f64,
}

impl PoissonModel {
    /// Probability whose quantile bounds every sweep.
    pub const CUTOFF_LUCK: f64 = 0.999;

    pub fn new(params: ModelParams) -> Self {
        let mean = params.mean();
        let poisson = if mean > 0.0 {
            Poisson::new(mean).ok()
        } else {
            None
        };
        let mut model = Self {
            params,
            mean,
            poisson,
            cutoff: 0.0,
        };
        if model.poisson.is_some() {
            let hard_bound = params.upper_bound().ceil();
            model.cutoff = model.sweep(&[Self::CUTOFF_LUCK], hard_bound)[0];
        }
        model
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn quantile(&self, p: f64) -> f64 {
        self.quantile_batch(&[p])[0]
    }

    /// One forward sweep serving every ascending target.
    pub fn quantile_batch(&self, sorted: &[f64]) -> Vec<f64> {
        self.sweep(sorted, self.cutoff)
    }

    fn sweep(&self, sorted: &[f64], bound: f64) -> Vec<f64> {
        let mut result = vec![bound; sorted.len()];
        let Some(poisson) = &self.poisson else {
            // Zero mean: nothing ever drops.
            result.fill(0.0);
            return result;
        };

        let mut index = 0;
        let mut cdf = 0.0;
        let mut count: u64 = 0;
        while (count as f64) < bound && index < sorted.len() {
            cdf += poisson.pmf(count);
            while index < sorted.len() && cdf >= sorted[index] {
                result[index] = count as f64;
                index += 1;
            }
            count += 1;
        }
        result
    }
}
