use statrs::distribution::{ContinuousCDF, Normal};

use super::ModelParams;

/// Gaussian approximation of the total.
///
/// Per trial the count is `B * U` with `B ~ Bernoulli(p)` and
/// `U ~ Uniform[min, max]`, so
/// `Var = p * (max - min)² / 12 + p * (1 - p) * (max + min)² / 4`
/// and the total has `trials` times that variance.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalModel {
    params: ModelParams,
    mean: f64,
    std_dev: f64,
    // None when the variance is zero; quantiles collapse to the mean.
    normal: Option<Normal>,
}

impl NormalModel {
    /// Probability used for [`Self::model_min`].
    pub const MODEL_MIN_LUCK: f64 = 0.001;
    /// Probability used for [`Self::model_max`].
    pub const MODEL_MAX_LUCK: f64 = 0.999;

    pub fn new(params: ModelParams) -> Self {
        let ModelParams {
            trials,
            probability: p,
            min_count: min,
            max_count: max,
        } = params;
        let mean = params.mean();
        let variance = trials
            * (p * (max - min).powi(2) / 12.0 + p * (1.0 - p) * (max + min).powi(2) / 4.0);
        let std_dev = variance.max(0.0).sqrt();
        let normal = if std_dev > 0.0 {
            Normal::new(mean, std_dev).ok()
        } else {
            None
        };

        Self {
            params,
            mean,
            std_dev,
            normal,
        }
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Inverse Gaussian CDF, rounded to the nearest integer, never negative.
    pub fn quantile(&self, p: f64) -> f64 {
        let raw = match &self.normal {
            Some(normal) => normal.inverse_cdf(p),
            None => self.mean,
        };
        raw.round().max(0.0)
    }

    pub fn quantile_batch(&self, sorted: &[f64]) -> Vec<f64> {
        sorted.iter().map(|&p| self.quantile(p)).collect()
    }

    pub fn cdf_at(&self, count: f64) -> f64 {
        match &self.normal {
            Some(normal) => normal.cdf(count),
            None if count >= self.mean => 1.0,
            None => 0.0,
        }
    }

    pub fn model_min(&self) -> f64 {
        self.quantile(Self::MODEL_MIN_LUCK)
    }

    pub fn model_max(&self) -> f64 {
        self.quantile(Self::MODEL_MAX_LUCK)
    }
}
