use super::ModelParams;

/// Degenerate model: every trial drops exactly `min_count`.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedModel {
    params: ModelParams,
    value: f64,
}

impl FixedModel {
    pub fn new(params: ModelParams) -> Self {
        Self {
            value: params.min_count * params.trials,
            params,
        }
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// The only possible total, `min_count * trials`.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn quantile(&self, _p: f64) -> f64 {
        self.value
    }

    pub fn quantile_batch(&self, sorted: &[f64]) -> Vec<f64> {
        vec![self.value; sorted.len()]
    }

    pub fn cdf_at(&self, count: f64) -> f64 {
        if count >= self.value { 1.0 } else { 0.0 }
    }
}
