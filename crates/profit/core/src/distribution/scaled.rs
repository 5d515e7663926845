use super::{ExactModel, ModelParams};
use crate::error::ParameterError;

/// Exact convolution on a magnified count grid.
///
/// Small count ranges lose most of their resolution when rounded to integers,
/// so the delegate is built on `(min_count * scale, max_count * scale)` and
/// every total it reports is multiplied back by `factor = 1 / scale`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaledModel {
    params: ModelParams,
    delegate: ExactModel,
    factor: f64,
}

impl ScaledModel {
    /// Builds the delegate on the magnified grid.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidScale`] for a zero, negative or
    /// non-finite `scale` and propagates [`ParameterError::TableTooLarge`]
    /// from the delegate.
    pub fn new(
        params: ModelParams,
        scale: f64,
        max_table_len: usize,
    ) -> Result<Self, ParameterError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ParameterError::InvalidScale(scale));
        }
        let scaled = ModelParams::new(
            params.trials,
            params.probability,
            (params.min_count * scale).round(),
            (params.max_count * scale).round(),
        )?;
        let delegate = ExactModel::new(scaled, max_table_len)?;
        Ok(Self {
            params,
            delegate,
            factor: 1.0 / scale,
        })
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    pub fn delegate(&self) -> &ExactModel {
        &self.delegate
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn quantile(&self, p: f64) -> f64 {
        self.delegate.quantile(p) * self.factor
    }

    pub fn quantile_batch(&self, sorted: &[f64]) -> Vec<f64> {
        self.delegate
            .quantile_batch(sorted)
            .into_iter()
            .map(|count| count * self.factor)
            .collect()
    }

    pub fn model_min(&self) -> f64 {
        0.0
    }

    pub fn model_max(&self) -> f64 {
        self.delegate.max_value() * self.factor
    }
}
