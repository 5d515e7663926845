//! Distribution of the total drop count over repeated trials.
//!
//! Each trial independently drops with `probability`; a drop yields an integer
//! count uniformly from `[min_count, max_count]`. [`Distribution`] answers
//! quantile ("lucky") and CDF queries about the sum over `trials` trials.
//!
//! ## Variants
//!
//! | Variant | Used for | Cost |
//! |---|---|---|
//! | [`FixedModel`] | certain drop, single count | O(1) |
//! | [`NormalModel`] | large samples | O(1) per query |
//! | [`PoissonModel`] | rare events at scale | one PMF sweep per batch |
//! | [`ExactModel`] | small samples | O(trials² × max_count) once |
//! | [`ScaledModel`] | small samples, small ranges | as exact, on a ×5 grid |
//!
//! [`select_model`] picks the variant; every variant can also be built directly.

mod exact;
mod factory;
mod fixed;
mod normal;
mod poisson;
mod scaled;

pub use exact::ExactModel;
pub use factory::{select_model, select_model_with};
pub use fixed::FixedModel;
pub use normal::NormalModel;
pub use poisson::PoissonModel;
pub use scaled::ScaledModel;

use crate::error::ParameterError;

/// Smallest probability accepted by quantile queries; inputs are clamped to
/// `[QUANTILE_EPSILON, 1 - QUANTILE_EPSILON]`.
pub const QUANTILE_EPSILON: f64 = 1e-12;

/// Clamps a quantile argument into the open unit interval; NaN maps to the lower bound.
#[inline]
pub fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        return QUANTILE_EPSILON;
    }
    p.clamp(QUANTILE_EPSILON, 1.0 - QUANTILE_EPSILON)
}

/// Validated `(trials, probability, min_count, max_count)` tuple.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelParams {
    pub trials: f64,
    pub probability: f64,
    pub min_count: f64,
    pub max_count: f64,
}

impl ModelParams {
    /// Validates the raw inputs.
    ///
    /// # Errors
    ///
    /// Rejects negative or non-finite trials and counts, probabilities outside
    /// `[0, 1]`, and `min_count > max_count`.
    pub fn new(
        trials: f64,
        probability: f64,
        min_count: f64,
        max_count: f64,
    ) -> Result<Self, ParameterError> {
        if !trials.is_finite() || trials < 0.0 {
            return Err(ParameterError::InvalidTrials(trials));
        }
        if !(0.0..=1.0).contains(&probability) {
            return Err(ParameterError::ProbabilityOutOfRange(probability));
        }
        for count in [min_count, max_count] {
            if !count.is_finite() || count < 0.0 {
                return Err(ParameterError::InvalidCount(count));
            }
        }
        if min_count > max_count {
            return Err(ParameterError::InvertedCountRange {
                min: min_count,
                max: max_count,
            });
        }
        Ok(Self {
            trials,
            probability,
            min_count,
            max_count,
        })
    }

    /// `trials * probability * (min_count + max_count) / 2`.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.trials * self.probability * (self.min_count + self.max_count) / 2.0
    }

    /// Largest possible total, `trials * max_count`.
    #[inline]
    pub fn upper_bound(&self) -> f64 {
        self.trials * self.max_count
    }
}

/// Result of a CDF query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CdfValue {
    Supported(f64),
    /// The model cannot answer CDF queries.
    Unsupported,
}

impl CdfValue {
    pub fn supported(self) -> Option<f64> {
        match self {
            Self::Supported(v) => Some(v),
            Self::Unsupported => None,
        }
    }
}

/// Which strategy a [`Distribution`] uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ModelKind {
    AlwaysFixed,
    Normal,
    Poisson,
    ExactConvolution,
    ScaledExactConvolution,
}

/// Total-drop-count distribution.
#[derive(Clone, Debug, PartialEq)]
pub enum Distribution {
    AlwaysFixed(FixedModel),
    Normal(NormalModel),
    Poisson(PoissonModel),
    Exact(ExactModel),
    Scaled(ScaledModel),
}

impl Distribution {
    pub fn kind(&self) -> ModelKind {
        match self {
            Self::AlwaysFixed(_) => ModelKind::AlwaysFixed,
            Self::Normal(_) => ModelKind::Normal,
            Self::Poisson(_) => ModelKind::Poisson,
            Self::Exact(_) => ModelKind::ExactConvolution,
            Self::Scaled(_) => ModelKind::ScaledExactConvolution,
        }
    }

    /// Parameters the model was requested with.
    pub fn params(&self) -> &ModelParams {
        match self {
            Self::AlwaysFixed(m) => m.params(),
            Self::Normal(m) => m.params(),
            Self::Poisson(m) => m.params(),
            Self::Exact(m) => m.params(),
            Self::Scaled(m) => m.params(),
        }
    }

    /// Smallest count `c` with `P(total <= c) >= p`.
    pub fn quantile(&self, p: f64) -> f64 {
        let p = clamp_probability(p);
        match self {
            Self::AlwaysFixed(m) => m.quantile(p),
            Self::Normal(m) => m.quantile(p),
            Self::Poisson(m) => m.quantile(p),
            Self::Exact(m) => m.quantile(p),
            Self::Scaled(m) => m.quantile(p),
        }
    }

    /// Quantiles for ascending probabilities; the result is ascending as well.
    pub fn quantile_batch(&self, sorted: &[f64]) -> Vec<f64> {
        let clamped: Vec<f64> = sorted.iter().copied().map(clamp_probability).collect();
        match self {
            Self::AlwaysFixed(m) => m.quantile_batch(&clamped),
            Self::Normal(m) => m.quantile_batch(&clamped),
            Self::Poisson(m) => m.quantile_batch(&clamped),
            Self::Exact(m) => m.quantile_batch(&clamped),
            Self::Scaled(m) => m.quantile_batch(&clamped),
        }
    }

    /// Analytic mean, `trials * probability * (min_count + max_count) / 2`.
    pub fn expected_value(&self) -> f64 {
        self.params().mean()
    }

    /// `P(total <= count)` when the model supports it.
    ///
    /// Poisson and both convolution variants report [`CdfValue::Unsupported`].
    pub fn cdf_at(&self, count: f64) -> CdfValue {
        match self {
            Self::AlwaysFixed(m) => CdfValue::Supported(m.cdf_at(count)),
            Self::Normal(m) => CdfValue::Supported(m.cdf_at(count)),
            Self::Poisson(_) | Self::Exact(_) | Self::Scaled(_) => CdfValue::Unsupported,
        }
    }

    /// Lower end of the range the model considers plausible.
    pub fn model_min(&self) -> f64 {
        match self {
            Self::AlwaysFixed(m) => m.value(),
            Self::Normal(m) => m.model_min(),
            Self::Poisson(_) | Self::Exact(_) => 0.0,
            Self::Scaled(m) => m.model_min(),
        }
    }

    /// Upper end of the range the model considers plausible.
    pub fn model_max(&self) -> f64 {
        match self {
            Self::AlwaysFixed(m) => m.value(),
            Self::Normal(m) => m.model_max(),
            Self::Poisson(m) => m.cutoff(),
            Self::Exact(m) => m.max_value(),
            Self::Scaled(m) => m.model_max(),
        }
    }
}
