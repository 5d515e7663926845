use crate::error::ParameterError;

/// Model-selection thresholds used by [`crate::select_model`].
///
/// The ladder is fixed (deterministic shortcut, then Poisson for rare events at
/// scale, Normal for everything else at scale, exact convolution for small
/// samples); only the cut points are tunable.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModelPolicy {
    /// Probabilities at or above `1 - fixed_epsilon` count as certain drops.
    pub fixed_epsilon: f64,
    /// Trial count from which the large-sample approximations are used.
    pub large_sample_trials: f64,
    /// Largest drop probability still treated as a rare event.
    pub poisson_max_probability: f64,
    /// Largest expected number of drops (`probability * trials`) for Poisson.
    pub poisson_max_expected_drops: f64,
    /// Small samples with `max_count` at or above this fall back to Normal.
    pub normal_min_count: f64,
    /// Small samples with `max_count` at or above this use exact convolution.
    pub exact_min_count: f64,
    /// Count range multiplier for the scaled convolution.
    pub scale: f64,
    /// Upper bound on convolution table length.
    pub max_table_len: usize,
}

impl ModelPolicy {
    pub const DEFAULT_FIXED_EPSILON: f64 = 1e-9;
    pub const DEFAULT_LARGE_SAMPLE_TRIALS: f64 = 20.0;
    pub const DEFAULT_POISSON_MAX_PROBABILITY: f64 = 0.01;
    pub const DEFAULT_POISSON_MAX_EXPECTED_DROPS: f64 = 10.0;
    pub const DEFAULT_NORMAL_MIN_COUNT: f64 = 100.0;
    pub const DEFAULT_EXACT_MIN_COUNT: f64 = 10.0;
    pub const DEFAULT_SCALE: f64 = 5.0;
    pub const DEFAULT_MAX_TABLE_LEN: usize = 1 << 16;

    pub fn new() -> Self {
        Self {
            fixed_epsilon: Self::DEFAULT_FIXED_EPSILON,
            large_sample_trials: Self::DEFAULT_LARGE_SAMPLE_TRIALS,
            poisson_max_probability: Self::DEFAULT_POISSON_MAX_PROBABILITY,
            poisson_max_expected_drops: Self::DEFAULT_POISSON_MAX_EXPECTED_DROPS,
            normal_min_count: Self::DEFAULT_NORMAL_MIN_COUNT,
            exact_min_count: Self::DEFAULT_EXACT_MIN_COUNT,
            scale: Self::DEFAULT_SCALE,
            max_table_len: Self::DEFAULT_MAX_TABLE_LEN,
        }
    }

    /// Checks the values a model constructor cannot recover from.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidScale`] unless `scale` is finite and
    /// positive.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ParameterError::InvalidScale(self.scale));
        }
        Ok(())
    }
}

impl Default for ModelPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_valid() {
        let policy = ModelPolicy::default();
        assert_eq!(policy.validate(), Ok(()));
        assert!(policy.exact_min_count < policy.normal_min_count);
    }

    #[test]
    fn zero_and_infinite_scales_are_rejected() {
        for scale in [0.0, -5.0, f64::INFINITY, f64::NAN] {
            let policy = ModelPolicy {
                scale,
                ..ModelPolicy::default()
            };
            assert!(matches!(policy.validate(), Err(ParameterError::InvalidScale(_))));
        }
    }
}
