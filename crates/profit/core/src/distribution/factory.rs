use super::{
    Distribution, ExactModel, FixedModel, ModelParams, NormalModel, PoissonModel, ScaledModel,
};
use crate::config::ModelPolicy;
use crate::error::ParameterError;

/// Selects a distribution model with the default [`ModelPolicy`].
///
/// # Errors
///
/// Returns a [`ParameterError`] for invalid inputs.
pub fn select_model(
    trials: f64,
    probability: f64,
    min_count: f64,
    max_count: f64,
) -> Result<Distribution, ParameterError> {
    select_model_with(&ModelPolicy::default(), trials, probability, min_count, max_count)
}

/// Selects a distribution model.
///
/// Decision ladder, first match wins:
/// 1. certain drop with a single count: [`FixedModel`]
/// 2. large sample, rare event with few expected drops: [`PoissonModel`]
/// 3. large sample otherwise: [`NormalModel`]
/// 4. small sample with a huge count range: [`NormalModel`]
/// 5. small sample with a moderate count range: [`ExactModel`]
/// 6. small sample with a small count range: [`ScaledModel`]
///
/// # Errors
///
/// Returns a [`ParameterError`] for invalid inputs or an invalid `policy`, or
/// when a convolution table would exceed `policy.max_table_len`.
pub fn select_model_with(
    policy: &ModelPolicy,
    trials: f64,
    probability: f64,
    min_count: f64,
    max_count: f64,
) -> Result<Distribution, ParameterError> {
    policy.validate()?;
    let params = ModelParams::new(trials, probability, min_count, max_count)?;

    let model = if probability >= 1.0 - policy.fixed_epsilon && min_count == max_count {
        Distribution::AlwaysFixed(FixedModel::new(params))
    } else if trials >= policy.large_sample_trials {
        if probability <= policy.poisson_max_probability
            && probability * trials <= policy.poisson_max_expected_drops
        {
            Distribution::Poisson(PoissonModel::new(params))
        } else {
            Distribution::Normal(NormalModel::new(params))
        }
    } else if max_count >= policy.normal_min_count {
        Distribution::Normal(NormalModel::new(params))
    } else if max_count >= policy.exact_min_count {
        Distribution::Exact(ExactModel::new(params, policy.max_table_len)?)
    } else {
        Distribution::Scaled(ScaledModel::new(
            params,
            policy.scale,
            policy.max_table_len,
        )?)
    };

    tracing::debug!(
        kind = %model.kind(),
        trials,
        probability,
        min_count,
        max_count,
        "selected distribution model"
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::ModelKind;

    fn kind(trials: f64, p: f64, min: f64, max: f64) -> ModelKind {
        select_model(trials, p, min, max).unwrap().kind()
    }

    #[test]
    fn zero_scale_policy_is_rejected_before_selection() {
        let policy = ModelPolicy {
            scale: 0.0,
            ..ModelPolicy::default()
        };
        assert_eq!(
            select_model_with(&policy, 5.0, 0.3, 1.0, 5.0),
            Err(ParameterError::InvalidScale(0.0))
        );
    }

    #[test]
    fn documented_ladder() {
        assert_eq!(kind(10.0, 1.0, 2.0, 2.0), ModelKind::AlwaysFixed);
        assert_eq!(kind(50.0, 0.005, 1.0, 1.0), ModelKind::Poisson);
        assert_eq!(kind(50.0, 0.5, 1.0, 1.0), ModelKind::Normal);
        assert_eq!(kind(5.0, 0.3, 1.0, 150.0), ModelKind::Normal);
        assert_eq!(kind(5.0, 0.3, 1.0, 10.0), ModelKind::ExactConvolution);
        assert_eq!(kind(5.0, 0.3, 1.0, 5.0), ModelKind::ScaledExactConvolution);
    }

    #[test]
    fn certain_drop_with_range_is_not_fixed() {
        assert_eq!(kind(50.0, 1.0, 1.0, 3.0), ModelKind::Normal);
    }

    #[test]
    fn rare_but_plentiful_drops_use_normal() {
        // probability * trials = 50 > 10
        assert_eq!(kind(5000.0, 0.01, 1.0, 1.0), ModelKind::Normal);
    }

    #[test]
    fn tuned_policy_changes_cut_points() {
        let policy = ModelPolicy {
            exact_min_count: 20.0,
            ..ModelPolicy::default()
        };
        let model = select_model_with(&policy, 5.0, 0.3, 1.0, 10.0).unwrap();
        assert_eq!(model.kind(), ModelKind::ScaledExactConvolution);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(matches!(
            select_model(-3.0, 0.5, 1.0, 1.0),
            Err(ParameterError::InvalidTrials(_))
        ));
    }
}
