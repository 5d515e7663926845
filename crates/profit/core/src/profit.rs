//! Action profit over a time window.
//!
//! [`compute_profit`] turns an action's catalog definition, a buff vector and
//! a duration into a [`ProfitReport`]: how many repetitions fit into the
//! window, what the inputs cost, what outputs and drops are worth.

use crate::buff::{BuffKind, BuffVector};
use crate::config::ModelPolicy;
use crate::drop::{DropCalculator, DropIncome, DropTier, EvaluationMode};
use crate::env::{ActionDetails, ActionId, CatalogOracle, DropEntry, Env, ItemId, MarketOracle};
use crate::error::{ParameterError, ProfitError};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Inputs of one profit computation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfitConfig {
    pub duration_hours: f64,
    pub buffs: BuffVector,
    pub mode: EvaluationMode,
    /// Character level in the action's skill. When set, levels above the
    /// requirement add efficiency and levels below it allow no repetitions.
    pub skill_level: Option<u32>,
}

impl ProfitConfig {
    pub fn new(duration_hours: f64) -> Self {
        Self {
            duration_hours,
            buffs: BuffVector::new(),
            mode: EvaluationMode::Average,
            skill_level: None,
        }
    }

    #[must_use]
    pub fn with_buffs(mut self, buffs: BuffVector) -> Self {
        self.buffs = buffs;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_skill_level(mut self, level: u32) -> Self {
        self.skill_level = Some(level);
        self
    }

    /// # Errors
    ///
    /// Rejects a non-positive duration and a quantile outside `(0, 1)`.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.duration_hours.is_finite() && self.duration_hours > 0.0) {
            return Err(ParameterError::NonPositiveDuration(self.duration_hours));
        }
        self.mode.validate()?;
        Ok(())
    }
}

/// Cost line of one consumed input.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputCost {
    pub item_id: ItemId,
    pub count: f64,
    pub price: f64,
    pub cost: f64,
}

/// Result of [`compute_profit`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfitReport {
    pub action: ActionId,
    /// Seconds per repetition before action speed.
    pub base_time_cost: f64,
    /// Seconds per repetition after action speed.
    pub time_cost: f64,
    pub repetitions: f64,
    pub cost: f64,
    pub income: f64,
    pub profit: f64,
    pub inputs: Vec<InputCost>,
    pub outputs: Vec<DropIncome>,
}

impl ProfitReport {
    /// Report of an action nothing is known about.
    pub fn empty(action: ActionId) -> Self {
        Self {
            action,
            base_time_cost: 0.0,
            time_cost: 0.0,
            repetitions: 0.0,
            cost: 0.0,
            income: 0.0,
            profit: 0.0,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Profit per hour of the window the report was computed for.
    pub fn profit_per_hour(&self, duration_hours: f64) -> f64 {
        if duration_hours > 0.0 {
            self.profit / duration_hours
        } else {
            0.0
        }
    }
}

/// Computes the profit of `action` with the default [`ModelPolicy`].
///
/// # Errors
///
/// See [`compute_profit_with`].
pub fn compute_profit<C, M>(
    env: Env<'_, C, M>,
    action: &ActionId,
    config: &ProfitConfig,
) -> Result<ProfitReport, ProfitError>
where
    C: CatalogOracle + ?Sized,
    M: MarketOracle + ?Sized,
{
    compute_profit_with(env, action, config, &ModelPolicy::default())
}

/// Computes the profit of `action` over `config.duration_hours`.
///
/// Unknown actions produce [`ProfitReport::empty`] and a warning.
///
/// # Errors
///
/// Returns [`ProfitError::Parameter`] for invalid configuration or catalog
/// values, and [`ProfitError::Oracle`] when the environment lacks an oracle.
pub fn compute_profit_with<C, M>(
    env: Env<'_, C, M>,
    action: &ActionId,
    config: &ProfitConfig,
    policy: &ModelPolicy,
) -> Result<ProfitReport, ProfitError>
where
    C: CatalogOracle + ?Sized,
    M: MarketOracle + ?Sized,
{
    let span = tracing::info_span!(
        "compute_profit",
        action = %action,
        hours = config.duration_hours
    );
    let _enter = span.enter();

    config.validate()?;
    let catalog = env.catalog()?;
    let market = env.market()?;

    let Some(details) = catalog.action_details(action) else {
        tracing::warn!(action = %action, "unknown action; reporting zero profit");
        return Ok(ProfitReport::empty(action.clone()));
    };

    let time_cost = details.base_time_cost / config.buffs.multiplier(BuffKind::ActionSpeed);
    let buffs = effective_buffs(&details, config);
    let repetitions = match &buffs {
        None => 0.0,
        Some(_) if !(time_cost.is_finite() && time_cost > 0.0) => {
            tracing::warn!(action = %action, time_cost, "action has no positive duration");
            0.0
        }
        Some(buffs) => {
            config.duration_hours * SECONDS_PER_HOUR / time_cost
                * buffs.multiplier(BuffKind::Efficiency)
        }
    };
    let buffs = buffs.unwrap_or_default();

    let mut inputs = Vec::with_capacity(details.inputs.len());
    let mut cost = 0.0;
    for input in &details.inputs {
        let count = input.count * repetitions;
        let price = market.buy_price(&input.item_id, 0);
        let line_cost = count * price;
        cost += line_cost;
        inputs.push(InputCost {
            item_id: input.item_id.clone(),
            count,
            price,
            cost: line_cost,
        });
    }

    let calculator = DropCalculator::new(env, policy, config.mode)?;
    let mut outputs = Vec::new();
    for output in &details.outputs {
        let entry = DropEntry::new(output.item_id.clone(), 1.0, output.count, output.count);
        outputs.push(calculator.evaluate(DropTier::Output, &entry, repetitions, &buffs)?);
    }
    for (tier, table) in [
        (DropTier::Common, &details.common_drops),
        (DropTier::Essence, &details.essence_drops),
        (DropTier::Rare, &details.rare_drops),
    ] {
        outputs.extend(calculator.evaluate_table(tier, table, repetitions, &buffs)?);
    }
    let income: f64 = outputs.iter().map(|line| line.income).sum();

    tracing::debug!(repetitions, cost, income, "profit computed");

    Ok(ProfitReport {
        action: action.clone(),
        base_time_cost: details.base_time_cost,
        time_cost,
        repetitions,
        cost,
        income,
        profit: income - cost,
        inputs,
        outputs,
    })
}

/// Buffs with the level bonus folded in, or `None` when the character cannot
/// perform the action at all.
fn effective_buffs(details: &ActionDetails, config: &ProfitConfig) -> Option<BuffVector> {
    match config.skill_level {
        None => Some(config.buffs.clone()),
        Some(level) if level < details.level_requirement => {
            tracing::warn!(
                action = %details.id,
                level,
                requirement = details.level_requirement,
                "skill level below requirement; no repetitions"
            );
            None
        }
        Some(level) => Some(
            config
                .buffs
                .clone()
                .with_level_bonus(level, details.level_requirement),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buff::BuffSource;
    use crate::env::{CatalogSnapshot, ItemCount, MarketSnapshot, Quote, UNAFFORDABLE_PRICE};

    fn brew() -> ActionDetails {
        ActionDetails::new("brew", 10.0)
            .with_level_requirement(20)
            .with_input(ItemCount::new("leaf", 2.0))
            .with_input(ItemCount::new("vial", 1.0))
            .with_output(ItemCount::new("tea", 1.0))
    }

    fn fixtures() -> (CatalogSnapshot, MarketSnapshot) {
        let catalog = CatalogSnapshot::new().with_action(brew());
        let market = MarketSnapshot::new()
            .with_quote("leaf", 0, Quote::new(5.0, 4.0))
            .with_quote("tea", 0, Quote::new(60.0, 50.0));
        (catalog, market)
    }

    #[test]
    fn speed_and_efficiency_shape_repetitions() {
        let (catalog, market) = fixtures();
        let buffs = BuffVector::new()
            .with(BuffSource::Equipment, BuffKind::ActionSpeed, 0.25)
            .with(BuffSource::Tea, BuffKind::Efficiency, 0.1);
        let config = ProfitConfig::new(1.0).with_buffs(buffs);

        let report =
            compute_profit(Env::with_all(&catalog, &market), &ActionId::from("brew"), &config)
                .unwrap();
        assert!((report.time_cost - 8.0).abs() < 1e-12);
        assert!((report.repetitions - 495.0).abs() < 1e-9);
    }

    #[test]
    fn unbuyable_input_uses_sentinel() {
        let (catalog, market) = fixtures();
        let report = compute_profit(
            Env::with_all(&catalog, &market),
            &ActionId::from("brew"),
            &ProfitConfig::new(1.0),
        )
        .unwrap();

        let vial = &report.inputs[1];
        assert_eq!(vial.price, UNAFFORDABLE_PRICE);
        assert!(report.profit < 0.0);
        // leaf: 720 * 5
        assert!((report.inputs[0].cost - 3600.0).abs() < 1e-6);
    }

    #[test]
    fn level_bonus_and_requirement() {
        let (catalog, market) = fixtures();
        let env = Env::with_all(&catalog, &market);
        let brew = ActionId::from("brew");

        let above =
            compute_profit(env, &brew, &ProfitConfig::new(1.0).with_skill_level(30)).unwrap();
        assert!((above.repetitions - 396.0).abs() < 1e-9);

        let below =
            compute_profit(env, &brew, &ProfitConfig::new(1.0).with_skill_level(10)).unwrap();
        assert_eq!(below.repetitions, 0.0);
        assert_eq!(below.cost, 0.0);
        assert_eq!(below.income, 0.0);
    }

    #[test]
    fn unknown_action_is_an_empty_report() {
        let (catalog, market) = fixtures();
        let report = compute_profit(
            Env::with_all(&catalog, &market),
            &ActionId::from("nope"),
            &ProfitConfig::new(2.0),
        )
        .unwrap();
        assert_eq!(report, ProfitReport::empty(ActionId::from("nope")));
    }

    #[test]
    fn configuration_is_validated() {
        let (catalog, market) = fixtures();
        let env = Env::with_all(&catalog, &market);
        let brew = ActionId::from("brew");

        assert_eq!(
            compute_profit(env, &brew, &ProfitConfig::new(0.0)),
            Err(ProfitError::Parameter(ParameterError::NonPositiveDuration(0.0)))
        );
        assert!(matches!(
            compute_profit(
                env,
                &brew,
                &ProfitConfig::new(1.0).with_mode(EvaluationMode::Quantile(0.0))
            ),
            Err(ProfitError::Parameter(ParameterError::QuantileOutOfRange(_)))
        ));
    }

    #[test]
    fn per_hour_profit() {
        let mut report = ProfitReport::empty(ActionId::from("x"));
        report.profit = 120.0;
        assert_eq!(report.profit_per_hour(4.0), 30.0);
        assert_eq!(report.profit_per_hour(0.0), 0.0);
    }
}
