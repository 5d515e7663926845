use super::{DropIncome, DropRate, DropSpec, DropTier, EvaluationMode};
use crate::buff::BuffVector;
use crate::config::ModelPolicy;
use crate::distribution::select_model_with;
use crate::env::{CatalogOracle, DropEntry, Env, ItemId, MarketOracle};
use crate::error::{ParameterError, ProfitError};

/// Values drop-table entries against the market.
///
/// Containers (items the catalog has an openable table for) are expanded:
/// the realized container count becomes the trial count of every inner
/// entry, inner entries are never buffed, and the container line carries the
/// summed income of its contents. A container already being expanded higher
/// up, including one found in its own table, is valued as a plain item.
pub struct DropCalculator<'a, C, M>
where
    C: CatalogOracle + ?Sized,
    M: MarketOracle + ?Sized,
{
    env: Env<'a, C, M>,
    policy: &'a ModelPolicy,
    mode: EvaluationMode,
}

impl<'a, C, M> DropCalculator<'a, C, M>
where
    C: CatalogOracle + ?Sized,
    M: MarketOracle + ?Sized,
{
    /// Creates a calculator.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::QuantileOutOfRange`] for a quantile outside `(0, 1)`.
    pub fn new(
        env: Env<'a, C, M>,
        policy: &'a ModelPolicy,
        mode: EvaluationMode,
    ) -> Result<Self, ParameterError> {
        Ok(Self {
            env,
            policy,
            mode: mode.validate()?,
        })
    }

    /// Count realized from `spec` under the current mode.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] for invalid spec values.
    pub fn realize(&self, spec: &DropSpec) -> Result<f64, ParameterError> {
        let params = spec.params()?;
        match self.mode {
            EvaluationMode::Average => Ok(params.mean()),
            EvaluationMode::Quantile(p) => {
                let model = select_model_with(
                    self.policy,
                    params.trials,
                    params.probability,
                    params.min_count,
                    params.max_count,
                )?;
                Ok(model.quantile(p))
            }
        }
    }

    /// Values one entry of `tier` rolled `trials` times.
    ///
    /// # Errors
    ///
    /// Fails on invalid entry values or when the environment lacks an oracle.
    pub fn evaluate(
        &self,
        tier: DropTier,
        entry: &DropEntry,
        trials: f64,
        buffs: &BuffVector,
    ) -> Result<DropIncome, ProfitError> {
        let origin = DropRate::from(entry);
        let spec = DropSpec::new(entry.item_id.clone(), tier.apply(origin, buffs), trials);
        self.evaluate_spec(tier, spec, origin, &mut Vec::new())
    }

    /// Values every entry of a table in order.
    ///
    /// # Errors
    ///
    /// See [`Self::evaluate`].
    pub fn evaluate_table(
        &self,
        tier: DropTier,
        entries: &[DropEntry],
        trials: f64,
        buffs: &BuffVector,
    ) -> Result<Vec<DropIncome>, ProfitError> {
        entries
            .iter()
            .map(|entry| self.evaluate(tier, entry, trials, buffs))
            .collect()
    }

    fn evaluate_spec(
        &self,
        tier: DropTier,
        spec: DropSpec,
        origin: DropRate,
        path: &mut Vec<ItemId>,
    ) -> Result<DropIncome, ProfitError> {
        let count = self.realize(&spec)?;

        if !path.contains(&spec.item_id)
            && let Some(table) = self
                .env
                .catalog()?
                .openable_drop_table(&spec.item_id)
                .filter(|table| !table.is_empty())
        {
            path.push(spec.item_id.clone());
            let mut contents = Vec::with_capacity(table.len());
            for entry in &table {
                let rate = DropRate::from(entry);
                let inner = DropSpec::new(entry.item_id.clone(), rate, count);
                contents.push(self.evaluate_spec(tier, inner, rate, path)?);
            }
            path.pop();

            let income: f64 = contents.iter().map(|line| line.income).sum();
            let price = if count > 0.0 { income / count } else { 0.0 };
            return Ok(DropIncome {
                item_id: spec.item_id,
                tier,
                count,
                price,
                income,
                origin,
                buffed: spec.rate,
                contents,
            });
        }

        let price = self.sell_price(&spec.item_id)?;
        Ok(DropIncome {
            item_id: spec.item_id,
            tier,
            count,
            price,
            income: count * price,
            origin,
            buffed: spec.rate,
            contents: Vec::new(),
        })
    }

    fn sell_price(&self, item: &ItemId) -> Result<f64, ProfitError> {
        let market = self.env.market()?;
        let price = market.sell_price(item, 0);
        if price == 0.0 && market.quote(item, 0).is_none() {
            tracing::warn!(item = %item, "no market price; valuing drop at zero");
        }
        Ok(price)
    }
}
