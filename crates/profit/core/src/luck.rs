//! Loot luck curves for openable containers.
//!
//! Opening a container `n` times yields a random haul. A [`LuckCurve`] maps
//! luck (the quantile probability) to the value of the haul at that luck, so
//! an observed haul can be placed on the curve with [`LuckCurve::observed_luck`].

use crate::config::ModelPolicy;
use crate::distribution::select_model_with;
use crate::env::{CatalogOracle, Env, ItemId, MarketOracle};
use crate::error::{ParameterError, ProfitError};

/// Spacing of curve points; points sit at `0.005, 0.010, ..., 0.995`.
pub const LUCK_STEP: f64 = 0.005;

/// Luck levels of a curve, ascending.
pub fn luck_levels() -> Vec<f64> {
    (1..)
        .map(|i| i as f64 * LUCK_STEP)
        .take_while(|lucky| *lucky < 1.0 - LUCK_STEP / 2.0)
        .collect()
}

/// Count and value of one content item at one luck level.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LuckItem {
    pub item_id: ItemId,
    pub count: f64,
    pub price: f64,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LuckPoint {
    pub lucky: f64,
    pub total: f64,
    pub items: Vec<LuckItem>,
}

/// Haul value as a function of luck for `openings` openings of one container.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LuckCurve {
    pub container: ItemId,
    pub openings: f64,
    pub points: Vec<LuckPoint>,
}

impl LuckCurve {
    /// Builds the curve of `container` with one model per content entry.
    ///
    /// Each model answers every luck level in one batch query. Contents are
    /// priced with the market's sell price. A container without a loot
    /// table yields a curve with no points.
    ///
    /// # Errors
    ///
    /// Fails on invalid loot table values, a negative opening count, or
    /// when the environment lacks an oracle.
    pub fn for_openable<C, M>(
        env: Env<'_, C, M>,
        container: &ItemId,
        openings: f64,
        policy: &ModelPolicy,
    ) -> Result<Self, ProfitError>
    where
        C: CatalogOracle + ?Sized,
        M: MarketOracle + ?Sized,
    {
        if !openings.is_finite() || openings < 0.0 {
            return Err(ParameterError::InvalidTrials(openings).into());
        }
        let catalog = env.catalog()?;
        let market = env.market()?;

        let Some(table) = catalog.openable_drop_table(container) else {
            tracing::warn!(container = %container, "not an openable container");
            return Ok(Self {
                container: container.clone(),
                openings,
                points: Vec::new(),
            });
        };

        let levels = luck_levels();
        let mut columns = Vec::with_capacity(table.len());
        for entry in &table {
            let model = select_model_with(
                policy,
                openings,
                entry.probability,
                entry.min_count,
                entry.max_count,
            )?;
            let price = market.sell_price(&entry.item_id, 0);
            columns.push((&entry.item_id, price, model.quantile_batch(&levels)));
        }

        let points = levels
            .iter()
            .enumerate()
            .map(|(i, &lucky)| {
                let items: Vec<LuckItem> = columns
                    .iter()
                    .map(|(item_id, price, counts)| LuckItem {
                        item_id: (*item_id).clone(),
                        count: counts[i],
                        price: *price,
                        value: counts[i] * price,
                    })
                    .collect();
                LuckPoint {
                    lucky,
                    total: items.iter().map(|item| item.value).sum(),
                    items,
                }
            })
            .collect();

        Ok(Self {
            container: container.clone(),
            openings,
            points,
        })
    }

    /// Luck of the first point whose total reaches `income`, or `0` when the
    /// haul beats every point.
    pub fn observed_luck(&self, income: f64) -> f64 {
        self.points
            .iter()
            .find(|point| point.total >= income)
            .map_or(0.0, |point| point.lucky)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
