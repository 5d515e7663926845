use std::sync::Arc;

use crate::env::{ActionId, ItemId};

/// Read-only game catalog: action definitions and openable loot tables.
pub trait CatalogOracle: Send + Sync {
    /// Returns the definition of `action`, or `None` when the catalog does not know it.
    fn action_details(&self, action: &ActionId) -> Option<ActionDetails>;

    /// Returns the loot table of an openable container, or `None` for ordinary items.
    fn openable_drop_table(&self, item: &ItemId) -> Option<Vec<DropEntry>>;

    /// True when `item` has a loot table of its own.
    fn is_openable(&self, item: &ItemId) -> bool {
        self.openable_drop_table(item)
            .is_some_and(|drops| !drops.is_empty())
    }
}

impl<T: CatalogOracle + ?Sized> CatalogOracle for &T {
    fn action_details(&self, action: &ActionId) -> Option<ActionDetails> {
        (**self).action_details(action)
    }

    fn openable_drop_table(&self, item: &ItemId) -> Option<Vec<DropEntry>> {
        (**self).openable_drop_table(item)
    }
}

impl<T: CatalogOracle + ?Sized> CatalogOracle for Arc<T> {
    fn action_details(&self, action: &ActionId) -> Option<ActionDetails> {
        (**self).action_details(action)
    }

    fn openable_drop_table(&self, item: &ItemId) -> Option<Vec<DropEntry>> {
        (**self).openable_drop_table(item)
    }
}

/// Item id with a per-repetition count.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemCount {
    pub item_id: ItemId,
    pub count: f64,
}

impl ItemCount {
    pub fn new(item_id: impl Into<ItemId>, count: f64) -> Self {
        Self {
            item_id: item_id.into(),
            count,
        }
    }
}

/// One catalog drop-table row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropEntry {
    pub item_id: ItemId,
    #[cfg_attr(feature = "serde", serde(alias = "drop_rate"))]
    pub probability: f64,
    pub min_count: f64,
    pub max_count: f64,
}

impl DropEntry {
    pub fn new(
        item_id: impl Into<ItemId>,
        probability: f64,
        min_count: f64,
        max_count: f64,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            probability,
            min_count,
            max_count,
        }
    }

    /// Expected number of items from one roll of this entry.
    #[inline]
    pub fn expected_count(&self) -> f64 {
        self.probability * (self.min_count + self.max_count) / 2.0
    }
}

/// Catalog definition of a repeatable action.
///
/// # Drop tiers
///
/// - `outputs`: fixed products of every repetition, never buffed
/// - `common_drops`: count range scaled by gathering
/// - `essence_drops`: probability scaled by essence find
/// - `rare_drops`: probability scaled by rare find
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionDetails {
    pub id: ActionId,
    /// Seconds per repetition before action speed.
    pub base_time_cost: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub level_requirement: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inputs: Vec<ItemCount>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub outputs: Vec<ItemCount>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub common_drops: Vec<DropEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub essence_drops: Vec<DropEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rare_drops: Vec<DropEntry>,
}

impl ActionDetails {
    /// Creates an action with no inputs, outputs or drops.
    pub fn new(id: impl Into<ActionId>, base_time_cost: f64) -> Self {
        Self {
            id: id.into(),
            base_time_cost,
            level_requirement: 0,
            inputs: Vec::new(),
            outputs: Vec::new(),
            common_drops: Vec::new(),
            essence_drops: Vec::new(),
            rare_drops: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_level_requirement(mut self, level: u32) -> Self {
        self.level_requirement = level;
        self
    }

    #[must_use]
    pub fn with_input(mut self, input: ItemCount) -> Self {
        self.inputs.push(input);
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: ItemCount) -> Self {
        self.outputs.push(output);
        self
    }

    #[must_use]
    pub fn with_common_drop(mut self, drop: DropEntry) -> Self {
        self.common_drops.push(drop);
        self
    }

    #[must_use]
    pub fn with_essence_drop(mut self, drop: DropEntry) -> Self {
        self.essence_drops.push(drop);
        self
    }

    #[must_use]
    pub fn with_rare_drop(mut self, drop: DropEntry) -> Self {
        self.rare_drops.push(drop);
        self
    }
}
