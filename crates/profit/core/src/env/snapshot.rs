//! In-memory oracle snapshots.
//!
//! Snapshots are plain serializable maps implementing the oracle traits. The
//! content loaders build them from data files; tests build them in code.

use std::collections::BTreeMap;

use super::{ActionDetails, ActionId, CatalogOracle, DropEntry, ItemId, MarketOracle, Quote};

/// Catalog backed by ordered maps.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogSnapshot {
    #[cfg_attr(feature = "serde", serde(default))]
    pub actions: BTreeMap<ActionId, ActionDetails>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub openables: BTreeMap<ItemId, Vec<DropEntry>>,
}

impl CatalogSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from action definitions and `(container, drops)` pairs.
    pub fn from_parts(
        actions: impl IntoIterator<Item = ActionDetails>,
        openables: impl IntoIterator<Item = (ItemId, Vec<DropEntry>)>,
    ) -> Self {
        Self {
            actions: actions
                .into_iter()
                .map(|action| (action.id.clone(), action))
                .collect(),
            openables: openables.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn with_action(mut self, action: ActionDetails) -> Self {
        self.actions.insert(action.id.clone(), action);
        self
    }

    #[must_use]
    pub fn with_openable(mut self, item: impl Into<ItemId>, drops: Vec<DropEntry>) -> Self {
        self.openables.insert(item.into(), drops);
        self
    }

    pub fn action_ids(&self) -> impl Iterator<Item = &ActionId> + '_ {
        self.actions.keys()
    }

    pub fn openable_ids(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.openables.keys()
    }
}

impl CatalogOracle for CatalogSnapshot {
    fn action_details(&self, action: &ActionId) -> Option<ActionDetails> {
        self.actions.get(action).cloned()
    }

    fn openable_drop_table(&self, item: &ItemId) -> Option<Vec<DropEntry>> {
        self.openables.get(item).cloned()
    }
}

/// Market backed by `item -> enhancement level -> quote` maps.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketSnapshot {
    pub quotes: BTreeMap<ItemId, BTreeMap<u32, Quote>>,
    /// Unix timestamp (seconds) the prices were captured at, when known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub timestamp: Option<i64>,
}

impl MarketSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_quote(
        mut self,
        item: impl Into<ItemId>,
        enhancement_level: u32,
        quote: Quote,
    ) -> Self {
        self.insert(item.into(), enhancement_level, quote);
        self
    }

    pub fn insert(&mut self, item: ItemId, enhancement_level: u32, quote: Quote) {
        self.quotes
            .entry(item)
            .or_default()
            .insert(enhancement_level, quote);
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl MarketOracle for MarketSnapshot {
    fn quote(&self, item: &ItemId, enhancement_level: u32) -> Option<Quote> {
        self.quotes.get(item)?.get(&enhancement_level).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lookup_by_id() {
        let catalog = CatalogSnapshot::new()
            .with_action(ActionDetails::new("forage/meadow", 6.0))
            .with_openable("crate", vec![DropEntry::new("coin", 1.0, 1.0, 5.0)]);

        let action = catalog
            .action_details(&ActionId::from("forage/meadow"))
            .expect("action registered");
        assert_eq!(action.base_time_cost, 6.0);
        assert!(catalog.action_details(&ActionId::from("missing")).is_none());
        assert!(catalog.is_openable(&ItemId::from("crate")));
        assert!(!catalog.is_openable(&ItemId::from("coin")));
    }

    #[test]
    fn market_quotes_are_per_enhancement_level() {
        let market = MarketSnapshot::new()
            .with_quote("sword", 0, Quote::new(10.0, 8.0))
            .with_quote("sword", 5, Quote::new(900.0, 850.0));

        let sword = ItemId::from("sword");
        assert_eq!(market.sell_price(&sword, 0), 8.0);
        assert_eq!(market.sell_price(&sword, 5), 850.0);
        assert_eq!(market.sell_price(&sword, 3), 0.0);
        assert_eq!(market.len(), 1);
    }
}
