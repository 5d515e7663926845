use std::sync::Arc;

use crate::env::{CatalogOracle, ItemId};

/// Buy price reported for items nobody sells.
///
/// Large enough that any action consuming such an item shows as unprofitable,
/// instead of treating the input as free.
pub const UNAFFORDABLE_PRICE: f64 = 1.0e12;

/// Best ask/bid of one item at one enhancement level.
///
/// A negative value means there is no order on that side of the book.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quote {
    pub ask: f64,
    pub bid: f64,
}

impl Quote {
    pub const fn new(ask: f64, bid: f64) -> Self {
        Self { ask, bid }
    }
}

/// Read-only market prices.
pub trait MarketOracle: Send + Sync {
    /// Raw quote for `item` at `enhancement_level`, `None` when unlisted.
    fn quote(&self, item: &ItemId, enhancement_level: u32) -> Option<Quote>;

    /// Price received when selling `item`; `0` when unknown or without bids.
    fn sell_price(&self, item: &ItemId, enhancement_level: u32) -> f64 {
        self.quote(item, enhancement_level)
            .map(|q| q.bid)
            .filter(|bid| bid.is_finite() && *bid >= 0.0)
            .unwrap_or(0.0)
    }

    /// Price paid when buying `item`; [`UNAFFORDABLE_PRICE`] when unknown or without asks.
    fn buy_price(&self, item: &ItemId, enhancement_level: u32) -> f64 {
        self.quote(item, enhancement_level)
            .map(|q| q.ask)
            .filter(|ask| ask.is_finite() && *ask >= 0.0)
            .unwrap_or(UNAFFORDABLE_PRICE)
    }
}

impl<T: MarketOracle + ?Sized> MarketOracle for &T {
    fn quote(&self, item: &ItemId, enhancement_level: u32) -> Option<Quote> {
        (**self).quote(item, enhancement_level)
    }

    fn sell_price(&self, item: &ItemId, enhancement_level: u32) -> f64 {
        (**self).sell_price(item, enhancement_level)
    }

    fn buy_price(&self, item: &ItemId, enhancement_level: u32) -> f64 {
        (**self).buy_price(item, enhancement_level)
    }
}

impl<T: MarketOracle + ?Sized> MarketOracle for Arc<T> {
    fn quote(&self, item: &ItemId, enhancement_level: u32) -> Option<Quote> {
        (**self).quote(item, enhancement_level)
    }

    fn sell_price(&self, item: &ItemId, enhancement_level: u32) -> f64 {
        (**self).sell_price(item, enhancement_level)
    }

    fn buy_price(&self, item: &ItemId, enhancement_level: u32) -> f64 {
        (**self).buy_price(item, enhancement_level)
    }
}

/// Market decorator that prices unlisted openable containers by their contents.
///
/// For a container absent from the market, the sell price is the value of
/// the expected contents excluding the container itself, divided by
/// `1 - self_drop` where `self_drop` is the expected number of copies of the
/// container found inside it.
#[derive(Clone, Debug)]
pub struct OpenableAwareMarket<M, C> {
    market: M,
    catalog: C,
}

impl<M, C> OpenableAwareMarket<M, C>
where
    M: MarketOracle,
    C: CatalogOracle,
{
    /// Nesting limit when containers hold other unlisted containers.
    pub const MAX_DEPTH: usize = 4;

    pub fn new(market: M, catalog: C) -> Self {
        Self { market, catalog }
    }

    pub fn inner(&self) -> &M {
        &self.market
    }

    fn sell_price_at_depth(&self, item: &ItemId, enhancement_level: u32, depth: usize) -> f64 {
        if self.market.quote(item, enhancement_level).is_some() {
            return self.market.sell_price(item, enhancement_level);
        }
        if depth >= Self::MAX_DEPTH {
            return 0.0;
        }
        let Some(drops) = self.catalog.openable_drop_table(item) else {
            return 0.0;
        };

        let mut self_drop = 0.0;
        let mut other_value = 0.0;
        for drop in &drops {
            if &drop.item_id == item {
                self_drop += drop.expected_count();
            } else {
                other_value +=
                    self.sell_price_at_depth(&drop.item_id, 0, depth + 1) * drop.expected_count();
            }
        }

        if self_drop >= 1.0 {
            tracing::warn!(
                item = %item,
                self_drop,
                "openable container reproduces itself; pricing at zero"
            );
            return 0.0;
        }
        other_value / (1.0 - self_drop)
    }
}

impl<M, C> MarketOracle for OpenableAwareMarket<M, C>
where
    M: MarketOracle,
    C: CatalogOracle,
{
    fn quote(&self, item: &ItemId, enhancement_level: u32) -> Option<Quote> {
        self.market.quote(item, enhancement_level)
    }

    fn sell_price(&self, item: &ItemId, enhancement_level: u32) -> f64 {
        self.sell_price_at_depth(item, enhancement_level, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{CatalogSnapshot, DropEntry, MarketSnapshot};

    fn market() -> MarketSnapshot {
        MarketSnapshot::new()
            .with_quote("coin", 0, Quote::new(1.0, 1.0))
            .with_quote("gem", 0, Quote::new(120.0, 100.0))
            .with_quote("gem", 1, Quote::new(-1.0, 250.0))
    }

    #[test]
    fn unknown_items_sell_for_zero_and_cannot_be_bought() {
        let market = market();
        let unknown = ItemId::from("nothing");
        assert_eq!(market.sell_price(&unknown, 0), 0.0);
        assert_eq!(market.buy_price(&unknown, 0), UNAFFORDABLE_PRICE);
    }

    #[test]
    fn missing_side_of_book_falls_back() {
        let market = market();
        let gem = ItemId::from("gem");
        assert_eq!(market.sell_price(&gem, 1), 250.0);
        assert_eq!(market.buy_price(&gem, 1), UNAFFORDABLE_PRICE);
        assert_eq!(market.buy_price(&gem, 0), 120.0);
    }

    #[test]
    fn unlisted_container_is_priced_by_contents() {
        let catalog = CatalogSnapshot::new().with_openable(
            "crate",
            vec![
                DropEntry::new("coin", 1.0, 100.0, 300.0),
                DropEntry::new("gem", 0.5, 1.0, 1.0),
                DropEntry::new("crate", 0.2, 1.0, 1.0),
            ],
        );
        let priced = OpenableAwareMarket::new(market(), &catalog);

        // (200 * 1 + 0.5 * 100) / (1 - 0.2)
        let price = priced.sell_price(&ItemId::from("crate"), 0);
        assert!((price - 312.5).abs() < 1e-9);

        // Listed items keep their market price.
        assert_eq!(priced.sell_price(&ItemId::from("gem"), 0), 100.0);
    }

    #[test]
    fn self_reproducing_container_prices_at_zero() {
        let catalog = CatalogSnapshot::new()
            .with_openable("loop", vec![DropEntry::new("loop", 1.0, 1.0, 1.0)]);
        let priced = OpenableAwareMarket::new(market(), &catalog);
        assert_eq!(priced.sell_price(&ItemId::from("loop"), 0), 0.0);
    }
}
