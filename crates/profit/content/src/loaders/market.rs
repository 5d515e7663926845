//! Market snapshot loader for the marketplace JSON format.
//!
//! ```json
//! {
//!   "marketData": { "/items/milk": { "0": { "a": 24, "b": 22 } } },
//!   "timestamp": 1718000000
//! }
//! ```
//!
//! Keys under an item are enhancement levels; `a` is the best ask, `b` the
//! best bid, `-1` when that side of the book is empty.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use profit_core::{ItemId, MarketSnapshot, Quote};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RawQuote {
    pub a: f64,
    pub b: f64,
}

/// Marketplace file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketFile {
    #[serde(rename = "marketData")]
    pub market_data: BTreeMap<String, BTreeMap<String, RawQuote>>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Loader for market snapshots from JSON files.
pub struct MarketLoader;

impl MarketLoader {
    /// Snapshots older than this are reported as stale.
    pub const MAX_AGE_SECS: i64 = 6 * 60 * 60;

    pub fn load(path: &Path) -> LoadResult<MarketSnapshot> {
        let content = read_file(path)?;
        let snapshot =
            Self::parse(&content).with_context(|| format!("in market file {}", path.display()))?;

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();
        if Self::is_stale(&snapshot, now) {
            tracing::warn!(
                path = %path.display(),
                timestamp = ?snapshot.timestamp,
                "market snapshot is older than six hours"
            );
        }
        tracing::info!(items = snapshot.len(), "loaded market snapshot");
        Ok(snapshot)
    }

    pub fn parse(content: &str) -> LoadResult<MarketSnapshot> {
        let file: MarketFile = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse market JSON: {}", e))?;

        let mut snapshot = MarketSnapshot::new();
        snapshot.timestamp = file.timestamp;
        for (item, levels) in file.market_data {
            for (level, raw) in levels {
                let level: u32 = level
                    .parse()
                    .with_context(|| format!("invalid enhancement level {level:?} for {item}"))?;
                snapshot.insert(ItemId::from(item.as_str()), level, Quote::new(raw.a, raw.b));
            }
        }
        Ok(snapshot)
    }

    /// True when the snapshot has no timestamp or is older than [`Self::MAX_AGE_SECS`] at `now`.
    pub fn is_stale(snapshot: &MarketSnapshot, now: i64) -> bool {
        snapshot
            .timestamp
            .is_none_or(|timestamp| now - timestamp > Self::MAX_AGE_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profit_core::{MarketOracle, UNAFFORDABLE_PRICE};

    const MARKET: &str = r#"{
        "marketData": {
            "/items/milk": { "0": { "a": 24, "b": 22 } },
            "/items/sword": { "0": { "a": 900, "b": -1 }, "3": { "a": -1, "b": 4000 } }
        },
        "timestamp": 1718000000
    }"#;

    #[test]
    fn parses_levels_and_sides() {
        let market = MarketLoader::parse(MARKET).unwrap();
        let sword = ItemId::from("/items/sword");

        assert_eq!(market.len(), 2);
        assert_eq!(market.timestamp, Some(1_718_000_000));
        assert_eq!(market.sell_price(&ItemId::from("/items/milk"), 0), 22.0);
        assert_eq!(market.sell_price(&sword, 0), 0.0);
        assert_eq!(market.sell_price(&sword, 3), 4000.0);
        assert_eq!(market.buy_price(&sword, 3), UNAFFORDABLE_PRICE);
    }

    #[test]
    fn rejects_non_numeric_levels() {
        let bad = r#"{ "marketData": { "x": { "plus": { "a": 1, "b": 1 } } } }"#;
        let err = MarketLoader::parse(bad).unwrap_err();
        assert!(err.to_string().contains("invalid enhancement level"));
    }

    #[test]
    fn staleness_uses_six_hours() {
        let market = MarketLoader::parse(MARKET).unwrap();
        assert!(!MarketLoader::is_stale(&market, 1_718_000_000 + 3600));
        assert!(MarketLoader::is_stale(&market, 1_718_000_000 + 7 * 3600));
        assert!(MarketLoader::is_stale(&MarketSnapshot::new(), 0));
    }
}
