//! Shared oracle bundle built from loaded content.
//!
//! The data is immutable once loaded; [`OracleManager`] is cheap to clone and
//! builds [`ProfitEnv`] views on demand.

use std::sync::Arc;

use profit_core::{CatalogSnapshot, Env, MarketSnapshot, OpenableAwareMarket, ProfitEnv};

/// Market that prices unlisted containers from the shared catalog.
pub type PricedMarket = OpenableAwareMarket<Arc<MarketSnapshot>, Arc<CatalogSnapshot>>;

/// Owns the catalog and market snapshots.
#[derive(Clone, Debug)]
pub struct OracleManager {
    catalog: Arc<CatalogSnapshot>,
    market: Arc<PricedMarket>,
}

impl OracleManager {
    pub fn new(catalog: CatalogSnapshot, market: MarketSnapshot) -> Self {
        let catalog = Arc::new(catalog);
        let market = Arc::new(OpenableAwareMarket::new(
            Arc::new(market),
            Arc::clone(&catalog),
        ));
        Self { catalog, market }
    }

    /// Environment view for the calculators.
    pub fn as_profit_env(&self) -> ProfitEnv<'_> {
        Env::with_all(self.catalog.as_ref(), self.market.as_ref()).into_profit_env()
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    /// Raw market snapshot, without container pricing.
    pub fn market(&self) -> &MarketSnapshot {
        self.market.inner()
    }
}
