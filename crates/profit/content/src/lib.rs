//! Data files and in-memory oracles for the profit engine.
//!
//! This crate turns a data directory into the oracles `profit-core` consumes:
//! - Action catalog and openable loot tables (RON)
//! - Market snapshot in the marketplace JSON format
//! - Buff contributions (TOML)
//! - Model policy overrides (TOML)
//!
//! [`OracleManager`] owns the loaded data and hands out [`profit_core::ProfitEnv`]
//! views; loaders are behind the default `loaders` feature.

pub mod oracle;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use oracle::{OracleManager, PricedMarket};

#[cfg(feature = "loaders")]
pub use loaders::{
    BuffsLoader, CatalogLoader, ContentFactory, LoadResult, MarketLoader, PolicyLoader,
};
