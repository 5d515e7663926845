//! Probabilistic drop-yield and action-profit engine.
//!
//! `profit-core` models how many items a repeated action yields, both as an
//! expected value and at a chosen luck (quantile), and folds the yields into
//! a profit report priced against a market. Catalog and market data are
//! injected through the oracle traits in [`env`]; the crate performs no I/O.
pub mod buff;
pub mod config;
pub mod distribution;
pub mod drop;
pub mod env;
pub mod error;
pub mod luck;
pub mod profit;
pub use buff::{BuffContribution, BuffKind, BuffSource, BuffVector};
pub use config::ModelPolicy;
pub use distribution::{
    CdfValue, Distribution, ModelKind, ModelParams, clamp_probability, select_model,
    select_model_with,
};
pub use drop::{DropCalculator, DropIncome, DropRate, DropSpec, DropTier, EvaluationMode};
pub use env::{
    ActionDetails, ActionId, CatalogOracle, CatalogSnapshot, DropEntry, Env, ItemCount, ItemId,
    MarketOracle, MarketSnapshot, OpenableAwareMarket, OracleError, ProfitEnv, Quote,
    UNAFFORDABLE_PRICE,
};
pub use error::{EngineError, ErrorSeverity, ParameterError, ProfitError};
pub use luck::{LUCK_STEP, LuckCurve, LuckItem, LuckPoint, luck_levels};
pub use profit::{InputCost, ProfitConfig, ProfitReport, compute_profit, compute_profit_with};
