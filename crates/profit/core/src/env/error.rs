//! Oracle access errors.
//!
//! Missing collaborators are the only oracle failure: gaps inside catalog or
//! market data are absorbed by the callers and never reach this type.

use crate::error::{EngineError, ErrorSeverity};

/// Errors that occur when accessing oracle data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// CatalogOracle is not available in the environment.
    #[error("CatalogOracle not available")]
    CatalogNotAvailable,

    /// MarketOracle is not available in the environment.
    #[error("MarketOracle not available")]
    MarketNotAvailable,
}

impl EngineError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        // Missing oracles are fatal - nothing can be priced or looked up
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CatalogNotAvailable => "ORACLE_CATALOG_NOT_AVAILABLE",
            Self::MarketNotAvailable => "ORACLE_MARKET_NOT_AVAILABLE",
        }
    }
}
