//! Traits describing read-only game data.
//!
//! Oracles expose the action catalog, openable loot tables and market
//! prices. The [`Env`] aggregate bundles them so the drop and profit
//! calculators can access everything they need without hard coupling to
//! concrete implementations or ambient global state.
mod catalog;
mod error;
mod market;
mod snapshot;

pub use catalog::{ActionDetails, CatalogOracle, DropEntry, ItemCount};
pub use error::OracleError;
pub use market::{MarketOracle, OpenableAwareMarket, Quote, UNAFFORDABLE_PRICE};
pub use snapshot::{CatalogSnapshot, MarketSnapshot};

use core::fmt;

/// Catalog identifier of an item (e.g. `/items/milk`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub String);

/// Catalog identifier of a repeatable action (e.g. `/actions/milking/cow`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActionId(pub String);

macro_rules! string_id {
    ($ty:ident) => {
        impl $ty {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $ty {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(ItemId);
string_id!(ActionId);

/// Aggregates the read-only oracles required by the calculators.
pub struct Env<'a, C, M>
where
    C: CatalogOracle + ?Sized,
    M: MarketOracle + ?Sized,
{
    catalog: Option<&'a C>,
    market: Option<&'a M>,
}

pub type ProfitEnv<'a> = Env<'a, dyn CatalogOracle + 'a, dyn MarketOracle + 'a>;

// Manual impls: the oracles are only borrowed, so no `Clone` bound on them.
impl<C, M> Clone for Env<'_, C, M>
where
    C: CatalogOracle + ?Sized,
    M: MarketOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, M> Copy for Env<'_, C, M>
where
    C: CatalogOracle + ?Sized,
    M: MarketOracle + ?Sized,
{
}

impl<'a, C, M> Env<'a, C, M>
where
    C: CatalogOracle + ?Sized,
    M: MarketOracle + ?Sized,
{
    pub fn new(catalog: Option<&'a C>, market: Option<&'a M>) -> Self {
        Self { catalog, market }
    }

    pub fn with_all(catalog: &'a C, market: &'a M) -> Self {
        Self::new(Some(catalog), Some(market))
    }

    pub fn empty() -> Self {
        Self {
            catalog: None,
            market: None,
        }
    }

    /// Returns the CatalogOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::CatalogNotAvailable` if no catalog oracle was provided.
    pub fn catalog(&self) -> Result<&'a C, OracleError> {
        self.catalog.ok_or(OracleError::CatalogNotAvailable)
    }

    /// Returns the MarketOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::MarketNotAvailable` if no market oracle was provided.
    pub fn market(&self) -> Result<&'a M, OracleError> {
        self.market.ok_or(OracleError::MarketNotAvailable)
    }
}

impl<'a, C, M> Env<'a, C, M>
where
    C: CatalogOracle + 'a,
    M: MarketOracle + 'a,
{
    /// Erases the concrete oracle types.
    pub fn into_profit_env(self) -> ProfitEnv<'a> {
        Env {
            catalog: self.catalog.map(|c| c as &'a (dyn CatalogOracle + 'a)),
            market: self.market.map(|m| m as &'a (dyn MarketOracle + 'a)),
        }
    }
}
