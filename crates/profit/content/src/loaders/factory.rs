//! Content factory for building oracles from a data directory.

use std::path::{Path, PathBuf};

use profit_core::{BuffVector, CatalogSnapshot, MarketSnapshot, ModelPolicy};

use crate::loaders::{BuffsLoader, CatalogLoader, LoadResult, MarketLoader, PolicyLoader};
use crate::oracle::OracleManager;

/// Content factory that loads engine data from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── catalog.ron
/// ├── market.json
/// ├── buffs.toml    (optional)
/// └── policy.toml   (optional)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CATALOG_FILE: &'static str = "catalog.ron";
    pub const MARKET_FILE: &'static str = "market.json";
    pub const BUFFS_FILE: &'static str = "buffs.toml";
    pub const POLICY_FILE: &'static str = "policy.toml";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the action catalog from `catalog.ron`.
    pub fn load_catalog(&self) -> LoadResult<CatalogSnapshot> {
        CatalogLoader::load(&self.data_dir.join(Self::CATALOG_FILE))
    }

    /// Load market prices from `market.json`.
    pub fn load_market(&self) -> LoadResult<MarketSnapshot> {
        MarketLoader::load(&self.data_dir.join(Self::MARKET_FILE))
    }

    /// Load buffs from `buffs.toml`; no file means no buffs.
    pub fn load_buffs(&self) -> LoadResult<BuffVector> {
        let path = self.data_dir.join(Self::BUFFS_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no buffs file");
            return Ok(BuffVector::new());
        }
        BuffsLoader::load(&path)
    }

    /// Load the model policy from `policy.toml`; no file means defaults.
    pub fn load_policy(&self) -> LoadResult<ModelPolicy> {
        let path = self.data_dir.join(Self::POLICY_FILE);
        if !path.exists() {
            return Ok(ModelPolicy::default());
        }
        PolicyLoader::load(&path)
    }

    /// Load catalog and market into an [`OracleManager`].
    pub fn load_oracles(&self) -> LoadResult<OracleManager> {
        let catalog = self.load_catalog()?;
        let market = self.load_market()?;
        tracing::info!(
            actions = catalog.actions.len(),
            openables = catalog.openables.len(),
            data_dir = %self.data_dir.display(),
            "loaded catalog"
        );
        Ok(OracleManager::new(catalog, market))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
