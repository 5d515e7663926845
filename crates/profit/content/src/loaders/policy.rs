//! Model policy loader.

use std::path::Path;

use profit_core::ModelPolicy;

use crate::loaders::{LoadResult, read_file};

/// Loader for model-selection thresholds from TOML files.
///
/// Every key is optional; missing keys keep their defaults.
pub struct PolicyLoader;

impl PolicyLoader {
    pub fn load(path: &Path) -> LoadResult<ModelPolicy> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ModelPolicy> {
        let policy: ModelPolicy = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse policy TOML: {}", e))?;
        policy
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid policy: {}", e))?;
        Ok(policy)
    }
}
