//! Buff contribution loader.

use std::path::Path;

use profit_core::{BuffContribution, BuffVector};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Buff file structure for TOML files.
///
/// ```toml
/// [[contributions]]
/// source = "tea"
/// kind = "efficiency"
/// value = 0.1
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuffsFile {
    #[serde(default)]
    pub contributions: Vec<BuffContribution>,
}

/// Loader for buff contributions from TOML files.
pub struct BuffsLoader;

impl BuffsLoader {
    pub fn load(path: &Path) -> LoadResult<BuffVector> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BuffVector> {
        let file: BuffsFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse buffs TOML: {}", e))?;
        Ok(BuffVector::from_contributions(file.contributions))
    }
}
