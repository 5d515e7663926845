//! Action catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use profit_core::{ActionDetails, CatalogSnapshot, DropEntry, ItemId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Loot table of one openable container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenableSpec {
    pub item_id: ItemId,
    pub drops: Vec<DropEntry>,
}

/// Catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub actions: Vec<ActionDetails>,
    #[serde(default)]
    pub openables: Vec<OpenableSpec>,
}

/// Loader for the action catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load the catalog from a RON file containing a [`CatalogFile`].
    pub fn load(path: &Path) -> LoadResult<CatalogSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CatalogSnapshot> {
        let file: CatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;
        Self::validate(&file)?;

        Ok(CatalogSnapshot::from_parts(
            file.actions,
            file.openables
                .into_iter()
                .map(|openable| (openable.item_id, openable.drops)),
        ))
    }

    fn validate(file: &CatalogFile) -> LoadResult<()> {
        let mut seen = BTreeSet::new();
        for action in &file.actions {
            if !seen.insert(&action.id) {
                anyhow::bail!("duplicate action {}", action.id);
            }
            if !(action.base_time_cost.is_finite() && action.base_time_cost > 0.0) {
                anyhow::bail!(
                    "action {} has non-positive base time cost {}",
                    action.id,
                    action.base_time_cost
                );
            }
            for drop in action
                .common_drops
                .iter()
                .chain(&action.essence_drops)
                .chain(&action.rare_drops)
            {
                validate_drop(drop).map_err(|e| e.context(format!("in action {}", action.id)))?;
            }
        }

        let mut seen = BTreeSet::new();
        for openable in &file.openables {
            if !seen.insert(&openable.item_id) {
                anyhow::bail!("duplicate openable {}", openable.item_id);
            }
            for drop in &openable.drops {
                validate_drop(drop)
                    .map_err(|e| e.context(format!("in openable {}", openable.item_id)))?;
            }
        }
        Ok(())
    }
}

fn validate_drop(drop: &DropEntry) -> LoadResult<()> {
    if !(0.0..=1.0).contains(&drop.probability) {
        anyhow::bail!("drop {} has probability {}", drop.item_id, drop.probability);
    }
    if !(drop.min_count >= 0.0 && drop.min_count <= drop.max_count) {
        anyhow::bail!(
            "drop {} has count range {}..{}",
            drop.item_id,
            drop.min_count,
            drop.max_count
        );
    }
    Ok(())
}
