//! Content loaders for reading engine data from files.
//!
//! Each loader converts one file of the data directory into a `profit-core`
//! value; [`ContentFactory`] knows the directory layout.

pub mod buffs;
pub mod catalog;
pub mod factory;
pub mod market;
pub mod policy;

pub use buffs::BuffsLoader;
pub use catalog::CatalogLoader;
pub use factory::ContentFactory;
pub use market::MarketLoader;
pub use policy::PolicyLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
