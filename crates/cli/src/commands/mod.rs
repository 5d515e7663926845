//! Command implementations for the estimator
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod actions;
mod luck;
mod profit;
mod quantile;

pub use actions::Actions;
pub use luck::Luck;
pub use profit::Profit;
pub use quantile::Quantile;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use profit_content::ContentFactory;

use crate::dirs;

/// Data directory selection shared by commands that read content
#[derive(Args)]
pub struct DataArgs {
    /// Directory with catalog.ron, market.json and optional buffs.toml/policy.toml
    /// (defaults to the platform-specific data location)
    #[arg(short, long, value_name = "DIR", env = "PROFIT_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

impl DataArgs {
    pub fn factory(&self) -> Result<ContentFactory> {
        let data_dir = self.data_dir.clone().unwrap_or_else(dirs::data_dir);
        if !data_dir.exists() {
            anyhow::bail!(
                "Data directory not found: {}\n\nHint: pass --data-dir or set PROFIT_DATA_DIR",
                data_dir.display()
            );
        }
        Ok(ContentFactory::new(data_dir))
    }
}
