//! List catalog contents

use anyhow::Result;
use clap::Parser;
use console::style;
use profit_core::CatalogOracle;

use super::DataArgs;

/// List actions and openable containers in the catalog
#[derive(Parser)]
pub struct Actions {
    /// Only show ids containing this text
    #[arg(value_name = "FILTER")]
    filter: Option<String>,

    #[command(flatten)]
    data: DataArgs,
}

impl Actions {
    pub fn execute(self) -> Result<()> {
        let catalog = self.data.factory()?.load_catalog()?;
        let matches = |id: &str| self.filter.as_deref().is_none_or(|f| id.contains(f));

        println!("{}", style("Actions:").bold().yellow());
        for id in catalog.action_ids().filter(|id| matches(id.as_str())) {
            let level = catalog
                .action_details(id)
                .map(|details| details.level_requirement)
                .unwrap_or_default();
            println!("  {id} {}", style(format!("(lv {level})")).dim());
        }
        println!();
        println!("{}", style("Openables:").bold().yellow());
        for id in catalog.openable_ids().filter(|id| matches(id.as_str())) {
            println!("  {id}");
        }
        Ok(())
    }
}
