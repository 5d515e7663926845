//! Luck curve of an openable container

use anyhow::Result;
use clap::Parser;
use console::style;
use profit_core::{ItemId, LuckCurve};

use super::DataArgs;
use crate::output::{OutputFormat, format_amount, format_percent, print_json};

/// Luck curve of an openable container
#[derive(Parser)]
pub struct Luck {
    /// Container item id (e.g., /items/small_meteorite_cache)
    #[arg(value_name = "ITEM")]
    item: String,

    /// Number of containers opened together
    #[arg(short, long, default_value_t = 1.0)]
    openings: f64,

    /// Value actually obtained; reports how lucky that haul was
    #[arg(long, value_name = "INCOME")]
    observed: Option<f64>,

    /// Print every N-th curve point in text mode
    #[arg(long, default_value_t = 20)]
    every: usize,

    #[command(flatten)]
    data: DataArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl Luck {
    pub fn execute(self) -> Result<()> {
        let factory = self.data.factory()?;
        let oracles = factory.load_oracles()?;
        let policy = factory.load_policy()?;

        let item = ItemId::from(self.item.as_str());
        let curve =
            LuckCurve::for_openable(oracles.as_profit_env(), &item, self.openings, &policy)?;
        if curve.is_empty() {
            anyhow::bail!("{item} is not an openable container");
        }

        if let OutputFormat::Json = self.format {
            return print_json(&curve);
        }

        println!(
            "{} {} x{}",
            style("Container:").bold().cyan(),
            curve.container,
            curve.openings
        );
        println!();
        let step = self.every.max(1);
        for point in curve.points.iter().skip(step - 1).step_by(step) {
            let items: Vec<String> = point
                .items
                .iter()
                .map(|item| format!("{} {:.1}", item.item_id, item.count))
                .collect();
            println!(
                "  {:>8}  {:>10}  {}",
                format_percent(point.lucky),
                format_amount(point.total),
                style(items.join(", ")).dim()
            );
        }

        if let Some(income) = self.observed {
            let lucky = curve.observed_luck(income);
            println!();
            if lucky > 0.0 {
                println!(
                    "{} {} is at luck {}",
                    style("Observed:").bold().yellow(),
                    format_amount(income),
                    format_percent(lucky)
                );
            } else {
                println!(
                    "{} {} beats every point of the curve",
                    style("Observed:").bold().yellow(),
                    format_amount(income)
                );
            }
        }
        Ok(())
    }
}
