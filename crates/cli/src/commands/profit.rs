//! Profit report of one action
//!
//! Loads the data directory, applies buffs from buffs.toml (unless disabled)
//! and prints costs, incomes and the per-item breakdown.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use profit_core::{
    ActionId, BuffVector, DropIncome, EvaluationMode, ProfitConfig, ProfitReport,
    compute_profit_with,
};

use super::DataArgs;
use crate::output::{OutputFormat, format_amount, format_percent, print_json};

/// Profit report of one action over a time window
#[derive(Parser)]
pub struct Profit {
    /// Action id (e.g., /actions/milking/cow)
    #[arg(value_name = "ACTION")]
    action: String,

    /// Length of the window in hours
    #[arg(long, default_value_t = 1.0)]
    hours: f64,

    /// Evaluate drops at this luck (0 < LUCKY < 1) instead of their expected value
    #[arg(short, long, value_name = "LUCKY")]
    lucky: Option<f64>,

    /// Skill level; adds the level efficiency bonus and enforces the requirement
    #[arg(long, value_name = "LEVEL")]
    level: Option<u32>,

    /// Ignore buffs.toml
    #[arg(long)]
    no_buffs: bool,

    #[command(flatten)]
    data: DataArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl Profit {
    pub fn execute(self) -> Result<()> {
        let factory = self.data.factory()?;
        let oracles = factory.load_oracles()?;
        let policy = factory.load_policy()?;
        let buffs = if self.no_buffs {
            BuffVector::new()
        } else {
            factory.load_buffs()?
        };

        let mode = match self.lucky {
            Some(p) => EvaluationMode::Quantile(p),
            None => EvaluationMode::Average,
        };
        let mut config = ProfitConfig::new(self.hours)
            .with_buffs(buffs)
            .with_mode(mode);
        if let Some(level) = self.level {
            config = config.with_skill_level(level);
        }

        let action = ActionId::from(self.action.as_str());
        let report = compute_profit_with(oracles.as_profit_env(), &action, &config, &policy)
            .with_context(|| format!("Failed to compute profit of {action}"))?;

        match self.format {
            OutputFormat::Text => print_report(&report, &config),
            OutputFormat::Json => print_json(&report)?,
        }
        Ok(())
    }
}

fn print_report(report: &ProfitReport, config: &ProfitConfig) {
    println!("{} {}", style("Action:").bold().cyan(), report.action);
    match config.mode {
        EvaluationMode::Average => println!("{} average", style("Mode:").bold().cyan()),
        EvaluationMode::Quantile(p) => {
            println!("{} lucky {}", style("Mode:").bold().cyan(), format_percent(p))
        }
    }
    println!(
        "{} {:.2}s base, {:.2}s buffed",
        style("Time Cost:").bold().cyan(),
        report.base_time_cost,
        report.time_cost
    );
    println!(
        "{} {:.1} in {}h",
        style("Repetitions:").bold().cyan(),
        report.repetitions,
        config.duration_hours
    );
    println!();

    if !config.buffs.is_empty() {
        println!("{}", style("Buffs:").bold().yellow());
        for (kind, total) in config.buffs.active_totals() {
            let sources: Vec<String> = config
                .buffs
                .contributions(kind)
                .map(|c| format!("{} {}", c.source, format_percent(c.value)))
                .collect();
            println!("  {kind}: {} ({})", format_percent(total), sources.join(", "));
        }
        println!();
    }

    if !report.inputs.is_empty() {
        println!("{}", style("Inputs:").bold().yellow());
        for input in &report.inputs {
            println!(
                "  {:<40} {:>12.2} x {:>10} = {:>10}",
                input.item_id.as_str(),
                input.count,
                format_amount(input.price),
                format_amount(input.cost)
            );
        }
        println!();
    }

    if !report.outputs.is_empty() {
        println!("{}", style("Outputs:").bold().yellow());
        for line in &report.outputs {
            print_output(line, 1);
        }
        println!();
    }

    let profit = format_amount(report.profit);
    let profit = if report.profit >= 0.0 {
        style(profit).green()
    } else {
        style(profit).red()
    };
    println!(
        "{} {}  {} {}  {} {} ({}/h)",
        style("Cost:").bold(),
        format_amount(report.cost),
        style("Income:").bold(),
        format_amount(report.income),
        style("Profit:").bold(),
        profit,
        format_amount(report.profit_per_hour(config.duration_hours))
    );
}

fn print_output(line: &DropIncome, depth: usize) {
    let indent = "  ".repeat(depth);
    let rate = if line.buffed.probability < 1.0 {
        format!(" @{}", format_percent(line.buffed.probability))
    } else {
        String::new()
    };
    println!(
        "{indent}{:<width$} {:>12.2} x {:>10} = {:>10}  [{}{}]",
        line.item_id.as_str(),
        line.count,
        format_amount(line.price),
        format_amount(line.income),
        line.tier,
        rate,
        width = 42usize.saturating_sub(indent.len()),
    );
    for child in &line.contents {
        print_output(child, depth + 1);
    }
}
