//! Quantiles of a single drop distribution
//!
//! Needs no data directory: the distribution is described on the command line.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use profit_content::PolicyLoader;
use profit_core::{CdfValue, ModelPolicy, select_model_with};
use serde::Serialize;

use crate::output::{OutputFormat, format_percent, print_json};

/// Quantiles of a single drop distribution
#[derive(Parser)]
pub struct Quantile {
    /// Number of independent trials
    #[arg(short, long)]
    trials: f64,

    /// Drop probability per trial
    #[arg(short, long)]
    probability: f64,

    /// Smallest count of one drop
    #[arg(long, default_value_t = 1.0)]
    min: f64,

    /// Largest count of one drop
    #[arg(long, default_value_t = 1.0)]
    max: f64,

    /// Luck levels to evaluate (repeatable)
    #[arg(
        short,
        long = "lucky",
        value_name = "LUCKY",
        default_values_t = [0.05, 0.25, 0.5, 0.75, 0.95]
    )]
    lucky: Vec<f64>,

    /// Also report P(total <= COUNT) when the model supports it
    #[arg(long, value_name = "COUNT")]
    cdf: Option<f64>,

    /// Policy file overriding the model thresholds
    #[arg(long, value_name = "FILE")]
    policy: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct QuantileReport {
    model: String,
    expected_value: f64,
    model_min: f64,
    model_max: f64,
    quantiles: Vec<(f64, f64)>,
    cdf: Option<f64>,
}

impl Quantile {
    pub fn execute(self) -> Result<()> {
        let policy = match &self.policy {
            Some(path) => PolicyLoader::load(path)?,
            None => ModelPolicy::default(),
        };
        let model = select_model_with(&policy, self.trials, self.probability, self.min, self.max)?;

        let mut lucky = self.lucky.clone();
        lucky.sort_by(f64::total_cmp);
        let counts = model.quantile_batch(&lucky);

        let report = QuantileReport {
            model: model.kind().to_string(),
            expected_value: model.expected_value(),
            model_min: model.model_min(),
            model_max: model.model_max(),
            quantiles: lucky.into_iter().zip(counts).collect(),
            cdf: self.cdf.and_then(|count| model.cdf_at(count).supported()),
        };

        match self.format {
            OutputFormat::Json => print_json(&report)?,
            OutputFormat::Text => {
                println!("{} {}", style("Model:").bold().cyan(), report.model);
                println!(
                    "{} {:.3}",
                    style("Expected:").bold().cyan(),
                    report.expected_value
                );
                println!(
                    "{} {} .. {}",
                    style("Range:").bold().cyan(),
                    report.model_min,
                    report.model_max
                );
                println!();
                for (p, count) in &report.quantiles {
                    println!("  {:>8}  {count}", format_percent(*p));
                }
                if let Some(count) = self.cdf {
                    match model.cdf_at(count) {
                        CdfValue::Supported(v) => {
                            println!();
                            println!("  P(total <= {count}) = {}", format_percent(v));
                        }
                        CdfValue::Unsupported => {
                            println!();
                            println!(
                                "  {}",
                                style(format!("{} does not support CDF queries", report.model))
                                    .dim()
                            );
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
