//! Covidash CLI
//!
//! Command-line interface for computing dashboard metrics offline from a
//! local copy of the COVID-19 CSV feed.
//!
//! # Usage
//!
//! ```bash
//! covidash --help
//! covidash regions --file states.csv
//! covidash cases --file states.csv
//! covidash summary --file states.csv --region GA
//! ```

#![deny(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shared::aggregate::MetricsAggregator;
use shared::source;

/// Covidash CLI - offline COVID-19 dashboard metrics
#[derive(Parser)]
#[command(name = "covidash")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a local CSV copy of the feed
    #[arg(short, long, env = "COVIDASH_DATA_FILE", global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the regions present in the dataset
    Regions,
    /// Print total positive cases per region
    Cases,
    /// Print the combined metrics for one region as JSON
    Summary {
        /// Region identifier (e.g. GA)
        #[arg(short, long)]
        region: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(command) => {
            let aggregator = load_aggregator(cli.file.as_deref())?;
            run_command(&command, &aggregator)
        }
        None => {
            println!("Covidash CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn load_aggregator(file: Option<&std::path::Path>) -> Result<MetricsAggregator> {
    let path = file.context("No dataset file given; pass --file or set COVIDASH_DATA_FILE")?;
    let dataset = source::load_from_path(path)
        .with_context(|| format!("Failed to load dataset from {}", path.display()))?;
    Ok(MetricsAggregator::new(Arc::new(dataset)))
}

fn run_command(command: &Commands, aggregator: &MetricsAggregator) -> Result<()> {
    match command {
        Commands::Regions => {
            for region in aggregator.dataset().regions() {
                println!("{region}");
            }
        }
        Commands::Cases => {
            println!("region\tpositive_cases");
            for row in aggregator.total_cases_by_region() {
                println!("{}\t{}", row.region, row.positive_cases);
            }
        }
        Commands::Summary { region } => {
            let metrics = aggregator
                .region_metrics(region)
                .with_context(|| format!("Cannot compute metrics for region '{region}'"))?;
            println!("{}", serde_json::to_string_pretty(&metrics)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        // Verify CLI can parse without arguments
        let cli = Cli::try_parse_from(["covidash"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_regions_command() {
        let cli = Cli::try_parse_from(["covidash", "regions", "--file", "states.csv"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert!(matches!(cli.command, Some(Commands::Regions)));
        assert_eq!(cli.file, Some(PathBuf::from("states.csv")));
    }

    #[test]
    fn test_cli_summary_requires_region() {
        let cli = Cli::try_parse_from(["covidash", "summary", "--file", "states.csv"]);
        assert!(cli.is_err());

        let cli = Cli::try_parse_from([
            "covidash", "summary", "--file", "states.csv", "--region", "GA",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Summary { region }) => assert_eq!(region, "GA"),
            _ => panic!("expected summary command"),
        }
    }

    #[test]
    fn test_run_command_against_in_memory_dataset() {
        use shared::dataset::Dataset;
        use shared::models::CaseRecord;

        let dataset = Dataset::from_records(vec![
            CaseRecord::new("GA", 100, 5).with_hospitalized(10, 50),
            CaseRecord::new("FL", 200, 20).with_hospitalized(30, 90),
        ])
        .unwrap();
        let aggregator = MetricsAggregator::new(Arc::new(dataset));

        assert!(run_command(&Commands::Regions, &aggregator).is_ok());
        assert!(run_command(&Commands::Cases, &aggregator).is_ok());
        assert!(run_command(
            &Commands::Summary {
                region: "GA".to_string()
            },
            &aggregator
        )
        .is_ok());

        // Unknown region surfaces as an error, not a panic
        assert!(run_command(
            &Commands::Summary {
                region: "TX".to_string()
            },
            &aggregator
        )
        .is_err());
    }
}
