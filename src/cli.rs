// src/cli.rs
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::analysis::{requested_or_default, Analyzer};
use crate::backend::Availability;
use crate::catalog::Catalog;
use crate::config::Settings;
use crate::report::{to_json, AnalysisReport, DiscoveryReport};
use crate::source::{CsvSource, FallbackSource, PriceQuery, PriceSource};
use crate::utils::{format_date, measure_time, parse_date};

#[derive(Parser)]
#[command(name = "indicator-analysis")]
#[command(about = "Technical indicator analysis with TA-Lib, ta and native backends", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute indicators for one ticker
    Analyze {
        /// Ticker symbol (e.g., "RELIANCE")
        #[arg(short, long)]
        ticker: String,

        /// Exchange code, defaults to the configured exchange
        #[arg(short, long)]
        exchange: Option<String>,

        /// First date (YYYY-MM-DD), defaults to end minus the lookback window
        #[arg(long, value_parser = parse_date)]
        start: Option<NaiveDate>,

        /// Last date (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        end: Option<NaiveDate>,

        /// Indicator names; the default set when omitted
        #[arg(short, long = "indicator")]
        indicators: Vec<String>,

        /// Only read the primary data directory
        #[arg(long)]
        no_fallback: bool,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON
        #[arg(long)]
        pretty: bool,
    },

    /// List catalog indicators and the backend each resolves to
    Indicators {
        /// Show only indicators computable right now
        #[arg(short, long)]
        available_only: bool,

        /// Pretty-print JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Show backend availability in priority order
    Backends,
}

pub async fn execute_command(command: Commands, settings: &Settings) -> Result<()> {
    match command {
        Commands::Analyze {
            ticker,
            exchange,
            start,
            end,
            indicators,
            no_fallback,
            output,
            pretty,
        } => {
            let end = end.unwrap_or_else(|| Utc::now().date_naive());
            let start = start.unwrap_or_else(|| end - Duration::days(i64::from(settings.lookback_days)));
            if start > end {
                bail!(
                    "start date {} is after end date {}",
                    format_date(&start),
                    format_date(&end)
                );
            }

            let exchange = exchange.unwrap_or_else(|| settings.default_exchange.clone());
            let query = PriceQuery::new(&ticker, &exchange, start, end).context("Invalid price query")?;
            let source = price_source(settings, no_fallback);

            let report = analyze(&query, &source, &indicators, settings).await?;
            let json = to_json(&report, pretty).context("Failed to serialize analysis report")?;
            emit(json, output).await
        }

        Commands::Indicators { available_only, pretty } => {
            let catalog = Catalog::global().context("Indicator catalog is invalid")?;
            let report = DiscoveryReport::build(catalog, Availability::global());

            let json = if available_only {
                to_json(&report.available_now, pretty)
            } else {
                to_json(&report, pretty)
            }
            .context("Failed to serialize indicator list")?;

            println!("{}", json);
            Ok(())
        }

        Commands::Backends => {
            for status in Availability::global().statuses() {
                println!(
                    "{:<7} rank {}  {:<11}  {}",
                    status.backend.id(),
                    status.rank,
                    if status.available { "available" } else { "unavailable" },
                    status.detail
                );
            }
            Ok(())
        }
    }
}

fn price_source(settings: &Settings, no_fallback: bool) -> FallbackSource {
    let mut sources: Vec<Arc<dyn PriceSource>> = vec![Arc::new(CsvSource::new(&settings.data_dir))];

    if !no_fallback {
        if let Some(dir) = &settings.fallback_data_dir {
            sources.push(Arc::new(CsvSource::new(dir)));
        }
    }

    FallbackSource::new(sources)
}

async fn analyze(
    query: &PriceQuery,
    source: &dyn PriceSource,
    indicators: &[String],
    settings: &Settings,
) -> Result<AnalysisReport> {
    let catalog = Catalog::global().context("Indicator catalog is invalid")?;
    let analyzer = Analyzer::new(catalog, Availability::global()).parallel(settings.parallel);
    let requested = requested_or_default(indicators);

    info!(
        "Analyzing {}:{} from {} to {} ({} indicators)",
        query.exchange,
        query.ticker,
        format_date(&query.start),
        format_date(&query.end),
        requested.len()
    );

    let result = measure_time(
        "Indicator analysis",
        analyzer.fetch_and_analyze(source, query, &requested),
    )
    .await
    .with_context(|| format!("Failed to analyze {}:{}", query.exchange, query.ticker))?;

    Ok(AnalysisReport::new(query, &result))
}

async fn emit(json: String, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            tokio::fs::write(&path, json)
                .await
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_analyze_arguments() {
        let cli = Cli::try_parse_from([
            "indicator-analysis",
            "analyze",
            "--ticker",
            "infy",
            "--start",
            "2024-01-01",
            "-i",
            "rsi",
            "-i",
            "macd",
            "--no-fallback",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze {
                ticker,
                start,
                indicators,
                no_fallback,
                exchange,
                ..
            } => {
                assert_eq!(ticker, "infy");
                assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1));
                assert_eq!(indicators, vec!["rsi", "macd"]);
                assert!(no_fallback);
                assert!(exchange.is_none());
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(Cli::try_parse_from([
            "indicator-analysis",
            "analyze",
            "--ticker",
            "INFY",
            "--end",
            "01/02/2024",
        ])
        .is_err());
    }

    #[tokio::test]
    async fn path_like_ticker_is_refused_before_reading() {
        let command = Commands::Analyze {
            ticker: "../../etc/passwd".to_string(),
            exchange: None,
            start: None,
            end: None,
            indicators: Vec::new(),
            no_fallback: true,
            output: None,
            pretty: false,
        };
        let err = execute_command(command, &Settings::default()).await.unwrap_err();
        assert!(err.to_string().contains("Invalid price query"), "{:#}", err);
    }

    #[test]
    fn fallback_directory_is_optional() {
        let mut settings = Settings::default();
        assert_eq!(price_source(&settings, false).len(), 1);

        settings.fallback_data_dir = Some(PathBuf::from("backup"));
        assert_eq!(price_source(&settings, false).len(), 2);
        assert_eq!(price_source(&settings, true).len(), 1);
    }
}
