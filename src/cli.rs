//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

use crate::adapters::cached_data_adapter::CachedDataAdapter;
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::{JsonReportAdapter, SummaryReport};
use crate::adapters::text_report::format_summary;
use crate::domain::config::{DataConfig, MetricsConfig};
use crate::domain::config_validation::{
    build_data_config, build_metrics_config, validate_data_config, validate_metrics_config,
};
use crate::domain::derived::DerivedSeries;
use crate::domain::error::TickerlensError;
use crate::domain::instrument::{load_instruments, load_series, parse_codes, Instrument};
use crate::domain::pipeline::compute_many;
use crate::domain::summary::SummaryStatistics;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "tickerlens", about = "Descriptive price statistics for equities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute derived series and summary statistics
    Compute {
        #[arg(short, long)]
        config: PathBuf,
        /// Comma-separated codes, overriding [instruments] codes
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        exchange: Option<String>,
        /// Derived series CSV, or JSON summary when the path ends in .json
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List available symbols on an exchange
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        exchange: Option<String>,
    },
    /// Show data range for symbol(s)
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        exchange: Option<String>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Metrics for one instrument.
#[derive(Debug, Clone)]
pub struct InstrumentMetrics {
    pub instrument: Instrument,
    pub derived: DerivedSeries,
    pub summary: SummaryStatistics,
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Compute {
            config,
            code,
            exchange,
            output,
            json,
        } => run_compute(
            &config,
            code.as_deref(),
            exchange.as_deref(),
            output.as_deref(),
            json,
        ),
        Command::ListSymbols { config, exchange } => {
            run_list_symbols(&config, exchange.as_deref())
        }
        Command::Info {
            config,
            code,
            exchange,
        } => run_info(&config, code.as_deref(), exchange.as_deref()),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, TickerlensError> {
    info!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path)
}

/// `--code` wins over the configured list; catalogue metadata is kept for
/// codes that appear in both.
pub fn resolve_instruments(
    code_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<Vec<Instrument>, TickerlensError> {
    match code_override {
        Some(raw) => {
            let codes = parse_codes(raw)
                .map_err(|e| TickerlensError::config_invalid("instruments", "codes", e.to_string()))?;
            let catalogue = match load_instruments(config) {
                Ok(catalogue) => catalogue,
                Err(TickerlensError::ConfigMissing { .. }) => Vec::new(),
                Err(e) => return Err(e),
            };
            Ok(codes
                .iter()
                .map(|code| {
                    catalogue
                        .iter()
                        .find(|i| &i.code == code)
                        .cloned()
                        .unwrap_or_else(|| Instrument::bare(code))
                })
                .collect())
        }
        None => load_instruments(config),
    }
}

pub fn build_data_port(data: &DataConfig) -> CachedDataAdapter<CsvAdapter> {
    CachedDataAdapter::new(CsvAdapter::new(data.csv_dir.clone()), data.cache_ttl)
}

/// Fetches every instrument, computes metrics in parallel and drops the
/// instruments whose series fails validation. Fails only when nothing is
/// left.
pub fn compute_instruments(
    data_port: &dyn DataPort,
    instruments: &[Instrument],
    data: &DataConfig,
    metrics: &MetricsConfig,
) -> Result<Vec<InstrumentMetrics>, TickerlensError> {
    let loaded = load_series(
        data_port,
        instruments,
        &data.exchange,
        data.start_date,
        data.end_date,
    )?;

    let series: Vec<_> = loaded.series.iter().map(|(_, s)| s.clone()).collect();
    let results = compute_many(&series, metrics);

    let mut computed = Vec::new();
    let mut last_error = None;
    for ((instrument, _), result) in loaded.series.into_iter().zip(results) {
        match result {
            Ok((derived, summary)) => computed.push(InstrumentMetrics {
                instrument,
                derived,
                summary,
            }),
            Err(e) => {
                warn!(code = %instrument.code, error = %e, "skipping instrument with invalid data");
                last_error = Some(e);
            }
        }
    }

    match (computed.is_empty(), last_error) {
        (true, Some(e)) => Err(e.into()),
        _ => Ok(computed),
    }
}

/// With several instruments each report gets the code appended to the file
/// stem, e.g. `out.csv` becomes `out_ASTS.csv`.
pub fn output_path_for(output: &Path, code: &str, multiple: bool) -> PathBuf {
    if !multiple {
        return output.to_path_buf();
    }
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    let name = match output.extension() {
        Some(ext) => format!("{}_{}.{}", stem, code, ext.to_string_lossy()),
        None => format!("{}_{}", stem, code),
    };
    output.with_file_name(name)
}

pub fn write_reports(
    results: &[InstrumentMetrics],
    metrics: &MetricsConfig,
    output: &Path,
) -> Result<Vec<PathBuf>, TickerlensError> {
    let is_json = output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let reporter: &dyn ReportPort = if is_json {
        &JsonReportAdapter as &dyn ReportPort
    } else {
        &CsvReportAdapter
    };

    let multiple = results.len() > 1;
    let mut written = Vec::with_capacity(results.len());
    for r in results {
        let path = output_path_for(output, &r.instrument.code, multiple);
        reporter.write(&r.derived, &r.summary, metrics, &path.to_string_lossy())?;
        info!("Report written to: {}", path.display());
        written.push(path);
    }
    Ok(written)
}

fn run_compute(
    config_path: &Path,
    code_override: Option<&str>,
    exchange_override: Option<&str>,
    output: Option<&Path>,
    json: bool,
) -> Result<(), TickerlensError> {
    let adapter = load_config(config_path)?;

    let mut data = build_data_config(&adapter)?;
    if let Some(exchange) = exchange_override {
        data.exchange = exchange.to_string();
    }
    let metrics = build_metrics_config(&adapter)?;
    let instruments = resolve_instruments(code_override, &adapter)?;

    info!(
        "Computing metrics for {} instrument(s) on {} from {} to {}",
        instruments.len(),
        data.exchange,
        data.start_date,
        data.end_date
    );

    let data_port = build_data_port(&data);
    let results = compute_instruments(&data_port, &instruments, &data, &metrics)?;

    for r in &results {
        if json {
            println!(
                "{}",
                SummaryReport::new(&r.derived, &r.summary, &metrics).to_json()?
            );
        } else {
            println!("{}", format_summary(&r.instrument, &r.derived, &r.summary));
        }
    }

    if let Some(output) = output {
        write_reports(&results, &metrics, output)?;
    }
    Ok(())
}

fn run_list_symbols(config_path: &Path, exchange: Option<&str>) -> Result<(), TickerlensError> {
    let adapter = load_config(config_path)?;
    let data = build_data_config(&adapter)?;
    let exchange = exchange.unwrap_or(data.exchange.as_str());

    let symbols = CsvAdapter::new(data.csv_dir.clone()).list_symbols(exchange)?;
    if symbols.is_empty() {
        warn!("No symbols found for exchange {}", exchange);
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        info!("{} symbols found", symbols.len());
    }
    Ok(())
}

fn run_info(
    config_path: &Path,
    code: Option<&str>,
    exchange: Option<&str>,
) -> Result<(), TickerlensError> {
    let adapter = load_config(config_path)?;
    let data = build_data_config(&adapter)?;
    let exchange = exchange.unwrap_or(data.exchange.as_str());
    let port = CsvAdapter::new(data.csv_dir.clone());

    let codes = match code {
        Some(raw) => parse_codes(raw)
            .map_err(|e| TickerlensError::config_invalid("instruments", "codes", e.to_string()))?,
        None => port.list_symbols(exchange)?,
    };

    for line in describe_ranges(&port, &codes, exchange)? {
        println!("{}", line);
    }
    Ok(())
}

/// One line per code: its first and last date and bar count.
pub fn describe_ranges(
    port: &dyn DataPort,
    codes: &[String],
    exchange: &str,
) -> Result<Vec<String>, TickerlensError> {
    codes
        .iter()
        .map(|code| {
            Ok(match port.get_data_range(code, exchange)? {
                Some((first, last, bars)) => {
                    format!("{}.{}: {} to {} ({} bars)", code, exchange, first, last, bars)
                }
                None => format!("{}.{}: no data", code, exchange),
            })
        })
        .collect()
}

fn run_validate(config_path: &Path) -> Result<(), TickerlensError> {
    let adapter = load_config(config_path)?;
    validate_data_config(&adapter)?;
    validate_metrics_config(&adapter)?;

    let data = build_data_config(&adapter)?;
    let metrics = build_metrics_config(&adapter)?;
    let instruments = load_instruments(&adapter)?;

    println!("Data:");
    println!("  csv_dir:  {}", data.csv_dir.display());
    println!("  exchange: {}", data.exchange);
    println!("  range:    {} to {}", data.start_date, data.end_date);
    println!("  cache:    {}s", data.cache_ttl.as_secs());
    println!("\nMetrics:");
    println!("  volatility window:        {}", metrics.volatility_window);
    println!(
        "  moving averages:          {}",
        metrics
            .moving_average_windows
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  volume average window:    {}", metrics.volume_average_window);
    println!("  52-week window:           {}", metrics.year_window);
    println!(
        "  support/resistance:       p{} / p{} over {} rows",
        metrics.support_percentile * 100.0,
        metrics.resistance_percentile * 100.0,
        metrics.support_resistance_window
    );
    println!("  trading days per year:    {}", metrics.trading_days_per_year);
    println!("\nInstruments:");
    for instrument in &instruments {
        println!("  {}", instrument.display_name());
    }

    info!("Configuration is valid");
    Ok(())
}
