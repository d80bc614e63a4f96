//! Command-line interface: argument model, argument parsing helpers, and the `run` entry point
//! used by the `bethyw` binary.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use thiserror::Error;
use tracing::{info, warn};

use crate::datasets::{Catalogue, DatasetSource};
use crate::error::IngestionError;
use crate::execution::{LoadReport, load_areas, load_datasets};
use crate::ingestion::{IngestionOptions, TracingObserver};
use crate::processing::{AreaFilter, Filters, MeasureFilter, YearFilter};
use crate::types::Areas;

/// Load StatsWales datasets and print them as tables or JSON.
#[derive(Debug, Clone, Parser)]
#[command(name = "bethyw", version, about)]
pub struct Args {
    /// Directory holding the dataset files
    #[arg(long, value_name = "DIR", default_value = "datasets")]
    pub dir: PathBuf,

    /// Datasets to import (comma separated codes, or `all`)
    #[arg(short = 'd', long, value_name = "LIST", value_delimiter = ',')]
    pub datasets: Option<Vec<String>>,

    /// Areas to import: authority codes or name fragments (or `all`)
    #[arg(short = 'a', long, value_name = "LIST", value_delimiter = ',')]
    pub areas: Option<Vec<String>>,

    /// Measure codes to import (or `all`)
    #[arg(short = 'm', long, value_name = "LIST", value_delimiter = ',')]
    pub measures: Option<Vec<String>>,

    /// Year or inclusive range: `YYYY`, `YYYY-ZZZZ`, or `0` for all years
    #[arg(short = 'y', long, value_name = "YEARS")]
    pub years: Option<String>,

    /// Print JSON instead of tables
    #[arg(short = 'j', long)]
    pub json: bool,

    /// JSON dataset catalogue to use instead of the built-in one
    #[arg(long, value_name = "FILE")]
    pub catalogue: Option<PathBuf>,

    /// Parse dataset files in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Errors that stop the program before any output is produced.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("No dataset matches key: {0}")]
    UnknownDataset(String),

    #[error("Invalid input for years argument")]
    InvalidYears,

    #[error("failed to read catalogue {path}: {source}")]
    Catalogue {
        path: PathBuf,
        #[source]
        source: IngestionError,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl Args {
    /// Log filter directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Filters built from `-a`, `-m` and `-y`.
    pub fn filters(&self) -> Result<Filters, CliError> {
        let years = match &self.years {
            Some(raw) => parse_years(raw)?,
            None => YearFilter::all(),
        };
        Ok(Filters::none()
            .with_areas(AreaFilter::new(parse_list(self.areas.as_deref())))
            .with_measures(MeasureFilter::new(parse_list(self.measures.as_deref())))
            .with_years(years))
    }
}

/// Normalize a comma-separated list argument. Absent, or containing `all`, means no
/// restriction and yields an empty list.
pub fn parse_list(values: Option<&[String]>) -> Vec<String> {
    let Some(values) = values else {
        return Vec::new();
    };
    let values: Vec<String> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    if values.iter().any(|v| v.eq_ignore_ascii_case("all")) {
        return Vec::new();
    }
    values
}

/// Parse `YYYY`, `YYYY-ZZZZ`, `0` or `0-0`.
pub fn parse_years(raw: &str) -> Result<YearFilter, CliError> {
    let raw = raw.trim();
    if raw == "0" || raw == "0-0" {
        return Ok(YearFilter::all());
    }
    let year = |s: &str| -> Result<u32, CliError> {
        if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
            s.parse().map_err(|_| CliError::InvalidYears)
        } else {
            Err(CliError::InvalidYears)
        }
    };
    match raw.split_once('-') {
        Some((start, end)) => Ok(YearFilter::new(year(start)?, year(end)?)),
        None => {
            let y = year(raw)?;
            Ok(YearFilter::new(y, y))
        }
    }
}

/// Datasets named by `-d`, in the order given. Absent or `all` selects the whole catalogue.
pub fn select_datasets<'a>(
    catalogue: &'a Catalogue,
    requested: Option<&[String]>,
) -> Result<Vec<&'a DatasetSource>, CliError> {
    let codes = parse_list(requested);
    if codes.is_empty() {
        return Ok(catalogue.datasets.iter().collect());
    }
    codes
        .iter()
        .map(|code| {
            catalogue
                .get(code)
                .ok_or_else(|| CliError::UnknownDataset(code.clone()))
        })
        .collect()
}

/// Install a stderr `tracing` subscriber. `RUST_LOG` overrides the `-v` level.
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bethyw={}", args.log_level())));

    // A subscriber may already be installed (tests); keep it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(io::stderr)
                .compact(),
        )
        .try_init();
}

/// Load everything `args` asks for and write the report to `out`.
///
/// Files that fail to load are logged and left out; they do not make this function fail.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<LoadReport, CliError> {
    let catalogue = match &args.catalogue {
        Some(path) => Catalogue::from_path(path).map_err(|source| CliError::Catalogue {
            path: path.clone(),
            source,
        })?,
        None => Catalogue::builtin(),
    };
    let sources = select_datasets(&catalogue, args.datasets.as_deref())?;
    let filters = args.filters()?;

    let options = IngestionOptions {
        observer: Some(Arc::new(TracingObserver)),
        parallel: args.parallel,
        ..Default::default()
    };

    let mut areas = Areas::new();
    if let Err(e) = load_areas(&mut areas, &args.dir, &catalogue.areas, &filters, &options) {
        eprintln!("Error importing dataset:\n{e}");
    }
    let report = load_datasets(&mut areas, &args.dir, &sources, &filters, &options);
    for failure in &report.failures {
        eprintln!(
            "Error importing dataset {}:\n{}",
            failure.code, failure.error
        );
    }

    if args.json {
        write!(out, "{}", areas.to_json())?;
    } else {
        write!(out, "{areas}")?;
    }
    out.flush()?;

    if report.is_complete() {
        info!(areas = areas.len(), "done");
    } else {
        warn!(failed = report.failures.len(), "done with failures");
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn all_means_no_restriction() {
        assert!(parse_list(None).is_empty());
        assert!(parse_list(Some(strings(&["W1", "ALL"]).as_slice())).is_empty());
        assert_eq!(parse_list(Some(strings(&["W1", " swan "]).as_slice())), ["W1", "swan"]);
    }

    #[test]
    fn years_argument_forms() {
        assert_eq!(parse_years("2010").unwrap().bounds(), (2010, 2010));
        assert_eq!(parse_years("2010-2015").unwrap().bounds(), (2010, 2015));
        assert!(parse_years("0").unwrap().is_all());
        assert!(parse_years("0-0").unwrap().is_all());
    }

    #[test]
    fn malformed_years_are_rejected() {
        for bad in ["201", "20100", "2010-", "abcd", "2010-20x5", "-2010"] {
            let err = parse_years(bad).unwrap_err();
            assert_eq!(err.to_string(), "Invalid input for years argument", "{bad}");
        }
    }

    #[test]
    fn unknown_dataset_is_an_error() {
        let cat = Catalogue::builtin();
        let err = select_datasets(&cat, Some(strings(&["popden", "nope"]).as_slice())).unwrap_err();
        assert_eq!(err.to_string(), "No dataset matches key: nope");

        let picked = select_datasets(&cat, Some(strings(&["trains", "popden"]).as_slice())).unwrap();
        let codes: Vec<&str> = picked.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, ["trains", "popden"]);

        assert_eq!(select_datasets(&cat, None).unwrap().len(), cat.datasets.len());
    }

    #[test]
    fn clap_parses_comma_lists() {
        let args = Args::try_parse_from([
            "bethyw", "-d", "popden,trains", "-a", "W06000011", "-y", "2010-2012", "-j", "-vv",
        ])
        .unwrap();
        assert_eq!(args.datasets.as_deref(), Some(&strings(&["popden", "trains"])[..]));
        assert!(args.json);
        assert_eq!(args.log_level(), "debug");
        assert_eq!(args.dir, PathBuf::from("datasets"));
        assert_eq!(args.filters().unwrap().years.bounds(), (2010, 2012));
    }
}
