//! Whole-run loading: the areas file, then every requested dataset.
//!
//! This module sits "above" [`crate::ingestion`] and provides:
//!
//! - per-file failure isolation: one bad file is reported and the rest still load
//! - optional parallel parsing on a rayon pool, with merges applied in catalogue order
//! - observer reporting for every file

use std::path::{Path, PathBuf};

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::datasets::DatasetSource;
use crate::error::{IngestionError, IngestionResult};
use crate::ingestion::observability::{IngestionContext, IngestionStats};
use crate::ingestion::unified::{merge, parse_path, report};
use crate::ingestion::IngestionOptions;
use crate::processing::Filters;
use crate::types::{Areas, MergeSet};

/// A dataset that loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDataset {
    pub code: String,
    pub stats: IngestionStats,
}

/// A dataset that failed. The registry holds nothing from it.
#[derive(Debug)]
pub struct LoadFailure {
    pub code: String,
    pub path: PathBuf,
    pub error: IngestionError,
}

/// Outcome of [`load_datasets`], in catalogue order.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<LoadedDataset>,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Load the areas file into `areas`.
///
/// Only the area filter applies here; measure and year filters have nothing to act on in an
/// areas file.
#[instrument(level = "info", skip_all, fields(file = %source.file))]
pub fn load_areas(
    areas: &mut Areas,
    dir: &Path,
    source: &DatasetSource,
    filters: &Filters,
    options: &IngestionOptions,
) -> IngestionResult<IngestionStats> {
    let path = dir.join(&source.file);
    let area_only = Filters::none().with_areas(filters.areas.clone());
    let ctx = IngestionContext::new(path.display().to_string(), source.parser.clone());

    let result =
        parse_path(&path, &source.parser, &source.cols, &area_only).map(|set| merge(areas, set, &area_only));
    report(options, &ctx, &result);

    match &result {
        Ok(stats) => info!(records = stats.records, applied = stats.applied, "loaded areas"),
        Err(e) => warn!(error = %e, "failed to load areas"),
    }
    result
}

/// Load every dataset in `sources` into `areas`.
///
/// Each file is parsed completely before anything from it is merged, so a file that fails
/// leaves the registry as it was. Failures are logged, reported to the observer and collected
/// in the returned [`LoadReport`].
#[instrument(
    level = "info",
    skip_all,
    fields(dir = %dir.display(), datasets = sources.len(), parallel = options.parallel)
)]
pub fn load_datasets(
    areas: &mut Areas,
    dir: &Path,
    sources: &[&DatasetSource],
    filters: &Filters,
    options: &IngestionOptions,
) -> LoadReport {
    let parsed = if options.parallel {
        parse_parallel(dir, sources, filters, options)
    } else {
        sources
            .iter()
            .map(|s| parse_one(dir, s, filters))
            .collect()
    };

    let mut out = LoadReport::default();
    for (source, result) in sources.iter().zip(parsed) {
        let path = dir.join(&source.file);
        let ctx = IngestionContext::new(path.display().to_string(), source.parser.clone());
        let result = result.map(|set| merge(areas, set, filters));
        report(options, &ctx, &result);

        match result {
            Ok(stats) => {
                debug!(code = %source.code, records = stats.records, applied = stats.applied, "dataset loaded");
                out.loaded.push(LoadedDataset {
                    code: source.code.clone(),
                    stats,
                });
            }
            Err(error) => {
                warn!(code = %source.code, file = %path.display(), %error, "dataset failed");
                out.failures.push(LoadFailure {
                    code: source.code.clone(),
                    path,
                    error,
                });
            }
        }
    }

    info!(
        loaded = out.loaded.len(),
        failed = out.failures.len(),
        "datasets loaded"
    );
    out
}

fn parse_one(dir: &Path, source: &DatasetSource, filters: &Filters) -> IngestionResult<MergeSet> {
    parse_path(dir.join(&source.file), &source.parser, &source.cols, filters)
}

/// Parse on a dedicated pool. Results come back in input order.
fn parse_parallel(
    dir: &Path,
    sources: &[&DatasetSource],
    filters: &Filters,
    options: &IngestionOptions,
) -> Vec<IngestionResult<MergeSet>> {
    let mut builder = ThreadPoolBuilder::new();
    if let Some(n) = options.num_threads.filter(|&n| n > 0) {
        builder = builder.num_threads(n);
    }
    match builder.build() {
        Ok(pool) => pool.install(|| {
            sources
                .par_iter()
                .map(|s| parse_one(dir, s, filters))
                .collect()
        }),
        Err(e) => {
            warn!(error = %e, "could not build thread pool, parsing sequentially");
            sources.iter().map(|s| parse_one(dir, s, filters)).collect()
        }
    }
}
