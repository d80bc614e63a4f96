//! Unified ingestion entrypoint.
//!
//! Most callers should use [`populate`] or [`populate_from_path`], which parse one source
//! into a [`MergeSet`] and merge it into an [`Areas`] registry.
//!
//! - The parser is selected by [`SourceDataType`]; textual names that match no type fail with
//!   [`IngestionError::UnexpectedDataType`].
//! - Parser errors propagate unchanged. A source that fails leaves the registry untouched.
//! - If an [`IngestionObserver`] is provided, success/failure/alerts are reported to it.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

use crate::error::{IngestionError, IngestionResult};
use crate::processing::Filters;
use crate::types::{Areas, MergeSet};

use super::authority_csv::AuthorityCodeCsv;
use super::by_year_csv::AuthorityByYearCsv;
use super::columns::ColumnMapping;
use super::json::WelshStatsJson;
use super::observability::{
    IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
};

/// Supported source layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceDataType {
    /// `areas.csv`: authority code, English name, Welsh name.
    AuthorityCodeCsv,
    /// One measure per file, years as columns.
    AuthorityByYearCsv,
    /// StatsWales JSON table with a `value` array of records.
    WelshStatsJson,
}

impl SourceDataType {
    pub const ALL: [SourceDataType; 3] = [
        Self::AuthorityCodeCsv,
        Self::AuthorityByYearCsv,
        Self::WelshStatsJson,
    ];

    /// Name used in dataset catalogues.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AuthorityCodeCsv => "authority-code-csv",
            Self::AuthorityByYearCsv => "authority-by-year-csv",
            Self::WelshStatsJson => "welsh-stats-json",
        }
    }
}

impl fmt::Display for SourceDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceDataType {
    type Err = IngestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| IngestionError::UnexpectedDataType {
                data_type: s.to_string(),
            })
    }
}

/// One source layout: reads a whole stream into a [`MergeSet`].
///
/// Implementations must not touch any registry; merging is the caller's job so that a
/// failing stream never leaves partial state behind.
pub trait FormatParser {
    fn parse<R: Read>(
        &self,
        reader: R,
        cols: &ColumnMapping,
        filters: &Filters,
    ) -> IngestionResult<MergeSet>;
}

/// Options controlling multi-source ingestion.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
    /// Parse dataset files on a thread pool. Merges are still applied in catalogue order.
    pub parallel: bool,
    /// Worker threads for parallel parsing. `None` uses the platform's available parallelism.
    pub num_threads: Option<usize>,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .field("parallel", &self.parallel)
            .field("num_threads", &self.num_threads)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
            parallel: false,
            num_threads: None,
        }
    }
}

/// Parse a stream with the parser for `data_type`, without touching any registry.
pub fn parse<R: Read>(
    reader: R,
    data_type: SourceDataType,
    cols: &ColumnMapping,
    filters: &Filters,
) -> IngestionResult<MergeSet> {
    match data_type {
        SourceDataType::AuthorityCodeCsv => AuthorityCodeCsv.parse(reader, cols, filters),
        SourceDataType::AuthorityByYearCsv => AuthorityByYearCsv.parse(reader, cols, filters),
        SourceDataType::WelshStatsJson => WelshStatsJson.parse(reader, cols, filters),
    }
}

/// Open `path` and parse it. The type name is resolved first so an unknown type never opens
/// the file.
pub fn parse_path(
    path: impl AsRef<Path>,
    data_type: &str,
    cols: &ColumnMapping,
    filters: &Filters,
) -> IngestionResult<MergeSet> {
    let data_type = data_type.parse::<SourceDataType>()?;
    let file = File::open(path.as_ref())?;
    parse(BufReader::new(file), data_type, cols, filters)
}

/// Parse a stream and merge it into `areas`, applying the area filter at merge time.
///
/// # Examples
///
/// ```
/// use bethyw::ingestion::{populate, ColumnMapping, SourceColumn, SourceDataType};
/// use bethyw::processing::Filters;
/// use bethyw::types::Areas;
///
/// # fn main() -> Result<(), bethyw::IngestionError> {
/// let cols = ColumnMapping::new()
///     .with(SourceColumn::AuthCode, "code")
///     .with(SourceColumn::AuthNameEng, "eng")
///     .with(SourceColumn::AuthNameCym, "cym");
///
/// let mut areas = Areas::new();
/// let input = "code,eng,cym\nW06000011,Swansea,Abertawe\n";
/// let stats = populate(
///     &mut areas,
///     input.as_bytes(),
///     SourceDataType::AuthorityCodeCsv,
///     &cols,
///     &Filters::none(),
/// )?;
///
/// assert_eq!(stats.applied, 1);
/// assert_eq!(areas.area("W06000011")?.name("cym")?, "Abertawe");
/// # Ok(())
/// # }
/// ```
pub fn populate<R: Read>(
    areas: &mut Areas,
    reader: R,
    data_type: SourceDataType,
    cols: &ColumnMapping,
    filters: &Filters,
) -> IngestionResult<IngestionStats> {
    let set = parse(reader, data_type, cols, filters)?;
    Ok(merge(areas, set, filters))
}

/// Path-based [`populate`] with observer reporting.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with record/applied counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
pub fn populate_from_path(
    areas: &mut Areas,
    path: impl AsRef<Path>,
    data_type: &str,
    cols: &ColumnMapping,
    filters: &Filters,
    options: &IngestionOptions,
) -> IngestionResult<IngestionStats> {
    let path = path.as_ref();
    let ctx = IngestionContext::new(path.display().to_string(), data_type);
    let result = parse_path(path, data_type, cols, filters).map(|set| merge(areas, set, filters));
    report(options, &ctx, &result);
    result
}

/// Apply a parsed set to the registry and count what landed.
pub(crate) fn merge(areas: &mut Areas, set: MergeSet, filters: &Filters) -> IngestionStats {
    let records = set.records;
    let applied = areas.apply_all(set, &filters.areas);
    debug!(records, applied, "merged");
    IngestionStats { records, applied }
}

/// Forward an outcome to the configured observer, if any.
pub(crate) fn report(
    options: &IngestionOptions,
    ctx: &IngestionContext,
    result: &IngestionResult<IngestionStats>,
) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    match result {
        Ok(stats) => obs.on_success(ctx, *stats),
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_failure(ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}

/// I/O failures (including I/O surfaced through the CSV or JSON readers) are critical;
/// everything else is an error in the file or its mapping.
pub fn severity_for_error(e: &IngestionError) -> IngestionSeverity {
    match e {
        IngestionError::Io(_) => IngestionSeverity::Critical,
        IngestionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        IngestionError::Json(err) if err.is_io() => IngestionSeverity::Critical,
        IngestionError::Json(_)
        | IngestionError::MalformedFile { .. }
        | IngestionError::NotEnoughColumns { .. }
        | IngestionError::UnexpectedDataType { .. }
        | IngestionError::ParseError { .. }
        | IngestionError::Model(_) => IngestionSeverity::Error,
    }
}
