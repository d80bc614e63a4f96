//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`populate`] (from [`unified`]) which:
//!
//! - selects a parser from a [`SourceDataType`]
//! - validates the file header against a [`ColumnMapping`]
//! - turns each row/record into a delta, applying the year and measure filters
//! - merges the deltas into an [`crate::types::Areas`] registry, applying the area filter
//!
//! Format-specific parsers are also available under:
//! - [`authority_csv`]: `areas.csv` style files (code, English name, Welsh name)
//! - [`by_year_csv`]: one measure per file, one column per year
//! - [`json`]: StatsWales JSON tables with a `value` array of records

pub mod authority_csv;
pub mod by_year_csv;
pub mod columns;
pub mod json;
pub mod observability;
pub mod unified;

pub use columns::{ColumnMapping, SourceColumn};
pub use observability::{
    CompositeObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
    TracingObserver,
};
pub use unified::{
    FormatParser, IngestionOptions, SourceDataType, parse, parse_path, populate, populate_from_path,
    severity_for_error,
};

/// CSV reader configuration shared by the CSV parsers.
///
/// Rows may be shorter or longer than the header; each parser decides what a short row means.
pub(crate) fn csv_reader<R: std::io::Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
}

/// Header cell with any UTF-8 byte order mark removed.
pub(crate) fn header_cell(headers: &csv::StringRecord, idx: usize) -> Option<&str> {
    headers.get(idx).map(|h| h.trim_start_matches('\u{feff}'))
}
