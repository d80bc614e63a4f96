//! Authority-code CSV ingestion (`areas.csv`).
//!
//! Layout: a header row naming the authority code, English name and Welsh name columns, in
//! that order, followed by one row per area.

use std::io::Read;

use tracing::debug;

use crate::error::{IngestionError, IngestionResult};
use crate::processing::Filters;
use crate::types::{Area, AreaDelta, MergeMode, MergeSet};

use super::columns::{ColumnMapping, SourceColumn};
use super::unified::FormatParser;
use super::{csv_reader, header_cell};

/// Parser for authority-code CSV files.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorityCodeCsv;

impl FormatParser for AuthorityCodeCsv {
    fn parse<R: Read>(
        &self,
        reader: R,
        cols: &ColumnMapping,
        _filters: &Filters,
    ) -> IngestionResult<MergeSet> {
        let mut rdr = csv_reader(reader);
        ingest_authority_codes_from_reader(&mut rdr, cols)
    }
}

/// Read every row of an authority-code CSV into a [`MergeSet`] of defining deltas.
///
/// Rules:
///
/// - The header must be exactly the mapped code, English name and Welsh name headers.
/// - Each row yields one area with names `eng` and `cym`; missing trailing cells read as
///   empty names.
/// - The area filter is applied when the deltas are merged.
pub fn ingest_authority_codes_from_reader<R: Read>(
    rdr: &mut csv::Reader<R>,
    cols: &ColumnMapping,
) -> IngestionResult<MergeSet> {
    let expected = [
        cols.require(SourceColumn::AuthCode)?,
        cols.require(SourceColumn::AuthNameEng)?,
        cols.require(SourceColumn::AuthNameCym)?,
    ];

    let headers = rdr.headers()?.clone();
    let found: Vec<&str> = (0..headers.len())
        .filter_map(|i| header_cell(&headers, i))
        .collect();
    if found != expected {
        return Err(IngestionError::malformed(format!(
            "expected header {expected:?}, found {found:?}"
        )));
    }

    let mut set = MergeSet::new();
    for result in rdr.records() {
        let record = result?;
        set.records += 1;

        let code = record.get(0).unwrap_or("");
        let mut area = Area::new(code);
        area.set_name("eng", record.get(1).unwrap_or(""))?;
        area.set_name("cym", record.get(2).unwrap_or(""))?;
        set.push(AreaDelta::new(MergeMode::Define, area));
    }

    debug!(records = set.records, "read authority codes");
    Ok(set)
}
