//! Authority-by-year CSV ingestion (e.g. `complete-popu1009-pop.csv`).
//!
//! Each file holds a single measure, named by the column mapping rather than the file. The
//! header is the authority code column followed by one column per year; each row is an
//! authority code followed by that area's value for each year.

use std::io::Read;

use tracing::debug;

use crate::error::{IngestionError, IngestionResult};
use crate::processing::Filters;
use crate::types::{Area, AreaDelta, Measure, MergeMode, MergeSet};

use super::columns::{ColumnMapping, SourceColumn};
use super::unified::FormatParser;
use super::{csv_reader, header_cell};

/// Parser for authority-by-year CSV files.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorityByYearCsv;

impl FormatParser for AuthorityByYearCsv {
    fn parse<R: Read>(
        &self,
        reader: R,
        cols: &ColumnMapping,
        filters: &Filters,
    ) -> IngestionResult<MergeSet> {
        let mut rdr = csv_reader(reader);
        ingest_by_year_from_reader(&mut rdr, cols, filters)
    }
}

/// Read an authority-by-year CSV into a [`MergeSet`] of extending deltas.
///
/// Rules:
///
/// - If the measure filter excludes this file's measure, nothing is read and the set is empty.
/// - The first header cell must be the mapped authority code header; the rest must be years.
/// - Only year columns inside the year filter are read.
/// - Values only reach areas that already exist in the registry when the set is merged.
pub fn ingest_by_year_from_reader<R: Read>(
    rdr: &mut csv::Reader<R>,
    cols: &ColumnMapping,
    filters: &Filters,
) -> IngestionResult<MergeSet> {
    let auth_header = cols.require(SourceColumn::AuthCode)?;
    let measure_code = cols.require(SourceColumn::SingleMeasureCode)?;
    let measure_label = cols.require(SourceColumn::SingleMeasureName)?;

    if !filters.measures.matches(measure_code) {
        debug!(measure = measure_code, "measure filtered out, skipping file");
        return Ok(MergeSet::new());
    }

    let headers = rdr.headers()?.clone();
    let first = header_cell(&headers, 0).unwrap_or("");
    if first != auth_header {
        return Err(IngestionError::malformed(format!(
            "expected first column '{auth_header}', found '{first}'"
        )));
    }

    // (column index, year) for every retained year column.
    let mut year_columns: Vec<(usize, u32)> = Vec::new();
    for (idx, raw) in headers.iter().enumerate().skip(1) {
        let year = raw
            .trim()
            .parse::<u32>()
            .map_err(|e| IngestionError::ParseError {
                row: 1,
                column: raw.to_owned(),
                raw: raw.to_owned(),
                message: format!("expected a year: {e}"),
            })?;
        if filters.years.contains(year) {
            year_columns.push((idx, year));
        }
    }

    let mut set = MergeSet::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // 1-based, and the header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;
        set.records += 1;

        let code = record.get(0).unwrap_or("");
        let mut measure = Measure::new(measure_code, measure_label);
        for &(idx, year) in &year_columns {
            let raw = record.get(idx).ok_or_else(|| {
                IngestionError::malformed(format!(
                    "row {user_row} has {} fields, expected {}",
                    record.len(),
                    headers.len()
                ))
            })?;
            measure.set_value(year, parse_value(user_row, year, raw)?);
        }

        if measure.is_empty() {
            continue;
        }
        let mut area = Area::new(code);
        area.set_measure(measure_code, measure);
        set.push(AreaDelta::new(MergeMode::Extend, area));
    }

    debug!(
        measure = measure_code,
        years = year_columns.len(),
        records = set.records,
        "read authority-by-year rows"
    );
    Ok(set)
}

fn parse_value(row: usize, year: u32, raw: &str) -> IngestionResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| IngestionError::ParseError {
            row,
            column: year.to_string(),
            raw: raw.to_owned(),
            message: e.to_string(),
        })
}
