//! StatsWales JSON ingestion.
//!
//! Supported input: a JSON object whose `value` member is an array of flat records, e.g.
//!
//! ```json
//! {"value": [{"Localauthority_Code": "W06000011", "Localauthority_ItemName_ENG": "Swansea",
//!             "Measure_Code": "Pop", "Measure_ItemName_ENG": "Population",
//!             "Year_Code": "2000", "Data": 223301}]}
//! ```
//!
//! A record's measure comes from per-record measure code/name fields when the mapping names
//! them, and from the mapping's fixed single-measure entries otherwise.

use std::io::Read;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{IngestionError, IngestionResult};
use crate::processing::Filters;
use crate::types::{AreaDelta, MergeMode, MergeSet};

use super::columns::{ColumnMapping, SourceColumn};
use super::unified::FormatParser;

/// Parser for StatsWales JSON tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct WelshStatsJson;

impl FormatParser for WelshStatsJson {
    fn parse<R: Read>(
        &self,
        reader: R,
        cols: &ColumnMapping,
        filters: &Filters,
    ) -> IngestionResult<MergeSet> {
        let doc: Value = serde_json::from_reader(reader)?;
        ingest_json_value(&doc, cols, filters)
    }
}

/// Ingest StatsWales JSON from an in-memory string.
pub fn ingest_json_from_str(
    input: &str,
    cols: &ColumnMapping,
    filters: &Filters,
) -> IngestionResult<MergeSet> {
    let doc: Value = serde_json::from_str(input)?;
    ingest_json_value(&doc, cols, filters)
}

/// Where a record's measure code and label come from.
#[derive(Clone, Copy)]
enum MeasureSource<'a> {
    PerRecord { code: &'a str, label: &'a str },
    Fixed { code: &'a str, label: &'a str },
}

struct RecordFields<'a> {
    code: &'a str,
    name_eng: &'a str,
    year: &'a str,
    value: &'a str,
    measure: MeasureSource<'a>,
}

impl<'a> RecordFields<'a> {
    fn resolve(cols: &'a ColumnMapping) -> IngestionResult<Self> {
        let measure = match (
            cols.get(SourceColumn::MeasureCode),
            cols.get(SourceColumn::MeasureName),
        ) {
            (Some(code), Some(label)) => MeasureSource::PerRecord { code, label },
            _ => MeasureSource::Fixed {
                code: cols.require(SourceColumn::SingleMeasureCode)?,
                label: cols.require(SourceColumn::SingleMeasureName)?,
            },
        };
        Ok(Self {
            code: cols.require(SourceColumn::AuthCode)?,
            name_eng: cols.require(SourceColumn::AuthNameEng)?,
            year: cols.require(SourceColumn::Year)?,
            value: cols.require(SourceColumn::Value)?,
            measure,
        })
    }
}

fn ingest_json_value(
    doc: &Value,
    cols: &ColumnMapping,
    filters: &Filters,
) -> IngestionResult<MergeSet> {
    let fields = RecordFields::resolve(cols)?;
    let records = doc
        .get("value")
        .and_then(Value::as_array)
        .ok_or_else(|| IngestionError::malformed("json must be an object with a 'value' array"))?;

    let mut set = MergeSet::new();
    for (idx0, v) in records.iter().enumerate() {
        let row = idx0 + 1;
        set.records += 1;
        let obj = v
            .as_object()
            .ok_or_else(|| IngestionError::malformed(format!("record {row} is not a json object")))?;

        let code = text_field(obj, row, fields.code)?;
        let name_eng = text_field(obj, row, fields.name_eng)?;
        let year = year_field(obj, row, fields.year)?;
        let value = number_field(obj, row, fields.value)?;
        let (measure_code, measure_label) = match fields.measure {
            MeasureSource::PerRecord { code, label } => {
                (text_field(obj, row, code)?, text_field(obj, row, label)?)
            }
            MeasureSource::Fixed { code, label } => (code.to_string(), label.to_string()),
        };

        if !filters.years.contains(year) || !filters.measures.matches(&measure_code) {
            continue;
        }

        let mut delta = AreaDelta::measure_value(
            MergeMode::ExtendOrCreate,
            &code,
            &measure_code,
            &measure_label,
            year,
            value,
        );
        delta.area.set_name("eng", name_eng)?;
        set.push(delta);
    }

    debug!(records = set.records, kept = set.len(), "read json records");
    Ok(set)
}

fn field<'v>(obj: &'v Map<String, Value>, row: usize, key: &str) -> IngestionResult<&'v Value> {
    obj.get(key).ok_or_else(|| {
        IngestionError::malformed(format!("record {row} missing required field '{key}'"))
    })
}

/// A string field; numbers are accepted and rendered as text.
fn text_field(obj: &Map<String, Value>, row: usize, key: &str) -> IngestionResult<String> {
    match field(obj, row, key)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(type_error(row, key, other, "expected string")),
    }
}

/// Years are published as strings (`"2011"`); plain integers are accepted too.
fn year_field(obj: &Map<String, Value>, row: usize, key: &str) -> IngestionResult<u32> {
    let raw = field(obj, row, key)?;
    let parsed = match raw {
        Value::String(s) => s.trim().parse::<u32>().ok(),
        Value::Number(n) => n.as_u64().and_then(|y| u32::try_from(y).ok()),
        _ => None,
    };
    parsed.ok_or_else(|| type_error(row, key, raw, "expected year"))
}

/// Values may be JSON numbers or numeric strings.
fn number_field(obj: &Map<String, Value>, row: usize, key: &str) -> IngestionResult<f64> {
    let raw = field(obj, row, key)?;
    let parsed = match raw {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed.ok_or_else(|| type_error(row, key, raw, "expected number"))
}

fn type_error(row: usize, column: &str, v: &Value, message: &str) -> IngestionError {
    IngestionError::ParseError {
        row,
        column: column.to_string(),
        raw: v.to_string(),
        message: message.to_string(),
    }
}
