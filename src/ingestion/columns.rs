//! Column mappings: which literal header text holds each logical field of a source file.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{IngestionError, IngestionResult};

/// Logical fields a parser may need from a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceColumn {
    /// Local authority code column.
    AuthCode,
    /// English area name column.
    AuthNameEng,
    /// Welsh area name column.
    AuthNameCym,
    /// Per-record measure code field.
    MeasureCode,
    /// Per-record measure label field.
    MeasureName,
    /// Fixed measure code for files holding a single measure (the value, not a header).
    SingleMeasureCode,
    /// Fixed measure label for files holding a single measure (the value, not a header).
    SingleMeasureName,
    /// Year field.
    Year,
    /// Value field.
    Value,
}

impl fmt::Display for SourceColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AuthCode => "auth_code",
            Self::AuthNameEng => "auth_name_eng",
            Self::AuthNameCym => "auth_name_cym",
            Self::MeasureCode => "measure_code",
            Self::MeasureName => "measure_name",
            Self::SingleMeasureCode => "single_measure_code",
            Self::SingleMeasureName => "single_measure_name",
            Self::Year => "year",
            Self::Value => "value",
        };
        f.write_str(s)
    }
}

/// Table from [`SourceColumn`] to the header text (or fixed value) used by one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    columns: BTreeMap<SourceColumn, String>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, column: SourceColumn, header: impl Into<String>) -> Self {
        self.columns.insert(column, header.into());
        self
    }

    pub fn get(&self, column: SourceColumn) -> Option<&str> {
        self.columns.get(&column).map(String::as_str)
    }

    /// Like [`ColumnMapping::get`], but a missing entry is a
    /// [`IngestionError::NotEnoughColumns`] error.
    pub fn require(&self, column: SourceColumn) -> IngestionResult<&str> {
        self.get(column).ok_or(IngestionError::NotEnoughColumns {
            column,
            available: self.columns.len(),
        })
    }

    pub fn contains(&self, column: SourceColumn) -> bool {
        self.columns.contains_key(&column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(SourceColumn, S)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (SourceColumn, S)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().map(|(c, h)| (c, h.into())).collect(),
        }
    }
}
