//! A single year-indexed series of values for one statistic.

use std::collections::BTreeMap;

use crate::error::{ModelError, ModelResult};

/// A named series of values keyed by year, e.g. the population of one area.
///
/// The codename is lowercased on construction. Values are kept in ascending year order, so
/// "first" and "last" always mean chronologically first and last.
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    codename: String,
    label: String,
    values: BTreeMap<u32, f64>,
}

impl Measure {
    /// Create an empty measure.
    pub fn new(codename: impl AsRef<str>, label: impl Into<String>) -> Self {
        Self {
            codename: codename.as_ref().to_lowercase(),
            label: label.into(),
            values: BTreeMap::new(),
        }
    }

    /// Lowercase codename, e.g. `pop`.
    pub fn codename(&self) -> &str {
        &self.codename
    }

    /// Human-readable label, e.g. `Population`.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Value recorded for `year`.
    pub fn value(&self, year: u32) -> ModelResult<f64> {
        self.values
            .get(&year)
            .copied()
            .ok_or_else(|| ModelError::not_found("value for year", year.to_string()))
    }

    /// Insert or overwrite the value for `year`. Any `f64` is accepted, NaN included.
    pub fn set_value(&mut self, year: u32, value: f64) {
        self.values.insert(year, value);
    }

    /// Iterate `(year, value)` pairs in ascending year order.
    pub fn values(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.values.iter().map(|(y, v)| (*y, *v))
    }

    /// Number of years with a value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mean of all values, or `0.0` when there are none.
    pub fn average(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.values().sum::<f64>() / self.values.len() as f64
    }

    /// Last value minus first value, or `0.0` with fewer than two values.
    pub fn difference(&self) -> f64 {
        match self.first_and_last() {
            Some((first, last)) => last - first,
            None => 0.0,
        }
    }

    /// `(last - first) / |first| * 100`, or `0.0` with fewer than two values.
    ///
    /// A zero first value yields an infinite or NaN result; it is returned as is.
    pub fn difference_percentage(&self) -> f64 {
        match self.first_and_last() {
            Some((first, last)) => (last - first) / first.abs() * 100.0,
            None => 0.0,
        }
    }

    /// Merge `other` into `self`: codename and label are taken from `other`, and every
    /// year/value pair of `other` is upserted, so `other` wins on shared years.
    pub fn merge(&mut self, other: Measure) {
        self.codename = other.codename;
        self.label = other.label;
        self.values.extend(other.values);
    }

    fn first_and_last(&self) -> Option<(f64, f64)> {
        if self.values.len() < 2 {
            return None;
        }
        let first = self.values.first_key_value().map(|(_, v)| *v)?;
        let last = self.values.last_key_value().map(|(_, v)| *v)?;
        Some((first, last))
    }
}
