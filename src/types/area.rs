//! A local authority area: its code, its names and its measures.

use std::collections::BTreeMap;

use crate::error::{ModelError, ModelResult};

use super::measure::Measure;

/// A local authority identified by an opaque code (e.g. `W06000011`).
///
/// Names are keyed by three-letter lowercase language code (`eng`, `cym`). Measures are keyed
/// by lowercase codename and iterate in codename order.
#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    code: String,
    names: BTreeMap<String, String>,
    measures: BTreeMap<String, Measure>,
}

impl Area {
    /// Create an area with no names and no measures.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            names: BTreeMap::new(),
            measures: BTreeMap::new(),
        }
    }

    /// Local authority code, case preserved.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Name of the area in `lang`.
    pub fn name(&self, lang: &str) -> ModelResult<&str> {
        self.names
            .get(&lang.to_lowercase())
            .map(String::as_str)
            .ok_or_else(|| ModelError::not_found("name for language", lang))
    }

    /// Set the name of the area in `lang`, replacing any existing name in that language.
    ///
    /// `lang` is lowercased and must then be exactly three ASCII letters.
    pub fn set_name(&mut self, lang: &str, name: impl Into<String>) -> ModelResult<()> {
        let lang = lang.to_lowercase();
        if lang.len() != 3 || !lang.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(ModelError::InvalidArgument {
                message: format!("language code must be three alphabetical letters, got '{lang}'"),
            });
        }
        self.names.insert(lang, name.into());
        Ok(())
    }

    /// Iterate `(lang, name)` pairs in language-code order.
    pub fn names(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(l, n)| (l.as_str(), n.as_str()))
    }

    /// Look up a measure by codename, case-insensitively.
    pub fn measure(&self, codename: &str) -> ModelResult<&Measure> {
        let key = codename.to_lowercase();
        self.measures
            .get(&key)
            .ok_or_else(|| ModelError::not_found("measure", key))
    }

    /// Mutable counterpart of [`Area::measure`].
    pub fn measure_mut(&mut self, codename: &str) -> ModelResult<&mut Measure> {
        let key = codename.to_lowercase();
        match self.measures.get_mut(&key) {
            Some(m) => Ok(m),
            None => Err(ModelError::not_found("measure", key)),
        }
    }

    /// Store `measure` under `codename` (lowercased).
    ///
    /// If a measure already exists under that codename the two are merged (see
    /// [`Measure::merge`]): label and codename come from `measure`, series are unioned.
    pub fn set_measure(&mut self, codename: &str, measure: Measure) {
        let key = codename.to_lowercase();
        match self.measures.get_mut(&key) {
            Some(existing) => existing.merge(measure),
            None => {
                self.measures.insert(key, measure);
            }
        }
    }

    /// Iterate measures in codename order.
    pub fn measures(&self) -> impl Iterator<Item = &Measure> {
        self.measures.values()
    }

    /// Number of measures.
    pub fn len(&self) -> usize {
        self.measures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    /// Merge `other` into `self`: the code is taken from `other`, names are unioned (other
    /// wins per language) and measures are merged through [`Area::set_measure`].
    pub fn merge(&mut self, other: Area) {
        self.code = other.code;
        self.names.extend(other.names);
        self.merge_measures(other.measures.into_values());
    }

    /// Merge measures only, leaving code and names untouched.
    pub(crate) fn merge_measures(&mut self, measures: impl IntoIterator<Item = Measure>) {
        for measure in measures {
            let key = measure.codename().to_string();
            self.set_measure(&key, measure);
        }
    }

    pub(crate) fn into_measures(self) -> impl Iterator<Item = Measure> {
        self.measures.into_values()
    }
}
