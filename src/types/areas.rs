//! The registry of all areas loaded in one run.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::error::{ModelError, ModelResult};
use crate::processing::filter::AreaFilter;

use super::area::Area;
use super::delta::{AreaDelta, MergeMode, MergeSet};

/// Areas keyed by local authority code; iteration is in ascending code order.
///
/// The registry only grows: inserting an area under an existing code merges the two (see
/// [`Area::merge`]), so data loaded from several files accumulates on the same area.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Areas {
    areas: BTreeMap<String, Area>,
}

impl Areas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `area` under `code`, merging into any area already stored there.
    pub fn set_area(&mut self, code: &str, area: Area) {
        match self.areas.entry(code.to_string()) {
            Entry::Occupied(mut e) => e.get_mut().merge(area),
            Entry::Vacant(e) => {
                e.insert(area);
            }
        }
    }

    /// Area stored under `code`.
    pub fn area(&self, code: &str) -> ModelResult<&Area> {
        self.areas
            .get(code)
            .ok_or_else(|| ModelError::not_found("area", code))
    }

    /// Mutable counterpart of [`Areas::area`].
    pub fn area_mut(&mut self, code: &str) -> ModelResult<&mut Area> {
        match self.areas.get_mut(code) {
            Some(a) => Ok(a),
            None => Err(ModelError::not_found("area", code)),
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.areas.contains_key(code)
    }

    /// Number of areas.
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Iterate areas in code order.
    pub fn iter(&self) -> impl Iterator<Item = &Area> {
        self.areas.values()
    }

    /// Apply one delta. Returns whether it changed the registry.
    ///
    /// A delta is applied whole or not at all.
    pub fn apply(&mut self, delta: AreaDelta, filter: &AreaFilter) -> bool {
        let AreaDelta { mode, area } = delta;

        if mode == MergeMode::Define {
            if !filter.matches(&area) {
                return false;
            }
            let code = area.code().to_string();
            self.set_area(&code, area);
            return true;
        }

        if let Some(existing) = self.areas.get_mut(area.code()) {
            if !filter.matches(existing) {
                return false;
            }
            existing.merge_measures(area.into_measures());
            return true;
        }

        if mode == MergeMode::Extend || !filter.matches(&area) {
            return false;
        }
        self.areas.insert(area.code().to_string(), area);
        true
    }

    /// Apply every delta of `set` in order. Returns how many were applied.
    pub fn apply_all(&mut self, set: MergeSet, filter: &AreaFilter) -> usize {
        let mut applied = 0;
        for delta in set.deltas {
            if self.apply(delta, filter) {
                applied += 1;
            }
        }
        applied
    }
}

impl<'a> IntoIterator for &'a Areas {
    type Item = &'a Area;
    type IntoIter = std::collections::btree_map::Values<'a, String, Area>;

    fn into_iter(self) -> Self::IntoIter {
        self.areas.values()
    }
}

#[cfg(test)]
mod tests {
    use super::Areas;
    use crate::processing::filter::AreaFilter;
    use crate::types::{Area, AreaDelta, Measure, MergeMode};

    fn named(code: &str, eng: &str) -> Area {
        let mut a = Area::new(code);
        a.set_name("eng", eng).unwrap();
        a
    }

    #[test]
    fn set_area_merges_same_code() {
        let mut areas = Areas::new();
        areas.set_area("W1", named("W1", "One"));

        let mut second = Area::new("W1");
        second.set_name("cym", "Un").unwrap();
        let mut m = Measure::new("pop", "Population");
        m.set_value(2000, 1.0);
        second.set_measure("pop", m);
        areas.set_area("W1", second);

        assert_eq!(areas.len(), 1);
        let a = areas.area("W1").unwrap();
        assert_eq!(a.name("eng"), Ok("One"));
        assert_eq!(a.name("cym"), Ok("Un"));
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn iteration_is_in_code_order() {
        let mut areas = Areas::new();
        for code in ["W3", "W1", "W2"] {
            areas.set_area(code, Area::new(code));
        }
        let codes: Vec<_> = areas.iter().map(|a| a.code()).collect();
        assert_eq!(codes, vec!["W1", "W2", "W3"]);
    }

    #[test]
    fn missing_area_is_not_found() {
        let areas = Areas::new();
        assert!(areas.area("W9").is_err());
    }

    #[test]
    fn extend_delta_needs_existing_area() {
        let mut areas = Areas::new();
        let delta = AreaDelta::measure_value(MergeMode::Extend, "W1", "pop", "Population", 2000, 1.0);
        assert!(!areas.apply(delta.clone(), &AreaFilter::default()));
        assert!(areas.is_empty());

        areas.set_area("W1", named("W1", "Test"));
        assert!(areas.apply(delta, &AreaFilter::default()));
        assert_eq!(areas.area("W1").unwrap().measure("pop").unwrap().value(2000), Ok(1.0));
    }

    #[test]
    fn extend_or_create_keeps_existing_names() {
        let mut areas = Areas::new();
        areas.set_area("W1", named("W1", "Test"));

        let mut delta =
            AreaDelta::measure_value(MergeMode::ExtendOrCreate, "W1", "pop", "Population", 2000, 5.5);
        delta.area.set_name("eng", "Other").unwrap();
        assert!(areas.apply(delta, &AreaFilter::default()));

        let a = areas.area("W1").unwrap();
        assert_eq!(a.name("eng"), Ok("Test"));
        assert_eq!(a.measure("pop").unwrap().value(2000), Ok(5.5));
    }

    #[test]
    fn extend_or_create_checks_filter_on_new_area() {
        let mut areas = Areas::new();
        let filter = AreaFilter::new(["cardiff"]);

        let mut rejected =
            AreaDelta::measure_value(MergeMode::ExtendOrCreate, "W2", "pop", "Population", 2000, 1.0);
        rejected.area.set_name("eng", "Swansea").unwrap();
        assert!(!areas.apply(rejected, &filter));

        let mut accepted =
            AreaDelta::measure_value(MergeMode::ExtendOrCreate, "W3", "pop", "Population", 2000, 1.0);
        accepted.area.set_name("eng", "Cardiff").unwrap();
        assert!(areas.apply(accepted, &filter));

        assert_eq!(areas.len(), 1);
        assert!(areas.contains("W3"));
    }
}
