//! Per-record changes produced by parsers and applied to [`super::Areas`].
//!
//! Parsers never touch the registry directly. Each row or record becomes one [`AreaDelta`];
//! a whole file becomes a [`MergeSet`] which is only applied once the file has been read
//! without error.

use super::area::Area;
use super::measure::Measure;

/// How a delta may interact with the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// The delta defines the area. The area filter is evaluated against the delta's own
    /// area, which is then inserted or merged (names and measures).
    Define,
    /// The delta only adds measure values to an area that already exists. Missing areas,
    /// and existing areas rejected by the area filter, drop the delta.
    Extend,
    /// Like [`MergeMode::Extend`] when the area exists. Otherwise the delta's own area
    /// (code and English name) is checked against the area filter and inserted with its
    /// measures.
    ExtendOrCreate,
}

/// One row or record worth of changes for a single area.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaDelta {
    /// How to merge.
    pub mode: MergeMode,
    /// Area carrying the code, any names, and the measure values of this record.
    pub area: Area,
}

impl AreaDelta {
    pub fn new(mode: MergeMode, area: Area) -> Self {
        Self { mode, area }
    }

    /// Delta that writes a single value into one measure of the area `code`.
    pub fn measure_value(
        mode: MergeMode,
        code: &str,
        measure_code: &str,
        measure_label: &str,
        year: u32,
        value: f64,
    ) -> Self {
        let mut measure = Measure::new(measure_code, measure_label);
        measure.set_value(year, value);
        let mut area = Area::new(code);
        area.set_measure(measure_code, measure);
        Self { mode, area }
    }

    pub fn code(&self) -> &str {
        self.area.code()
    }
}

/// All deltas read from one source file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeSet {
    /// Deltas to apply in order.
    pub deltas: Vec<AreaDelta>,
    /// Number of rows/records read from the source, including ones filtered out.
    pub records: usize,
}

impl MergeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, delta: AreaDelta) {
        self.deltas.push(delta);
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}
