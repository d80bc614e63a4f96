//! Core data model for ingested statistics.
//!
//! The model is a three-level hierarchy, each level exclusively owning the next:
//!
//! - [`Areas`]: every local authority loaded in one run, keyed by authority code
//! - [`Area`]: one authority's code, its names by language, and its [`Measure`]s by codename
//! - [`Measure`]: a year → value series with a codename and a label
//!
//! Parsers describe their changes as [`AreaDelta`]s grouped in a [`MergeSet`], which the
//! registry applies with [`Areas::apply_all`].

pub mod area;
pub mod areas;
pub mod delta;
pub mod measure;

pub use area::Area;
pub use areas::Areas;
pub use delta::{AreaDelta, MergeMode, MergeSet};
pub use measure::Measure;
