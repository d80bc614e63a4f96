//! Rendering of a loaded registry.
//!
//! - [`text`]: `Display` for [`crate::types::Measure`], [`crate::types::Area`] and
//!   [`crate::types::Areas`], producing the aligned table report
//! - [`json`]: `serde::Serialize` for the same types and [`crate::types::Areas::to_json`]

pub mod json;
pub mod text;
