//! `bethyw` loads StatsWales statistics published as authority-code CSV, authority-by-year CSV
//! and JSON tables into one in-memory model keyed by local authority code, then renders it as
//! an aligned text report or JSON.
//!
//! The model is [`types::Areas`]: a registry of [`types::Area`]s, each holding names by
//! language and [`types::Measure`]s by codename. Parsers never write to the registry
//! directly; they turn a whole file into a [`types::MergeSet`] which is merged afterwards, so a
//! file that fails to parse leaves the registry untouched.
//!
//! ## Quick example
//!
//! ```rust
//! use bethyw::ingestion::{populate, ColumnMapping, SourceColumn, SourceDataType};
//! use bethyw::processing::{Filters, YearFilter};
//! use bethyw::types::Areas;
//!
//! # fn main() -> Result<(), bethyw::IngestionError> {
//! let areas_cols = ColumnMapping::new()
//!     .with(SourceColumn::AuthCode, "code")
//!     .with(SourceColumn::AuthNameEng, "eng")
//!     .with(SourceColumn::AuthNameCym, "cym");
//! let pop_cols = ColumnMapping::new()
//!     .with(SourceColumn::AuthCode, "code")
//!     .with(SourceColumn::SingleMeasureCode, "pop")
//!     .with(SourceColumn::SingleMeasureName, "Population");
//!
//! let mut areas = Areas::new();
//! let filters = Filters::none().with_years(YearFilter::new(2000, 2000));
//! populate(
//!     &mut areas,
//!     "code,eng,cym\nW1,Test,Prawf\n".as_bytes(),
//!     SourceDataType::AuthorityCodeCsv,
//!     &areas_cols,
//!     &filters,
//! )?;
//! populate(
//!     &mut areas,
//!     "code,2000,2001\nW1,10,20\n".as_bytes(),
//!     SourceDataType::AuthorityByYearCsv,
//!     &pop_cols,
//!     &filters,
//! )?;
//!
//! let pop = areas.area("W1")?.measure("POP")?;
//! assert_eq!(pop.value(2000)?, 10.0);
//! assert!(pop.value(2001).is_err());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: measures, areas, the registry and merge deltas
//! - [`processing`]: area/measure/year filters
//! - [`ingestion`]: the three parsers, the dispatcher and observer hooks
//! - [`datasets`]: the dataset catalogue (built-in or JSON)
//! - [`execution`]: loading the areas file and a list of datasets from a directory
//! - [`report`]: text and JSON rendering
//! - [`cli`]: command-line arguments and the binary's `run`
//! - [`error`]: error types

pub mod cli;
pub mod datasets;
pub mod error;
pub mod execution;
pub mod ingestion;
pub mod processing;
pub mod report;
pub mod types;

pub use error::{IngestionError, IngestionResult, ModelError, ModelResult};
