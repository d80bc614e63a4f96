//! Filtering applied while ingesting.
//!
//! Every parser receives the same [`Filters`] value:
//!
//! - [`AreaFilter`]: case-insensitive pattern over an area's code or any of its names
//! - [`MeasureFilter`]: exact codename match, ignoring case
//! - [`YearFilter`]: inclusive year range, `(0, 0)` meaning every year
//!
//! ## Example
//!
//! ```rust
//! use bethyw::processing::{AreaFilter, Filters, MeasureFilter, YearFilter};
//! use bethyw::types::Area;
//!
//! let filters = Filters::none()
//!     .with_areas(AreaFilter::new(["swansea"]))
//!     .with_measures(MeasureFilter::new(["POP"]))
//!     .with_years(YearFilter::new(2000, 2010));
//!
//! let mut area = Area::new("W06000011");
//! area.set_name("eng", "Swansea").unwrap();
//!
//! assert!(filters.areas.matches(&area));
//! assert!(filters.measures.matches("pop"));
//! assert!(!filters.years.contains(2011));
//! ```

pub mod filter;

pub use filter::{AreaFilter, Filters, MeasureFilter, YearFilter};
