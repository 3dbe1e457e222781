//! Loading and indexing of municipal vegetation-index observations.
//!
//! This crate turns the cleaned greenness table into an immutable
//! [`Dataset`] that the chart builders filter and reshape. It provides:
//! - `dataset`: CSV loading, the (region, sub-region, year) index and filters
//! - `observation`: one row of the table and its comparison categories
//! - `measurement`: the two greenness indices and their axis conventions
//! - `year_range`: inclusive year ranges used by the display controls

pub mod dataset;
pub mod error;
pub mod measurement;
pub mod observation;
pub mod year_range;

pub use dataset::{Dataset, RegionScope};
pub use error::{LoadError, Result};
pub use measurement::Measurement;
pub use observation::{Grouping, Observation};
pub use year_range::YearRange;
