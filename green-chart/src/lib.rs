//! Chart builders for the greenness dashboard.
//!
//! Builders are pure functions of an immutable [`green_data::Dataset`] and a
//! typed selection. They return a [`chart::Chart`] description (facets,
//! series, axes, legend) that serializes to JSON for the D3.js renderer.
//!
//! - `upper`: yearly kernel density distributions, optionally grouped
//! - `lower`: ordinal scatter plots ranked by reference-year values
//! - `density`: Gaussian kernel density estimation
//! - `palette`: categorical and sequential color scales

pub mod builder;
pub mod chart;
pub mod density;
pub mod error;
pub mod lower;
pub mod palette;
pub mod upper;

pub use builder::ChartBuilder;
pub use chart::Chart;
pub use error::{RenderError, Result};
pub use lower::{LowerSelection, OrdinalChartBuilder};
pub use upper::{DistributionChartBuilder, UpperSelection};
