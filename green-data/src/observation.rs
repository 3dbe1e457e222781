//! A single row of the greenness table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One municipality's greenness measurements for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    /// Province name.
    pub region: String,
    /// Municipality name.
    pub sub_region: String,
    /// Reference year of the measurement.
    pub year: i32,
    pub ndvi: f64,
    /// Percentage of land area with an NDVI above 0.5.
    pub avg_greenness: f64,
    pub land_class: String,
    pub municipality_size: String,
    pub growth_class: String,
    /// Population in the reference year; NaN when missing.
    pub current_population: f64,
    /// NDVI in the reference year, repeated on every row of the municipality.
    pub current_ndvi: f64,
    /// Average greenness in the reference year, repeated on every row.
    pub current_avg_greenness: f64,
}

impl Observation {
    /// The category value this observation falls in for a comparison grouping.
    pub fn category(&self, grouping: Grouping) -> &str {
        match grouping {
            Grouping::LandClass => &self.land_class,
            Grouping::MunicipalitySize => &self.municipality_size,
            Grouping::GrowthClass => &self.growth_class,
        }
    }
}

/// Categorical columns municipalities can be compared by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grouping {
    LandClass,
    MunicipalitySize,
    GrowthClass,
}

impl Grouping {
    pub const ALL: [Grouping; 3] = [
        Grouping::LandClass,
        Grouping::MunicipalitySize,
        Grouping::GrowthClass,
    ];

    /// Label used in selectors, legends and as the source column name.
    pub fn label(self) -> &'static str {
        match self {
            Grouping::LandClass => "Land Class",
            Grouping::MunicipalitySize => "Municipality Size",
            Grouping::GrowthClass => "Growth Class",
        }
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Grouping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grouping::ALL
            .into_iter()
            .find(|g| g.label() == s.trim())
            .ok_or_else(|| format!("unknown grouping: {}", s))
    }
}
