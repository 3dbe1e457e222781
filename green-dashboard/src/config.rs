//! Tunable dashboard defaults.
//!
//! Every field has a default matching the published dashboard, so a partial
//! JSON document only overrides what it names:
//!
//! ```json
//! { "lower_default_region": "Quebec", "kde": { "grid_size": 100, "cut": 3.0 } }
//! ```

use crate::error::ConfigError;
use green_chart::density::KdeParams;
use green_chart::lower::MIN_POPULATION;
use green_data::year_range::LAST_YEAR;
use green_data::YearRange;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Domain of both year-range controls.
    pub year_bounds: YearRange,
    /// Municipalities below this population are left out of the ordinal chart.
    pub min_population: u64,
    /// Initial province of the ordinal chart, if the dataset has it.
    pub lower_default_region: String,
    /// Year the `Current *` columns were recorded for.
    pub reference_year: i32,
    /// Density estimation grid for the distribution chart.
    pub kde: KdeParams,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            year_bounds: YearRange::FULL,
            min_population: MIN_POPULATION,
            lower_default_region: "Ontario".to_string(),
            reference_year: LAST_YEAR,
            kde: KdeParams::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = &self.year_bounds;
        if !bounds.contains(self.reference_year) {
            return Err(ConfigError::Invalid(format!(
                "reference year {} is outside {}",
                self.reference_year, bounds
            )));
        }
        if self.kde.grid_size < 2 {
            return Err(ConfigError::Invalid(
                "density grid needs at least 2 points".to_string(),
            ));
        }
        if self.kde.cut.is_nan() || self.kde.cut < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "density cut {} must be non-negative",
                self.kde.cut
            )));
        }
        Ok(())
    }
}
