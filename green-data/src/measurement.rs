//! The two greenness indices and their axis conventions.

use crate::observation::Observation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which greenness index a chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Measurement {
    /// Normalized Difference Vegetation Index, unitless in [-1, 1].
    Ndvi,
    /// Percentage of land with an NDVI above 0.5.
    AvgGreenness,
}

impl Measurement {
    pub const ALL: [Measurement; 2] = [Measurement::Ndvi, Measurement::AvgGreenness];

    /// Label used in selectors and as the source column name.
    pub fn label(self) -> &'static str {
        match self {
            Measurement::Ndvi => "NDVI",
            Measurement::AvgGreenness => "Avg Greenness",
        }
    }

    /// Title for the value axis.
    pub fn axis_label(self) -> &'static str {
        match self {
            Measurement::Ndvi => "NDVI (unitless)",
            Measurement::AvgGreenness => "Avg Greenness (% Land Cover)",
        }
    }

    /// Fixed value-axis bounds, if the index has any.
    ///
    /// Average greenness is a percentage, so its axis is always [0, 100]
    /// regardless of the data being shown.
    pub fn axis_bounds(self) -> Option<(f64, f64)> {
        match self {
            Measurement::Ndvi => None,
            Measurement::AvgGreenness => Some((0.0, 100.0)),
        }
    }

    /// Value recorded for the observation's own year.
    pub fn value(self, obs: &Observation) -> f64 {
        match self {
            Measurement::Ndvi => obs.ndvi,
            Measurement::AvgGreenness => obs.avg_greenness,
        }
    }

    /// Value recorded for the reference (most recent) year.
    pub fn current_value(self, obs: &Observation) -> f64 {
        match self {
            Measurement::Ndvi => obs.current_ndvi,
            Measurement::AvgGreenness => obs.current_avg_greenness,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Measurement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Measurement::ALL
            .into_iter()
            .find(|m| m.label() == s.trim())
            .ok_or_else(|| format!("unknown measurement: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels() {
        assert_eq!("NDVI".parse::<Measurement>(), Ok(Measurement::Ndvi));
        assert_eq!(
            "Avg Greenness".parse::<Measurement>(),
            Ok(Measurement::AvgGreenness)
        );
        assert!("EVI".parse::<Measurement>().is_err());
    }

    #[test]
    fn only_avg_greenness_is_bounded() {
        assert_eq!(Measurement::Ndvi.axis_bounds(), None);
        assert_eq!(Measurement::AvgGreenness.axis_bounds(), Some((0.0, 100.0)));
    }
}
