//! Control registry and control state.
//!
//! Each control has a stable key (used as the DOM id), a label, a domain and
//! a default. [`ControlState`] only ever holds values inside those domains:
//! changes go through [`ControlRegistry::validate`] first.

use crate::config::DashboardConfig;
use crate::error::ControlError;
use green_chart::{LowerSelection, UpperSelection};
use green_data::dataset::AGGREGATE_LABEL;
use green_data::{Dataset, Grouping, Measurement, RegionScope, YearRange};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Selector value meaning "no comparison grouping".
pub const NO_COMPARISON: &str = "-none-";

/// Every user-adjustable control on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ControlId {
    Region,
    Comparison,
    Measurement,
    Years,
    LowerRegion,
    LowerMeasurement,
    LowerYears,
}

impl ControlId {
    pub const ALL: [ControlId; 7] = [
        ControlId::Region,
        ControlId::Comparison,
        ControlId::Measurement,
        ControlId::Years,
        ControlId::LowerRegion,
        ControlId::LowerMeasurement,
        ControlId::LowerYears,
    ];

    /// Stable identifier, also used as the input's DOM id.
    pub fn key(self) -> &'static str {
        match self {
            ControlId::Region => "prov",
            ControlId::Comparison => "comp",
            ControlId::Measurement => "meas",
            ControlId::Years => "years",
            ControlId::LowerRegion => "prov2",
            ControlId::LowerMeasurement => "meas2",
            ControlId::LowerYears => "years2",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ControlId::Region | ControlId::LowerRegion => "Select Province:",
            ControlId::Comparison => "Municipality Comparison Method:",
            ControlId::Measurement | ControlId::LowerMeasurement => "Greenness Index:",
            ControlId::Years | ControlId::LowerYears => "Display Year Range:",
        }
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ControlId {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ControlId::ALL
            .into_iter()
            .find(|id| id.key() == s)
            .ok_or_else(|| ControlError::Unknown(s.to_string()))
    }
}

/// A control's current or candidate value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ControlValue {
    Choice(String),
    Years(YearRange),
}

impl ControlValue {
    pub fn choice(value: impl Into<String>) -> Self {
        ControlValue::Choice(value.into())
    }
}

impl fmt::Display for ControlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlValue::Choice(s) => f.write_str(s),
            ControlValue::Years(range) => write!(f, "{}", range),
        }
    }
}

/// The values a control accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Domain {
    /// One of an enumerated list of options, in display order.
    Choice(Vec<String>),
    /// Any year range inside the bounds.
    Years(YearRange),
}

impl Domain {
    pub fn admits(&self, value: &ControlValue) -> bool {
        match (self, value) {
            (Domain::Choice(options), ControlValue::Choice(v)) => options.contains(v),
            (Domain::Years(bounds), ControlValue::Years(range)) => range.within(bounds),
            _ => false,
        }
    }
}

/// Declaration of one control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Control {
    pub id: ControlId,
    pub label: &'static str,
    pub domain: Domain,
    pub default: ControlValue,
}

/// All controls of the dashboard, with domains derived from the dataset.
#[derive(Debug, Clone)]
pub struct ControlRegistry {
    controls: Vec<Control>,
}

impl ControlRegistry {
    pub fn new(dataset: &Dataset, config: &DashboardConfig) -> Self {
        let regions = dataset.regions().to_vec();
        let mut upper_regions = Vec::with_capacity(regions.len() + 1);
        upper_regions.push(AGGREGATE_LABEL.to_string());
        upper_regions.extend(regions.iter().cloned());

        let comparisons: Vec<String> = std::iter::once(NO_COMPARISON.to_string())
            .chain(Grouping::ALL.iter().map(|g| g.label().to_string()))
            .collect();
        let measurements: Vec<String> = Measurement::ALL
            .iter()
            .map(|m| m.label().to_string())
            .collect();

        let lower_default = regions
            .iter()
            .find(|r| **r == config.lower_default_region)
            .or_else(|| regions.first())
            .cloned()
            .unwrap_or_default();

        let bounds = config.year_bounds;
        let control = |id: ControlId, domain: Domain, default: ControlValue| Control {
            id,
            label: id.label(),
            domain,
            default,
        };

        let controls = vec![
            control(
                ControlId::Region,
                Domain::Choice(upper_regions),
                ControlValue::choice(AGGREGATE_LABEL),
            ),
            control(
                ControlId::Comparison,
                Domain::Choice(comparisons),
                ControlValue::choice(NO_COMPARISON),
            ),
            control(
                ControlId::Measurement,
                Domain::Choice(measurements.clone()),
                ControlValue::choice(Measurement::Ndvi.label()),
            ),
            control(
                ControlId::Years,
                Domain::Years(bounds),
                ControlValue::Years(bounds),
            ),
            control(
                ControlId::LowerRegion,
                Domain::Choice(regions),
                ControlValue::Choice(lower_default),
            ),
            control(
                ControlId::LowerMeasurement,
                Domain::Choice(measurements),
                ControlValue::choice(Measurement::Ndvi.label()),
            ),
            control(
                ControlId::LowerYears,
                Domain::Years(bounds),
                ControlValue::Years(bounds),
            ),
        ];
        Self { controls }
    }

    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.controls.iter().find(|c| c.id == id)
    }

    /// Options of a choice control, in display order.
    pub fn options(&self, id: ControlId) -> &[String] {
        match self.get(id).map(|c| &c.domain) {
            Some(Domain::Choice(options)) => options,
            _ => &[],
        }
    }

    /// Bounds of a year-range control.
    pub fn year_bounds(&self, id: ControlId) -> Option<YearRange> {
        match self.get(id).map(|c| &c.domain) {
            Some(Domain::Years(bounds)) => Some(*bounds),
            _ => None,
        }
    }

    /// Check that `value` fits the domain of `id`.
    pub fn validate(&self, id: ControlId, value: &ControlValue) -> Result<(), ControlError> {
        let control = self
            .get(id)
            .ok_or_else(|| ControlError::Unknown(id.key().to_string()))?;
        match (&control.domain, value) {
            (Domain::Choice(_), ControlValue::Years(_)) => Err(ControlError::WrongKind {
                id,
                expected: "a choice",
            }),
            (Domain::Years(_), ControlValue::Choice(_)) => Err(ControlError::WrongKind {
                id,
                expected: "a year range",
            }),
            (domain, value) if domain.admits(value) => Ok(()),
            _ => Err(ControlError::OutOfDomain {
                id,
                value: value.to_string(),
            }),
        }
    }

    /// A state holding every control's default.
    pub fn defaults(&self) -> ControlState {
        ControlState {
            values: self
                .controls
                .iter()
                .map(|c| (c.id, c.default.clone()))
                .collect(),
        }
    }
}

/// Current values of all controls at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    values: BTreeMap<ControlId, ControlValue>,
}

impl ControlState {
    pub fn get(&self, id: ControlId) -> Option<&ControlValue> {
        self.values.get(&id)
    }

    pub fn choice(&self, id: ControlId) -> Option<&str> {
        match self.values.get(&id) {
            Some(ControlValue::Choice(s)) => Some(s),
            _ => None,
        }
    }

    pub fn years(&self, id: ControlId) -> Option<YearRange> {
        match self.values.get(&id) {
            Some(ControlValue::Years(range)) => Some(*range),
            _ => None,
        }
    }

    /// Store a value already validated by the registry. Returns whether it changed.
    pub(crate) fn set(&mut self, id: ControlId, value: ControlValue) -> bool {
        match self.values.get(&id) {
            Some(current) if *current == value => false,
            _ => {
                self.values.insert(id, value);
                true
            }
        }
    }

    fn measurement(&self, id: ControlId) -> Result<Measurement, ControlError> {
        let label = self.choice(id).ok_or(ControlError::WrongKind {
            id,
            expected: "a choice",
        })?;
        label.parse().map_err(|_| ControlError::OutOfDomain {
            id,
            value: label.to_string(),
        })
    }

    fn year_range(&self, id: ControlId) -> Result<YearRange, ControlError> {
        self.years(id).ok_or(ControlError::WrongKind {
            id,
            expected: "a year range",
        })
    }

    /// Typed view of the distribution chart's controls.
    pub fn upper_selection(&self) -> Result<UpperSelection, ControlError> {
        let region = self.choice(ControlId::Region).ok_or(ControlError::WrongKind {
            id: ControlId::Region,
            expected: "a choice",
        })?;
        let comparison = self
            .choice(ControlId::Comparison)
            .ok_or(ControlError::WrongKind {
                id: ControlId::Comparison,
                expected: "a choice",
            })?;
        let grouping = if comparison == NO_COMPARISON {
            None
        } else {
            Some(
                comparison
                    .parse::<Grouping>()
                    .map_err(|_| ControlError::OutOfDomain {
                        id: ControlId::Comparison,
                        value: comparison.to_string(),
                    })?,
            )
        };
        Ok(UpperSelection {
            scope: RegionScope::from_label(region),
            grouping,
            measurement: self.measurement(ControlId::Measurement)?,
            years: self.year_range(ControlId::Years)?,
        })
    }

    /// Typed view of the ordinal chart's controls.
    pub fn lower_selection(&self) -> Result<LowerSelection, ControlError> {
        let region = self
            .choice(ControlId::LowerRegion)
            .ok_or(ControlError::WrongKind {
                id: ControlId::LowerRegion,
                expected: "a choice",
            })?;
        Ok(LowerSelection {
            region: region.to_string(),
            measurement: self.measurement(ControlId::LowerMeasurement)?,
            years: self.year_range(ControlId::LowerYears)?,
        })
    }
}
