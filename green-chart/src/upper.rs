//! Yearly distribution chart.
//!
//! One facet per year in the selected range, each holding a filled kernel
//! density curve of the chosen index. With a comparison grouping, every
//! category gets its own curve (normalized on its own) and a consistent
//! color across facets. Categories are ordered by first appearance in the
//! selected rows.

use crate::builder::{first_appearance, ChartBuilder};
use crate::chart::{
    Axis, AxisScale, Chart, ChartKind, DensitySeries, Facet, Legend, LegendEntry, LegendPosition,
    Series,
};
use crate::density::{gaussian_kde, KdeParams};
use crate::error::{RenderError, Result};
use crate::palette;
use green_data::{Dataset, Grouping, Measurement, Observation, RegionScope, YearRange};
use std::collections::BTreeMap;

const TITLE: &str = "Yearly Aggregate Distributions of Canadian Municipality Greenness Levels";
const FILL_OPACITY: f64 = 0.3;

/// What the distribution chart shows.
#[derive(Debug, Clone, PartialEq)]
pub struct UpperSelection {
    pub scope: RegionScope,
    /// `None` draws one ungrouped curve per year.
    pub grouping: Option<Grouping>,
    pub measurement: Measurement,
    pub years: YearRange,
}

/// Builds the yearly density distribution chart.
#[derive(Debug, Clone, Default)]
pub struct DistributionChartBuilder {
    pub kde: KdeParams,
}

impl DistributionChartBuilder {
    pub fn new(kde: KdeParams) -> Self {
        Self { kde }
    }

    fn curve(&self, name: Option<&str>, color: &str, values: &[f64]) -> Option<DensitySeries> {
        let points = gaussian_kde(values, &self.kde)?;
        Some(DensitySeries {
            name: name.map(str::to_string),
            color: color.to_string(),
            fill_opacity: FILL_OPACITY,
            sample_size: values.len(),
            points,
        })
    }
}

impl ChartBuilder for DistributionChartBuilder {
    type Selection = UpperSelection;

    fn build(&self, dataset: &Dataset, selection: &UpperSelection) -> Result<Chart> {
        let rows = dataset.select(&selection.scope, &selection.years);
        if rows.is_empty() {
            return Err(RenderError::NoData {
                scope: selection.scope.label().to_string(),
                years: selection.years.to_string(),
            });
        }

        let measurement = selection.measurement;
        let categories: Vec<String> = match selection.grouping {
            Some(grouping) => first_appearance(rows.iter().map(|o| o.category(grouping))),
            None => Vec::new(),
        };

        let mut by_year: BTreeMap<i32, Vec<&Observation>> = BTreeMap::new();
        for obs in rows.iter().copied() {
            by_year.entry(obs.year).or_default().push(obs);
        }

        let mut facets = Vec::with_capacity(by_year.len());
        for (year, observations) in &by_year {
            let mut series = Vec::new();
            match selection.grouping {
                None => {
                    let values: Vec<f64> = observations.iter().map(|o| measurement.value(o)).collect();
                    match self.curve(None, palette::categorical(0), &values) {
                        Some(curve) => series.push(Series::Density(curve)),
                        None => log::warn!(
                            "upper: skipping {} with {} observation(s) and no spread",
                            year,
                            values.len()
                        ),
                    }
                }
                Some(grouping) => {
                    for (i, category) in categories.iter().enumerate() {
                        let values: Vec<f64> = observations
                            .iter()
                            .filter(|o| o.category(grouping) == category.as_str())
                            .map(|o| measurement.value(o))
                            .collect();
                        if values.is_empty() {
                            continue;
                        }
                        match self.curve(Some(category.as_str()), palette::categorical(i), &values) {
                            Some(curve) => series.push(Series::Density(curve)),
                            None => log::warn!(
                                "upper: skipping {} / {} with {} observation(s) and no spread",
                                year,
                                category,
                                values.len()
                            ),
                        }
                    }
                }
            }
            facets.push(Facet {
                title: year.to_string(),
                categories: Vec::new(),
                series,
            });
        }

        let curves = facets.iter().flat_map(|f| &f.series).filter_map(|s| match s {
            Series::Density(d) => Some(d),
            Series::Points(_) => None,
        });
        let mut max_density = 0.0f64;
        let mut value_extent = (f64::INFINITY, f64::NEG_INFINITY);
        for curve in curves {
            for p in &curve.points {
                max_density = max_density.max(p.density);
                value_extent = (value_extent.0.min(p.value), value_extent.1.max(p.value));
            }
        }
        if !value_extent.0.is_finite() {
            let values = rows.iter().map(|o| measurement.value(o));
            value_extent = values.fold(value_extent, |(lo, hi), v| (lo.min(v), hi.max(v)));
        }
        if max_density <= 0.0 {
            max_density = 1.0;
        }

        let legend = selection.grouping.map(|grouping| Legend {
            title: grouping.label().to_string(),
            position: LegendPosition::LowerRight,
            framed: true,
            entries: categories
                .iter()
                .enumerate()
                .map(|(i, c)| LegendEntry {
                    label: c.clone(),
                    color: palette::categorical(i).to_string(),
                })
                .collect(),
        });

        let title = match selection.grouping {
            Some(grouping) => format!("{} by {}", TITLE, grouping.label()),
            None => TITLE.to_string(),
        };

        log::debug!(
            "upper: {} facets from {} observations ({}, {}, {})",
            facets.len(),
            rows.len(),
            selection.scope.label(),
            measurement,
            selection.years
        );

        Ok(Chart {
            kind: ChartKind::Density,
            title,
            facets,
            // Density ticks only at the extremities
            x_axis: Axis {
                title: "Density".to_string(),
                scale: AxisScale::Linear,
                domain: Some((0.0, max_density)),
                ticks: Some(vec![0.0, max_density]),
                tick_rotation: 90,
            },
            y_axis: Axis {
                title: measurement.axis_label().to_string(),
                scale: AxisScale::Linear,
                domain: Some(measurement.axis_bounds().unwrap_or(value_extent)),
                ticks: None,
                tick_rotation: 0,
            },
            legend,
            share_x: true,
            share_y: true,
            observations: rows.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
Province,Municipality,REF_DATE,NDVI,Avg Greenness,Land Class,Municipality Size,Growth Class,Current Population,Current NDVI,Current Avg Greenness
Ontario,Toronto,2001,0.41,38.2,Urban,Large,Moderate,2794356,0.45,41.0
Ontario,Toronto,2002,0.43,39.0,Urban,Large,Moderate,2794356,0.45,41.0
Ontario,Guelph,2001,0.52,55.1,Suburban,Medium,High,143740,0.55,58.3
Ontario,Guelph,2002,0.50,54.0,Suburban,Medium,High,143740,0.55,58.3
Ontario,Barrie,2001,0.49,51.0,Suburban,Medium,High,153356,0.51,52.0
Ontario,Barrie,2002,0.47,50.2,Suburban,Medium,High,153356,0.51,52.0
Ontario,Kingston,2001,0.44,47.7,Urban,Large,Low,136685,0.46,48.1
Ontario,Kingston,2002,0.45,46.9,Urban,Large,Low,136685,0.46,48.1
Quebec,Laval,2001,0.47,48.9,Suburban,Large,Low,438366,0.49,50.2
Quebec,Laval,2002,0.46,48.0,Suburban,Large,Low,438366,0.49,50.2
Quebec,Gatineau,2001,0.55,61.0,Suburban,Large,Moderate,291041,0.57,63.4
Quebec,Gatineau,2002,0.56,62.2,Suburban,Large,Moderate,291041,0.57,63.4
";

    fn dataset() -> Dataset {
        Dataset::from_csv_str(CSV).unwrap()
    }

    fn selection(grouping: Option<Grouping>) -> UpperSelection {
        UpperSelection {
            scope: RegionScope::Aggregate,
            grouping,
            measurement: Measurement::Ndvi,
            years: YearRange::FULL,
        }
    }

    #[test]
    fn one_facet_per_year_without_legend() {
        let chart = DistributionChartBuilder::default()
            .build(&dataset(), &selection(None))
            .unwrap();
        assert_eq!(chart.kind, ChartKind::Density);
        let titles: Vec<&str> = chart.facets.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["2001", "2002"]);
        assert!(chart.legend.is_none());
        assert!(chart.facets.iter().all(|f| f.series.len() == 1));
        assert_eq!(chart.observations, 12);
        assert_eq!(chart.y_axis.title, "NDVI (unitless)");
    }

    #[test]
    fn grouping_adds_legend_without_changing_rows() {
        let ds = dataset();
        let builder = DistributionChartBuilder::default();
        let plain = builder.build(&ds, &selection(None)).unwrap();
        for grouping in Grouping::ALL {
            let grouped = builder.build(&ds, &selection(Some(grouping))).unwrap();
            assert_eq!(grouped.observations, plain.observations);
            let legend = grouped.legend.unwrap();
            assert_eq!(legend.position, LegendPosition::LowerRight);
            assert_eq!(legend.title, grouping.label());
            assert!(grouped.title.ends_with(grouping.label()));
        }
    }

    #[test]
    fn groups_keep_their_color_across_facets() {
        let chart = DistributionChartBuilder::default()
            .build(&dataset(), &selection(Some(Grouping::LandClass)))
            .unwrap();
        let legend = chart.legend.unwrap();
        assert_eq!(legend.entries.len(), 2);
        for facet in &chart.facets {
            for series in &facet.series {
                let Series::Density(curve) = series else {
                    panic!("distribution chart holds density curves only")
                };
                let entry = legend
                    .entries
                    .iter()
                    .find(|e| Some(&e.label) == curve.name.as_ref())
                    .unwrap();
                assert_eq!(entry.color, curve.color);
            }
        }
    }

    #[test]
    fn categories_follow_first_appearance() {
        // Key order visits Gatineau (Moderate) before Laval (Low)
        let sel = UpperSelection {
            scope: RegionScope::Region("Quebec".to_string()),
            grouping: Some(Grouping::GrowthClass),
            measurement: Measurement::Ndvi,
            years: YearRange::FULL,
        };
        let chart = DistributionChartBuilder::default()
            .build(&dataset(), &sel)
            .unwrap();
        let labels: Vec<&str> = chart
            .legend
            .as_ref()
            .unwrap()
            .entries
            .iter()
            .map(|e| e.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Moderate", "Low"]);
    }

    #[test]
    fn constant_group_does_not_stretch_density_axis() {
        let csv = "\
Province,Municipality,REF_DATE,NDVI,Avg Greenness,Land Class,Municipality Size,Growth Class,Current Population,Current NDVI,Current Avg Greenness
Alberta,Airdrie,2001,0.4,40.0,Urban,Medium,High,74100,0.4,40.0
Alberta,Brooks,2001,0.4,40.0,Urban,Small,High,14451,0.4,40.0
Alberta,Camrose,2001,0.4,40.0,Urban,Small,Low,18742,0.4,40.0
Alberta,Canmore,2001,0.45,52.0,Rural,Small,High,15990,0.45,52.0
Alberta,Cochrane,2001,0.52,58.0,Rural,Small,High,32199,0.52,58.0
Alberta,Okotoks,2001,0.60,66.0,Rural,Small,High,30214,0.60,66.0
";
        let ds = Dataset::from_csv_str(csv).unwrap();
        let sel = UpperSelection {
            scope: RegionScope::Region("Alberta".to_string()),
            grouping: Some(Grouping::LandClass),
            measurement: Measurement::Ndvi,
            years: YearRange::FULL,
        };
        let chart = DistributionChartBuilder::default().build(&ds, &sel).unwrap();
        assert_eq!(chart.facets[0].series.len(), 1);
        let Series::Density(curve) = &chart.facets[0].series[0] else {
            panic!("distribution chart holds density curves only")
        };
        assert_eq!(curve.name.as_deref(), Some("Rural"));
        let (lo, hi) = chart.x_axis.domain.unwrap();
        assert_eq!(lo, 0.0);
        assert!(hi > 1.0 && hi < 10.0, "density axis max was {}", hi);
        assert_eq!(chart.observations, 6);
    }

    #[test]
    fn density_ticks_only_at_extremities() {
        let chart = DistributionChartBuilder::default()
            .build(&dataset(), &selection(None))
            .unwrap();
        let ticks = chart.x_axis.ticks.unwrap();
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0], 0.0);
        assert_eq!(Some((0.0, ticks[1])), chart.x_axis.domain);
        assert!(ticks[1] > 0.0);
    }

    #[test]
    fn avg_greenness_axis_is_clamped() {
        let mut sel = selection(Some(Grouping::MunicipalitySize));
        sel.measurement = Measurement::AvgGreenness;
        let chart = DistributionChartBuilder::default()
            .build(&dataset(), &sel)
            .unwrap();
        assert_eq!(chart.y_axis.domain, Some((0.0, 100.0)));
        assert_eq!(chart.y_axis.title, "Avg Greenness (% Land Cover)");
    }

    #[test]
    fn single_region_and_year() {
        let sel = UpperSelection {
            scope: RegionScope::Region("Quebec".to_string()),
            grouping: None,
            measurement: Measurement::Ndvi,
            years: YearRange::new(2002, 2002).unwrap(),
        };
        let chart = DistributionChartBuilder::default()
            .build(&dataset(), &sel)
            .unwrap();
        assert_eq!(chart.observations, 2);
        assert_eq!(chart.facets.len(), 1);
    }

    #[test]
    fn groups_without_spread_are_skipped() {
        // Only one Low-growth municipality per year in Quebec
        let sel = UpperSelection {
            scope: RegionScope::Region("Quebec".to_string()),
            grouping: Some(Grouping::GrowthClass),
            measurement: Measurement::Ndvi,
            years: YearRange::FULL,
        };
        let chart = DistributionChartBuilder::default()
            .build(&dataset(), &sel)
            .unwrap();
        assert!(chart.facets.iter().all(|f| f.series.is_empty()));
        assert_eq!(chart.x_axis.domain, Some((0.0, 1.0)));
    }

    #[test]
    fn empty_selection_is_render_error() {
        let mut sel = selection(None);
        sel.years = YearRange::new(1990, 1995).unwrap();
        let result = DistributionChartBuilder::default().build(&dataset(), &sel);
        assert!(matches!(result, Err(RenderError::NoData { .. })));

        let sel = UpperSelection {
            scope: RegionScope::Region("Yukon".to_string()),
            ..selection(None)
        };
        assert!(DistributionChartBuilder::default()
            .build(&dataset(), &sel)
            .is_err());
    }
}
