//! Ordinal scatter chart of selected municipalities.
//!
//! Municipalities of one province are ranked by their reference-year value
//! of the chosen index and plotted in that order, one facet per growth
//! class. The ranking comes from the `Current *` columns, so moving the year
//! range never reorders the horizontal axis.

use crate::builder::{first_appearance, ChartBuilder};
use crate::chart::{
    Axis, AxisScale, Chart, ChartKind, Facet, Legend, LegendEntry, LegendPosition, PointSeries,
    ScatterPoint, Series,
};
use crate::error::{RenderError, Result};
use crate::palette;
use green_data::{Dataset, Measurement, Observation, YearRange};
use std::collections::BTreeSet;

/// Municipalities below this population are left out of the ordinal chart.
pub const MIN_POPULATION: u64 = 5000;

const POINT_SIZE: f64 = 15.0;
const VALUE_PADDING: f64 = 0.05;

/// What the ordinal chart shows.
#[derive(Debug, Clone, PartialEq)]
pub struct LowerSelection {
    pub region: String,
    pub measurement: Measurement,
    pub years: YearRange,
}

/// Builds the ranked scatter chart faceted by growth class.
#[derive(Debug, Clone)]
pub struct OrdinalChartBuilder {
    pub min_population: u64,
}

impl Default for OrdinalChartBuilder {
    fn default() -> Self {
        Self {
            min_population: MIN_POPULATION,
        }
    }
}

impl OrdinalChartBuilder {
    pub fn new(min_population: u64) -> Self {
        Self { min_population }
    }

    /// Filtered rows sorted by (reference-year value, year), ascending.
    ///
    /// Rows with a missing population, value or reference-year value are
    /// left out. The sort is stable, so rows that tie on both keys keep file
    /// order.
    pub fn ranked_rows<'a>(
        &self,
        dataset: &'a Dataset,
        selection: &LowerSelection,
    ) -> Vec<&'a Observation> {
        let measurement = selection.measurement;
        let min_population = self.min_population as f64;
        let mut rows: Vec<&Observation> = dataset
            .rows()
            .iter()
            .filter(|o| o.current_population >= min_population)
            .filter(|o| o.region == selection.region)
            .filter(|o| selection.years.contains(o.year))
            .filter(|o| measurement.value(o).is_finite() && measurement.current_value(o).is_finite())
            .collect();
        rows.sort_by(|a, b| {
            measurement
                .current_value(a)
                .total_cmp(&measurement.current_value(b))
                .then(a.year.cmp(&b.year))
        });
        rows
    }
}

impl ChartBuilder for OrdinalChartBuilder {
    type Selection = LowerSelection;

    fn build(&self, dataset: &Dataset, selection: &LowerSelection) -> Result<Chart> {
        if selection.region.trim().is_empty() {
            return Err(RenderError::InvalidSelection(
                "no province selected".to_string(),
            ));
        }

        let rows = self.ranked_rows(dataset, selection);
        if rows.is_empty() {
            return Err(RenderError::NoData {
                scope: selection.region.clone(),
                years: selection.years.to_string(),
            });
        }

        let measurement = selection.measurement;
        let (first, last) = (selection.years.start(), selection.years.end());
        let classes = first_appearance(rows.iter().map(|o| o.growth_class.as_str()));

        let facets: Vec<Facet> = classes
            .into_iter()
            .map(|class| {
                let members: Vec<&Observation> = rows
                    .iter()
                    .copied()
                    .filter(|o| o.growth_class == class)
                    .collect();
                let points = members
                    .iter()
                    .map(|o| ScatterPoint {
                        category: o.sub_region.clone(),
                        value: measurement.value(o),
                        year: o.year,
                        color: palette::year_color(o.year, first, last),
                    })
                    .collect();
                Facet {
                    categories: first_appearance(members.iter().map(|o| o.sub_region.as_str())),
                    series: vec![Series::Points(PointSeries {
                        size: POINT_SIZE,
                        outline_width: 0.0,
                        points,
                    })],
                    title: class,
                }
            })
            .collect();

        let (lo, hi) = rows
            .iter()
            .map(|o| measurement.value(o))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        // 5% headroom above and below the data
        let pad = ((hi - lo) * VALUE_PADDING).max(f64::EPSILON);
        let value_extent = (lo - pad, hi + pad);

        let years_shown: BTreeSet<i32> = rows.iter().map(|o| o.year).collect();
        let legend = Legend {
            title: "year".to_string(),
            position: LegendPosition::LowerLeft,
            framed: true,
            entries: years_shown
                .into_iter()
                .map(|year| LegendEntry {
                    label: year.to_string(),
                    color: palette::year_color(year, first, last),
                })
                .collect(),
        };

        log::debug!(
            "lower: {} facets from {} observations ({}, {}, {})",
            facets.len(),
            rows.len(),
            selection.region,
            measurement,
            selection.years
        );

        Ok(Chart {
            kind: ChartKind::Scatter,
            title: format!(
                "Yearly Greenness Levels of Select Municipalities: {}",
                selection.region
            ),
            facets,
            x_axis: Axis {
                title: "Municipality".to_string(),
                scale: AxisScale::Category,
                domain: None,
                ticks: None,
                tick_rotation: 90,
            },
            y_axis: Axis {
                title: measurement.axis_label().to_string(),
                scale: AxisScale::Linear,
                domain: Some(measurement.axis_bounds().unwrap_or(value_extent)),
                ticks: None,
                tick_rotation: 0,
            },
            legend: Some(legend),
            share_x: false,
            share_y: true,
            observations: rows.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Province,Municipality,REF_DATE,NDVI,Avg Greenness,Land Class,Municipality Size,Growth Class,Current Population,Current NDVI,Current Avg Greenness";

    fn dataset(rows: &str) -> Dataset {
        Dataset::from_csv_str(&format!("{}\n{}", HEADER, rows)).unwrap()
    }

    fn ontario() -> Dataset {
        dataset(
            "\
Ontario,Toronto,2001,0.41,38.2,Urban,Large,Moderate,2794356,0.45,41.0
Ontario,Toronto,2022,0.45,41.0,Urban,Large,Moderate,2794356,0.45,41.0
Ontario,Guelph,2001,0.52,55.1,Suburban,Medium,High,143740,0.55,58.3
Ontario,Guelph,2022,0.55,58.3,Suburban,Medium,High,143740,0.55,58.3
Ontario,Barrie,2001,0.49,51.0,Suburban,Medium,High,153356,0.51,52.0
Ontario,Barrie,2022,0.51,52.0,Suburban,Medium,High,153356,0.51,52.0
Ontario,Tiny,2001,0.70,90.0,Rural,Small,Low,4999,0.71,92.0
Ontario,Wasaga,2001,0.60,70.0,Rural,Small,Low,5000,0.62,75.0
Quebec,Laval,2001,0.47,48.9,Suburban,Large,Low,438366,0.49,50.2
",
        )
    }

    fn selection(measurement: Measurement, years: YearRange) -> LowerSelection {
        LowerSelection {
            region: "Ontario".to_string(),
            measurement,
            years,
        }
    }

    fn names(rows: &[&Observation]) -> Vec<String> {
        rows.iter()
            .map(|o| format!("{}:{}", o.sub_region, o.year))
            .collect()
    }

    #[test]
    fn population_boundary() {
        let ds = ontario();
        let rows = OrdinalChartBuilder::default()
            .ranked_rows(&ds, &selection(Measurement::Ndvi, YearRange::FULL));
        assert!(rows.iter().any(|o| o.sub_region == "Wasaga"));
        assert!(rows.iter().all(|o| o.sub_region != "Tiny"));
        assert!(rows.iter().all(|o| o.region == "Ontario"));
    }

    #[test]
    fn fractional_and_missing_population() {
        let ds = dataset(
            "\
Ontario,Orillia,2001,0.50,50.0,Urban,Small,Low,4999.5,0.52,51.0
Ontario,Midland,2001,0.48,47.0,Urban,Small,Low,,0.49,48.0
Ontario,Wasaga,2001,0.60,70.0,Rural,Small,Low,5000.0,0.62,75.0
Ontario,Collingwood,2001,,NaN,Rural,Small,Low,24811,0.58,NaN
",
        );
        let builder = OrdinalChartBuilder::default();
        let ndvi = builder.ranked_rows(&ds, &selection(Measurement::Ndvi, YearRange::FULL));
        assert_eq!(names(&ndvi), vec!["Wasaga:2001"]);

        let ag = builder.ranked_rows(&ds, &selection(Measurement::AvgGreenness, YearRange::FULL));
        assert_eq!(names(&ag), vec!["Wasaga:2001"]);
    }

    #[test]
    fn ranked_by_current_value_then_year() {
        let ds = ontario();
        let rows = OrdinalChartBuilder::default()
            .ranked_rows(&ds, &selection(Measurement::Ndvi, YearRange::FULL));
        assert_eq!(
            names(&rows),
            vec![
                "Toronto:2001",
                "Toronto:2022",
                "Barrie:2001",
                "Barrie:2022",
                "Guelph:2001",
                "Guelph:2022",
                "Wasaga:2001",
            ]
        );
    }

    #[test]
    fn ranking_ignores_displayed_years() {
        let ds = ontario();
        let builder = OrdinalChartBuilder::default();
        let early = builder
            .build(&ds, &selection(Measurement::AvgGreenness, YearRange::new(2001, 2001).unwrap()))
            .unwrap();
        let late = builder
            .build(&ds, &selection(Measurement::AvgGreenness, YearRange::new(2022, 2022).unwrap()))
            .unwrap();
        let high_early = early.facets.iter().find(|f| f.title == "High").unwrap();
        let high_late = late.facets.iter().find(|f| f.title == "High").unwrap();
        assert_eq!(high_early.categories, vec!["Barrie", "Guelph"]);
        assert_eq!(high_late.categories, high_early.categories);
    }

    #[test]
    fn ties_break_on_year() {
        let ds = dataset(
            "\
Alberta,Airdrie,2005,0.30,20.0,Urban,Medium,High,74100,0.50,40.0
Alberta,Airdrie,2006,0.31,21.0,Urban,Medium,High,74100,0.50,40.0
Alberta,Brooks,2003,0.32,22.0,Urban,Small,High,14451,0.50,40.0
Alberta,Brooks,2004,0.33,23.0,Urban,Small,High,14451,0.50,40.0
",
        );
        let sel = LowerSelection {
            region: "Alberta".to_string(),
            measurement: Measurement::Ndvi,
            years: YearRange::FULL,
        };
        let builder = OrdinalChartBuilder::default();
        let first = names(&builder.ranked_rows(&ds, &sel));
        assert_eq!(
            first,
            vec!["Brooks:2003", "Brooks:2004", "Airdrie:2005", "Airdrie:2006"]
        );
        assert_eq!(names(&builder.ranked_rows(&ds, &sel)), first);

        let chart = builder.build(&ds, &sel).unwrap();
        assert_eq!(chart.facets[0].categories, vec!["Brooks", "Airdrie"]);
    }

    #[test]
    fn facets_by_growth_class_with_shared_value_axis() {
        let ds = ontario();
        let chart = OrdinalChartBuilder::default()
            .build(&ds, &selection(Measurement::Ndvi, YearRange::FULL))
            .unwrap();
        let titles: Vec<&str> = chart.facets.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["Moderate", "High", "Low"]);
        assert!(chart.share_y);
        assert!(!chart.share_x);
        assert_eq!(chart.x_axis.scale, AxisScale::Category);
        assert_eq!(chart.facets[2].categories, vec!["Wasaga"]);
        let (lo, hi) = chart.y_axis.domain.unwrap();
        // observed 0.41..=0.60 plus 5% headroom
        assert!((lo - 0.4005).abs() < 1e-9 && (hi - 0.6095).abs() < 1e-9);
    }

    #[test]
    fn points_colored_by_year() {
        let ds = ontario();
        let chart = OrdinalChartBuilder::default()
            .build(&ds, &selection(Measurement::Ndvi, YearRange::new(2001, 2022).unwrap()))
            .unwrap();
        let Series::Points(series) = &chart.facets[0].series[0] else {
            panic!("ordinal chart holds points only")
        };
        let first = series.points.iter().find(|p| p.year == 2001).unwrap();
        let last = series.points.iter().find(|p| p.year == 2022).unwrap();
        assert_eq!(first.color, palette::yl_or_br(0.0));
        assert_eq!(last.color, palette::yl_or_br(1.0));
        let legend = chart.legend.unwrap();
        assert_eq!(legend.position, LegendPosition::LowerLeft);
        assert_eq!(legend.entries.len(), 2);
    }

    #[test]
    fn avg_greenness_axis_is_clamped() {
        let ds = ontario();
        let chart = OrdinalChartBuilder::default()
            .build(&ds, &selection(Measurement::AvgGreenness, YearRange::FULL))
            .unwrap();
        assert_eq!(chart.y_axis.domain, Some((0.0, 100.0)));
        assert_eq!(chart.y_axis.title, "Avg Greenness (% Land Cover)");
    }

    #[test]
    fn empty_selection_is_render_error() {
        let ds = ontario();
        let builder = OrdinalChartBuilder::default();
        let outside = selection(Measurement::Ndvi, YearRange::new(2010, 2015).unwrap());
        assert!(matches!(
            builder.build(&ds, &outside),
            Err(RenderError::NoData { .. })
        ));

        let blank = LowerSelection {
            region: String::new(),
            ..selection(Measurement::Ndvi, YearRange::FULL)
        };
        assert!(matches!(
            builder.build(&ds, &blank),
            Err(RenderError::InvalidSelection(_))
        ));
    }
}
