//! CSV loading and the (region, sub-region, year) index.
//!
//! The cleaned greenness table has one row per municipality and year:
//!
//! ```text
//! Province,Municipality,REF_DATE,NDVI,Avg Greenness,Land Class,Municipality Size,Growth Class,Current Population,Current NDVI,Current Avg Greenness
//! Ontario,Toronto,2001,0.41,38.2,Urban,Large,Moderate,2794356,0.45,41.0
//! ```
//!
//! `REF_DATE` may be a bare year or an ISO date; only the year is kept.
//! Extra columns are ignored.

use crate::error::{LoadError, Result};
use crate::observation::Observation;
use crate::year_range::YearRange;
use chrono::{Datelike, NaiveDate};
use csv::StringRecord;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Header names that must be present in the source table.
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "Province",
    "Municipality",
    "REF_DATE",
    "NDVI",
    "Avg Greenness",
    "Land Class",
    "Municipality Size",
    "Growth Class",
    "Current Population",
    "Current NDVI",
    "Current Avg Greenness",
];

/// Selector label for the all-regions scope.
pub const AGGREGATE_LABEL: &str = "Canada (Aggregate)";

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Province")]
    region: String,
    #[serde(rename = "Municipality")]
    sub_region: String,
    #[serde(rename = "REF_DATE")]
    ref_date: String,
    #[serde(rename = "NDVI")]
    ndvi: Option<f64>,
    #[serde(rename = "Avg Greenness")]
    avg_greenness: Option<f64>,
    #[serde(rename = "Land Class")]
    land_class: String,
    #[serde(rename = "Municipality Size")]
    municipality_size: String,
    #[serde(rename = "Growth Class")]
    growth_class: String,
    // Empty cells are missing values and load as NaN
    #[serde(rename = "Current Population")]
    current_population: Option<f64>,
    #[serde(rename = "Current NDVI")]
    current_ndvi: Option<f64>,
    #[serde(rename = "Current Avg Greenness")]
    current_avg_greenness: Option<f64>,
}

/// Which regions a view covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegionScope {
    /// Every region in the dataset.
    Aggregate,
    /// A single named region.
    Region(String),
}

impl RegionScope {
    /// Interpret a selector value; the aggregate label maps to [`RegionScope::Aggregate`].
    pub fn from_label(label: &str) -> Self {
        if label == AGGREGATE_LABEL {
            RegionScope::Aggregate
        } else {
            RegionScope::Region(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RegionScope::Aggregate => AGGREGATE_LABEL,
            RegionScope::Region(name) => name,
        }
    }
}

/// The immutable greenness table.
///
/// Rows are kept in file order for the flat view and indexed by
/// (region, sub-region, year) for the keyed view. Each key is unique.
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Vec<Observation>,
    index: BTreeMap<(String, String, i32), usize>,
    regions: Vec<String>,
    years: Vec<i32>,
}

impl Dataset {
    /// Read and parse the table at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("loader: reading dataset from {}", path.display());
        let csv_data = std::fs::read_to_string(path)?;
        Self::from_csv_str(&csv_data)
    }

    /// Parse the table from a CSV string with a header row.
    pub fn from_csv_str(csv_data: &str) -> Result<Self> {
        if csv_data.trim().is_empty() {
            return Err(LoadError::Empty);
        }
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_data.as_bytes());

        let headers = rdr.headers()?.clone();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !headers.iter().any(|h| h == **col))
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing));
        }

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            rows.push(parse_record(&record, &headers)?);
        }
        Self::from_observations(rows)
    }

    /// Build a dataset from already-parsed observations, enforcing key uniqueness.
    pub fn from_observations(rows: Vec<Observation>) -> Result<Self> {
        if rows.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut index = BTreeMap::new();
        let mut regions = BTreeSet::new();
        let mut years = BTreeSet::new();
        for (i, obs) in rows.iter().enumerate() {
            let key = (obs.region.clone(), obs.sub_region.clone(), obs.year);
            if index.insert(key, i).is_some() {
                return Err(LoadError::DuplicateKey {
                    region: obs.region.clone(),
                    sub_region: obs.sub_region.clone(),
                    year: obs.year,
                });
            }
            regions.insert(obs.region.clone());
            years.insert(obs.year);
        }

        log::info!(
            "loader: loaded {} observations across {} regions and {} years",
            rows.len(),
            regions.len(),
            years.len()
        );
        Ok(Self {
            rows,
            index,
            regions: regions.into_iter().collect(),
            years: years.into_iter().collect(),
        })
    }

    /// All observations in source order.
    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct region names, ascending.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Keyed lookup of a single observation.
    pub fn get(&self, region: &str, sub_region: &str, year: i32) -> Option<&Observation> {
        self.index
            .get(&(region.to_string(), sub_region.to_string(), year))
            .map(|&i| &self.rows[i])
    }

    /// Observations of one region in key order (sub-region, then year).
    pub fn region_rows<'a>(&'a self, region: &str) -> impl Iterator<Item = &'a Observation> + 'a {
        let region = region.to_string();
        self.index
            .range((region.clone(), String::new(), i32::MIN)..)
            .take_while(move |((r, _, _), _)| *r == region)
            .map(move |(_, &i)| &self.rows[i])
    }

    /// Observations in `scope` whose year falls in `years`, in key order.
    pub fn select(&self, scope: &RegionScope, years: &YearRange) -> Vec<&Observation> {
        let in_range = |obs: &&Observation| years.contains(obs.year);
        match scope {
            RegionScope::Aggregate => self
                .index
                .values()
                .map(|&i| &self.rows[i])
                .filter(in_range)
                .collect(),
            RegionScope::Region(name) => self.region_rows(name).filter(in_range).collect(),
        }
    }
}

fn parse_record(record: &StringRecord, headers: &StringRecord) -> Result<Observation> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    let malformed = |message: String| LoadError::Malformed { line, message };

    let raw: RawRow = record
        .deserialize(Some(headers))
        .map_err(|e| malformed(e.to_string()))?;

    let year = parse_year(&raw.ref_date)
        .ok_or_else(|| malformed(format!("unrecognized REF_DATE {:?}", raw.ref_date)))?;

    let current_population = raw.current_population.unwrap_or(f64::NAN);
    if current_population < 0.0 {
        return Err(malformed(format!(
            "negative Current Population {}",
            current_population
        )));
    }

    Ok(Observation {
        region: raw.region,
        sub_region: raw.sub_region,
        year,
        ndvi: raw.ndvi.unwrap_or(f64::NAN),
        avg_greenness: raw.avg_greenness.unwrap_or(f64::NAN),
        land_class: raw.land_class,
        municipality_size: raw.municipality_size,
        growth_class: raw.growth_class,
        current_population,
        current_ndvi: raw.current_ndvi.unwrap_or(f64::NAN),
        current_avg_greenness: raw.current_avg_greenness.unwrap_or(f64::NAN),
    })
}

/// Extract the year from `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn parse_year(ref_date: &str) -> Option<i32> {
    let s = ref_date.trim();
    if let Ok(year) = s.parse::<i32>() {
        return Some(year);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d"))
        .ok()
        .map(|d| d.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Province,Municipality,REF_DATE,NDVI,Avg Greenness,Land Class,Municipality Size,Growth Class,Current Population,Current NDVI,Current Avg Greenness";

    fn fixture() -> String {
        format!(
            "{}\n{}",
            HEADER,
            "\
Ontario,Toronto,2001,0.41,38.2,Urban,Large,Moderate,2794356,0.45,41.0
Ontario,Toronto,2002,0.43,39.0,Urban,Large,Moderate,2794356,0.45,41.0
Ontario,Guelph,2001,0.52,55.1,Suburban,Medium,High,143740,0.55,58.3
Ontario,Guelph,2002,0.50,54.0,Suburban,Medium,High,143740,0.55,58.3
Quebec,Laval,2001,0.47,48.9,Suburban,Large,Low,438366,0.49,50.2
Quebec,Laval,2003,0.48,49.5,Suburban,Large,Low,438366,0.49,50.2
"
        )
    }

    #[test]
    fn loads_rows_and_derived_lists() {
        let ds = Dataset::from_csv_str(&fixture()).unwrap();
        assert_eq!(ds.len(), 6);
        assert_eq!(ds.regions(), &["Ontario".to_string(), "Quebec".to_string()]);
        assert_eq!(ds.years(), &[2001, 2002, 2003]);

        let guelph = ds.get("Ontario", "Guelph", 2002).unwrap();
        assert!((guelph.avg_greenness - 54.0).abs() < 1e-9);
        assert_eq!(guelph.current_population, 143740.0);
        assert_eq!(guelph.growth_class, "High");
        assert!(ds.get("Ontario", "Guelph", 2003).is_none());
    }

    #[test]
    fn flat_view_keeps_file_order() {
        let ds = Dataset::from_csv_str(&fixture()).unwrap();
        let names: Vec<&str> = ds.rows().iter().map(|o| o.sub_region.as_str()).collect();
        assert_eq!(names, vec!["Toronto", "Toronto", "Guelph", "Guelph", "Laval", "Laval"]);
    }

    #[test]
    fn region_rows_are_key_ordered() {
        let ds = Dataset::from_csv_str(&fixture()).unwrap();
        let keys: Vec<(&str, i32)> = ds
            .region_rows("Ontario")
            .map(|o| (o.sub_region.as_str(), o.year))
            .collect();
        assert_eq!(
            keys,
            vec![("Guelph", 2001), ("Guelph", 2002), ("Toronto", 2001), ("Toronto", 2002)]
        );
        assert_eq!(ds.region_rows("Yukon").count(), 0);
    }

    #[test]
    fn select_stays_inside_year_range() {
        let ds = Dataset::from_csv_str(&fixture()).unwrap();
        for (a, b) in [(2001, 2001), (2001, 2003), (2002, 2003), (2003, 2003)] {
            let range = YearRange::new(a, b).unwrap();
            let rows = ds.select(&RegionScope::Aggregate, &range);
            assert!(rows.iter().all(|o| range.contains(o.year)));
        }
    }

    #[test]
    fn aggregate_is_sum_of_regions() {
        let ds = Dataset::from_csv_str(&fixture()).unwrap();
        let range = YearRange::new(2001, 2002).unwrap();
        let total = ds.select(&RegionScope::Aggregate, &range).len();
        let per_region: usize = ds
            .regions()
            .iter()
            .map(|r| ds.select(&RegionScope::Region(r.clone()), &range).len())
            .sum();
        assert_eq!(total, per_region);
        assert_eq!(total, 5);
    }

    #[test]
    fn missing_columns_are_reported() {
        let csv = "Province,Municipality,REF_DATE,NDVI\nOntario,Toronto,2001,0.4\n";
        match Dataset::from_csv_str(csv) {
            Err(LoadError::MissingColumns(cols)) => {
                assert!(cols.contains(&"Avg Greenness".to_string()));
                assert!(cols.contains(&"Current Population".to_string()));
                assert!(!cols.contains(&"NDVI".to_string()));
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn malformed_value_reports_line() {
        let csv = format!(
            "{}\nOntario,Toronto,2001,0.41,38.2,Urban,Large,Moderate,2794356,0.45,41.0\nOntario,Toronto,2002,abc,39.0,Urban,Large,Moderate,2794356,0.45,41.0\n",
            HEADER
        );
        match Dataset::from_csv_str(&csv) {
            Err(LoadError::Malformed { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let csv = format!(
            "{}\nOntario,Toronto,2001,0.41,38.2,Urban,Large,Moderate,2794356,0.45,41.0\nOntario,Toronto,2001,0.42,38.5,Urban,Large,Moderate,2794356,0.45,41.0\n",
            HEADER
        );
        assert!(matches!(
            Dataset::from_csv_str(&csv),
            Err(LoadError::DuplicateKey { year: 2001, .. })
        ));
    }

    #[test]
    fn header_only_is_empty() {
        assert!(matches!(Dataset::from_csv_str(HEADER), Err(LoadError::Empty)));
        assert!(matches!(Dataset::from_csv_str(""), Err(LoadError::Empty)));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            Dataset::from_path("/nonexistent/cleaned_data.csv"),
            Err(LoadError::Io(_))
        ));
    }

    #[test]
    fn selected_rows_outlive_the_scope() {
        let ds = Dataset::from_csv_str(&fixture()).unwrap();
        let rows = {
            let scope = RegionScope::from_label(&String::from("Ontario"));
            ds.select(&scope, &YearRange::FULL)
        };
        assert_eq!(rows.len(), 4);
        let laval: Vec<&Observation> = {
            let name = String::from("Quebec");
            ds.region_rows(&name).collect()
        };
        assert_eq!(laval.len(), 2);
    }

    #[test]
    fn missing_numbers_load_as_nan() {
        let csv = format!(
            "{}\n{}",
            HEADER,
            "\
Ontario,Toronto,2001,0.41,38.2,Urban,Large,Moderate,2794356,0.45,41.0
Ontario,Orillia,2001,,NaN,Urban,Small,Low,,0.50,NaN
Ontario,Tiny,2001,0.70,90.0,Rural,Small,Low,NaN,,92.0
"
        );
        let ds = Dataset::from_csv_str(&csv).unwrap();
        assert_eq!(ds.len(), 3);
        let orillia = ds.get("Ontario", "Orillia", 2001).unwrap();
        assert!(orillia.ndvi.is_nan());
        assert!(orillia.avg_greenness.is_nan());
        assert!(orillia.current_population.is_nan());
        assert!(orillia.current_avg_greenness.is_nan());
        let tiny = ds.get("Ontario", "Tiny", 2001).unwrap();
        assert!(tiny.current_population.is_nan());
        assert!(tiny.current_ndvi.is_nan());
    }

    #[test]
    fn negative_population_is_malformed() {
        let csv = format!(
            "{}\n{}",
            HEADER, "Ontario,Toronto,2001,0.41,38.2,Urban,Large,Moderate,-5,0.45,41.0\n"
        );
        assert!(matches!(
            Dataset::from_csv_str(&csv),
            Err(LoadError::Malformed { line: 2, .. })
        ));
    }

    #[test]
    fn ref_date_formats() {
        assert_eq!(parse_year("2005"), Some(2005));
        assert_eq!(parse_year("2005-07-01"), Some(2005));
        assert_eq!(parse_year("2005-07"), Some(2005));
        assert_eq!(parse_year("July 2005"), None);
    }

    #[test]
    fn region_scope_labels() {
        assert_eq!(RegionScope::from_label(AGGREGATE_LABEL), RegionScope::Aggregate);
        let ontario = RegionScope::from_label("Ontario");
        assert_eq!(ontario, RegionScope::Region("Ontario".to_string()));
        assert_eq!(ontario.label(), "Ontario");
        assert_eq!(RegionScope::Aggregate.label(), AGGREGATE_LABEL);
    }
}
