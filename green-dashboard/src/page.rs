//! Static page content: titles, captions, notes and references.
//!
//! Nothing here depends on the data or the controls.

/// Page heading.
pub const TITLE: &str = "Greenspace and Vegetation Quality in Canadian Municipalities";

/// Introduction shown under the heading.
pub const INTRODUCTION: &str = "United Nations Sustainable Development Goal #11 aims to increase \
the availability and quality of greenspace (predominantly vegetated areas) within urban settings \
(United Nations Department of Economic and Social Affairs, 2023). The \"greenness\" of a \
municipality* refers to the presence and quality of vegetation within it (Statistics Canada, \
2023b). Greenness is quantified here by two indices: \"NDVI\" and \"Average Greenness\". The \
Normalized Difference Vegetation Index (NDVI) is derived from satellite imagery and remote \
sensing. NDVI values are unitless and range from -1 to 1, with larger values representing higher \
vegetation presence, density and quality, averaged across each municipality. \"Average \
Greenness\" is the proportion of land within a municipality with an NDVI over 0.5, indicating \
the presence of vegetation or greenspace.";

/// Heading block above one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSection {
    pub label: &'static str,
    pub heading: &'static str,
    pub caption: String,
}

/// Heading block of the distribution chart.
pub fn upper_section() -> ChartSection {
    ChartSection {
        label: "Plot #1:",
        heading: "Yearly Distributions of Municipality Greenness Levels:",
        caption: "Kernel density plots of yearly greenness index values in Canadian \
municipalities (population > 1,000), grouped by municipality category. \
(Statistics Canada, 2023a, 2023b)"
            .to_string(),
    }
}

/// Heading block of the ordinal chart, naming the ranking year and population cut-off.
pub fn lower_section(reference_year: i32, min_population: u64) -> ChartSection {
    ChartSection {
        label: "Plot #2:",
        heading: "Yearly Greenness Levels of Select Municipalities**",
        caption: format!(
            "Ordinal plots (based on {} values) of yearly greenness index values in Canadian \
municipalities (population > {}), grouped by population growth rate category \
(Statistics Canada, 2023a, 2023b)",
            reference_year,
            group_thousands(min_population)
        ),
    }
}

/// Footnotes, one paragraph each.
pub const NOTES: [&str; 6] = [
    "* - Municipalities are defined by contiguous areas with a population greater than 1,000 and \
an average population density greater than 400 persons per km\u{00b2}.",
    "Municipality size classes are defined as follows (Statistics Canada, 2023):",
    "Small: 1,000 to 29,999 population",
    "Medium: 30,000 to 99,999 population",
    "Large: greater than 100,000 population",
    "** - Select municipalities only include those with populations greater than 5,000. Only \
core urban centres are included (e.g. Toronto); suburban municipalities with contiguous borders \
to the core are not (e.g. Markham).",
];

pub const REFERENCES: [&str; 3] = [
    "Statistics Canada. (2023a, January). Population estimates, July 1, by census subdivision, \
2016 boundaries. Retrieved September 25, 2023, from \
https://open.canada.ca/data/en/dataset/6841ba54-09d3-4c12-a2fc-a5064694a860",
    "Statistics Canada. (2023b, June). Urban greenness and normalized difference vegetation index \
by 2021 population (Table 38100158). Retrieved September 24, 2023, from \
https://www150.statcan.gc.ca/n1/pub/16-509-x/2016001/1699-eng.htm",
    "United Nations Department of Economic and Social Affairs. (2023, July). The Sustainable \
Development Goals Report 2023: Special Edition. United Nations. \
https://doi.org/10.18356/97892100249145",
];

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
