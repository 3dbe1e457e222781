use crate::chart::Chart;
use crate::error::Result;
use green_data::Dataset;
use std::collections::BTreeSet;

/// Maps a dataset view and a selection to a chart description.
///
/// Implementations must not keep state between calls: the same dataset and
/// selection always produce the same chart.
pub trait ChartBuilder {
    type Selection;

    fn build(&self, dataset: &Dataset, selection: &Self::Selection) -> Result<Chart>;
}

/// Distinct values in order of first appearance.
pub(crate) fn first_appearance<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
