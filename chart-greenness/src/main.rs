//! Canadian Municipality Greenness Dashboard
//!
//! Two linked charts over one municipality greenness dataset:
//! - Plot #1: yearly density distributions of NDVI or average greenness for
//!   Canada or one province, optionally split by a municipality category.
//! - Plot #2: per-municipality yearly values for one province, ordered by
//!   their current value and faceted by population growth class.
//!
//! Data flow:
//! 1. `build.rs` copies `cleaned_data.csv` into `OUT_DIR`.
//! 2. `include_str!` embeds the CSV into the WASM binary.
//! 3. On mount, the CSV is parsed into a shared `Dataset` and a `Session` is
//!    started with every control at its default.
//! 4. Control changes go through the session, which re-renders only the
//!    slots depending on the changed control; one effect per slot hands the
//!    new chart description to D3.js.

use anyhow::Context;
use dioxus::prelude::*;
use green_chart_ui::components::{
    ChartContainer, ChartHeader, ChoiceSelector, ErrorDisplay, LoadingSpinner, YearRangePicker,
};
use green_chart_ui::js_bridge;
use green_chart_ui::state::AppState;
use green_dashboard::page::{self, ChartSection};
use green_dashboard::{ControlId, DashboardConfig, OutputSlot, Session};
use green_data::Dataset;
use std::sync::Arc;

/// Cleaned municipality greenness observations, 2001 to 2022.
const GREENNESS_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/cleaned_data.csv"));

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("greenness-root"))
        .launch(App);
}

fn load_session(config: &DashboardConfig) -> anyhow::Result<Session> {
    config.validate().context("invalid dashboard configuration")?;
    let dataset = Dataset::from_csv_str(GREENNESS_CSV).context("failed to load greenness data")?;
    log::info!(
        "[Greenness] {} observations across {} provinces and {} years",
        dataset.len(),
        dataset.regions().len(),
        dataset.years().len()
    );
    Ok(Session::new(Arc::new(dataset), config))
}

/// Draw or clear one slot from its latest render.
fn sync_slot(state: AppState, slot: OutputSlot) {
    let container = slot.container_id();
    match state.chart(slot)().map(|render| render.outcome) {
        Some(Ok(chart)) => match chart.to_json() {
            Ok(json) => js_bridge::render_chart(container, chart.kind, &json),
            Err(e) => {
                log::error!("[Greenness] failed to serialize {}: {}", container, e);
                js_bridge::destroy_chart(container);
            }
        },
        Some(Err(_)) => js_bridge::destroy_chart(container),
        None => {}
    }
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let config = DashboardConfig::default();
    let lower = page::lower_section(config.reference_year, config.min_population);
    let (title, introduction) = (page::TITLE, page::INTRODUCTION);

    // Load the dataset once on mount
    use_effect(move || {
        match load_session(&config) {
            Ok(session) => {
                js_bridge::init_charts();
                state.start(session);
            }
            Err(e) => {
                log::error!("[Greenness] {:#}", e);
                state.error_msg.set(Some(format!("{:#}", e)));
            }
        }
        state.loading.set(false);
    });

    // Each effect subscribes to its own slot only
    use_effect(move || sync_slot(state, OutputSlot::Upper));
    use_effect(move || sync_slot(state, OutputSlot::Lower));

    rsx! {
        div {
            style: "padding: 16px; max-width: 1100px; margin: 0 auto; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            h1 { style: "font-size: 24px;", "{title}" }
            p { style: "font-size: 14px; line-height: 1.5;", "{introduction}" }

            if let Some(err) = (state.error_msg)() {
                ErrorDisplay {
                    title: "Failed to load data".to_string(),
                    message: err,
                    hint: "Place the cleaned table at fixtures/cleaned_data.csv and rebuild.".to_string(),
                }
            } else if (state.loading)() {
                LoadingSpinner {}
            } else {
                SectionHeader { section: page::upper_section() }
                div {
                    style: "display: flex; flex-wrap: wrap; gap: 16px; align-items: flex-end;",
                    ChoiceSelector { control: ControlId::Region }
                    ChoiceSelector { control: ControlId::Comparison }
                    ChoiceSelector { control: ControlId::Measurement }
                    YearRangePicker { control: ControlId::Years }
                }
                ChartContainer { slot: OutputSlot::Upper, min_height: 480 }

                SectionHeader { section: lower }
                div {
                    style: "display: flex; flex-wrap: wrap; gap: 16px; align-items: flex-end;",
                    ChoiceSelector { control: ControlId::LowerRegion }
                    ChoiceSelector { control: ControlId::LowerMeasurement }
                    YearRangePicker { control: ControlId::LowerYears }
                }
                ChartContainer { slot: OutputSlot::Lower, min_height: 520 }

                PageNotes {}
            }
        }
    }
}

#[component]
fn SectionHeader(section: ChartSection) -> Element {
    rsx! {
        ChartHeader {
            label: section.label.to_string(),
            heading: section.heading.to_string(),
            caption: section.caption.clone(),
        }
    }
}

/// Footnotes and references under the charts.
#[component]
fn PageNotes() -> Element {
    rsx! {
        div {
            style: "margin-top: 24px; font-size: 12px; color: #444;",
            h4 { "Notes:" }
            for note in page::NOTES {
                p { style: "margin: 4px 0;", "{note}" }
            }
            h4 { "References:" }
            for reference in page::REFERENCES {
                p { style: "margin: 4px 0; padding-left: 24px; text-indent: -24px;", "{reference}" }
            }
        }
    }
}
