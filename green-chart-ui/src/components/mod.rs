//! Reusable Dioxus RSX components for the greenness dashboard.

mod chart_container;
mod chart_header;
mod choice_selector;
mod error_display;
mod loading_spinner;
mod year_range_picker;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use choice_selector::ChoiceSelector;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use year_range_picker::YearRangePicker;
