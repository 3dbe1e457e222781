//! Placeholder shown while the dataset is parsed.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LoadingSpinnerProps {
    #[props(default = "Loading municipality greenness data".to_string())]
    pub message: String,
    /// Reserve this much height so the page does not jump once charts appear
    #[props(default = 320)]
    pub min_height: u32,
}

#[component]
pub fn LoadingSpinner(props: LoadingSpinnerProps) -> Element {
    let style = format!(
        "display: flex; justify-content: center; align-items: center; min-height: {}px; color: #666;",
        props.min_height
    );
    rsx! {
        div {
            style: "{style}",
            "{props.message}..."
        }
    }
}
