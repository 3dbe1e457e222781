//! Chart header component with label, heading and caption.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    /// Short label above the heading (e.g., "Plot #1:")
    #[props(default = String::new())]
    pub label: String,
    /// Chart heading
    pub heading: String,
    /// Caption describing what the chart shows and its sources
    #[props(default = String::new())]
    pub caption: String,
}

/// Header for chart sections.
#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    rsx! {
        div {
            style: "margin: 24px 0 8px 0;",
            if !props.label.is_empty() {
                h6 { style: "margin: 0; font-size: 12px; color: #444;", "{props.label}" }
            }
            h3 {
                style: "margin: 4px 0; font-size: 18px;",
                "{props.heading}"
            }
            if !props.caption.is_empty() {
                p {
                    style: "margin: 0; font-size: 12px; color: #666;",
                    "{props.caption}"
                }
            }
        }
    }
}
