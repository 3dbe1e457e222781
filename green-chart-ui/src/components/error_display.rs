//! Fatal load error box.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    #[props(default = "Error".to_string())]
    pub title: String,
    /// Error chain, outermost context first (`{:#}` of an `anyhow::Error`)
    pub message: String,
    /// What the reader can do about it
    #[props(default = String::new())]
    pub hint: String,
}

/// Shown instead of the dashboard when the dataset cannot be loaded.
/// Each `: `-separated cause of the message gets its own line.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    let causes: Vec<String> = props.message.split(": ").map(str::to_string).collect();
    rsx! {
        div {
            style: "padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A;",
            strong { "{props.title}" }
            ul {
                style: "margin: 6px 0 0 0; padding-left: 20px;",
                for cause in causes {
                    li { "{cause}" }
                }
            }
            if !props.hint.is_empty() {
                p { style: "margin: 6px 0 0 0; color: #555; font-size: 12px;", "{props.hint}" }
            }
        }
    }
}
