//! Chart container for one output slot.

use crate::state::AppState;
use dioxus::prelude::*;
use green_dashboard::OutputSlot;

/// Props for ChartContainer
#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// The output slot whose chart D3 renders into this container
    pub slot: OutputSlot,
    /// Optional minimum height in pixels
    #[props(default = 440)]
    pub min_height: u32,
}

/// A container div for D3.js charts.
///
/// Shows a placeholder instead of the chart when the slot's latest render
/// failed, and a notice until the slot's first render arrives.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let state = use_context::<AppState>();
    let chart = state.chart(props.slot);
    let pending = chart.read().is_none();
    let placeholder = chart
        .read()
        .as_ref()
        .and_then(|r| r.outcome.as_ref().err())
        .map(|e| e.to_string());

    let container_id = props.slot.container_id();
    let style = format!(
        "min-height: {}px; position: relative; width: 100%;",
        props.min_height
    );

    rsx! {
        div {
            style: "{style}",
            if pending {
                div {
                    style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: #666;",
                    "Rendering chart..."
                }
            }
            if let Some(message) = placeholder {
                div {
                    style: "padding: 40px 16px; text-align: center; color: #666; background: #FAFAFA; border: 1px dashed #CCC; border-radius: 4px;",
                    "Nothing to plot for this selection. "
                    span { style: "font-size: 12px;", "({message})" }
                }
            }
            div {
                id: container_id,
                style: "width: 100%;",
            }
        }
    }
}
