//! Year range picker with bounded start and end inputs.

use crate::state::AppState;
use dioxus::prelude::*;
use green_dashboard::{ControlEvent, ControlId, ControlValue};
use green_data::YearRange;

/// Start/end year inputs for a year-range control.
///
/// Inputs are clamped to the control's bounds, and moving one end past the
/// other drags the other end along, so the range stays valid.
#[component]
pub fn YearRangePicker(control: ControlId) -> Element {
    let mut state = use_context::<AppState>();
    let (bounds, current) = match state.session.read().as_ref() {
        Some(session) => (
            session.registry().year_bounds(control),
            session.state().years(control),
        ),
        None => (None, None),
    };
    let (Some(bounds), Some(current)) = (bounds, current) else {
        return rsx! {};
    };

    let on_start_change = move |evt: Event<FormData>| {
        if let Ok(start) = evt.value().trim().parse::<i32>() {
            let start = start.clamp(bounds.start(), bounds.end());
            if let Some(range) = YearRange::new(start, current.end().max(start)) {
                state.apply(ControlEvent::new(control, ControlValue::Years(range)));
            }
        }
    };

    let on_end_change = move |evt: Event<FormData>| {
        if let Ok(end) = evt.value().trim().parse::<i32>() {
            let end = end.clamp(bounds.start(), bounds.end());
            if let Some(range) = YearRange::new(current.start().min(end), end) {
                state.apply(ControlEvent::new(control, ControlValue::Years(range)));
            }
        }
    };

    let label = control.label();
    let (min, max) = (bounds.start(), bounds.end());
    let (start, end) = (current.start(), current.end());

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; flex-direction: column; gap: 4px;",
            span { style: "font-weight: bold;", "{label}" }
            div {
                style: "display: flex; gap: 8px; align-items: center;",
                input {
                    r#type: "number",
                    value: "{start}",
                    min: "{min}",
                    max: "{max}",
                    style: "width: 72px;",
                    onchange: on_start_change,
                }
                "to"
                input {
                    r#type: "number",
                    value: "{end}",
                    min: "{min}",
                    max: "{max}",
                    style: "width: 72px;",
                    onchange: on_end_change,
                }
            }
        }
    }
}
