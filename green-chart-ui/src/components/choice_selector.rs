//! Dropdown selector for an enumerated control.

use crate::state::AppState;
use dioxus::prelude::*;
use green_dashboard::{ControlEvent, ControlId, ControlValue};

/// Dropdown for one choice control.
/// Options come from the session's control registry; a change is handed to
/// the session, which re-renders the dependent chart.
#[component]
pub fn ChoiceSelector(control: ControlId) -> Element {
    let mut state = use_context::<AppState>();
    let (options, selected) = match state.session.read().as_ref() {
        Some(session) => (
            session.registry().options(control).to_vec(),
            session
                .state()
                .choice(control)
                .unwrap_or_default()
                .to_string(),
        ),
        None => (Vec::new(), String::new()),
    };

    let on_change = move |evt: Event<FormData>| {
        state.apply(ControlEvent::new(control, ControlValue::Choice(evt.value())));
    };

    let select_id = control.key();
    let label = control.label();

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; flex-direction: column; gap: 4px;",
            label {
                r#for: select_id,
                style: "font-weight: bold;",
                "{label}"
            }
            select {
                id: select_id,
                onchange: on_change,
                for opt in options.iter() {
                    option {
                        value: "{opt}",
                        selected: *opt == selected,
                        "{opt}"
                    }
                }
            }
        }
    }
}
