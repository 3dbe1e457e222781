//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//!
//! Control changes go through the [`Session`]; the charts it returns are
//! published into one signal per output slot, so each slot's effect only
//! re-runs when its own chart changes.

use dioxus::prelude::*;
use green_dashboard::{ControlEvent, OutputSlot, RenderedChart, Session};

/// Shared application state for the dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Dashboard session (None until the dataset is loaded)
    pub session: Signal<Option<Session>>,
    /// Whether the app is still loading
    pub loading: Signal<bool>,
    /// Fatal load error; when set, no dashboard is shown
    pub error_msg: Signal<Option<String>>,
    /// Latest render of the distribution chart
    pub upper_chart: Signal<Option<RenderedChart>>,
    /// Latest render of the ordinal chart
    pub lower_chart: Signal<Option<RenderedChart>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            session: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            upper_chart: Signal::new(None),
            lower_chart: Signal::new(None),
        }
    }

    /// The chart signal backing `slot`.
    pub fn chart(&self, slot: OutputSlot) -> Signal<Option<RenderedChart>> {
        match slot {
            OutputSlot::Upper => self.upper_chart,
            OutputSlot::Lower => self.lower_chart,
        }
    }

    /// Install a freshly loaded session and publish its initial charts.
    pub fn start(&mut self, session: Session) {
        let renders = session.render_all();
        self.session.set(Some(session));
        self.publish(renders);
    }

    /// Apply a control change and publish whatever it re-rendered.
    pub fn apply(&mut self, event: ControlEvent) {
        let result = match self.session.write().as_mut() {
            Some(session) => session.handle(event),
            None => return,
        };
        match result {
            Ok(renders) => self.publish(renders),
            Err(e) => log::warn!("ui: control change rejected: {}", e),
        }
    }

    /// Replace each rendered slot's chart.
    pub fn publish(&mut self, renders: Vec<RenderedChart>) {
        for render in renders {
            self.chart(render.slot).set(Some(render));
        }
    }
}
