//! One user's reactive dashboard state.
//!
//! A [`Session`] owns its control state and shares the dataset through an
//! `Arc`. Every render is a pure function of the two: nothing from a previous
//! render is reused. Changes are applied synchronously; queued changes are
//! coalesced so each affected slot renders once, from the latest state.

use crate::binding::{ControlEvent, OutputSlot, Subscriptions};
use crate::config::DashboardConfig;
use crate::controls::{ControlId, ControlRegistry, ControlState};
use crate::error::ControlError;
use green_chart::{
    Chart, ChartBuilder, DistributionChartBuilder, OrdinalChartBuilder, RenderError,
};
use green_data::Dataset;
use std::collections::BTreeSet;
use std::sync::Arc;

/// The latest render of one output slot.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub slot: OutputSlot,
    pub outcome: Result<Chart, RenderError>,
}

pub struct Session {
    dataset: Arc<Dataset>,
    registry: ControlRegistry,
    state: ControlState,
    subscriptions: Subscriptions,
    upper: DistributionChartBuilder,
    lower: OrdinalChartBuilder,
    pending: Vec<ControlEvent>,
}

impl Session {
    /// Start a session with every control at its default.
    pub fn new(dataset: Arc<Dataset>, config: &DashboardConfig) -> Self {
        let registry = ControlRegistry::new(&dataset, config);
        let state = registry.defaults();
        Self {
            dataset,
            registry,
            state,
            subscriptions: Subscriptions::default(),
            upper: DistributionChartBuilder::new(config.kde),
            lower: OrdinalChartBuilder::new(config.min_population),
            pending: Vec::new(),
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn registry(&self) -> &ControlRegistry {
        &self.registry
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Render `slot` from the current state.
    pub fn render(&self, slot: OutputSlot) -> RenderedChart {
        let outcome = match slot {
            OutputSlot::Upper => self
                .state
                .upper_selection()
                .map_err(|e| RenderError::InvalidSelection(e.to_string()))
                .and_then(|sel| self.upper.build(&self.dataset, &sel)),
            OutputSlot::Lower => self
                .state
                .lower_selection()
                .map_err(|e| RenderError::InvalidSelection(e.to_string()))
                .and_then(|sel| self.lower.build(&self.dataset, &sel)),
        };
        if let Err(e) = &outcome {
            log::warn!("session: {} shows a placeholder: {}", slot.container_id(), e);
        }
        RenderedChart { slot, outcome }
    }

    /// Render every slot, e.g. when the page first loads.
    pub fn render_all(&self) -> Vec<RenderedChart> {
        OutputSlot::ALL.iter().map(|&slot| self.render(slot)).collect()
    }

    /// Apply one change and re-render the slots subscribed to it.
    ///
    /// A change to the value a control already holds renders nothing.
    pub fn handle(&mut self, event: ControlEvent) -> Result<Vec<RenderedChart>, ControlError> {
        self.registry.validate(event.control, &event.value)?;
        let control = event.control;
        if !self.state.set(control, event.value) {
            return Ok(Vec::new());
        }
        log::debug!("session: {} changed", control);
        Ok(self.render_slots(self.subscriptions.affected([control])))
    }

    /// Hold a change until the next [`flush`](Self::flush).
    pub fn queue(&mut self, event: ControlEvent) {
        self.pending.push(event);
    }

    /// Apply every queued change in order, then render each affected slot once.
    ///
    /// Queued changes are validated together first; if any is rejected the
    /// whole queue is dropped and the state stays as it was.
    pub fn flush(&mut self) -> Result<Vec<RenderedChart>, ControlError> {
        let pending = std::mem::take(&mut self.pending);
        for event in &pending {
            if let Err(e) = self.registry.validate(event.control, &event.value) {
                log::warn!("session: dropping {} queued change(s): {}", pending.len(), e);
                return Err(e);
            }
        }

        let mut changed: BTreeSet<ControlId> = BTreeSet::new();
        for event in pending {
            let control = event.control;
            if self.state.set(control, event.value) {
                changed.insert(control);
            }
        }
        Ok(self.render_slots(self.subscriptions.affected(changed)))
    }

    fn render_slots(&self, slots: BTreeSet<OutputSlot>) -> Vec<RenderedChart> {
        slots.into_iter().map(|slot| self.render(slot)).collect()
    }
}
