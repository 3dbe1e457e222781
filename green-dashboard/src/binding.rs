//! Output slots and the controls they depend on.
//!
//! Dependencies are declared per slot; [`Subscriptions`] inverts them so a
//! control change maps directly to the slots that must re-render.

use crate::controls::{ControlId, ControlValue};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A named place on the page holding one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum OutputSlot {
    /// Yearly distribution chart.
    Upper,
    /// Ordinal scatter chart.
    Lower,
}

impl OutputSlot {
    pub const ALL: [OutputSlot; 2] = [OutputSlot::Upper, OutputSlot::Lower];

    /// DOM id of the slot's chart container.
    pub fn container_id(self) -> &'static str {
        match self {
            OutputSlot::Upper => "upper-plot",
            OutputSlot::Lower => "lower-plot",
        }
    }

    /// Controls whose changes re-render this slot.
    pub fn dependencies(self) -> &'static [ControlId] {
        match self {
            OutputSlot::Upper => &[
                ControlId::Region,
                ControlId::Comparison,
                ControlId::Measurement,
                ControlId::Years,
            ],
            OutputSlot::Lower => &[
                ControlId::LowerRegion,
                ControlId::LowerMeasurement,
                ControlId::LowerYears,
            ],
        }
    }
}

/// A user changing one control.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlEvent {
    pub control: ControlId,
    pub value: ControlValue,
}

impl ControlEvent {
    pub fn new(control: ControlId, value: ControlValue) -> Self {
        Self { control, value }
    }
}

/// Control-to-slot lookup built from the slots' declared dependencies.
#[derive(Debug, Clone)]
pub struct Subscriptions {
    by_control: BTreeMap<ControlId, Vec<OutputSlot>>,
}

impl Subscriptions {
    pub fn from_slots(slots: &[OutputSlot]) -> Self {
        let mut by_control: BTreeMap<ControlId, Vec<OutputSlot>> = BTreeMap::new();
        for &slot in slots {
            for &control in slot.dependencies() {
                by_control.entry(control).or_default().push(slot);
            }
        }
        Self { by_control }
    }

    /// Slots subscribed to `control`.
    pub fn subscribers(&self, control: ControlId) -> &[OutputSlot] {
        self.by_control
            .get(&control)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every slot subscribed to at least one of `controls`, each once.
    pub fn affected(&self, controls: impl IntoIterator<Item = ControlId>) -> BTreeSet<OutputSlot> {
        controls
            .into_iter()
            .flat_map(|c| self.subscribers(c).iter().copied())
            .collect()
    }
}

impl Default for Subscriptions {
    fn default() -> Self {
        Self::from_slots(&OutputSlot::ALL)
    }
}
