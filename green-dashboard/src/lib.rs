//! Controls, reactive bindings and page content for the greenness dashboard.
//!
//! This crate provides:
//! - `controls`: the control registry, control values and control state
//! - `binding`: output slots, their declared dependencies and subscriptions
//! - `session`: one user's reactive state driving the chart builders
//! - `config`: tunable dashboard defaults
//! - `page`: static titles, captions, notes and references

pub mod binding;
pub mod config;
pub mod controls;
pub mod error;
pub mod page;
pub mod session;

pub use binding::{ControlEvent, OutputSlot, Subscriptions};
pub use config::DashboardConfig;
pub use controls::{ControlId, ControlRegistry, ControlState, ControlValue, Domain};
pub use error::{ConfigError, ControlError};
pub use session::{RenderedChart, Session};
