//! Shared Dioxus components and D3.js bridge for the greenness dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the D3.js chart renderers via `js_sys::eval()`
//! - `state`: Reactive AppState with Dioxus Signals around a dashboard session
//! - `components`: Reusable RSX components (selectors, containers, etc.)

pub mod components;
pub mod js_bridge;
pub mod state;
