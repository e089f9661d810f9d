//! egui form UI: state model, controller, and renderer.

/// Form submission mediation.
pub mod controller;
/// UI state types.
pub mod state;
/// egui renderer.
pub mod ui;
