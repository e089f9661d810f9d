//! Library exports for reuse in integration tests.
/// Application directory helpers.
pub mod app_dirs;
/// Fitted preprocessor and classifier artifacts.
pub mod artifacts;
/// App configuration persistence.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Logging setup.
pub mod logging;
/// Applicant records and the scoring handler.
pub mod scoring;
