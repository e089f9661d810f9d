#![deny(missing_docs)]
#![deny(warnings)]

//! Entry point for the egui-based Credscope UI.

use credscope::artifacts::{self, LoadedArtifacts};
use credscope::config::{self, InputBounds};
use credscope::egui_app::ui::{MIN_VIEWPORT_SIZE, ScoringApp};
use credscope::logging;
use eframe::egui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    // Artifacts load exactly once, before any scoring is reachable. If they
    // are missing or invalid the form is replaced by an error screen.
    let startup = load_startup();

    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size(egui::Vec2::new(900.0, 600.0));
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Credscope",
        native_options,
        Box::new(move |_cc| match startup {
            Ok((loaded, bounds)) => Ok(Box::new(ScoringApp::new(loaded, bounds))),
            Err(message) => Ok(Box::new(LaunchError { message })),
        }),
    )?;
    Ok(())
}

fn load_startup() -> Result<(LoadedArtifacts, InputBounds), String> {
    let app_config = config::load_or_default().map_err(|err| {
        tracing::error!("Config load failed: {err}");
        err.to_string()
    })?;
    let loaded = artifacts::load(&app_config.artifacts).map_err(|err| {
        tracing::error!("Artifact load failed: {err}");
        err.to_string()
    })?;
    tracing::info!(
        feature_len = loaded.model.feature_len,
        categories = loaded.preprocessor.categories.len(),
        "Loaded fitted artifacts"
    );
    Ok((loaded, app_config.bounds))
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start UI");
                ui.label(&self.message);
            });
        });
    }
}
