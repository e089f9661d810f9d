//! egui renderer for the scoring form.

use eframe::egui::{self, Color32, RichText};

use crate::artifacts::LoadedArtifacts;
use crate::config::InputBounds;
use crate::scoring::CreditHistory;

use super::controller::ScoringController;

/// Smallest window the form stays readable at.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::Vec2::new(760.0, 520.0);

const SUCCESS_COLOR: Color32 = Color32::from_rgb(102, 176, 136);
const DESTRUCTIVE_COLOR: Color32 = Color32::from_rgb(205, 110, 110);
const MUTED_COLOR: Color32 = Color32::from_rgb(140, 146, 155);

/// Renders the scoring form using the shared controller state.
pub struct ScoringApp {
    controller: ScoringController,
    visuals_set: bool,
}

impl ScoringApp {
    /// Create the form around artifacts loaded at startup.
    pub fn new(artifacts: LoadedArtifacts, bounds: InputBounds) -> Self {
        Self {
            controller: ScoringController::new(artifacts, bounds),
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = Color32::from_rgb(12, 12, 14);
        visuals.panel_fill = Color32::from_rgb(18, 18, 21);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_inputs(&mut self, ctx: &egui::Context) {
        let bounds = self.controller.bounds();
        egui::SidePanel::left("input_features")
            .resizable(false)
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.heading("Input Features");
                ui.add_space(8.0);

                ui.label("Annual Income (INR)");
                ui.add(
                    egui::DragValue::new(&mut self.controller.form.income)
                        .range(bounds.income.min..=bounds.income.max)
                        .speed(10_000.0)
                        .max_decimals(0),
                );
                ui.add_space(6.0);

                ui.label("Total Debt (INR)");
                ui.add(
                    egui::DragValue::new(&mut self.controller.form.debt)
                        .range(bounds.debt.min..=bounds.debt.max)
                        .speed(10_000.0)
                        .max_decimals(0),
                );
                ui.add_space(6.0);

                ui.label("Credit History");
                egui::ComboBox::from_id_salt("credit_history")
                    .selected_text(self.controller.form.credit_history.as_str())
                    .show_ui(ui, |ui| {
                        for category in CreditHistory::ALL {
                            ui.selectable_value(
                                &mut self.controller.form.credit_history,
                                category,
                                category.as_str(),
                            );
                        }
                    });
                ui.add_space(12.0);

                if ui.button("Score applicant").clicked() {
                    self.controller.submit();
                }
            });
    }

    fn render_result(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading("Credit Scoring (INR)");
            ui.label(
                RichText::new(
                    "Predict the creditworthiness of applicants based on income, debt, \
                     and credit history. All values are in INR.",
                )
                .color(MUTED_COLOR),
            );
            ui.add_space(12.0);

            ui.strong("Input Data");
            self.render_input_summary(ui);
            ui.add_space(12.0);

            ui.strong("Prediction");
            self.render_prediction(ui);
            ui.add_space(12.0);

            ui.collapsing("How it works", |ui| {
                ui.label(
                    "A fitted preprocessing transform scales the numeric fields and \
                     one-hot encodes the credit-history category; a fitted classifier \
                     then estimates the probability that the applicant is creditworthy. \
                     The debt-to-income ratio is derived from the income and debt you \
                     enter and is never supplied directly.",
                );
            });
        });
    }

    fn render_input_summary(&self, ui: &mut egui::Ui) {
        let form = &self.controller.form;
        egui::Grid::new("input_summary")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.label("income");
                ui.label(format_inr(form.income));
                ui.end_row();
                ui.label("debt");
                ui.label(format_inr(form.debt));
                ui.end_row();
                ui.label("credit_history");
                ui.label(form.credit_history.as_str());
                ui.end_row();
                ui.label("debt_to_income");
                ui.label(format!("{:.4}", self.controller.preview_ratio()));
                ui.end_row();
            });
    }

    fn render_prediction(&self, ui: &mut egui::Ui) {
        let form = &self.controller.form;
        if let Some(message) = &form.error {
            ui.label(RichText::new(message).color(DESTRUCTIVE_COLOR));
            return;
        }
        match form.outcome {
            Some(result) if result.creditworthy => {
                ui.label(
                    RichText::new("Creditworthy")
                        .color(SUCCESS_COLOR)
                        .strong(),
                );
                ui.label(format!(
                    "Probability of being creditworthy: {:.2}",
                    result.probability
                ));
            }
            Some(result) => {
                ui.label(
                    RichText::new("Not Creditworthy")
                        .color(DESTRUCTIVE_COLOR)
                        .strong(),
                );
                ui.label(format!(
                    "Probability of being creditworthy: {:.2}",
                    result.probability
                ));
            }
            None => {
                ui.label(
                    RichText::new("Adjust the inputs and press Score applicant.")
                        .color(MUTED_COLOR),
                );
            }
        }
    }
}

impl eframe::App for ScoringApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.render_inputs(ctx);
        self.render_result(ctx);
    }
}

/// Format an INR amount with thousands separators, no decimals.
fn format_inr(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_inr_with_separators() {
        assert_eq!(format_inr(0.0), "0");
        assert_eq!(format_inr(500.0), "500");
        assert_eq!(format_inr(500_000.0), "500,000");
        assert_eq!(format_inr(10_000_000.0), "10,000,000");
        assert_eq!(format_inr(1_234_567.4), "1,234,567");
    }
}
