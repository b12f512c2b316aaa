//! Guidelines side panel, error banner and result overlay.

use eframe::egui;
use shared::domain::FormSchema;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x00, 0xff, 0xcc);
const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(0x5c, 0x1b, 0x1b);

const TIPS: &[&str] = &[
    "Be honest with your inputs for accurate predictions",
    "Use decimal values where applicable (e.g., 2.5 hours)",
    "Mental health rating: 1 (poor) to 10 (excellent)",
    "All fields are required for prediction",
];

pub fn score_band(score: f64) -> &'static str {
    if score >= 85.0 {
        "Excellent"
    } else if score >= 70.0 {
        "Good"
    } else if score >= 50.0 {
        "Fair"
    } else {
        "Needs improvement"
    }
}

pub fn show_guidelines(ui: &mut egui::Ui, schema: &FormSchema) {
    ui.heading("Input Guidelines");
    ui.separator();
    egui::ScrollArea::vertical().show(ui, |ui| {
        for field in schema.categorical_fields() {
            let Some(allowed) = field.kind.allowed_values() else {
                continue;
            };
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.label(egui::RichText::new(&field.label).strong().color(ACCENT));
                ui.horizontal_wrapped(|ui| {
                    for value in allowed {
                        ui.small(value.as_str());
                    }
                });
            });
            ui.add_space(4.0);
        }

        ui.add_space(8.0);
        ui.label(egui::RichText::new("Quick Tips").strong());
        for tip in TIPS {
            ui.small(format!("- {tip}"));
        }
    });
}

/// Returns `true` when the user dismisses the banner.
pub fn show_error_banner(ui: &mut egui::Ui, message: &str) -> bool {
    let mut dismissed = false;
    egui::Frame::group(ui.style())
        .fill(ERROR_FILL)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Dismiss").clicked() {
                        dismissed = true;
                    }
                });
            });
        });
    dismissed
}

/// Returns `true` when the user closes the overlay.
pub fn show_result_modal(ctx: &egui::Context, score: f64) -> bool {
    let mut dismissed = false;
    egui::Window::new("Your Predicted Score")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new(format!("{score:.2}"))
                        .size(48.0)
                        .strong()
                        .color(ACCENT),
                );
                ui.label(format!("out of 100 - {}", score_band(score)));
                ui.add_space(8.0);
                if ui.button("Close").clicked() {
                    dismissed = true;
                }
            });
        });
    dismissed
}
