use std::{sync::Arc, time::Duration};

use client_core::{FormStateStore, SubmitRejected};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::FormSession;
use crate::ui::{panels, widgets};

pub struct PredictorApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    session: FormSession,
    status: String,
    widget_hint: Option<String>,
}

impl PredictorApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        store: FormStateStore,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            session: FormSession::new(store),
            status: "Starting backend worker...".to_string(),
            widget_hint: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            if let Some(status) = self.session.apply(event) {
                self.status = status;
            }
        }
    }

    fn submit(&mut self) {
        if let Some(hint) = widgets::first_numeric_violation(self.session.store()) {
            self.widget_hint = Some(hint);
            return;
        }
        self.widget_hint = None;

        match self.session.on_submit() {
            Ok(cmd) => {
                let BackendCommand::Predict { ticket } = &cmd;
                let id = ticket.id;
                if dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
                    self.status = "Predicting...".to_string();
                } else {
                    let reason = self.status.clone();
                    self.session.fail_undispatched(id, &reason);
                    let event =
                        UiEvent::Error(UiError::from_message(UiErrorContext::Submit, reason));
                    if let Some(status) = self.session.apply(event) {
                        self.status = status;
                    }
                }
            }
            Err(SubmitRejected::InFlight) => {
                self.status = "A prediction is already in progress".to_string();
            }
            Err(SubmitRejected::Invalid(err)) => {
                self.status = format!("Validation error: {}", err.key.title());
            }
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let schema = Arc::clone(self.session.store().schema());
        let mut edits = Vec::new();

        ui.heading("Your Information");
        ui.separator();
        egui::Grid::new("habit_form")
            .num_columns(2)
            .spacing([16.0, 8.0])
            .striped(true)
            .show(ui, |ui| {
                for field in schema.iter() {
                    let current = self
                        .session
                        .store()
                        .value(field.key.as_str())
                        .unwrap_or_default();
                    if let Some(edited) = widgets::field_input(ui, field, current) {
                        edits.push((field.key.clone(), edited));
                    }
                }
            });

        for (key, value) in edits {
            self.session.on_field_change(key.as_str(), value);
        }

        if let Some(hint) = &self.widget_hint {
            ui.colored_label(egui::Color32::from_rgb(0xff, 0xc1, 0x07), hint.as_str());
        }

        ui.add_space(12.0);
        let submitting = self.session.store().phase().is_submitting();
        ui.horizontal(|ui| {
            let button = egui::Button::new(egui::RichText::new("Predict My Score").strong())
                .min_size(egui::vec2(200.0, 36.0));
            if ui.add_enabled(!submitting, button).clicked() {
                self.submit();
            }
            if submitting {
                ui.spinner();
            }
        });
    }
}

impl eframe::App for PredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Habits vs Marks Predictor");
                ui.label("Discover how your daily habits influence your academic performance");
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.small(self.status.as_str());
        });

        let schema = Arc::clone(self.session.store().schema());
        egui::SidePanel::right("guidelines")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| panels::show_guidelines(ui, &schema));

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(message) = self.session.store().error().map(str::to_owned) {
                if panels::show_error_banner(ui, &message) {
                    self.session.on_dismiss();
                }
                ui.add_space(8.0);
            }
            egui::ScrollArea::vertical().show(ui, |ui| self.show_form(ui));
        });

        if let Some(score) = self.session.store().result() {
            if panels::show_result_modal(ctx, score) {
                self.session.on_dismiss();
            }
        }

        let repaint = if self.session.store().phase().is_submitting() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };
        ctx.request_repaint_after(repaint);
    }
}
