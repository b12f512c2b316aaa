//! Applies UI actions and backend events to the form session.
//!
//! The three presentation actions (`on_field_change`, `on_submit`,
//! `on_dismiss`) and every backend event funnel through here, so the window
//! code only renders what the store holds.

use client_core::{
    FormStateStore, SubmissionId, SubmissionWorkflow, SubmitRejected, TransportError,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiErrorContext, UiEvent};

pub struct FormSession {
    store: FormStateStore,
    workflow: SubmissionWorkflow,
}

impl FormSession {
    pub fn new(store: FormStateStore) -> Self {
        Self {
            store,
            workflow: SubmissionWorkflow::new(),
        }
    }

    pub fn store(&self) -> &FormStateStore {
        &self.store
    }

    pub fn on_field_change(&mut self, key: &str, value: impl Into<String>) {
        self.store.set_value(key, value);
    }

    /// Validates and, when the form is acceptable, returns the command that
    /// performs the single outbound call.
    pub fn on_submit(&mut self) -> Result<BackendCommand, SubmitRejected> {
        self.workflow
            .begin_submit(&mut self.store)
            .map(|ticket| BackendCommand::Predict { ticket })
    }

    pub fn on_dismiss(&mut self) {
        self.workflow.dismiss(&mut self.store);
    }

    /// Unwinds a submission whose command never reached the backend.
    pub fn fail_undispatched(&mut self, id: SubmissionId, reason: &str) {
        self.workflow.complete(
            &mut self.store,
            id,
            Err(TransportError::Network(reason.to_string())),
        );
    }

    /// Applies one backend event; returns the new status line, if any.
    pub fn apply(&mut self, event: UiEvent) -> Option<String> {
        match event {
            UiEvent::Info(message) => Some(message),
            UiEvent::Error(err) => {
                let prefix = match err.context() {
                    UiErrorContext::BackendStartup => "Startup",
                    UiErrorContext::Submit => err_label(err.category()),
                };
                Some(format!("{prefix} error: {}", err.message()))
            }
            UiEvent::PredictionFinished { id, outcome } => {
                let status = match &outcome {
                    Ok(score) => format!("Predicted score {score:.2}"),
                    Err(_) => "Prediction failed".to_string(),
                };
                if self.workflow.complete(&mut self.store, id, outcome) {
                    Some(status)
                } else {
                    None
                }
            }
        }
    }
}
