//! Form State Store: field values, the last error and the last score.

use std::sync::Arc;

use shared::{domain::FormSchema, protocol::PredictionRequest};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::NumericViolation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubmissionId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Submitting(SubmissionId),
    Succeeded,
    Failed,
}

impl SubmissionPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting(_))
    }
}

/// Immutable copy of the form values at one point in time.
#[derive(Debug, Clone)]
pub struct FormSnapshot {
    schema: Arc<FormSchema>,
    values: Arc<[String]>,
}

impl FormSnapshot {
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.schema
            .position(key)
            .map(|index| self.values[index].as_str())
    }

    /// `(key, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.schema
            .iter()
            .zip(self.values.iter())
            .map(|(field, value)| (field.key.as_str(), value.as_str()))
    }

    /// First numeric field, in schema order, that is empty or rejected by
    /// its bounds. Front ends hold the form back while one exists, the way
    /// a required bounded number input does.
    pub fn first_numeric_violation(&self) -> Option<NumericViolation> {
        self.schema
            .iter()
            .zip(self.values.iter())
            .find_map(|(field, value)| {
                let bounds = field.kind.bounds()?;
                if value.trim().is_empty() {
                    Some(NumericViolation::Missing {
                        key: field.key.clone(),
                        label: field.label.clone(),
                    })
                } else if !bounds.admits(value) {
                    Some(NumericViolation::OutOfBounds {
                        key: field.key.clone(),
                        label: field.label.clone(),
                        min: bounds.min,
                        max: bounds.max,
                        step: bounds.step,
                    })
                } else {
                    None
                }
            })
    }

    pub fn to_request(&self) -> PredictionRequest {
        PredictionRequest::new(
            self.schema
                .iter()
                .zip(self.values.iter())
                .map(|(field, value)| (field.key.clone(), value.clone()))
                .collect(),
        )
    }
}

/// What observers see after every transition.
#[derive(Debug, Clone)]
pub struct FormView {
    pub values: FormSnapshot,
    pub error: Option<String>,
    pub result: Option<f64>,
    pub phase: SubmissionPhase,
    pub revision: u64,
}

pub struct FormStateStore {
    schema: Arc<FormSchema>,
    values: Vec<String>,
    error: Option<String>,
    result: Option<f64>,
    phase: SubmissionPhase,
    revision: u64,
    watch_tx: watch::Sender<FormView>,
}

impl FormStateStore {
    pub fn new(schema: Arc<FormSchema>) -> Self {
        let values = vec![String::new(); schema.len()];
        let initial = FormView {
            values: FormSnapshot {
                schema: Arc::clone(&schema),
                values: values.clone().into(),
            },
            error: None,
            result: None,
            phase: SubmissionPhase::Idle,
            revision: 0,
        };
        let (watch_tx, _) = watch::channel(initial);
        Self {
            schema,
            values,
            error: None,
            result: None,
            phase: SubmissionPhase::Idle,
            revision: 0,
            watch_tx,
        }
    }

    pub fn student_habits() -> Self {
        Self::new(Arc::new(FormSchema::student_habits().clone()))
    }

    pub fn schema(&self) -> &Arc<FormSchema> {
        &self.schema
    }

    /// Overwrites one field. Returns `false` for keys outside the schema,
    /// which leave the store untouched.
    pub fn set_value(&mut self, key: &str, raw: impl Into<String>) -> bool {
        let Some(index) = self.schema.position(key) else {
            warn!(field = key, "ignoring edit for unknown field");
            return false;
        };
        let raw = raw.into();
        if self.values[index] != raw {
            debug!(field = key, "form value updated");
            self.values[index] = raw;
            self.publish();
        }
        true
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.schema
            .position(key)
            .map(|index| self.values[index].as_str())
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<f64> {
        self.result
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn clear_error(&mut self) {
        if self.error.take().is_some() {
            self.publish();
        }
    }

    pub fn clear_result(&mut self) {
        if self.result.take().is_some() {
            self.publish();
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            schema: Arc::clone(&self.schema),
            values: self.values.clone().into(),
        }
    }

    pub fn view(&self) -> FormView {
        FormView {
            values: self.snapshot(),
            error: self.error.clone(),
            result: self.result,
            phase: self.phase,
            revision: self.revision,
        }
    }

    /// Receives a fresh [`FormView`] after every state change.
    pub fn subscribe(&self) -> watch::Receiver<FormView> {
        self.watch_tx.subscribe()
    }

    // error and result are mutually exclusive.
    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.result = None;
        self.error = Some(message.into());
        self.publish();
    }

    pub(crate) fn set_result(&mut self, score: f64) {
        self.error = None;
        self.result = Some(score);
        self.publish();
    }

    pub(crate) fn set_phase(&mut self, phase: SubmissionPhase) {
        if self.phase != phase {
            self.phase = phase;
            self.publish();
        }
    }

    fn publish(&mut self) {
        self.revision += 1;
        let view = self.view();
        self.watch_tx.send_replace(view);
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
