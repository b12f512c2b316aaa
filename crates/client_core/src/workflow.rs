//! Submission Workflow.
//!
//! `Idle -> Validating -> Submitting -> Succeeded | Failed -> Idle`. A failed
//! validation drops straight back to `Idle` with the error set and no request
//! issued. The workflow is split into [`SubmissionWorkflow::begin_submit`] and
//! [`SubmissionWorkflow::complete`] so the outbound call can run elsewhere
//! while the store stays on the UI thread.

use shared::protocol::PredictionRequest;
use tracing::{debug, info, warn};

use crate::{
    error::{SubmitRejected, TransportError},
    store::{FormStateStore, SubmissionId, SubmissionPhase},
    transport::PredictionTransport,
    validator::validate,
};

/// Everything needed to perform the single outbound call of one submission.
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    pub id: SubmissionId,
    pub request: PredictionRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Rejected(SubmitRejected),
    Succeeded(f64),
    Failed(TransportError),
}

#[derive(Debug, Default)]
pub struct SubmissionWorkflow {
    next_id: u64,
}

impl SubmissionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the submit-side transitions. On success the store is
    /// `Submitting` and the caller owns the returned ticket.
    pub fn begin_submit(
        &mut self,
        store: &mut FormStateStore,
    ) -> Result<SubmissionTicket, SubmitRejected> {
        if store.phase().is_submitting() {
            debug!("submit ignored while a prediction is in flight");
            return Err(SubmitRejected::InFlight);
        }

        store.clear_result();
        store.set_phase(SubmissionPhase::Validating);
        let snapshot = store.snapshot();

        if let Err(err) = validate(&snapshot) {
            warn!(field = %err.key, "form rejected by validation");
            store.set_error(err.user_message());
            store.set_phase(SubmissionPhase::Idle);
            return Err(SubmitRejected::Invalid(err));
        }

        store.clear_error();
        self.next_id += 1;
        let id = SubmissionId(self.next_id);
        store.set_phase(SubmissionPhase::Submitting(id));
        info!(submission = id.0, "submitting prediction request");

        Ok(SubmissionTicket {
            id,
            request: snapshot.to_request(),
        })
    }

    /// Applies the outcome of submission `id`. Outcomes for anything other
    /// than the in-flight submission are discarded; returns whether it was
    /// applied.
    pub fn complete(
        &self,
        store: &mut FormStateStore,
        id: SubmissionId,
        outcome: Result<f64, TransportError>,
    ) -> bool {
        if store.phase() != SubmissionPhase::Submitting(id) {
            debug!(submission = id.0, "discarding outcome for stale submission");
            return false;
        }

        match outcome {
            Ok(score) => {
                info!(submission = id.0, score, "prediction succeeded");
                store.set_result(score);
                store.set_phase(SubmissionPhase::Succeeded);
            }
            Err(err) => {
                warn!(submission = id.0, error = %err, "prediction failed");
                store.set_error(err.user_message());
                store.set_phase(SubmissionPhase::Failed);
            }
        }
        true
    }

    /// Clears the visible error or result. A finished workflow returns to
    /// `Idle`; an in-flight request is never cancelled.
    pub fn dismiss(&self, store: &mut FormStateStore) {
        store.clear_error();
        store.clear_result();
        if matches!(
            store.phase(),
            SubmissionPhase::Succeeded | SubmissionPhase::Failed
        ) {
            store.set_phase(SubmissionPhase::Idle);
        }
    }

    /// Full submit cycle against `transport`, for callers that can hold the
    /// store across the call.
    pub async fn run<T>(&mut self, store: &mut FormStateStore, transport: &T) -> SubmissionOutcome
    where
        T: PredictionTransport + ?Sized,
    {
        let ticket = match self.begin_submit(store) {
            Ok(ticket) => ticket,
            Err(rejected) => return SubmissionOutcome::Rejected(rejected),
        };

        let outcome = transport.predict(&ticket.request).await;
        self.complete(store, ticket.id, outcome.clone());
        match outcome {
            Ok(score) => SubmissionOutcome::Succeeded(score),
            Err(err) => SubmissionOutcome::Failed(err),
        }
    }
}

#[cfg(test)]
#[path = "tests/workflow_tests.rs"]
mod tests;
