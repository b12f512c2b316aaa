//! Backend commands queued from UI to backend worker.

use client_core::SubmissionTicket;

pub enum BackendCommand {
    Predict { ticket: SubmissionTicket },
}
