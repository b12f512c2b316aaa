//! Client core for the habits-vs-marks predictor: form state, validation,
//! the submission workflow and the prediction service transport.

pub mod config;
pub mod error;
pub mod store;
pub mod transport;
pub mod validator;
pub mod workflow;

pub use config::{load_settings, ClientSettings};
pub use error::{
    NumericViolation, SubmitRejected, TransportError, ValidationError, GENERIC_PREDICTION_FAILURE,
};
pub use store::{FormSnapshot, FormStateStore, FormView, SubmissionId, SubmissionPhase};
pub use transport::{HttpPredictionTransport, PredictionTransport};
pub use validator::validate;
pub use workflow::{SubmissionOutcome, SubmissionTicket, SubmissionWorkflow};
