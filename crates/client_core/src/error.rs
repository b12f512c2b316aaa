use shared::domain::FieldKey;
use thiserror::Error;

/// Message shown to the user for any failed outbound call.
pub const GENERIC_PREDICTION_FAILURE: &str =
    "Something went wrong while predicting. Please try again.";

/// A categorical field holds a value outside its allowed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid input for '{}'. Allowed values: {}", spoken(.key), join_choices(.allowed))]
pub struct ValidationError {
    pub key: FieldKey,
    pub allowed: Vec<String>,
}

impl ValidationError {
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// A numeric field is unset or outside its input bounds.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericViolation {
    #[error("Please fill in {label}.")]
    Missing { key: FieldKey, label: String },
    #[error("{label} must be between {min} and {max} in steps of {step}.")]
    OutOfBounds {
        key: FieldKey,
        label: String,
        min: f64,
        max: f64,
        step: f64,
    },
}

impl NumericViolation {
    pub fn key(&self) -> &FieldKey {
        match self {
            Self::Missing { key, .. } | Self::OutOfBounds { key, .. } => key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("prediction request failed to complete: {0}")]
    Network(String),
    #[error("prediction service returned HTTP {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },
    #[error("malformed prediction response: {0}")]
    MalformedResponse(String),
}

fn spoken(key: &FieldKey) -> String {
    key.spoken()
}

fn join_choices(allowed: &[String]) -> String {
    allowed.join(", ")
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(": {detail}"))
        .unwrap_or_default()
}

impl TransportError {
    pub fn user_message(&self) -> &'static str {
        GENERIC_PREDICTION_FAILURE
    }
}

/// Why a submit attempt never reached the prediction service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("a prediction request is already in flight")]
    InFlight,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("failed to parse config file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
