use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error body returned by the prediction service on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub detail: Value,
}

impl ServiceErrorBody {
    pub fn from_slice(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }

    /// Flattens `detail` into one diagnostic line. Structured details (lists
    /// of field errors) are rendered as compact JSON.
    pub fn detail_text(&self) -> Option<String> {
        match &self.detail {
            Value::Null => None,
            Value::String(text) if text.trim().is_empty() => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}
