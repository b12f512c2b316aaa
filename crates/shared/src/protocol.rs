use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

use crate::domain::FieldKey;

pub const SCORE_FIELD: &str = "predicted_exam_score";

/// Body of one outbound prediction call.
///
/// Every schema key is present, in schema order, with its raw string value.
/// Numeric fields are not coerced here; the service parses them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRequest {
    entries: Vec<(FieldKey, String)>,
}

impl PredictionRequest {
    pub fn new(entries: Vec<(FieldKey, String)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(FieldKey, String)] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(field, _)| field.as_str() == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PredictionRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predicted_exam_score: f64,
}

impl PredictionResponse {
    /// Parses a success body. Anything without a numeric score is rejected.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
