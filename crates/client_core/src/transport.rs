use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::ServiceErrorBody,
    protocol::{PredictionRequest, PredictionResponse},
};
use tracing::{debug, warn};

use crate::{
    config::ClientSettings,
    error::{ConfigError, TransportError},
};

/// One outbound call to the prediction service.
#[async_trait]
pub trait PredictionTransport: Send + Sync {
    async fn predict(&self, request: &PredictionRequest) -> Result<f64, TransportError>;
}

pub struct HttpPredictionTransport {
    http: Client,
    endpoint: String,
}

impl HttpPredictionTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Builds a transport from validated settings. A timeout is only applied
    /// when one is configured.
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let mut builder = Client::builder();
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
            endpoint: settings.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionTransport for HttpPredictionTransport {
    async fn predict(&self, request: &PredictionRequest) -> Result<f64, TransportError> {
        debug!(endpoint = %self.endpoint, fields = request.len(), "sending prediction request");
        let res = self
            .http
            .post(self.endpoint.as_str())
            .json(request)
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;

        let status = res.status();
        let body = res
            .bytes()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;

        if !status.is_success() {
            let detail = ServiceErrorBody::from_slice(&body).and_then(|body| body.detail_text());
            warn!(
                status = status.as_u16(),
                detail = detail.as_deref().unwrap_or("<none>"),
                "prediction service rejected request"
            );
            return Err(TransportError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        PredictionResponse::from_slice(&body)
            .map(|response| response.predicted_exam_score)
            .map_err(|err| TransportError::MalformedResponse(err.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
