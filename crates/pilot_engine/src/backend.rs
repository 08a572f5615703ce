use std::time::Duration;

use pilot_core::{AgentKind, AgentReport, InterviewRecord, RecordId, ReviewInput};
use pilot_logging::{pilot_debug, pilot_warn};
use url::Url;

use crate::{BackendError, FailureKind};

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The four calls the client makes against the interview backend.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// `GET /interviews`
    async fn list_interviews(&self) -> Result<Vec<InterviewRecord>, BackendError>;

    /// `POST /interviews` with `{ text }`; the response body is not used.
    async fn submit_interview(&self, text: &str) -> Result<(), BackendError>;

    /// `POST /interviews/{id}/review`
    async fn submit_review(
        &self,
        record_id: &RecordId,
        review: &ReviewInput,
    ) -> Result<(), BackendError>;

    /// `POST /agents/{kind}/{id}`
    async fn run_agent(
        &self,
        kind: AgentKind,
        record_id: &RecordId,
    ) -> Result<AgentReport, BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    base: Url,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let base = Url::parse(settings.base_url.trim())
            .map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(BackendError::new(
                FailureKind::InvalidUrl,
                format!("{base} cannot be used as a base url"),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| BackendError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { base, client })
    }

    /// Appends path segments to the base url; segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>, BackendError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(body.to_vec())
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn list_interviews(&self) -> Result<Vec<InterviewRecord>, BackendError> {
        let url = self.endpoint(&["interviews"]);
        pilot_debug!("GET {url}");
        let body = self.send(self.client.get(url)).await?;
        serde_json::from_slice(&body).map_err(decode_error)
    }

    async fn submit_interview(&self, text: &str) -> Result<(), BackendError> {
        let url = self.endpoint(&["interviews"]);
        pilot_debug!("POST {url} text_len={}", text.len());
        let payload = serde_json::json!({ "text": text });
        self.send(self.client.post(url).json(&payload)).await?;
        Ok(())
    }

    async fn submit_review(
        &self,
        record_id: &RecordId,
        review: &ReviewInput,
    ) -> Result<(), BackendError> {
        let url = self.endpoint(&["interviews", record_id.as_str(), "review"]);
        pilot_debug!("POST {url}");
        self.send(self.client.post(url).json(review)).await?;
        Ok(())
    }

    async fn run_agent(
        &self,
        kind: AgentKind,
        record_id: &RecordId,
    ) -> Result<AgentReport, BackendError> {
        let url = self.endpoint(&["agents", kind.path_segment(), record_id.as_str()]);
        pilot_debug!("POST {url}");
        let body = self
            .send(self.client.post(url).json(&kind.request_body()))
            .await?;
        kind.parse_response(&body).map_err(|err| {
            pilot_warn!("{kind} agent returned an unexpected body: {err}");
            decode_error(err)
        })
    }
}

fn decode_error(err: serde_json::Error) -> BackendError {
    BackendError::new(FailureKind::Decode, err.to_string())
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return BackendError::new(FailureKind::Decode, err.to_string());
    }
    BackendError::new(FailureKind::Network, err.to_string())
}
