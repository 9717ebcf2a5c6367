use std::time::Duration;

use engine_logging::{engine_debug, engine_info};
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use url::Url;

use crate::{
    AnalysisRequest, AnalysisResponse, AnalyzeError, EngineEvent, FailureKind, HealthStatus,
    RequestId, Stage, StageProgress, DEFAULT_ERROR_MESSAGE,
};

pub const DEFAULT_API_BASE: &str = "https://text-summarization-hdb9.onrender.com";

const ANALYZE_PATH: &str = "/api/analyze";
const HEALTH_PATH: &str = "/api/health";

#[derive(Debug, Clone)]
pub struct AnalyzeSettings {
    pub api_base: String,
    pub connect_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for AnalyzeSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            max_response_bytes: 16 * 1024 * 1024,
        }
    }
}

impl AnalyzeSettings {
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Self::default()
        }
    }

    pub fn analyze_url(&self) -> Result<Url, AnalyzeError> {
        endpoint(&self.api_base, ANALYZE_PATH)
    }

    pub fn health_url(&self) -> Result<Url, AnalyzeError> {
        endpoint(&self.api_base, HEALTH_PATH)
    }
}

fn endpoint(api_base: &str, path: &str) -> Result<Url, AnalyzeError> {
    let joined = format!("{}{}", api_base.trim().trim_end_matches('/'), path);
    Url::parse(&joined).map_err(|err| AnalyzeError::new(FailureKind::InvalidUrl, err.to_string()))
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[async_trait::async_trait]
pub trait Analyzer: Send + Sync {
    /// Sends one analyze request. `Ok` only for a 2xx response with `ok: true`.
    async fn analyze(
        &self,
        request_id: RequestId,
        request: &AnalysisRequest,
        sink: &dyn ProgressSink,
    ) -> Result<AnalysisResponse, AnalyzeError>;

    async fn health(&self) -> Result<HealthStatus, AnalyzeError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalyzer {
    settings: AnalyzeSettings,
    client: reqwest::Client,
}

impl ReqwestAnalyzer {
    pub fn new(settings: AnalyzeSettings) -> Result<Self, AnalyzeError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| AnalyzeError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, AnalyzeError> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(AnalyzeError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(AnalyzeError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

pub fn build_form(request: &AnalysisRequest) -> Form {
    let form = request.files.iter().fold(Form::new(), |form, file| {
        form.part(
            "files",
            Part::bytes(file.content.to_vec()).file_name(file.name.clone()),
        )
    });
    form.text("summary_type", request.summary_type.clone())
}

/// Applies the failure rules to a raw analyze response: non-2xx and `ok: false`
/// both fail with the service's `error` text or the default message.
pub fn interpret_analysis(status: u16, body: &[u8]) -> Result<AnalysisResponse, AnalyzeError> {
    let parsed = serde_json::from_slice::<AnalysisResponse>(body);

    if !(200..300).contains(&status) {
        let message = parsed
            .ok()
            .and_then(|response| response.error)
            .filter(|error| !error.is_empty())
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
        return Err(AnalyzeError::new(FailureKind::HttpStatus(status), message));
    }

    let response =
        parsed.map_err(|err| AnalyzeError::new(FailureKind::Decode, err.to_string()))?;
    if !response.ok {
        let message = response
            .error
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
        return Err(AnalyzeError::new(FailureKind::Rejected, message));
    }
    Ok(response)
}

#[async_trait::async_trait]
impl Analyzer for ReqwestAnalyzer {
    async fn analyze(
        &self,
        request_id: RequestId,
        request: &AnalysisRequest,
        sink: &dyn ProgressSink,
    ) -> Result<AnalysisResponse, AnalyzeError> {
        let url = self.settings.analyze_url()?;
        let total_bytes: usize = request.files.iter().map(|file| file.content.len()).sum();
        engine_info!(
            "POST {} request_id={} files={} bytes={} summary_type={}",
            url,
            request_id,
            request.files.len(),
            total_bytes,
            request.summary_type
        );

        sink.emit(EngineEvent::Progress(StageProgress {
            request_id,
            stage: Stage::Uploading,
        }));

        let response = self
            .client
            .post(url)
            .multipart(build_form(request))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        engine_debug!("request_id={} responded with {}", request_id, status);
        sink.emit(EngineEvent::Progress(StageProgress {
            request_id,
            stage: Stage::Decoding,
        }));

        let body = self.read_body(response).await?;
        interpret_analysis(status.as_u16(), &body)
    }

    async fn health(&self) -> Result<HealthStatus, AnalyzeError> {
        let url = self.settings.health_url()?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyzeError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = self.read_body(response).await?;
        serde_json::from_slice(&body)
            .map_err(|err| AnalyzeError::new(FailureKind::Decode, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> AnalyzeError {
    if err.is_timeout() {
        return AnalyzeError::new(FailureKind::Timeout, err.to_string());
    }
    AnalyzeError::new(FailureKind::Network, err.to_string())
}
