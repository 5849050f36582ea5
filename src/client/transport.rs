//! HTTP transport for multipart submissions

use crate::analysis::AnalysisKind;
use crate::config::ApiConfig;
use crate::error::{AtsClientError, Result};
use crate::input::UploadFile;
use log::{debug, info};
use reqwest::multipart::{Form, Part};

pub const FILE_FIELD: &str = "file";
pub const JOB_DESCRIPTION_FIELD: &str = "jd";

/// Everything one submission sends.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPayload {
    pub kind: AnalysisKind,
    pub file: UploadFile,
    /// Present only for ATS checks.
    pub job_description: Option<String>,
}

/// Status and body of a settled request.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Sends a payload to the service. Only a request that got no response at
/// all is an `Err`; HTTP error statuses come back as a response.
pub trait AnalysisTransport {
    fn post(&self, payload: &SubmissionPayload) -> impl std::future::Future<Output = Result<TransportResponse>> + Send;
}

pub struct HttpTransport {
    client: reqwest::Client,
    api: ApiConfig,
}

impl HttpTransport {
    /// No request timeout is configured: a request either settles or waits.
    pub fn new(api: ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(api.user_agent.clone())
            .build()?;
        Ok(Self { client, api })
    }

    fn form(payload: &SubmissionPayload) -> Result<Form> {
        let part = Part::bytes(payload.file.bytes().to_vec())
            .file_name(payload.file.name().to_string())
            .mime_str(payload.file.content_type())?;

        let mut form = Form::new().part(FILE_FIELD, part);
        if let Some(jd) = &payload.job_description {
            form = form.text(JOB_DESCRIPTION_FIELD, jd.clone());
        }
        Ok(form)
    }
}

impl AnalysisTransport for HttpTransport {
    async fn post(&self, payload: &SubmissionPayload) -> Result<TransportResponse> {
        let url = self.api.endpoint(payload.kind);
        info!("Submitting {} ({} bytes) to {}", payload.file.name(), payload.file.size(), url);

        let response = self
            .client
            .post(&url)
            .multipart(Self::form(payload)?)
            .send()
            .await
            .map_err(|e| AtsClientError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AtsClientError::Transport(e.to_string()))?;
        debug!("Response status {} with {} byte body", status, body.len());

        Ok(TransportResponse { status, body })
    }
}
