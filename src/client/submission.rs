//! Submission client: builds payloads from the session and interprets replies

use crate::analysis::AnalysisKind;
use crate::client::transport::{AnalysisTransport, SubmissionPayload, TransportResponse};
use crate::error::{AtsClientError, Result};
use crate::session::UploadSession;
use log::warn;
use serde_json::Value;

pub struct SubmissionClient<T> {
    transport: T,
}

impl<T: AnalysisTransport> SubmissionClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the raw JSON body of a successful reply.
    pub async fn submit(&self, kind: AnalysisKind, session: &UploadSession) -> Result<Value> {
        let payload = payload_for(kind, session)?;
        let response = self.transport.post(&payload).await?;
        interpret_response(&response)
    }
}

pub fn payload_for(kind: AnalysisKind, session: &UploadSession) -> Result<SubmissionPayload> {
    let file = session
        .file(kind)
        .cloned()
        .ok_or_else(|| AtsClientError::InvalidInput(format!("No file selected for {}", kind)))?;

    let job_description = match kind {
        AnalysisKind::Resume => None,
        AnalysisKind::AtsCheck => {
            if session.job_description().trim().is_empty() {
                return Err(AtsClientError::InvalidInput(
                    "Job description must not be empty".to_string(),
                ));
            }
            Some(session.job_description().to_string())
        }
    };

    Ok(SubmissionPayload { kind, file, job_description })
}

pub fn interpret_response(response: &TransportResponse) -> Result<Value> {
    if (200..300).contains(&response.status) {
        return serde_json::from_str(&response.body).map_err(|e| AtsClientError::Parse(e.to_string()));
    }

    let message = serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|body| match body.get("error") {
            Some(Value::String(error)) if !error.is_empty() => Some(error.clone()),
            _ => None,
        })
        .unwrap_or_else(|| format!("HTTP error: status {}", response.status));

    warn!("Analysis service answered {}: {}", response.status, message);
    Err(AtsClientError::Http { status: response.status, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::file_detector::PDF;
    use crate::input::{UploadFile, UploadPolicy};
    use crate::session::SessionEvent;
    use serde_json::json;

    fn response(status: u16, body: &str) -> TransportResponse {
        TransportResponse { status, body: body.to_string() }
    }

    fn ready_session() -> UploadSession {
        let policy = UploadPolicy::default();
        let file = UploadFile::new("cv.pdf", PDF, b"%PDF".to_vec());
        UploadSession::new()
            .apply(SessionEvent::FileChosen { kind: AnalysisKind::Resume, file: file.clone() }, &policy)
            .apply(SessionEvent::FileChosen { kind: AnalysisKind::AtsCheck, file }, &policy)
            .apply(SessionEvent::JobDescriptionEdited("Rust developer".into()), &policy)
    }

    #[test]
    fn test_success_body_is_returned() {
        let value = interpret_response(&response(200, r#"{"atsScore": 91}"#)).unwrap();
        assert_eq!(value, json!({ "atsScore": 91 }));
    }

    #[test]
    fn test_error_field_is_extracted() {
        let err = interpret_response(&response(500, r#"{"error":"quota exceeded"}"#)).unwrap_err();
        assert_eq!(err.to_string(), "quota exceeded");
        assert!(matches!(err, AtsClientError::Http { status: 500, .. }));
    }

    #[test]
    fn test_generic_http_message() {
        for body in [r#"{"message":"nope"}"#, "<html>Bad Gateway</html>", r#"{"error":""}"#] {
            let err = interpret_response(&response(502, body)).unwrap_err();
            assert_eq!(err.to_string(), "HTTP error: status 502");
        }
    }

    #[test]
    fn test_non_json_success_is_parse_error() {
        let err = interpret_response(&response(200, "OK")).unwrap_err();
        assert!(matches!(err, AtsClientError::Parse(_)));
    }

    #[test]
    fn test_resume_payload_has_no_job_description() {
        let payload = payload_for(AnalysisKind::Resume, &ready_session()).unwrap();
        assert_eq!(payload.file.name(), "cv.pdf");
        assert_eq!(payload.job_description, None);
    }

    #[test]
    fn test_ats_payload_carries_job_description() {
        let payload = payload_for(AnalysisKind::AtsCheck, &ready_session()).unwrap();
        assert_eq!(payload.job_description.as_deref(), Some("Rust developer"));
    }

    #[test]
    fn test_payload_requires_file() {
        let err = payload_for(AnalysisKind::Resume, &UploadSession::new()).unwrap_err();
        assert!(matches!(err, AtsClientError::InvalidInput(_)));
    }
}
