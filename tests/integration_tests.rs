//! Integration tests for the resume ATS client

use resume_ats_client::analysis::AnalysisKind;
use resume_ats_client::client::{AnalysisTransport, SubmissionClient, SubmissionPayload, TransportResponse};
use resume_ats_client::input::file_detector::{OCTET_STREAM, PDF, PLAIN_TEXT};
use resume_ats_client::input::manager::InputManager;
use resume_ats_client::input::{UploadFile, UploadPolicy};
use resume_ats_client::output::display::{AnalysisDisplay, Collection};
use resume_ats_client::output::LoadingIndicator;
use resume_ats_client::session::SessionEvent;
use resume_ats_client::workflow::AnalysisWorkflow;
use resume_ats_client::{AtsClientError, Result, ValidationError};
use serde_json::json;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

struct FakeTransport {
    reply: std::result::Result<TransportResponse, String>,
    calls: Mutex<Vec<SubmissionPayload>>,
}

impl FakeTransport {
    fn replying(status: u16, body: serde_json::Value) -> Self {
        Self {
            reply: Ok(TransportResponse { status, body: body.to_string() }),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn unreachable(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<SubmissionPayload> {
        self.calls.lock().unwrap().clone()
    }
}

impl AnalysisTransport for FakeTransport {
    async fn post(&self, payload: &SubmissionPayload) -> Result<TransportResponse> {
        self.calls.lock().unwrap().push(payload.clone());
        self.reply.clone().map_err(AtsClientError::Transport)
    }
}

#[derive(Default)]
struct CountingIndicator {
    entered: AtomicUsize,
    exited: AtomicUsize,
}

impl LoadingIndicator for CountingIndicator {
    fn enter(&self, _kind: AnalysisKind) {
        self.entered.fetch_add(1, Ordering::SeqCst);
    }

    fn exit(&self, _kind: AnalysisKind) {
        self.exited.fetch_add(1, Ordering::SeqCst);
    }
}

fn workflow(transport: FakeTransport) -> AnalysisWorkflow<FakeTransport, CountingIndicator> {
    AnalysisWorkflow::new(
        SubmissionClient::new(transport),
        CountingIndicator::default(),
        UploadPolicy::default(),
    )
}

fn resume_pdf() -> UploadFile {
    UploadFile::new("Jane_Doe_Resume.pdf", PDF, b"%PDF-1.7 resume".to_vec())
}

#[tokio::test]
async fn test_load_text_resume() {
    let manager = InputManager::new();
    let file = manager.load_upload(Path::new("tests/fixtures/sample_resume.txt")).await.unwrap();

    assert_eq!(file.name(), "sample_resume.txt");
    assert_eq!(file.content_type(), PLAIN_TEXT);
    assert!(String::from_utf8_lossy(file.bytes()).contains("Jane Doe"));
    assert!(UploadPolicy::default().validate(&file).is_ok());
}

#[tokio::test]
async fn test_content_type_override() {
    let manager = InputManager::new().with_content_type(Some(PDF.to_string()));
    let file = manager.load_upload(Path::new("tests/fixtures/sample_resume.txt")).await.unwrap();
    assert_eq!(file.content_type(), PDF);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let manager = InputManager::new();
    let file = manager.load_upload(Path::new("tests/fixtures/unsupported.xyz")).await.unwrap();

    assert_eq!(file.content_type(), OCTET_STREAM);
    assert!(matches!(
        UploadPolicy::default().validate(&file),
        Err(ValidationError::UnsupportedType { .. })
    ));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let manager = InputManager::new();
    let result = manager.load_upload(Path::new("tests/fixtures/nonexistent.pdf")).await;
    assert!(matches!(result, Err(AtsClientError::InvalidInput(_))));
}

#[tokio::test]
async fn test_read_job_description() {
    let manager = InputManager::new();
    let jd = manager
        .read_job_description(Path::new("tests/fixtures/job_description.txt"))
        .await
        .unwrap();
    assert!(jd.contains("Backend Engineer"));
}

#[tokio::test]
async fn test_large_file_from_disk_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge_resume.pdf");
    std::fs::write(&path, vec![b'x'; 6 * 1024 * 1024]).unwrap();

    let file = InputManager::new().load_upload(&path).await.unwrap();
    let mut flow = workflow(FakeTransport::replying(200, json!({})));
    let err = flow.select_file(AnalysisKind::Resume, file).unwrap_err();

    assert!(matches!(err, AtsClientError::Validation(ValidationError::TooLarge { .. })));
    assert!(flow.session().file(AnalysisKind::Resume).is_none());
    assert_eq!(flow.session().banner(), Some("File size must be less than 5MB"));
    assert!(!flow.session().can_submit(AnalysisKind::Resume));
}

#[tokio::test]
async fn test_resume_analysis_with_encoded_payload() {
    let analysis = json!({
        "overallScore": 4,
        "candidateName": "Jane Doe",
        "expectedRole": "Backend Engineer",
        "skills": { "primarySkills": ["Rust", "Go"] },
        "sectionScores": { "communicationSkills": 4, "clarity": 3 },
        "improvements": [{ "suggestion": "Quantify the billing migration" }]
    });
    let body = json!({ "analysis": analysis.to_string() });

    let mut flow = workflow(FakeTransport::replying(200, body));
    flow.select_file(AnalysisKind::Resume, resume_pdf()).unwrap();
    let report = flow.run(AnalysisKind::Resume).await.unwrap();

    let AnalysisDisplay::Resume(display) = &report.display else {
        panic!("expected resume display");
    };
    assert_eq!(display.candidate_name, "Jane Doe");
    assert_eq!(display.overall_score.width_percent, 80.0);
    assert_eq!(display.secondary_skills, Collection::Placeholder("No secondary skills identified".into()));
    assert_eq!(report.metadata.source_file, "Jane_Doe_Resume.pdf");

    let calls = flow.client().transport().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].kind, AnalysisKind::Resume);
    assert_eq!(calls[0].job_description, None);

    assert!(flow.session().results_visible(AnalysisKind::Resume));
    assert!(flow.session().can_submit(AnalysisKind::Resume));
    assert_eq!(flow.loading().entered.load(Ordering::SeqCst), 1);
    assert_eq!(flow.loading().exited.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_ats_check_http_error_scenario() {
    let mut flow = workflow(FakeTransport::replying(500, json!({ "error": "quota exceeded" })));
    flow.select_file(AnalysisKind::AtsCheck, resume_pdf()).unwrap();
    flow.edit_job_description("Backend Engineer, Rust and Kafka");

    let err = flow.run(AnalysisKind::AtsCheck).await.unwrap_err();

    assert!(matches!(err, AtsClientError::Http { status: 500, .. }));
    assert_eq!(
        flow.session().banner(),
        Some("Failed to check ATS compatibility: quota exceeded")
    );
    assert_eq!(flow.loading().entered.load(Ordering::SeqCst), 1);
    assert_eq!(flow.loading().exited.load(Ordering::SeqCst), 1);
    assert!(!flow.session().is_in_flight(AnalysisKind::AtsCheck));
    assert!(flow.session().can_submit(AnalysisKind::AtsCheck));
    assert!(!flow.session().results_visible(AnalysisKind::AtsCheck));

    let calls = flow.client().transport().calls();
    assert_eq!(calls[0].job_description.as_deref(), Some("Backend Engineer, Rust and Kafka"));
}

#[tokio::test]
async fn test_transport_failure_banner() {
    let mut flow = workflow(FakeTransport::unreachable("error sending request: connection refused"));
    flow.select_file(AnalysisKind::Resume, resume_pdf()).unwrap();

    let err = flow.run(AnalysisKind::Resume).await.unwrap_err();

    assert!(matches!(err, AtsClientError::Transport(_)));
    assert_eq!(
        flow.session().banner(),
        Some("Failed to analyze resume: error sending request: connection refused")
    );
    assert_eq!(flow.loading().exited.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_undecodable_analysis_is_not_rendered() {
    let mut flow = workflow(FakeTransport::replying(200, json!({ "analysis": "not valid json" })));
    flow.select_file(AnalysisKind::Resume, resume_pdf()).unwrap();

    let err = flow.run(AnalysisKind::Resume).await.unwrap_err();

    assert!(matches!(err, AtsClientError::Parse(_)));
    let banner = flow.session().banner().unwrap();
    assert!(banner.starts_with("Failed to parse analysis results: "));
    assert!(!flow.session().results_visible(AnalysisKind::Resume));
    assert_eq!(flow.loading().exited.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_direct_ats_payload_with_missing_fields() {
    let mut flow = workflow(FakeTransport::replying(200, json!({ "atsScore": 68, "matchedKeywords": ["Rust"] })));
    flow.select_file(AnalysisKind::AtsCheck, resume_pdf()).unwrap();
    flow.edit_job_description("Rust engineer");

    let report = flow.run(AnalysisKind::AtsCheck).await.unwrap();
    let AnalysisDisplay::Ats(display) = &report.display else {
        panic!("expected ATS display");
    };

    assert_eq!(display.ats_score.width_percent, 68.0);
    assert_eq!(display.matched_keywords, Collection::Items(vec!["Rust".into()]));
    assert_eq!(display.missing_keywords, Collection::Placeholder("No missing keywords".into()));
    assert_eq!(display.recommendations, Collection::Placeholder("No recommendations available".into()));
}

#[tokio::test]
async fn test_array_analysis_renders_placeholders() {
    let body = json!({ "analysis": [{ "atsScore": 90 }], "atsScore": 70, "matchedKeywords": ["Rust"] });
    let mut flow = workflow(FakeTransport::replying(200, body));
    flow.select_file(AnalysisKind::AtsCheck, resume_pdf()).unwrap();
    flow.edit_job_description("Rust engineer");

    let report = flow.run(AnalysisKind::AtsCheck).await.unwrap();
    let AnalysisDisplay::Ats(display) = &report.display else {
        panic!("expected ATS display");
    };

    assert_eq!(display.ats_score.width_percent, 0.0);
    assert_eq!(display.candidate_name, "Not specified");
    assert_eq!(display.matched_keywords, Collection::Placeholder("No matched keywords".into()));
}

#[tokio::test]
async fn test_run_refused_until_ready() {
    let mut flow = workflow(FakeTransport::replying(200, json!({})));
    flow.select_file(AnalysisKind::AtsCheck, resume_pdf()).unwrap();
    flow.edit_job_description("   ");

    let err = flow.run(AnalysisKind::AtsCheck).await.unwrap_err();

    assert!(matches!(err, AtsClientError::InvalidInput(_)));
    assert!(flow.client().transport().calls().is_empty());
    assert_eq!(flow.loading().entered.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_reset_after_results() {
    let mut flow = workflow(FakeTransport::replying(200, json!({ "atsScore": 90 })));
    flow.select_file(AnalysisKind::AtsCheck, resume_pdf()).unwrap();
    flow.edit_job_description("Platform engineer");
    flow.run(AnalysisKind::AtsCheck).await.unwrap();
    assert!(flow.session().results_visible(AnalysisKind::AtsCheck));

    flow.dispatch(SessionEvent::Reset(AnalysisKind::AtsCheck));

    assert!(!flow.session().results_visible(AnalysisKind::AtsCheck));
    assert!(flow.session().file(AnalysisKind::AtsCheck).is_none());
    assert_eq!(flow.session().job_description(), "");
    assert!(!flow.session().can_submit(AnalysisKind::AtsCheck));
}
