//! Orchestrates one workflow run: session gate, loading state, submission,
//! normalization and display model construction

use crate::analysis::models::{AtsAnalysis, ResumeAnalysis};
use crate::analysis::normalizer::normalize;
use crate::analysis::AnalysisKind;
use crate::client::{AnalysisTransport, SubmissionClient};
use crate::error::{AtsClientError, Result};
use crate::input::{UploadFile, UploadPolicy};
use crate::output::display::{AnalysisDisplay, AnalysisReport, AtsDisplay, ReportMetadata, ResumeDisplay};
use crate::output::loading::{LoadingGuard, LoadingIndicator};
use crate::session::{SessionEvent, SubmissionOutcome, UploadSession};
use log::{error, info};
use serde_json::Value;

pub struct AnalysisWorkflow<T, L> {
    client: SubmissionClient<T>,
    loading: L,
    policy: UploadPolicy,
    session: UploadSession,
}

impl<T: AnalysisTransport, L: LoadingIndicator> AnalysisWorkflow<T, L> {
    pub fn new(client: SubmissionClient<T>, loading: L, policy: UploadPolicy) -> Self {
        Self {
            client,
            loading,
            policy,
            session: UploadSession::new(),
        }
    }

    pub fn session(&self) -> &UploadSession {
        &self.session
    }

    pub fn loading(&self) -> &L {
        &self.loading
    }

    pub fn client(&self) -> &SubmissionClient<T> {
        &self.client
    }

    pub fn dispatch(&mut self, event: SessionEvent) {
        self.session = std::mem::take(&mut self.session).apply(event, &self.policy);
    }

    /// Offers a file to the session. A rejected file leaves the session's
    /// files untouched and sets the banner.
    pub fn select_file(&mut self, kind: AnalysisKind, file: UploadFile) -> Result<()> {
        let verdict = self.policy.validate(&file);
        self.dispatch(SessionEvent::FileChosen { kind, file });
        verdict.map_err(AtsClientError::from)
    }

    pub fn edit_job_description(&mut self, text: impl Into<String>) {
        self.dispatch(SessionEvent::JobDescriptionEdited(text.into()));
    }

    /// Submits the selected file(s) and builds the report. On failure the
    /// banner holds the user-facing message and nothing is rendered.
    pub async fn run(&mut self, kind: AnalysisKind) -> Result<AnalysisReport> {
        if !self.session.can_submit(kind) {
            return Err(AtsClientError::InvalidInput(format!("{} is not ready to submit", kind)));
        }

        self.dispatch(SessionEvent::SubmissionStarted(kind));
        let source_file = self
            .session
            .file(kind)
            .map(|f| f.name().to_string())
            .unwrap_or_default();
        info!("Starting {} for {}", kind, source_file);

        let submitted = {
            let _loading = LoadingGuard::enter(&self.loading, kind);
            self.client.submit(kind, &self.session).await
        };

        let rendered = match submitted {
            Err(e) => Err((kind.failure_banner(&e.to_string()), e)),
            Ok(raw) => match normalize(raw) {
                Ok(analysis) => Ok(AnalysisReport {
                    metadata: ReportMetadata::new(kind, source_file),
                    display: build_display(kind, &analysis),
                }),
                Err(e) => Err((kind.parse_banner(&e.to_string()), e)),
            },
        };

        match rendered {
            Ok(report) => {
                self.dispatch(SessionEvent::SubmissionSettled {
                    kind,
                    outcome: SubmissionOutcome::Rendered,
                });
                Ok(report)
            }
            Err((banner, e)) => {
                error!("{}", banner);
                self.dispatch(SessionEvent::SubmissionSettled {
                    kind,
                    outcome: SubmissionOutcome::Failed(banner),
                });
                Err(e)
            }
        }
    }
}

pub fn build_display(kind: AnalysisKind, analysis: &Value) -> AnalysisDisplay {
    match kind {
        AnalysisKind::Resume => AnalysisDisplay::Resume(ResumeDisplay::from_analysis(
            &ResumeAnalysis::from_value(analysis),
        )),
        AnalysisKind::AtsCheck => {
            AnalysisDisplay::Ats(AtsDisplay::from_analysis(&AtsAnalysis::from_value(analysis)))
        }
    }
}
