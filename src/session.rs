//! Upload session state and button-enablement state machines
//!
//! The session is a plain value. Every user action is a [`SessionEvent`] and
//! [`UploadSession::apply`] maps (old state, event) to the new state, so the
//! whole page logic can be exercised without a terminal or a network.

use crate::analysis::AnalysisKind;
use crate::input::{UploadFile, UploadPolicy};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeState {
    Empty,
    FileSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtsState {
    Empty,
    FileOnly,
    TextOnly,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Results were rendered for this workflow.
    Rendered,
    /// Banner text to show instead of results.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    FileChosen { kind: AnalysisKind, file: UploadFile },
    FileRemoved(AnalysisKind),
    JobDescriptionEdited(String),
    SubmissionStarted(AnalysisKind),
    SubmissionSettled { kind: AnalysisKind, outcome: SubmissionOutcome },
    Reset(AnalysisKind),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct WorkflowFlags {
    in_flight: bool,
    results_visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadSession {
    resume_file: Option<UploadFile>,
    ats_file: Option<UploadFile>,
    job_description: String,
    resume: WorkflowFlags,
    ats: WorkflowFlags,
    banner: Option<String>,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(mut self, event: SessionEvent, policy: &UploadPolicy) -> Self {
        debug!("Session event: {:?}", event);

        match event {
            SessionEvent::FileChosen { kind, file } => match policy.validate(&file) {
                Ok(()) => {
                    *self.file_slot(kind) = Some(file);
                    self.banner = None;
                }
                Err(e) => {
                    self.banner = Some(e.to_string());
                }
            },
            SessionEvent::FileRemoved(kind) => {
                *self.file_slot(kind) = None;
            }
            SessionEvent::JobDescriptionEdited(text) => {
                self.job_description = text;
            }
            SessionEvent::SubmissionStarted(kind) => {
                if self.can_submit(kind) {
                    self.flags_mut(kind).in_flight = true;
                    self.banner = None;
                }
            }
            SessionEvent::SubmissionSettled { kind, outcome } => {
                let flags = self.flags_mut(kind);
                flags.in_flight = false;
                match outcome {
                    SubmissionOutcome::Rendered => flags.results_visible = true,
                    SubmissionOutcome::Failed(message) => self.banner = Some(message),
                }
            }
            SessionEvent::Reset(kind) => {
                *self.file_slot(kind) = None;
                self.flags_mut(kind).results_visible = false;
                if kind == AnalysisKind::AtsCheck {
                    self.job_description.clear();
                }
                self.banner = None;
            }
        }

        self
    }

    pub fn resume_state(&self) -> ResumeState {
        match self.resume_file {
            Some(_) => ResumeState::FileSelected,
            None => ResumeState::Empty,
        }
    }

    pub fn ats_state(&self) -> AtsState {
        let has_text = !self.job_description.trim().is_empty();
        match (self.ats_file.is_some(), has_text) {
            (false, false) => AtsState::Empty,
            (true, false) => AtsState::FileOnly,
            (false, true) => AtsState::TextOnly,
            (true, true) => AtsState::Ready,
        }
    }

    /// Whether the "Analyze" control for `kind` is enabled.
    pub fn can_submit(&self, kind: AnalysisKind) -> bool {
        let ready = match kind {
            AnalysisKind::Resume => self.resume_state() == ResumeState::FileSelected,
            AnalysisKind::AtsCheck => self.ats_state() == AtsState::Ready,
        };
        ready && !self.flags(kind).in_flight
    }

    pub fn is_in_flight(&self, kind: AnalysisKind) -> bool {
        self.flags(kind).in_flight
    }

    pub fn results_visible(&self, kind: AnalysisKind) -> bool {
        self.flags(kind).results_visible
    }

    pub fn file(&self, kind: AnalysisKind) -> Option<&UploadFile> {
        match kind {
            AnalysisKind::Resume => self.resume_file.as_ref(),
            AnalysisKind::AtsCheck => self.ats_file.as_ref(),
        }
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    fn file_slot(&mut self, kind: AnalysisKind) -> &mut Option<UploadFile> {
        match kind {
            AnalysisKind::Resume => &mut self.resume_file,
            AnalysisKind::AtsCheck => &mut self.ats_file,
        }
    }

    fn flags(&self, kind: AnalysisKind) -> &WorkflowFlags {
        match kind {
            AnalysisKind::Resume => &self.resume,
            AnalysisKind::AtsCheck => &self.ats,
        }
    }

    fn flags_mut(&mut self, kind: AnalysisKind) -> &mut WorkflowFlags {
        match kind {
            AnalysisKind::Resume => &mut self.resume,
            AnalysisKind::AtsCheck => &mut self.ats,
        }
    }
}
