//! Submission of selected files to the remote analysis service

pub mod submission;
pub mod transport;

pub use submission::SubmissionClient;
pub use transport::{AnalysisTransport, HttpTransport, SubmissionPayload, TransportResponse};
