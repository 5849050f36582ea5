//! Analysis payloads returned by the remote service
//! Handles wire-shape normalization and lenient typed views of the result

pub mod models;
pub mod normalizer;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two independent workflows offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisKind {
    Resume,
    AtsCheck,
}

impl AnalysisKind {
    /// Banner shown when the request itself fails.
    pub fn failure_banner(&self, message: &str) -> String {
        match self {
            AnalysisKind::Resume => format!("Failed to analyze resume: {}", message),
            AnalysisKind::AtsCheck => format!("Failed to check ATS compatibility: {}", message),
        }
    }

    /// Banner shown when the response arrived but could not be decoded.
    pub fn parse_banner(&self, message: &str) -> String {
        match self {
            AnalysisKind::Resume => format!("Failed to parse analysis results: {}", message),
            AnalysisKind::AtsCheck => format!("Failed to parse ATS results: {}", message),
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisKind::Resume => write!(f, "resume analysis"),
            AnalysisKind::AtsCheck => write!(f, "ATS check"),
        }
    }
}
