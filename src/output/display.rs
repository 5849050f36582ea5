//! Display models computed from analysis results
//!
//! Everything the user sees is decided here, as plain data. Formatters only
//! lay these values out, so fallback substitution and score arithmetic are
//! tested without any rendering surface.

use crate::analysis::models::{AtsAnalysis, FileNamingCheck, ResumeAnalysis};
use crate::analysis::AnalysisKind;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

pub const NOT_SPECIFIED: &str = "Not specified";
pub const NO_PRIMARY_SKILLS: &str = "No primary skills identified";
pub const NO_SECONDARY_SKILLS: &str = "No secondary skills identified";
pub const NO_SECTION_SCORES: &str = "No section scores available";
pub const NO_FILE_NAMING_CHECK: &str = "No file naming check available";
pub const NO_IMPROVEMENTS: &str = "No improvement suggestions available";
pub const NO_SUGGESTION_TEXT: &str = "No suggestion text";
pub const NO_TECHNICAL_FIT: &str = "No technical fit assessment available.";
pub const NO_SUMMARY_FIT: &str = "No summary fit feedback available.";
pub const NO_MATCHED_KEYWORDS: &str = "No matched keywords";
pub const NO_MISSING_KEYWORDS: &str = "No missing keywords";
pub const NO_RECOMMENDATIONS: &str = "No recommendations available";
pub const NO_RECOMMENDATION_TEXT: &str = "No recommendation text";

/// A rendered list region: either its entries or the region's placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Collection<T = String> {
    Items(Vec<T>),
    Placeholder(String),
}

impl<T> Collection<T> {
    fn from_items(items: Vec<T>, placeholder: &str) -> Self {
        if items.is_empty() {
            Collection::Placeholder(placeholder.to_string())
        } else {
            Collection::Items(items)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBar {
    pub value: String,
    /// Fill width in percent. Not clamped: a score above the scale's maximum
    /// gives a width above 100.
    pub width_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionRow {
    pub label: String,
    pub score: String,
}

impl fmt::Display for SectionRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}/5", self.label, self.score)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileNamingDisplay {
    Checked {
        proper: bool,
        status: String,
        expected_format: Option<String>,
    },
    Unavailable { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeDisplay {
    pub overall_score: ScoreBar,
    pub candidate_name: String,
    pub expected_role: String,
    pub primary_skills: Collection,
    pub secondary_skills: Collection,
    pub section_scores: Collection<SectionRow>,
    pub file_naming: FileNamingDisplay,
    pub improvements: Collection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtsDisplay {
    pub ats_score: ScoreBar,
    pub candidate_name: String,
    pub predicted_role_fit: String,
    pub skills_match_score: String,
    pub technical_fit_comment: String,
    pub summary_fit_feedback: String,
    pub matched_keywords: Collection,
    pub missing_keywords: Collection,
    pub recommendations: Collection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "results", rename_all = "snake_case")]
pub enum AnalysisDisplay {
    Resume(ResumeDisplay),
    Ats(AtsDisplay),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub kind: AnalysisKind,
    pub source_file: String,
    pub generated_at: DateTime<Utc>,
    pub client_version: String,
}

/// Everything a formatter needs for one rendered report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub display: AnalysisDisplay,
}

impl ReportMetadata {
    pub fn new(kind: AnalysisKind, source_file: impl Into<String>) -> Self {
        Self {
            kind,
            source_file: source_file.into(),
            generated_at: Utc::now(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl ResumeDisplay {
    pub fn from_analysis(analysis: &ResumeAnalysis) -> Self {
        let score = analysis.overall_score.unwrap_or(0.0);

        Self {
            overall_score: ScoreBar {
                value: format_number(score),
                width_percent: score / 5.0 * 100.0,
            },
            candidate_name: or_not_specified(&analysis.candidate_name),
            expected_role: or_not_specified(&analysis.expected_role),
            primary_skills: Collection::from_items(analysis.primary_skills.clone(), NO_PRIMARY_SKILLS),
            secondary_skills: Collection::from_items(analysis.secondary_skills.clone(), NO_SECONDARY_SKILLS),
            section_scores: Collection::from_items(
                analysis
                    .section_scores
                    .iter()
                    .map(|s| SectionRow {
                        label: humanize_section_key(&s.key),
                        score: format_number(s.score),
                    })
                    .collect(),
                NO_SECTION_SCORES,
            ),
            file_naming: file_naming(analysis.file_naming_check.as_ref()),
            improvements: Collection::from_items(
                suggestion_texts(&analysis.improvements, NO_SUGGESTION_TEXT),
                NO_IMPROVEMENTS,
            ),
        }
    }
}

impl AtsDisplay {
    pub fn from_analysis(analysis: &AtsAnalysis) -> Self {
        let score = analysis.ats_score.unwrap_or(0.0);

        Self {
            ats_score: ScoreBar {
                value: format_number(score),
                width_percent: score,
            },
            candidate_name: or_not_specified(&analysis.candidate_name),
            predicted_role_fit: or_not_specified(&analysis.predicted_role_fit),
            skills_match_score: format!("{}%", format_number(analysis.skills_match_score.unwrap_or(0.0))),
            technical_fit_comment: analysis
                .technical_fit_comment
                .clone()
                .unwrap_or_else(|| NO_TECHNICAL_FIT.to_string()),
            summary_fit_feedback: analysis
                .summary_fit_feedback
                .clone()
                .unwrap_or_else(|| NO_SUMMARY_FIT.to_string()),
            matched_keywords: Collection::from_items(analysis.matched_keywords.clone(), NO_MATCHED_KEYWORDS),
            missing_keywords: Collection::from_items(analysis.missing_keywords.clone(), NO_MISSING_KEYWORDS),
            recommendations: Collection::from_items(
                suggestion_texts(&analysis.recommendations, NO_RECOMMENDATION_TEXT),
                NO_RECOMMENDATIONS,
            ),
        }
    }
}

fn interior_capital() -> &'static Regex {
    static INTERIOR_CAPITAL: OnceLock<Regex> = OnceLock::new();
    INTERIOR_CAPITAL.get_or_init(|| Regex::new(r"\B[A-Z]").expect("Invalid interior capital regex"))
}

/// `communicationSkills` -> `Communication Skills`
pub fn humanize_section_key(key: &str) -> String {
    let spaced = interior_capital().replace_all(key, " $0");

    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whole numbers print without a fractional part.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn or_not_specified(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

fn suggestion_texts(items: &[Option<String>], missing_text: &str) -> Vec<String> {
    items
        .iter()
        .map(|item| item.clone().unwrap_or_else(|| missing_text.to_string()))
        .collect()
}

fn file_naming(check: Option<&FileNamingCheck>) -> FileNamingDisplay {
    match check {
        Some(check) => FileNamingDisplay::Checked {
            proper: check.is_proper_name_format,
            status: if check.is_proper_name_format {
                "✓ Proper Format".to_string()
            } else {
                "✗ Needs Improvement".to_string()
            },
            expected_format: check.expected_format_example.clone(),
        },
        None => FileNamingDisplay::Unavailable {
            message: NO_FILE_NAMING_CHECK.to_string(),
        },
    }
}
