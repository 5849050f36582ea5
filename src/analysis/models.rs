//! Typed views over normalized analysis objects
//!
//! Construction never fails. A field that is missing or carries an
//! unexpected JSON type comes out as `None` or an empty list, and the
//! display layer substitutes the fallback.

use serde_json::{Map, Value};

const IMPROVEMENT_TEXT_FIELDS: [&str; 3] = ["suggestion", "text", "improvement"];
const RECOMMENDATION_TEXT_FIELDS: [&str; 3] = ["suggestion", "text", "recommendation"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumeAnalysis {
    /// Expected on a 0-5 scale.
    pub overall_score: Option<f64>,
    pub candidate_name: Option<String>,
    pub expected_role: Option<String>,
    pub primary_skills: Vec<String>,
    pub secondary_skills: Vec<String>,
    /// Wire order is preserved.
    pub section_scores: Vec<SectionScore>,
    pub file_naming_check: Option<FileNamingCheck>,
    /// `None` marks an item with no usable text.
    pub improvements: Vec<Option<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionScore {
    pub key: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileNamingCheck {
    pub is_proper_name_format: bool,
    pub expected_format_example: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtsAnalysis {
    /// Expected on a 0-100 scale.
    pub ats_score: Option<f64>,
    pub candidate_name: Option<String>,
    pub predicted_role_fit: Option<String>,
    pub skills_match_score: Option<f64>,
    pub technical_fit_comment: Option<String>,
    pub summary_fit_feedback: Option<String>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub recommendations: Vec<Option<String>>,
}

impl ResumeAnalysis {
    pub fn from_value(value: &Value) -> Self {
        let skills = value.get("skills").and_then(Value::as_object);

        Self {
            overall_score: number(value.get("overallScore")),
            candidate_name: text(value.get("candidateName")),
            expected_role: text(value.get("expectedRole")),
            primary_skills: string_list(skills.and_then(|s| s.get("primarySkills"))),
            secondary_skills: string_list(skills.and_then(|s| s.get("secondarySkills"))),
            section_scores: value
                .get("sectionScores")
                .and_then(Value::as_object)
                .map(section_scores)
                .unwrap_or_default(),
            file_naming_check: value
                .get("fileNamingCheck")
                .and_then(Value::as_object)
                .map(|check| FileNamingCheck {
                    is_proper_name_format: check.get("isProperNameFormat").map(truthy).unwrap_or(false),
                    expected_format_example: text(check.get("expectedFormatExample")),
                }),
            improvements: suggestion_list(value.get("improvements"), &IMPROVEMENT_TEXT_FIELDS),
        }
    }
}

impl AtsAnalysis {
    pub fn from_value(value: &Value) -> Self {
        Self {
            ats_score: number(value.get("atsScore")),
            candidate_name: text(value.get("candidateName")),
            predicted_role_fit: text(value.get("predictedRoleFit")),
            skills_match_score: number(value.get("skillsMatchScore")),
            technical_fit_comment: text(value.get("technicalFitComment")),
            summary_fit_feedback: text(value.get("summaryFitFeedback")),
            matched_keywords: string_list(value.get("matchedKeywords")),
            missing_keywords: string_list(value.get("missingKeywords")),
            recommendations: suggestion_list(value.get("recommendations"), &RECOMMENDATION_TEXT_FIELDS),
        }
    }
}

fn section_scores(map: &Map<String, Value>) -> Vec<SectionScore> {
    map.iter()
        .map(|(key, score)| SectionScore {
            key: key.clone(),
            score: number(Some(score)).unwrap_or(0.0),
        })
        .collect()
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Numbers, and strings holding a number, are accepted.
fn number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        v @ Value::Number(_) if truthy(v) => Some(v.to_string()),
        _ => None,
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
        .collect()
}

fn suggestion_list(value: Option<&Value>, text_fields: &[&str]) -> Vec<Option<String>> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .map(|item| match item {
            Value::Object(fields) => text_fields
                .iter()
                .find_map(|field| text(fields.get(*field))),
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(_) | Value::Bool(_) => Some(item.to_string()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resume_analysis_full() {
        let analysis = ResumeAnalysis::from_value(&json!({
            "overallScore": 4.5,
            "candidateName": "Jane Doe",
            "expectedRole": "Backend Engineer",
            "skills": {
                "primarySkills": ["Rust", "PostgreSQL"],
                "secondarySkills": ["Docker"]
            },
            "sectionScores": { "workExperience": 4, "education": 5 },
            "fileNamingCheck": {
                "isProperNameFormat": false,
                "expectedFormatExample": "Jane_Doe_Resume.pdf"
            },
            "improvements": [
                "Add metrics",
                { "text": "Shorten summary" },
                { "improvement": "List certifications" }
            ]
        }));

        assert_eq!(analysis.overall_score, Some(4.5));
        assert_eq!(analysis.primary_skills, vec!["Rust", "PostgreSQL"]);
        assert_eq!(analysis.section_scores[0].key, "workExperience");
        assert_eq!(analysis.section_scores[1].score, 5.0);
        let check = analysis.file_naming_check.unwrap();
        assert!(!check.is_proper_name_format);
        assert_eq!(check.expected_format_example.as_deref(), Some("Jane_Doe_Resume.pdf"));
        assert_eq!(
            analysis.improvements,
            vec![
                Some("Add metrics".to_string()),
                Some("Shorten summary".to_string()),
                Some("List certifications".to_string()),
            ]
        );
    }

    #[test]
    fn test_mistyped_fields_are_tolerated() {
        let analysis = ResumeAnalysis::from_value(&json!({
            "overallScore": "high",
            "candidateName": ["not", "a", "name"],
            "skills": "Rust, Go",
            "sectionScores": [1, 2],
            "fileNamingCheck": true,
            "improvements": { "suggestion": "not a list" }
        }));

        assert_eq!(analysis, ResumeAnalysis::default());
    }

    #[test]
    fn test_suggestion_probe_order() {
        let items = suggestion_list(
            Some(&json!([
                { "text": "second", "suggestion": "first" },
                { "recommendation": "only" },
                { "unrelated": "x" },
                null,
                ""
            ])),
            &RECOMMENDATION_TEXT_FIELDS,
        );

        assert_eq!(
            items,
            vec![Some("first".to_string()), Some("only".to_string()), None, None, None]
        );
    }

    #[test]
    fn test_numeric_strings_and_zero() {
        let ats = AtsAnalysis::from_value(&json!({ "atsScore": "82", "skillsMatchScore": 0 }));
        assert_eq!(ats.ats_score, Some(82.0));
        assert_eq!(ats.skills_match_score, Some(0.0));
    }

    #[test]
    fn test_keyword_lists_skip_nulls() {
        let ats = AtsAnalysis::from_value(&json!({
            "matchedKeywords": ["rust", null, "", 42],
            "missingKeywords": null
        }));
        assert_eq!(ats.matched_keywords, vec!["rust", "42"]);
        assert!(ats.missing_keywords.is_empty());
    }
}
