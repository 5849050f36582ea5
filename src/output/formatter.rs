//! Output formatters: lay a computed display model out as console text,
//! JSON, Markdown or HTML

use crate::config::OutputFormat;
use crate::error::{AtsClientError, Result};
use crate::output::display::*;
use askama::Template;
use colored::{Color, Colorize};
use std::fmt::Display;
use std::path::Path;

/// Cells in a drawn score bar at 100%.
const BAR_CELLS: i64 = 20;

/// Most cells ever drawn; an over-range bar stops here.
const MAX_BAR_CELLS: i64 = BAR_CELLS * 2;

pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and a drawn score bar
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for scripting and structured data
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that dispatches to the formatter for a format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tone {
    Neutral,
    Positive,
    Negative,
}

struct Fact {
    label: &'static str,
    value: String,
}

struct Section {
    heading: &'static str,
    entries: Collection,
    numbered: bool,
    tone: Tone,
}

/// Format-independent arrangement of one report.
struct Layout<'a> {
    title: &'static str,
    score_label: &'static str,
    score: &'a ScoreBar,
    score_scale: &'static str,
    facts: Vec<Fact>,
    sections: Vec<Section>,
}

fn layout(display: &AnalysisDisplay) -> Layout<'_> {
    match display {
        AnalysisDisplay::Resume(resume) => Layout {
            title: "Resume Analysis",
            score_label: "Overall Score",
            score: &resume.overall_score,
            score_scale: "/5",
            facts: vec![
                Fact { label: "Candidate Name", value: resume.candidate_name.clone() },
                Fact { label: "Expected Role", value: resume.expected_role.clone() },
            ],
            sections: vec![
                section("Primary Skills", resume.primary_skills.clone(), false, Tone::Neutral),
                section("Secondary Skills", resume.secondary_skills.clone(), false, Tone::Neutral),
                section("Section Scores", to_text(&resume.section_scores), false, Tone::Neutral),
                file_naming_section(&resume.file_naming),
                section("Improvements", resume.improvements.clone(), true, Tone::Neutral),
            ],
        },
        AnalysisDisplay::Ats(ats) => Layout {
            title: "ATS Compatibility Check",
            score_label: "ATS Score",
            score: &ats.ats_score,
            score_scale: "%",
            facts: vec![
                Fact { label: "Candidate Name", value: ats.candidate_name.clone() },
                Fact { label: "Predicted Role Fit", value: ats.predicted_role_fit.clone() },
                Fact { label: "Skills Match Score", value: ats.skills_match_score.clone() },
            ],
            sections: vec![
                section(
                    "Technical Fit",
                    Collection::Items(vec![ats.technical_fit_comment.clone()]),
                    false,
                    Tone::Neutral,
                ),
                section(
                    "Summary Fit",
                    Collection::Items(vec![ats.summary_fit_feedback.clone()]),
                    false,
                    Tone::Neutral,
                ),
                section("Matched Keywords", ats.matched_keywords.clone(), false, Tone::Positive),
                section("Missing Keywords", ats.missing_keywords.clone(), false, Tone::Negative),
                section("Recommendations", ats.recommendations.clone(), true, Tone::Neutral),
            ],
        },
    }
}

fn section(heading: &'static str, entries: Collection, numbered: bool, tone: Tone) -> Section {
    Section { heading, entries, numbered, tone }
}

fn to_text<T: Display>(collection: &Collection<T>) -> Collection {
    match collection {
        Collection::Items(items) => Collection::Items(items.iter().map(|i| i.to_string()).collect()),
        Collection::Placeholder(text) => Collection::Placeholder(text.clone()),
    }
}

fn file_naming_section(naming: &FileNamingDisplay) -> Section {
    match naming {
        FileNamingDisplay::Checked { proper, status, expected_format } => {
            let mut lines = vec![format!("Status: {}", status)];
            if let Some(example) = expected_format {
                lines.push(format!("Expected Format: {}", example));
            }
            let tone = if *proper { Tone::Positive } else { Tone::Negative };
            section("File Naming Check", Collection::Items(lines), false, tone)
        }
        FileNamingDisplay::Unavailable { message } => section(
            "File Naming Check",
            Collection::Placeholder(message.clone()),
            false,
            Tone::Neutral,
        ),
    }
}

fn generated_at(report: &AnalysisReport) -> String {
    report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn entry_prefix(numbered: bool, index: usize) -> String {
    if numbered {
        format!("{}.", index + 1)
    } else {
        "•".to_string()
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    /// An over-range score overflows the track, up to `MAX_BAR_CELLS`. The
    /// printed percentage is never clamped.
    fn format_score_bar(&self, width_percent: f64) -> String {
        let filled = ((width_percent / 100.0) * BAR_CELLS as f64)
            .round()
            .clamp(0.0, MAX_BAR_CELLS as f64) as i64;
        let empty = (BAR_CELLS - filled).max(0);
        let bar = format!(
            "{}{}",
            "█".repeat(filled as usize),
            "░".repeat(empty as usize)
        );
        format!("[{}] {:.0}%", self.colorize(&bar, Color::Cyan), width_percent)
    }

    fn tone_color(tone: Tone) -> Color {
        match tone {
            Tone::Neutral => Color::White,
            Tone::Positive => Color::Green,
            Tone::Negative => Color::Red,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let layout = layout(&report.display);
        let mut output = String::new();

        output.push_str(&self.format_header(&layout.title.to_uppercase(), 1));
        output.push_str(&format!(
            "Source: {} | Generated: {}\n",
            report.metadata.source_file,
            generated_at(report)
        ));

        output.push_str(&self.format_header(layout.score_label, 2));
        output.push_str(&format!(
            "{}{} {}\n",
            self.colorize(&layout.score.value, Color::Cyan),
            layout.score_scale,
            self.format_score_bar(layout.score.width_percent)
        ));

        output.push_str(&self.format_header("Overview", 2));
        for fact in &layout.facts {
            output.push_str(&format!("{}: {}\n", fact.label, fact.value));
        }

        for section in &layout.sections {
            output.push_str(&self.format_header(section.heading, 3));
            match &section.entries {
                Collection::Items(items) => {
                    for (i, item) in items.iter().enumerate() {
                        output.push_str(&format!(
                            "  {} {}\n",
                            entry_prefix(section.numbered, i),
                            self.colorize(item, Self::tone_color(section.tone))
                        ));
                    }
                }
                Collection::Placeholder(text) => {
                    output.push_str(&format!("  {}\n", self.colorize(text, Color::BrightBlack)));
                }
            }
        }

        output.push_str(&format!(
            "\n{} Generated by resume-ats v{}\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.client_version
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let layout = layout(&report.display);
        let mut output = format!("# {}\n\n", layout.title);

        if self.include_metadata {
            output.push_str(&format!(
                "**Source:** `{}` | **Generated:** {}\n\n",
                report.metadata.source_file,
                generated_at(report)
            ));
        }

        output.push_str(&format!(
            "**{}:** {}{}\n\n",
            layout.score_label, layout.score.value, layout.score_scale
        ));

        output.push_str("| Field | Value |\n");
        output.push_str("|-------|-------|\n");
        for fact in &layout.facts {
            output.push_str(&format!("| {} | {} |\n", fact.label, escape_table_cell(&fact.value)));
        }
        output.push('\n');

        for section in &layout.sections {
            output.push_str(&format!("## {}\n\n", section.heading));
            match &section.entries {
                Collection::Items(items) => {
                    for (i, item) in items.iter().enumerate() {
                        if section.numbered {
                            output.push_str(&format!("{}. {}\n", i + 1, item));
                        } else {
                            output.push_str(&format!("- {}\n", item));
                        }
                    }
                }
                Collection::Placeholder(text) => output.push_str(&format!("_{}_\n", text)),
            }
            output.push('\n');
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!("*Generated by resume-ats v{}*\n", report.metadata.client_version));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

fn escape_table_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

struct HtmlFact {
    label: &'static str,
    value: String,
}

struct HtmlSection {
    heading: &'static str,
    items: Vec<String>,
    has_placeholder: bool,
    placeholder: String,
    numbered: bool,
    tone_class: &'static str,
}

/// Askama template for HTML output
#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; color: #333; max-width: 900px; margin: 0 auto; padding: 20px; background: #f8f9fa; }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .score-bar { background: #e9ecef; border-radius: 6px; height: 14px; overflow: visible; }
        .score-fill { background: #007acc; border-radius: 6px; height: 14px; }
        .facts td { padding: 4px 12px 4px 0; }
        .no-data { color: #6c757d; font-style: italic; }
        .positive li { color: #28a745; }
        .negative li { color: #dc3545; }
        .metadata { margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <h1>{{ title }}</h1>
        <p>Source: {{ source_file }} | Generated: {{ generated_at }}</p>

        <h2>{{ score_label }}: {{ score_value }}{{ score_scale }}</h2>
        <div class="score-bar"><div class="score-fill" style="width: {{ score_width }}%"></div></div>

        <table class="facts">
            {% for fact in facts %}
            <tr><td><strong>{{ fact.label }}</strong></td><td>{{ fact.value }}</td></tr>
            {% endfor %}
        </table>

        {% for section in sections %}
        <div class="section {{ section.tone_class }}">
            <h3>{{ section.heading }}</h3>
            {% if section.has_placeholder %}
            <p class="no-data">{{ section.placeholder }}</p>
            {% else %}
            {% if section.numbered %}<ol>{% else %}<ul>{% endif %}
                {% for item in section.items %}
                <li>{{ item }}</li>
                {% endfor %}
            {% if section.numbered %}</ol>{% else %}</ul>{% endif %}
            {% endif %}
        </div>
        {% endfor %}

        <div class="metadata">
            <p>Generated by resume-ats v{{ version }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    title: &'static str,
    source_file: String,
    generated_at: String,
    score_label: &'static str,
    score_value: String,
    score_scale: &'static str,
    score_width: String,
    facts: Vec<HtmlFact>,
    sections: Vec<HtmlSection>,
    version: String,
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AnalysisReport) -> HtmlTemplate {
        let layout = layout(&report.display);

        let sections = layout
            .sections
            .into_iter()
            .map(|section| {
                let tone_class = match section.tone {
                    Tone::Neutral => "",
                    Tone::Positive => "positive",
                    Tone::Negative => "negative",
                };
                let (items, has_placeholder, placeholder) = match section.entries {
                    Collection::Items(items) => (items, false, String::new()),
                    Collection::Placeholder(text) => (Vec::new(), true, text),
                };
                HtmlSection {
                    heading: section.heading,
                    items,
                    has_placeholder,
                    placeholder,
                    numbered: section.numbered,
                    tone_class,
                }
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            title: layout.title,
            source_file: report.metadata.source_file.clone(),
            generated_at: generated_at(report),
            score_label: layout.score_label,
            score_value: layout.score.value.clone(),
            score_scale: layout.score_scale,
            score_width: format_number(layout.score.width_percent),
            facts: layout
                .facts
                .into_iter()
                .map(|fact| HtmlFact { label: fact.label, value: fact.value })
                .collect(),
            sections,
            version: report.metadata.client_version.clone(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| AtsClientError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Replaces any previous content at `file_path`.
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, source_file: &str) -> String {
    let base_name = Path::new(source_file)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    match format {
        OutputFormat::Console => format!("{}_analysis.txt", base_name),
        OutputFormat::Json => format!("{}_analysis.json", base_name),
        OutputFormat::Markdown => format!("{}_analysis.md", base_name),
        OutputFormat::Html => format!("{}_analysis.html", base_name),
    }
}
