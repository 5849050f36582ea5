//! CLI interface for the resume ATS client

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-ats")]
#[command(about = "Resume analysis and ATS compatibility checks against a remote analysis service")]
#[command(long_about = "Upload a resume for analysis, or check it against a job description for applicant tracking system compatibility, and render the results")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the analysis service base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume
    Analyze {
        /// Path to resume file (PDF, DOC, DOCX, TXT)
        #[arg(short, long)]
        resume: PathBuf,

        /// Declared content type, instead of the one implied by the extension
        #[arg(long)]
        content_type: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to a file, or into a directory under a generated name
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Disable colored console output
        #[arg(long)]
        no_color: bool,
    },

    /// Check a resume against a job description for ATS compatibility
    AtsCheck {
        /// Path to resume file (PDF, DOC, DOCX, TXT)
        #[arg(short, long)]
        resume: PathBuf,

        /// Job description text
        #[arg(long, required_unless_present = "jd_file", conflicts_with = "jd_file")]
        jd: Option<String>,

        /// Path to a plain text job description
        #[arg(long)]
        jd_file: Option<PathBuf>,

        /// Declared content type, instead of the one implied by the extension
        #[arg(long)]
        content_type: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to a file, or into a directory under a generated name
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Disable colored console output
        #[arg(long)]
        no_color: bool,
    },

    /// Run the upload checks on a file without submitting it
    Validate {
        /// File to check
        #[arg(short, long)]
        file: PathBuf,

        /// Declared content type, instead of the one implied by the extension
        #[arg(long)]
        content_type: Option<String>,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html", format)),
    }
}
