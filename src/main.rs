//! resume-ats: resume analysis and ATS compatibility checks from the terminal

use anyhow::{bail, Context};
use clap::Parser;
use colored::Colorize;
use log::{error, info};
use resume_ats_client::analysis::AnalysisKind;
use resume_ats_client::cli::{self, Cli, Commands, ConfigAction};
use resume_ats_client::client::{HttpTransport, SubmissionClient};
use resume_ats_client::config::{Config, OutputFormat};
use resume_ats_client::input::manager::InputManager;
use resume_ats_client::input::UploadFile;
use resume_ats_client::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_ats_client::output::SpinnerIndicator;
use resume_ats_client::session::UploadSession;
use resume_ats_client::workflow::AnalysisWorkflow;
use std::path::PathBuf;
use std::process;

struct RenderOptions {
    output: Option<String>,
    save: Option<PathBuf>,
    no_color: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)
    ).init();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = Config::load_from(&config_path)
        .context("Failed to load configuration")?
        .with_base_url(cli.api_url);

    match cli.command {
        Commands::Analyze { resume, content_type, output, save, no_color } => {
            let manager = InputManager::new().with_content_type(content_type);
            let file = manager.load_upload(&resume).await?;
            submit(&config, AnalysisKind::Resume, file, None, RenderOptions { output, save, no_color }).await
        }

        Commands::AtsCheck { resume, jd, jd_file, content_type, output, save, no_color } => {
            let manager = InputManager::new().with_content_type(content_type);
            let file = manager.load_upload(&resume).await?;
            let job_description = match (jd, jd_file) {
                (Some(text), _) => text,
                (None, Some(path)) => manager.read_job_description(&path).await?,
                (None, None) => bail!("A job description is required (--jd or --jd-file)"),
            };
            submit(
                &config,
                AnalysisKind::AtsCheck,
                file,
                Some(job_description),
                RenderOptions { output, save, no_color },
            )
            .await
        }

        Commands::Validate { file, content_type } => {
            let manager = InputManager::new().with_content_type(content_type);
            let upload = manager.load_upload(&file).await?;
            match config.upload.validate(&upload) {
                Ok(()) => {
                    println!(
                        "{} {} ({}, {} bytes) can be uploaded",
                        "✓".green(),
                        upload.name(),
                        upload.content_type(),
                        upload.size()
                    );
                    Ok(())
                }
                Err(e) => bail!(e),
            }
        }

        Commands::Config { action } => {
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => {
                    let content = toml::to_string_pretty(&config)
                        .context("Failed to serialize configuration")?;
                    println!("# {}\n{}", config_path.display(), content);
                }
                ConfigAction::Reset => {
                    Config::default().save_to(&config_path)?;
                    println!("Configuration reset: {}", config_path.display());
                }
                ConfigAction::Path => println!("{}", config_path.display()),
            }
            Ok(())
        }
    }
}

async fn submit(
    config: &Config,
    kind: AnalysisKind,
    file: UploadFile,
    job_description: Option<String>,
    options: RenderOptions,
) -> anyhow::Result<()> {
    let format = match &options.output {
        Some(name) => cli::parse_output_format(name).map_err(anyhow::Error::msg)?,
        None => config.output.format,
    };

    let transport = HttpTransport::new(config.api.clone())?;
    let mut workflow = AnalysisWorkflow::new(
        SubmissionClient::new(transport),
        SpinnerIndicator::new(),
        config.upload.clone(),
    );

    if workflow.select_file(kind, file).is_err() {
        bail!(banner(workflow.session()));
    }
    if let Some(text) = job_description {
        workflow.edit_job_description(text);
    }

    let report = match workflow.run(kind).await {
        Ok(report) => report,
        Err(e) => match workflow.session().banner() {
            Some(_) => bail!(banner(workflow.session())),
            None => return Err(e.into()),
        },
    };

    let use_colors = config.output.color_output && !options.no_color && format == OutputFormat::Console;
    let generator = ReportGenerator::with_options(use_colors, true, true, true);
    let rendered = generator.generate_report(&report, format)?;

    match options.save {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(suggest_filename(format, &report.metadata.source_file))
            } else {
                path
            };
            save_report_to_file(&rendered, &path)?;
            info!("Report saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn banner(session: &UploadSession) -> String {
    session
        .banner()
        .unwrap_or("Request failed")
        .to_string()
}
