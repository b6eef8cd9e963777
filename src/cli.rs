//! CLI interface for skill topology

use crate::input::file_detector::FileType;
use crate::input::manager::InputSource;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "skill-topology")]
#[command(about = "Capability-level matching of resumes against job descriptions")]
#[command(
    long_about = "Maps the technologies named in a job description and a resume onto eight capability axes, \
                  then compares plain keyword overlap with capability coverage"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyse a resume against a job description
    Analyze {
        #[command(flatten)]
        job: JobInput,

        #[command(flatten)]
        resume: ResumeInput,

        /// Output format: console, json, markdown, html (defaults to config)
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to a file, or into an existing directory under a generated name
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include radar values and technology lists
        #[arg(short, long)]
        detailed: bool,
    },

    /// Browse the technology → capability dictionary
    Dictionary {
        /// Show a single technology
        tech: Option<String>,
    },

    /// Analyse a built-in sample job and resume
    Demo {
        /// Output format: console, json, markdown, html (defaults to config)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct JobInput {
    /// Job description file (TXT, MD, PDF)
    #[arg(short, long)]
    pub job: Option<PathBuf>,

    /// Job posting URL to fetch
    #[arg(long)]
    pub job_url: Option<String>,

    /// Job description text
    #[arg(long)]
    pub job_text: Option<String>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct ResumeInput {
    /// Resume file (PDF, TXT, MD)
    #[arg(short, long)]
    pub resume: Option<PathBuf>,

    /// Public LinkedIn profile URL to fetch
    #[arg(long)]
    pub resume_url: Option<String>,

    /// Resume text
    #[arg(long)]
    pub resume_text: Option<String>,
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

impl JobInput {
    pub fn source(&self) -> Option<InputSource> {
        if let Some(path) = &self.job {
            Some(InputSource::File(path.clone()))
        } else if let Some(url) = &self.job_url {
            Some(InputSource::Url(url.clone()))
        } else {
            self.job_text.as_ref().map(|text| InputSource::Text(text.clone()))
        }
    }
}

impl ResumeInput {
    pub fn source(&self) -> Option<InputSource> {
        if let Some(path) = &self.resume {
            Some(InputSource::File(path.clone()))
        } else if let Some(url) = &self.resume_url {
            Some(InputSource::ProfileUrl(url.clone()))
        } else {
            self.resume_text.as_ref().map(|text| InputSource::Text(text.clone()))
        }
    }
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

/// Validate a path against every format the input layer reads.
pub fn validate_input_file(path: &Path) -> Result<(), String> {
    validate_file_extension(path, FileType::supported_extensions())
}
