//! Skill topology: capability-level resume and job description matching

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use skill_topology::cli::{self, Cli, Commands, ConfigAction};
use skill_topology::config::{Config, OutputFormat};
use skill_topology::demo;
use skill_topology::input::manager::{InputManager, InputSource};
use skill_topology::output::formatter::{resolve_output_path, save_report_to_file, ReportGenerator};
use skill_topology::output::report::SkillReport;
use skill_topology::processing::dictionary::{Capability, CapabilityDictionary};
use skill_topology::store::ResultStore;
use skill_topology::{AnalysisEngine, Result, SkillTopologyError};
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

/// Minimum Jaro-Winkler similarity for "did you mean" suggestions
const SUGGESTION_THRESHOLD: f64 = 0.8;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            job,
            resume,
            output,
            save,
            detailed,
        } => {
            let job_source = job
                .source()
                .ok_or_else(|| SkillTopologyError::InvalidInput("A job description is required".to_string()))?;
            let resume_source = resume
                .source()
                .ok_or_else(|| SkillTopologyError::InvalidInput("A resume is required".to_string()))?;

            for source in [&job_source, &resume_source] {
                if let InputSource::File(path) = source {
                    cli::validate_input_file(path)
                        .map_err(|e| SkillTopologyError::InvalidInput(format!("{}: {}", path.display(), e)))?;
                }
            }

            let format = resolve_format(output.as_deref(), &config)?;

            println!("🚀 Skill topology analysis");
            println!("💼 Job: {}", job_source.describe());
            println!("📄 Resume: {}", resume_source.describe());

            let mut input_manager = InputManager::new(config.fetch.clone());
            let spinner = spinner("Reading inputs...");
            let texts = read_inputs(&mut input_manager, &job_source, &resume_source).await;
            spinner.finish_and_clear();
            let (job_text, resume_text) = texts?;

            info!(
                "Job text: {} characters, resume text: {} characters",
                job_text.len(),
                resume_text.len()
            );

            let file_hint = match &resume_source {
                InputSource::File(path) => path.to_string_lossy().to_string(),
                _ => String::new(),
            };

            run_analysis(
                &config,
                &job_text,
                &resume_text,
                job_source.describe(),
                resume_source.describe(),
                &file_hint,
                format,
                detailed || config.output.detailed,
                save,
            )?;
        }

        Commands::Dictionary { tech } => {
            let dictionary = CapabilityDictionary::global();
            match tech {
                Some(tech) => {
                    let caps = dictionary.capabilities(&tech);
                    if caps.is_empty() {
                        println!("❓ {} is not in the dictionary", tech.trim().to_uppercase());
                        if let Some(suggestion) = dictionary.suggest(&tech, SUGGESTION_THRESHOLD) {
                            println!("💡 Did you mean {}?", suggestion);
                        }
                    } else {
                        let labels: Vec<&str> = caps.iter().map(Capability::label).collect();
                        println!("{} → {}", tech.trim().to_uppercase(), labels.join(", "));
                    }
                }
                None => {
                    println!("📚 {} technologies across {} capabilities\n", dictionary.len(), Capability::ALL.len());
                    for cap in Capability::ALL {
                        println!("{}:", cap);
                        println!("   {}", dictionary.technologies_for(cap).join(", "));
                    }
                }
            }
        }

        Commands::Demo { output } => {
            let format = resolve_format(output.as_deref(), &config)?;
            println!("🎬 Demo: {} vs {}", demo::DEMO_RESUME_SOURCE, demo::DEMO_JOB_SOURCE);
            run_analysis(
                &config,
                demo::DEMO_JOB,
                demo::DEMO_RESUME,
                demo::DEMO_JOB_SOURCE.to_string(),
                demo::DEMO_RESUME_SOURCE.to_string(),
                "demo",
                format,
                true,
                None,
            )?;
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| SkillTopologyError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

fn resolve_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(SkillTopologyError::InvalidInput),
        None => Ok(config.output.format),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

async fn read_inputs(
    input_manager: &mut InputManager,
    job_source: &InputSource,
    resume_source: &InputSource,
) -> Result<(String, String)> {
    let job_text = input_manager.read(job_source).await?;
    let resume_text = input_manager.read(resume_source).await?;
    Ok((job_text, resume_text))
}

#[allow(clippy::too_many_arguments)]
fn run_analysis(
    config: &Config,
    job_text: &str,
    resume_text: &str,
    job_source: String,
    resume_source: String,
    file_hint: &str,
    format: OutputFormat,
    detailed: bool,
    save: Option<PathBuf>,
) -> Result<()> {
    let started = Instant::now();
    let engine = AnalysisEngine::new()?;
    let analysis = engine.analyze(job_text, resume_text);

    if !analysis.has_job_technologies() {
        warn!("No known technologies found in the job description");
    }
    if !analysis.has_resume_technologies() {
        warn!("No known technologies found in the resume");
    }

    // results are held by id and read back before rendering
    let store = ResultStore::new(config.store.ttl_secs);
    let id = store.put(analysis)?;
    let analysis = store.get(&id)?;

    let report = SkillReport::new(analysis, job_source, resume_source)
        .with_processing_time(started.elapsed().as_millis() as u64)
        .with_result_id(id);

    let generator = ReportGenerator::with_options(
        config.output.color_output && save.is_none(),
        detailed,
        true,
        false,
        true,
        config.layout.clone(),
    );
    let rendered = generator.generate_report(&report, &format)?;

    match save {
        Some(save) => {
            let path = resolve_output_path(&save, &format, file_hint);
            save_report_to_file(&rendered, &path)?;
            println!("💾 Report saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
