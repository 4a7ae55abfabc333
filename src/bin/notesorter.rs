use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::Confirm;
use notesorter::{
    config::Config,
    llm::OpenAiProvider,
    models::RunReport,
    organizer::{BatchOrganizer, OrganizerOptions},
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "notesorter")]
#[command(about = "Tag every note in a directory with an LLM, then file each one into a folder")]
#[command(version)]
struct Cli {
    /// Directory holding the notes
    #[arg(value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    /// Ask for tags and folders but don't rewrite or move anything
    #[arg(long)]
    dry_run: bool,

    /// Skip confirmation prompt before moving files
    #[arg(short, long)]
    yes: bool,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,

    /// Config file (defaults to config/settings.toml or ~/.config/notesorter/settings.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// API key (overrides config and OPENAI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Chat-completions base URL (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Model used for tag inference (overrides config)
    #[arg(long)]
    tag_model: Option<String>,

    /// Model used for folder inference (overrides config)
    #[arg(long)]
    folder_model: Option<String>,

    /// Note file extension (overrides config)
    #[arg(long)]
    extension: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let json = cli.json;
    let mut config = Config::load_from(cli.config.as_deref())?;

    if let Some(base_url) = cli.base_url {
        config.llm.base_url = base_url;
    }
    if let Some(model) = cli.tag_model {
        config.llm.tag_model = model;
    }
    if let Some(model) = cli.folder_model {
        config.llm.folder_model = model;
    }

    let api_key = cli
        .api_key
        .or_else(|| config.llm_api_key())
        .context("No API key: pass --api-key, set llm.api_key in settings.toml or OPENAI_API_KEY")?;

    let provider = Arc::new(OpenAiProvider::from_config(&config.llm, api_key));
    let options = OrganizerOptions {
        extension: cli.extension.unwrap_or_else(|| config.notes.extension.clone()),
        dry_run: cli.dry_run || config.organizer.dry_run_default,
        show_progress: !json,
    };
    let dry_run = options.dry_run;
    let organizer = BatchOrganizer::new(&cli.dir, provider, options)?;

    status(json, format_args!("Organizing notes in: {}", organizer.root().display()));

    // PHASE 1: tag
    let tagging = organizer.tag_notes().await?;
    status(
        json,
        format_args!(
            "✓ Tagged {} notes ({} already tagged, skipped)",
            tagging.processed.len(),
            tagging.skipped.len()
        ),
    );

    if tagging.processed.is_empty() {
        status(json, format_args!("No notes need to be organized."));
        return finish(RunReport { tagging, moved: Vec::new() }, json);
    }

    // PHASE 2: pick folders, confirm, move
    let plan = organizer.plan_folders(&tagging.processed).await?;
    status(json, format_args!("{}", plan.render()));

    if !dry_run && !cli.yes && !config.organizer.skip_confirmation {
        let proceed = Confirm::new()
            .with_prompt("Proceed with moving these notes?")
            .default(false)
            .interact()
            .context("Failed to read user input")?;

        if !proceed {
            status(json, format_args!("Cancelled. Notes stay tagged in place."));
            return finish(RunReport { tagging, moved: Vec::new() }, json);
        }
    }

    let moved = organizer.apply(&plan)?;
    for file in &moved {
        status(
            json,
            format_args!(
                "Moved {} to {}",
                file.source.file_name().unwrap_or_default().to_string_lossy(),
                file.folder
            ),
        );
    }

    if dry_run {
        status(json, format_args!("\nDry run completed. No notes were changed."));
    } else {
        status(json, format_args!("\nNotes organized successfully!"));
    }

    finish(RunReport { tagging, moved }, json)
}

/// Human-readable progress goes to stderr when stdout carries the JSON report
fn status(json: bool, message: std::fmt::Arguments<'_>) {
    if json {
        eprintln!("{}", message);
    } else {
        println!("{}", message);
    }
}

fn finish(report: RunReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
