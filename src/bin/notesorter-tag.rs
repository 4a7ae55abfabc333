use anyhow::{Context, Result};
use clap::Parser;
use notesorter::{
    config::Config,
    llm::{LlmProvider, OpenAiProvider},
    merge_tags, Note, OrganizerError,
};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "notesorter-tag")]
#[command(about = "Tag a single note with an LLM")]
#[command(version)]
struct Cli {
    /// Note to tag
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Rewrite the note in place instead of printing the result
    #[arg(long)]
    write: bool,

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
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = Config::load_from(cli.config.as_deref())?;

    if let Some(base_url) = cli.base_url {
        config.llm.base_url = base_url;
    }
    if let Some(model) = cli.tag_model {
        config.llm.tag_model = model;
    }

    let content = std::fs::read_to_string(&cli.file)
        .map_err(|e| OrganizerError::filesystem(&cli.file, e))?;

    if Note::parse(&content).has_tags() {
        println!("{} already has tags, leaving it alone.", cli.file.display());
        return Ok(());
    }

    let api_key = cli
        .api_key
        .or_else(|| config.llm_api_key())
        .context("No API key: pass --api-key, set llm.api_key in settings.toml or OPENAI_API_KEY")?;
    let provider = OpenAiProvider::from_config(&config.llm, api_key);

    let tags = provider.generate_tags(&content).await?;
    let merged = merge_tags(&content, tags.trim());

    if cli.write {
        std::fs::write(&cli.file, &merged).map_err(|e| OrganizerError::filesystem(&cli.file, e))?;
        println!("Tagged {}: {}", cli.file.display(), tags.trim());
    } else {
        println!("{}", merged);
    }

    Ok(())
}
