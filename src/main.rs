use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use facecourses::config::Config;
use facecourses::course::{Audience, CourseFormat};
use facecourses::onboarding::SuggestionMode;

mod cmd;

#[derive(Parser)]
#[command(name = "facecourses")]
#[command(version, about = "AI-assisted online course builder")]
pub struct Cli {
    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Never call the generative-text service; use the built-in fallbacks
    #[arg(long, global = true)]
    pub offline: bool,

    /// Path to facecourses.toml (defaults to ./facecourses.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Model name. Overrides FACECOURSES_MODEL and the config file.
    #[arg(long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive wizard: login, onboarding, builder, publish
    Start {
        /// Write the published course as JSON to this path
        #[arg(long)]
        export: Option<PathBuf>,

        /// Suggestion mode: templates or lessons (overrides the config file)
        #[arg(long)]
        mode: Option<SuggestionMode>,
    },
    /// Print onboarding suggestions for a topic as JSON, without the wizard
    Outline {
        /// Course topic
        #[arg(short, long)]
        topic: String,

        /// Target audience: iniciantes, intermediarios, avancados
        #[arg(short, long, default_value = "iniciantes")]
        audience: Audience,

        /// Preferred format: video, texto, animacao, misto
        #[arg(short, long, default_value = "video")]
        format: CourseFormat,

        /// Course language code (defaults to the configured language)
        #[arg(short, long)]
        language: Option<String>,

        /// Suggestion mode: templates or lessons (overrides the config file)
        #[arg(short, long)]
        mode: Option<SuggestionMode>,
    },
    /// View, validate or initialize configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default facecourses.toml file
    Init,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Config { command } = &cli.command {
        return cmd::cmd_config(cli.config.as_deref(), command.clone());
    }

    let config = Config::load(cli.config.clone(), cli.model.clone(), cli.offline)?;
    tracing::debug!(path = %config.path().display(), "Configuration loaded");

    match cli.command {
        Commands::Start { export, mode } => {
            cmd::cmd_start(&config, mode, export.as_deref()).await?;
        }
        Commands::Outline {
            topic,
            audience,
            format,
            language,
            mode,
        } => {
            cmd::cmd_outline(&config, &topic, audience, format, language, mode).await?;
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}
