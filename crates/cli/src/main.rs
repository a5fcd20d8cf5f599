mod commands;

use anyhow::{Context, anyhow};
use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "seo-kit")]
#[command(version, about = "Static site generator for SEO content sites", long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Initialize new site directory
    Init {
        /// Path to site directory
        path: PathBuf,

        /// Site name written to site.toml
        #[arg(long)]
        name: Option<String>,
    },

    /// Validate site configuration and page data
    Validate {
        /// Path to site directory
        path: PathBuf,
    },

    /// Show page dataset statistics
    Stats {
        /// Path to site directory
        path: PathBuf,
    },

    /// Preview site locally
    Preview {
        /// Path to site directory
        path: PathBuf,

        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Build static site
    Build {
        /// Path to site directory
        path: PathBuf,

        /// Output directory for generated site
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Export page data as CSV
    Export {
        /// Path to site directory
        path: PathBuf,

        /// CSV file to write
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(verbose)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose).context("Failed to initialize logging")?;

    match cli.command {
        Command::Init { path, name } => commands::init::run(path, name).await,
        Command::Validate { path } => commands::validate::run(path).await,
        Command::Stats { path } => commands::stats::run(path).await,
        Command::Preview { path, port } => commands::preview::run(path, port).await,
        Command::Build { path, output } => commands::build::run(path, output).await,
        Command::Export { path, output } => commands::export::run(path, output).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "seo-kit", &mut io::stdout());
            Ok(())
        }
    }
}
