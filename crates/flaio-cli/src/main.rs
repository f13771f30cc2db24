use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use flaio_core::{AppConfig, ProjectSet};

mod commands;
mod preference;

#[derive(Parser)]
#[command(name = "flaio")]
#[command(author, version, about = "fun little apps i own, in your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the showcase
    Run {
        /// Theme for this session (overrides the stored preference)
        #[arg(short, long)]
        theme: Option<String>,
        /// Disable auto-advance and animations
        #[arg(long)]
        reduced_motion: bool,
        /// Hide the background particles
        #[arg(long)]
        no_particles: bool,
    },
    /// List the projects on the wheel
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List available themes
    Themes,
    /// Store the theme used at startup
    Theme {
        /// Theme name
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load()?;

    let command = cli.command.unwrap_or(Commands::Run {
        theme: None,
        reduced_motion: false,
        no_particles: false,
    });

    // The TUI owns the terminal, so its logs go to a file
    init_logging(&config, matches!(command, Commands::Run { .. }))?;

    match command {
        Commands::Run {
            theme,
            reduced_motion,
            no_particles,
        } => {
            if reduced_motion {
                config.ui.reduced_motion = true;
            }
            if no_particles {
                config.ui.particles = false;
            }
            commands::run::run(Arc::new(config), theme.as_deref()).await
        }
        Commands::List { json } => {
            let projects = ProjectSet::load(config.projects_file().as_deref())?;
            commands::list::run(&projects, json)
        }
        Commands::Themes => commands::themes::run(&config),
        Commands::Theme { name } => commands::theme::run(&config, &name),
    }
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}
