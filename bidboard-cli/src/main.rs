mod commands;
mod config;
mod remote;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use bidboard_core::store::{Disabled, EventGateway, FixedIdentity, LocalEventStore};

use crate::commands::{new::NewArgs, update::UpdateArgs};
use crate::config::GlobalConfig;
use crate::remote::HttpRemoteStore;

#[derive(Parser)]
#[command(name = "bidboard")]
#[command(about = "Project calendar for the bidboard dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the combined, filtered calendar
    Agenda {
        /// Override the persisted group filter for this run
        #[arg(short, long)]
        group: Option<String>,
    },
    /// Create an event
    New {
        title: String,

        /// Start date/time (e.g. "2025-03-20T15:00" or "2025-03-20")
        #[arg(short, long)]
        start: String,

        /// End date/time (defaults to start)
        #[arg(short, long)]
        end: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        location: Option<String>,
    },
    /// Update fields on an event
    Update {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        location: Option<String>,
    },
    /// Delete an event
    Rm { id: String },
    /// Flip a category toggle, set the group filter, or show filter state
    Toggle {
        /// Toggle name (e.g. bid-due); omit to just show state
        name: Option<String>,

        /// Set the group filter
        #[arg(short, long)]
        group: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    let config = GlobalConfig::load()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Agenda { group } => {
            let gateway = build_gateway(&config)?;
            commands::agenda::run(&config, &gateway, group).await
        }
        Commands::New {
            title,
            start,
            end,
            category,
            description,
            location,
        } => {
            let gateway = build_gateway(&config)?;
            commands::new::run(
                &gateway,
                NewArgs {
                    title,
                    start,
                    end,
                    category,
                    description,
                    location,
                },
            )
            .await
        }
        Commands::Update {
            id,
            title,
            start,
            end,
            category,
            description,
            location,
        } => {
            let gateway = build_gateway(&config)?;
            commands::update::run(
                &gateway,
                UpdateArgs {
                    id,
                    title,
                    start,
                    end,
                    category,
                    description,
                    location,
                },
            )
            .await
        }
        Commands::Rm { id } => {
            let gateway = build_gateway(&config)?;
            commands::rm::run(&gateway, &id).await
        }
        Commands::Toggle { name, group } => commands::toggle::run(&config, name, group),
    }
}

fn init_logging() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set up logging")
}

fn build_gateway(config: &GlobalConfig) -> Result<EventGateway> {
    let local = LocalEventStore::new(config.events_path()?);
    let remote: Box<dyn bidboard_core::store::RemoteEventStore> = match &config.api_url {
        Some(url) => Box::new(HttpRemoteStore::new(url)),
        None => Box::new(Disabled),
    };
    let identity = Box::new(FixedIdentity::new(config.user_id.clone()));
    Ok(EventGateway::new(remote, local, identity))
}
