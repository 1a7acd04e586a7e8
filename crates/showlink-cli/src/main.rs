use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use showlink_api::{CatalogClient, HttpTransport, SeriesId};
use showlink_core::{AppConfig, CoreError, MutationSettings, WatchlistService};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "showlink")]
#[command(about = "Resolve series titles and add them to TMDB favorites or lists")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve titles to catalog ids
    Resolve {
        titles: Vec<String>,
        /// One JSON entry per title, including unmatched ones
        #[arg(long)]
        detailed: bool,
    },

    /// Add series to the account's favorites
    Favorite {
        #[arg(long)]
        account: String,
        #[arg(long)]
        session: String,
        #[arg(required = true)]
        ids: Vec<SeriesId>,
    },

    /// Add series to a custom list
    AddToList {
        #[arg(long)]
        list: String,
        #[arg(long)]
        session: String,
        #[arg(required = true)]
        ids: Vec<SeriesId>,
    },

    /// Print the account's favorite series
    Favorites {
        #[arg(long)]
        account: String,
        #[arg(long)]
        session: String,
    },

    /// Print this week's trending series
    Trending,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("showlink: {e}");
            return ExitCode::FAILURE;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command, &config).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("showlink: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: &AppConfig) -> Result<String, CoreError> {
    let service = build_service(config)?;

    match command {
        Commands::Resolve { titles, detailed } => {
            if detailed {
                let resolved = service.resolve_titles_detailed(&titles).await;
                to_json(&resolved)
            } else {
                let ids = service.resolve_titles(&titles).await?;
                to_json(&ids)
            }
        }
        Commands::Favorite {
            account,
            session,
            ids,
        } => service.apply_favorites(&ids, &account, &session).await,
        Commands::AddToList { list, session, ids } => {
            service.apply_list_mutation(&ids, &list, &session).await
        }
        Commands::Favorites { account, session } => {
            let favorites = service.list_favorites(&account, &session).await?;
            to_json(&favorites)
        }
        Commands::Trending => {
            let trending = service.trending().await?;
            to_json(&trending)
        }
    }
}

fn build_service(config: &AppConfig) -> Result<WatchlistService<HttpTransport>, CoreError> {
    let transport = config.transport()?;
    Ok(WatchlistService::new(
        CatalogClient::new(transport),
        MutationSettings::from(&config.mutation),
    ))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CoreError> {
    serde_json::to_string_pretty(value).map_err(|e| CoreError::Internal(e.to_string()))
}
