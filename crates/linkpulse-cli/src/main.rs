mod analytics;
mod auth;
mod watch;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "linkpulse")]
#[command(about = "LinkedIn engagement monitoring from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Exchange the configured refresh token for a fresh access token
    Auth,
    /// Fetch and aggregate reactions for the tracked activities
    Analytics {
        /// Activity URN to report on (repeatable; overrides LINKPULSE_ACTIVITY_URNS)
        #[arg(long = "urn")]
        urns: Vec<String>,
        /// Keep going when a target fails, reporting its error inline
        #[arg(long)]
        allow_partial: bool,
    },
    /// Poll the tracked posts for new comments
    Watch {
        /// Post URN to watch (repeatable; overrides LINKPULSE_POST_URNS)
        #[arg(long = "urn")]
        urns: Vec<String>,
        /// Run a single cycle and exit instead of scheduling
        #[arg(long)]
        once: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = linkpulse_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Auth => auth::run(&config).await,
        Commands::Analytics {
            urns,
            allow_partial,
        } => analytics::run(&config, urns, allow_partial).await,
        Commands::Watch { urns, once } => watch::run(&config, urns, once).await,
    }
}
