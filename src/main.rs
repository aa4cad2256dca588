//! CareGP Chat - main entry point

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use caregp_chat::cli::{Cli, Commands};
use caregp_chat::commands;
use caregp_chat::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up GOOGLE_API_KEY and friends from a local .env, if present
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;
    config.validate()?;

    match cli.command {
        Commands::Serve { .. } => {
            tracing::info!("CareGP Chat v{}", env!("CARGO_PKG_VERSION"));
            commands::serve(config).await
        }
        Commands::History { command } => {
            tracing::debug!("Starting history command");
            commands::history::handle_history(&config, command)
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "caregp_chat=debug,tower_http=debug"
    } else {
        "caregp_chat=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
