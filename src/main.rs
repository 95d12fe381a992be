//! action-insights: analytics over a user action log
//!
//! Loads users and actions from flat JSON files at startup and serves:
//! - user lookup and per-user action counts
//! - empirical next-action transition probabilities
//! - transitive referral reach per user (cycle-aware)

mod analytics;
mod api;
mod config;
mod model;
mod store;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use api::AppState;
use config::Config;
use store::{ActionStore, UserStore};

#[derive(Parser)]
#[command(name = "action-insights")]
#[command(about = "Analytics service over a user action log")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "action-insights.toml")]
    config: String,

    /// Socket address to listen on (overrides config file)
    #[arg(short, long, env = "INSIGHTS_LISTEN_ADDR")]
    listen: Option<String>,

    /// Users JSON file (overrides config file)
    #[arg(long, env = "INSIGHTS_USERS_FILE")]
    users_file: Option<String>,

    /// Actions JSON file (overrides config file)
    #[arg(long, env = "INSIGHTS_ACTIONS_FILE")]
    actions_file: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("action_insights=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    info!("Starting action-insights");
    info!("Config file: {}", cli.config);

    // Load or fall back to default config
    let mut config = if std::path::Path::new(&cli.config).exists() {
        let content = std::fs::read_to_string(&cli.config)?;
        toml::from_str(&content)?
    } else {
        info!("Config file not found, using defaults");
        Config::default()
    };

    // Apply CLI overrides
    config.apply_overrides(cli.listen, cli.users_file, cli.actions_file);

    info!("Users file: {}", config.data.users_file.display());
    info!("Actions file: {}", config.data.actions_file.display());

    // Load the data files; failures here are fatal
    let users = UserStore::load(&config.data.users_file)?;
    let actions = ActionStore::load(&config.data.actions_file)?;
    info!(
        "Loaded {} users and {} actions",
        users.len(),
        actions.all_actions().len()
    );

    let state = Arc::new(AppState { users, actions });
    let router = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.listen_addr).await?;
    info!("Listening on {}", config.server.listen_addr);
    axum::serve(listener, router).await?;

    Ok(())
}
