// src/main.rs

use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use calcd::api;
use calcd::config::Config;
use calcd::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    let level: Level = config.log_level.parse().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting calcd");
    let state = AppState::initialize(&config).await?;
    info!("Primary store: {}", config.database_url);
    info!("Secondary journal: {}", config.journal_path);

    let app = api::router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("Listening on http://{}/calculator", config.bind_address());
    axum::serve(listener, app).await?;
    Ok(())
}
