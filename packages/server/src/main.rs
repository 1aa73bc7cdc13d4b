use std::net::SocketAddr;

use anyhow::Context;
use tracing::{Level, info};

use storefront::config::AppConfig;
use storefront::database::{ensure_indexes, init_db};
use storefront::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    let level: Level = config
        .log
        .level
        .parse()
        .with_context(|| format!("Invalid log level '{}'", config.log.level))?;
    tracing_subscriber::fmt().with_max_level(level).init();

    let db = init_db(&config.database)
        .await
        .context("Failed to initialize database")?;
    ensure_indexes(&db).await?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let app = storefront::build_router(AppState { db, config });

    info!("Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
