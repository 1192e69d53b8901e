/// OpenMusic API - REST backend for music catalog data
use clap::{Parser, Subcommand};
use openmusic_server::{
    config::ServerConfig,
    router,
    services::{AuthService, CacheService, ExportService, FileStorage},
    state::AppState,
};
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "openmusic-server")]
#[command(about = "OpenMusic API server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "openmusic_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => serve().await?,
        Commands::Migrate => migrate().await?,
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;
    config.validate()?;

    tracing::info!("Starting OpenMusic API");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let pool =
        openmusic_storage::create_pool(&config.database.url, config.database.max_connections)
            .await?;
    openmusic_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    // Initialize cache (degrades to always-miss when unreachable)
    let cache = CacheService::connect(&config.redis.url).await;

    // Initialize file storage
    let file_storage = Arc::new(FileStorage::from_config(&config.storage).await?);
    tracing::info!("File storage initialized");

    // Initialize auth service
    let auth_service = Arc::new(AuthService::new(
        config.auth.access_token_key.clone(),
        config.auth.refresh_token_key.clone(),
        config.auth.access_token_age_secs,
        config.auth.refresh_token_age_secs,
    ));

    // Initialize export producer
    let exports = Arc::new(ExportService::new(config.rabbitmq.url.clone()));

    // Build application state and router
    let app_state = AppState::new(pool, cache, auth_service, file_storage, exports);
    let app = router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn migrate() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;

    let pool =
        openmusic_storage::create_pool(&config.database.url, config.database.max_connections)
            .await?;
    openmusic_storage::run_migrations(&pool).await?;

    tracing::info!("Migrations applied");

    Ok(())
}
