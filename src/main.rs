use fitness_tracker::api::routes::{create_routes, AppState};
use fitness_tracker::config::{run_migrations, AppConfig, DatabaseConfig};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    let pool = db_config.create_pool().await?;
    run_migrations(&pool).await?;

    let app = create_routes(AppState::with_postgres(pool));

    // Start the server
    let listener = TcpListener::bind(config.server_address()).await?;
    info!("Fitness tracker server starting on http://{}", config.server_address());
    info!("Health check available at http://{}/health", config.server_address());

    axum::serve(listener, app).await?;

    Ok(())
}
