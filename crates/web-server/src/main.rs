use database::{connect, run_migrations, DbRepository};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use web_server::AppState;

// This main function is the entry point when running `cargo run -p web-server`.
// It serves the API against PostgreSQL using `config.toml` and the environment.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = configuration::load_settings()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log.filter)),
        )
        .init();

    let pool = connect(
        &settings.database.url,
        settings.database.max_connections,
        settings.database.acquire_timeout(),
    )
    .await?;
    run_migrations(&pool).await?;

    let state = Arc::new(AppState::new(
        Arc::new(DbRepository::new(pool)),
        settings.strategy,
    ));
    let addr: SocketAddr = settings.server.address().parse()?;
    web_server::run_server(addr, state).await
}
