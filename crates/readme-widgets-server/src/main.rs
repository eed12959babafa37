use std::sync::Arc;

use readme_widgets_server::{AppState, Config, router};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let addr = config.socket_addr();
    info!(ring_pi = ?config.ring_pi, max_squares = config.max_squares, revision = %config.revision, "starting");

    let app = router(Arc::new(AppState::from_config(&config)));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
