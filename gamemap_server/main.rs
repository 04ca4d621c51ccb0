use std::sync::Arc;

use gamemap_app::{config::Config, session::Session};
use gamemap_gateway::HttpBackendGateway;
use gamemap_types::{Result, errors::ApplicationError};
use gamemap_web::{AppState, WebRouter};

mod logs;
use logs::setup_logging;

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<(), ApplicationError> {
    setup_logging();
    let (config, session) = setup_app().await;

    WebRouter::serve(AppState::new(session), config.port).await
}

async fn setup_app() -> (Arc<Config>, Arc<Session>) {
    let config = Arc::new(Config::from_env());
    tracing::info!(backend = %config.backend_url, "Using map backend");

    let gateway = Arc::new(HttpBackendGateway::new(config.backend_url.clone()));
    let session = Arc::new(Session::new(gateway, config.clone()));

    // Startup continues with an empty game list when the backend is down.
    match session.load_games().await {
        Ok(()) => tracing::info!("Game list loaded."),
        Err(e) => tracing::warn!("Could not load games at startup: {e}"),
    }

    (config, session)
}
