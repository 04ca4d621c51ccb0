use axum::{
    Router,
    routing::{get, post},
};
use std::{io::Error, net::SocketAddr, sync::Arc};
use tower_http::{services::ServeDir, trace::TraceLayer};

use gamemap_app::session::Session;
use gamemap_types::{Result, errors::ApplicationError};

use crate::handlers::{
    cancel_confirmation, cancel_game_form, cancel_marker_form, close_info, confirm, create_game,
    delete_game, map_click, marker_action, open_game_form, open_info, save_marker, scene,
    select_game, set_sidebar_zoom, sidebar_rows, toggle_settings, update_sidebar, viewer,
};

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Session>,
}

impl AppState {
    pub fn new(session: Arc<Session>) -> AppState {
        AppState { session }
    }
}

pub struct WebRouter {}

impl WebRouter {
    pub fn router(state: AppState) -> Router {
        let assets_dir = state.session.config().assets_dir.clone();

        Router::new()
            .nest_service("/static", ServeDir::new(assets_dir))
            .route("/", get(viewer))
            .route("/scene", get(scene))
            .route("/sidebar", post(update_sidebar))
            .route("/sidebar/rows", get(sidebar_rows))
            .route("/games", post(create_game))
            .route("/games/select", post(select_game))
            .route("/games/form", post(open_game_form))
            .route("/games/form/cancel", post(cancel_game_form))
            .route("/games/delete", post(delete_game))
            .route("/markers", post(save_marker))
            .route("/markers/click", post(map_click))
            .route("/markers/form/cancel", post(cancel_marker_form))
            .route("/markers/{id}/{action}", post(marker_action))
            .route("/confirm", post(confirm))
            .route("/confirm/cancel", post(cancel_confirmation))
            .route("/settings", post(toggle_settings))
            .route("/settings/zoom", post(set_sidebar_zoom))
            .route("/info/open", post(open_info))
            .route("/info/close", post(close_info))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(state: AppState, port: u16) -> Result<(), ApplicationError> {
        let router = Self::router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr).await.map_err(infra_error)?;

        tracing::info!(
            "HTTP Server started, listening on http://{}",
            addr.to_string()
        );
        axum::serve(listener, router).await.map_err(infra_error)?;

        Ok(())
    }
}

fn infra_error(e: Error) -> ApplicationError {
    let err = format!("{:#?}", e);
    ApplicationError::Infrastructure(err)
}
