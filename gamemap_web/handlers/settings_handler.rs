use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;

use crate::http::AppState;

#[derive(Debug, Deserialize)]
pub struct ZoomForm {
    pub zoom: i8,
}

pub async fn toggle_settings(State(state): State<AppState>) -> Redirect {
    state.session.toggle_settings().await;
    Redirect::to("/")
}

pub async fn set_sidebar_zoom(
    State(state): State<AppState>,
    Form(form): Form<ZoomForm>,
) -> Redirect {
    let zoom = state.session.set_sidebar_zoom(form.zoom).await;
    tracing::debug!(zoom, "Sidebar zoom updated");
    Redirect::to("/")
}

pub async fn open_info(State(state): State<AppState>) -> Redirect {
    state.session.set_info_open(true).await;
    Redirect::to("/")
}

pub async fn close_info(State(state): State<AppState>) -> Redirect {
    state.session.set_info_open(false).await;
    Redirect::to("/")
}
