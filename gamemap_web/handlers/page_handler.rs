use axum::{
    Json,
    extract::State,
    response::{Html, IntoResponse},
};
use dioxus::prelude::*;

use gamemap_app::map_renderer::MapScene;

use crate::{
    components::{ViewerLayout, wrap_in_html},
    http::AppState,
    view_helpers::{ViewerPage, browser_scene},
};

/// Render the viewer page using Dioxus SSR
pub async fn viewer(State(state): State<AppState>) -> impl IntoResponse {
    let notices = state.session.take_notices().await;
    let config = state.session.config().clone();
    let page = state
        .session
        .read(move |viewer| ViewerPage::from_state(viewer, &config, notices))
        .await;

    let body_content = dioxus_ssr::render_element(rsx! {
        ViewerLayout { page: page.clone() }
    });

    Html(wrap_in_html(&body_content))
}

/// Map snapshot mirrored by `map.js`.
pub async fn scene(State(state): State<AppState>) -> Json<MapScene> {
    let scene = state.session.map_scene().await;
    Json(browser_scene(scene, &state.session.config().backend_url))
}
