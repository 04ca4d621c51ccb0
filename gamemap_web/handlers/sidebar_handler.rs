use axum::{
    Form,
    extract::{Query, State},
    response::{Html, Redirect},
};
use dioxus::prelude::*;
use serde::Deserialize;

use gamemap_app::marker_store::SidebarOptions;

use crate::{components::MarkerList, http::AppState};

/// Sidebar controls as a browser submits them: unchecked boxes are absent.
#[derive(Debug, Default, Deserialize)]
pub struct SidebarQuery {
    #[serde(default)]
    pub filter_text: String,
    pub sort_alpha: Option<String>,
    pub group_type: Option<String>,
}

impl From<SidebarQuery> for SidebarOptions {
    fn from(query: SidebarQuery) -> Self {
        SidebarOptions {
            filter_text: query.filter_text,
            sort_alphabetically: query.sort_alpha.is_some(),
            group_by_type: query.group_type.is_some(),
        }
    }
}

pub async fn update_sidebar(
    State(state): State<AppState>,
    Form(query): Form<SidebarQuery>,
) -> Redirect {
    state.session.set_sidebar_options(query.into()).await;
    Redirect::to("/")
}

/// Applies the controls and returns only the re-rendered marker list.
pub async fn sidebar_rows(
    State(state): State<AppState>,
    Query(query): Query<SidebarQuery>,
) -> Html<String> {
    let view = state.session.set_sidebar_options(query.into()).await;

    Html(dioxus_ssr::render_element(rsx! {
        MarkerList { view: view.clone() }
    }))
}
