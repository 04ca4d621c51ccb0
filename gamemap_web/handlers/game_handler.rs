use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;

use gamemap_types::game::{GameId, NewGame};

use crate::{handlers::back_to_viewer, http::AppState};

#[derive(Debug, Deserialize)]
pub struct SelectGameForm {
    pub game_id: GameId,
}

pub async fn select_game(
    State(state): State<AppState>,
    Form(form): Form<SelectGameForm>,
) -> Redirect {
    back_to_viewer("select_game", state.session.select_game(form.game_id).await)
}

pub async fn open_game_form(State(state): State<AppState>) -> Redirect {
    state.session.open_game_form().await;
    Redirect::to("/")
}

pub async fn cancel_game_form(State(state): State<AppState>) -> Redirect {
    state.session.close_game_form().await;
    Redirect::to("/")
}

pub async fn create_game(
    State(state): State<AppState>,
    Form(form): Form<NewGame>,
) -> Redirect {
    back_to_viewer("create_game", state.session.submit_game_form(form).await)
}

/// Asks for confirmation; nothing is deleted until `/confirm`.
pub async fn delete_game(State(state): State<AppState>) -> Redirect {
    back_to_viewer("delete_game", state.session.request_game_delete().await)
}

pub async fn confirm(State(state): State<AppState>) -> Redirect {
    back_to_viewer("confirm", state.session.confirm().await)
}

pub async fn cancel_confirmation(State(state): State<AppState>) -> Redirect {
    state.session.cancel_confirmation().await;
    Redirect::to("/")
}
