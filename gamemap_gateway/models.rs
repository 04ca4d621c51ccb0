use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use gamemap_types::{
    game::{Game, GameId},
    marker::{MarkerDraft, MarkerId},
};

/// Body the backend sends along with a 4xx, e.g. `{"error": "Game not found"}`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// `POST /api/games` answers with either the created row or an error body.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CreateGameResponse {
    Rejected(ErrorBody),
    Created(Game),
}

#[derive(Debug, Deserialize)]
pub struct CreatedMarker {
    pub id: MarkerId,
}

/// Builds the multipart body shared by marker create and update. `game_id`
/// is only sent on create.
pub fn marker_form(
    game_id: Option<GameId>,
    draft: &MarkerDraft,
) -> Result<Form, reqwest::Error> {
    let mut form = Form::new()
        .text("lat", draft.lat.to_string())
        .text("lng", draft.lng.to_string())
        .text("title", draft.title.clone())
        .text("note", draft.note.clone().unwrap_or_default())
        .text("type", draft.kind.as_str())
        .text("game_coords", draft.game_coords.clone().unwrap_or_default());

    if let Some(game_id) = game_id {
        form = form.text("game_id", game_id.to_string());
    }

    if let Some(image) = &draft.image {
        let mut part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
        if let Some(content_type) = &image.content_type {
            part = part.mime_str(content_type)?;
        }
        form = form.part("image_file", part);
    }

    Ok(form)
}
