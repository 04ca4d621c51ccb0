use axum::{
    Form,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::collections::HashMap;

use gamemap_app::{events::MarkerAction, map_renderer::MapClick};
use gamemap_types::{
    geometry::LatLng,
    marker::{ImageUpload, MarkerDraft, MarkerId, MarkerKind},
};

use crate::{handlers::back_to_viewer, http::AppState};

#[derive(Debug, Deserialize)]
pub struct MapClickForm {
    pub lat: f64,
    pub lng: f64,
    pub modifier: Option<String>,
}

pub async fn map_click(State(state): State<AppState>, Form(form): Form<MapClickForm>) -> Redirect {
    let click = MapClick {
        position: LatLng::new(form.lat, form.lng),
        modifier: form
            .modifier
            .as_deref()
            .is_some_and(|value| value == "true" || value == "on"),
    };

    if !state.session.handle_map_click(click).await {
        tracing::debug!(lat = form.lat, lng = form.lng, "Map click ignored");
    }

    Redirect::to("/")
}

/// `POST /markers/{id}/{action}` from popup buttons and sidebar rows.
pub async fn marker_action(
    State(state): State<AppState>,
    Path((id, action)): Path<(MarkerId, String)>,
) -> Response {
    let Some(action) = MarkerAction::parse(&action, id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    back_to_viewer(action.name(), state.session.dispatch(action).await).into_response()
}

pub async fn cancel_marker_form(State(state): State<AppState>) -> Redirect {
    state.session.close_marker_form().await;
    Redirect::to("/")
}

/// Add and edit both land here; the hidden `id` field picks the request.
pub async fn save_marker(State(state): State<AppState>, multipart: Multipart) -> Response {
    let submission = match MarkerFormInput::read(multipart).await {
        Ok(input) => input.into_submission(),
        Err(reason) => Err(reason),
    };

    let (id, draft) = match submission {
        Ok(submission) => submission,
        Err(reason) => {
            tracing::warn!(reason = %reason, "Malformed marker form");
            return (StatusCode::BAD_REQUEST, reason).into_response();
        }
    };

    back_to_viewer("save_marker", state.session.submit_marker_form(id, draft).await)
        .into_response()
}

#[derive(Debug, Default)]
struct MarkerFormInput {
    fields: HashMap<String, String>,
    image: Option<ImageUpload>,
}

impl MarkerFormInput {
    async fn read(mut multipart: Multipart) -> Result<Self, String> {
        let mut input = MarkerFormInput::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
            let name = field.name().unwrap_or_default().to_string();

            if name == "image_file" {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| e.to_string())?;

                // Browsers send an empty part when no file was picked.
                if !file_name.is_empty() && !bytes.is_empty() {
                    input.image = Some(ImageUpload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            } else {
                let value = field.text().await.map_err(|e| e.to_string())?;
                input.fields.insert(name, value);
            }
        }

        Ok(input)
    }

    fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .filter(|value| !value.trim().is_empty())
            .cloned()
    }

    fn coordinate(&self, name: &str) -> Result<f64, String> {
        self.text(name)
            .ok_or_else(|| format!("Missing {name}"))?
            .parse()
            .map_err(|_| format!("Invalid {name}"))
    }

    fn into_submission(self) -> Result<(Option<MarkerId>, MarkerDraft), String> {
        let id = self
            .text("id")
            .map(|id| id.parse::<MarkerId>())
            .transpose()
            .map_err(|_| "Invalid id".to_string())?;

        let draft = MarkerDraft {
            lat: self.coordinate("lat")?,
            lng: self.coordinate("lng")?,
            title: self.fields.get("title").cloned().unwrap_or_default(),
            kind: self
                .text("type")
                .map(|kind| MarkerKind::parse(&kind))
                .unwrap_or_default(),
            game_coords: self.text("game_coords"),
            note: self.text("note"),
            image: self.image,
        };

        Ok((id, draft))
    }
}
