use serde::Serialize;

use gamemap_types::{
    errors::{AppError, ApplicationError},
    game::{GameId, NewGame},
    geometry::LatLng,
    marker::{Marker, MarkerDraft, MarkerId, MarkerKind},
};

/// The add-game modal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameForm {
    pub open: bool,
    pub fields: NewGame,
}

impl GameForm {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn reset(&mut self) {
        self.fields = NewGame::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarkerFormMode {
    Add,
    Edit,
}

/// Values shown in the marker modal. `id` is the hidden identifier field:
/// present means edit, absent means add.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarkerFormFields {
    pub id: Option<MarkerId>,
    pub lat: f64,
    pub lng: f64,
    pub title: String,
    pub kind: MarkerKind,
    pub game_coords: String,
    pub note: String,
}

/// Image already attached to the marker being edited.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePreview {
    pub path: String,
    pub file_name: String,
}

/// The add/edit marker modal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerForm {
    pub open: bool,
    pub fields: MarkerFormFields,
    pub preview: Option<ImagePreview>,
}

impl MarkerForm {
    pub fn open_add(&mut self, position: LatLng) {
        self.reset();
        self.fields.lat = position.lat;
        self.fields.lng = position.lng;
        self.open = true;
    }

    pub fn open_edit(&mut self, marker: &Marker) {
        self.fields = MarkerFormFields {
            id: Some(marker.id),
            lat: marker.lat,
            lng: marker.lng,
            title: marker.title.clone(),
            kind: marker.icon(),
            game_coords: marker.game_coords.clone().unwrap_or_default(),
            note: marker.note.clone().unwrap_or_default(),
        };
        self.preview = match (&marker.image_path, marker.image_file_name()) {
            (Some(path), Some(file_name)) => Some(ImagePreview {
                path: path.clone(),
                file_name: file_name.to_string(),
            }),
            _ => None,
        };
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn reset(&mut self) {
        self.fields = MarkerFormFields::default();
        self.preview = None;
    }

    pub fn mode(&self) -> MarkerFormMode {
        match self.fields.id {
            Some(_) => MarkerFormMode::Edit,
            None => MarkerFormMode::Add,
        }
    }
}

/// Backend request selected by the hidden identifier field.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerSubmission {
    Create { game_id: GameId, draft: MarkerDraft },
    Update { id: MarkerId, draft: MarkerDraft },
}

impl MarkerSubmission {
    /// Creates attach the currently loaded game; they fail without one.
    pub fn new(
        id: Option<MarkerId>,
        draft: MarkerDraft,
        current_game: Option<GameId>,
    ) -> Result<Self, ApplicationError> {
        match id {
            Some(id) => Ok(MarkerSubmission::Update { id, draft }),
            None => {
                let game_id = current_game.ok_or(AppError::NoGameSelected)?;
                Ok(MarkerSubmission::Create { game_id, draft })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker() -> Marker {
        Marker {
            id: 12,
            game_id: 1,
            lat: 40.0,
            lng: 80.0,
            title: "Bunker".to_string(),
            kind: Some("military".to_string()),
            game_coords: None,
            note: Some("Locked".to_string()),
            image_path: Some("/static/uploads/17_bunker.png".to_string()),
        }
    }

    #[test]
    fn open_add_resets_previous_edit() {
        let mut form = MarkerForm::default();
        form.open_edit(&marker());
        form.open_add(LatLng::new(1.0, 2.0));

        assert!(form.open);
        assert_eq!(form.mode(), MarkerFormMode::Add);
        assert_eq!(form.fields.title, "");
        assert_eq!((form.fields.lat, form.fields.lng), (1.0, 2.0));
        assert!(form.preview.is_none());
    }

    #[test]
    fn open_edit_prefills_fields_and_preview() {
        let mut form = MarkerForm::default();
        form.open_edit(&marker());

        assert_eq!(form.mode(), MarkerFormMode::Edit);
        assert_eq!(form.fields.id, Some(12));
        assert_eq!(form.fields.kind, MarkerKind::Military);
        assert_eq!(form.fields.note, "Locked");
        assert_eq!(form.fields.game_coords, "");
        assert_eq!(form.preview.unwrap().file_name, "17_bunker.png");
    }

    #[test]
    fn submission_without_id_creates_for_current_game() {
        let submission = MarkerSubmission::new(None, MarkerDraft::default(), Some(3)).unwrap();
        assert!(matches!(submission, MarkerSubmission::Create { game_id: 3, .. }));
    }

    #[test]
    fn submission_with_id_updates_that_marker() {
        let submission = MarkerSubmission::new(Some(12), MarkerDraft::default(), None).unwrap();
        assert!(matches!(submission, MarkerSubmission::Update { id: 12, .. }));
    }

    #[test]
    fn create_without_game_is_rejected() {
        let err = MarkerSubmission::new(None, MarkerDraft::default(), None).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::App(AppError::NoGameSelected)
        ));
    }
}
