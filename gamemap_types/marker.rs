use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::{game::GameId, geometry::LatLng};

pub type MarkerId = i64;

/// Icon categories shipped under `/static/icons`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Base,
    Bomb,
    Danger,
    #[default]
    Default,
    Electrical,
    Factory,
    Food,
    Military,
    Mountain,
    Resource,
    Tools,
    Valuables,
    Village,
    Weapons,
}

impl MarkerKind {
    pub const ALL: [MarkerKind; 14] = [
        MarkerKind::Base,
        MarkerKind::Bomb,
        MarkerKind::Danger,
        MarkerKind::Default,
        MarkerKind::Electrical,
        MarkerKind::Factory,
        MarkerKind::Food,
        MarkerKind::Military,
        MarkerKind::Mountain,
        MarkerKind::Resource,
        MarkerKind::Tools,
        MarkerKind::Valuables,
        MarkerKind::Village,
        MarkerKind::Weapons,
    ];

    /// Maps a raw type name to a known category. Anything unrecognised gets
    /// the default icon.
    pub fn parse(name: &str) -> MarkerKind {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerKind::Base => "base",
            MarkerKind::Bomb => "bomb",
            MarkerKind::Danger => "danger",
            MarkerKind::Default => "default",
            MarkerKind::Electrical => "electrical",
            MarkerKind::Factory => "factory",
            MarkerKind::Food => "food",
            MarkerKind::Military => "military",
            MarkerKind::Mountain => "mountain",
            MarkerKind::Resource => "resource",
            MarkerKind::Tools => "tools",
            MarkerKind::Valuables => "valuables",
            MarkerKind::Village => "village",
            MarkerKind::Weapons => "weapons",
        }
    }

    pub fn icon_url(&self) -> String {
        format!("/static/icons/{}.svg", self.as_str())
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point of interest as returned by `GET /api/markers/{game_id}`.
///
/// The backend stores empty strings or NULL for absent optional text, both
/// decode to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: MarkerId,
    pub game_id: GameId,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, deserialize_with = "nullable_text")]
    pub title: String,
    #[serde(rename = "type", default, deserialize_with = "optional_text")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub game_coords: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub image_path: Option<String>,
}

impl Marker {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// Raw type name used for sidebar grouping, `"default"` when missing.
    pub fn kind_name(&self) -> &str {
        self.kind.as_deref().unwrap_or(MarkerKind::Default.as_str())
    }

    pub fn icon(&self) -> MarkerKind {
        MarkerKind::parse(self.kind_name())
    }

    /// Case-insensitive substring match against title or note. `needle` must
    /// already be lowercase; an empty needle matches everything.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }

        self.title.to_lowercase().contains(needle)
            || self
                .note
                .as_deref()
                .is_some_and(|note| note.to_lowercase().contains(needle))
    }

    /// File name part of the attached image, used by the edit form preview.
    pub fn image_file_name(&self) -> Option<&str> {
        self.image_path
            .as_deref()
            .map(|path| path.rsplit('/').next().unwrap_or(path))
    }
}

/// Image attached to a marker submission, sent as the `image_file` part.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Fields submitted by the marker form, for both create and update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerDraft {
    pub lat: f64,
    pub lng: f64,
    pub title: String,
    pub kind: MarkerKind,
    pub game_coords: Option<String>,
    pub note: Option<String>,
    pub image: Option<ImageUpload>,
}

impl MarkerDraft {
    pub fn at(position: LatLng) -> Self {
        Self {
            lat: position.lat,
            lng: position.lng,
            ..Default::default()
        }
    }
}

impl From<&Marker> for MarkerDraft {
    fn from(marker: &Marker) -> Self {
        Self {
            lat: marker.lat,
            lng: marker.lng,
            title: marker.title.clone(),
            kind: marker.icon(),
            game_coords: marker.game_coords.clone(),
            note: marker.note.clone(),
            image: None,
        }
    }
}

fn nullable_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}
