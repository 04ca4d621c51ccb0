use serde::{Deserialize, Serialize};

pub type GameId = i64;

/// A game owns one map image and the markers placed on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub name: String,
    pub map_path: String,
}

impl Game {
    /// Public URL of the map image served by the backend.
    pub fn map_url(&self) -> String {
        map_url(&self.map_path)
    }
}

pub fn map_url(map_path: &str) -> String {
    format!("/maps/{}", map_path.trim_start_matches('/'))
}

/// Fields collected by the add-game form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewGame {
    pub name: String,
    pub map_path: String,
}
