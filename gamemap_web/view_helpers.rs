use gamemap_app::{
    config::Config,
    events::{ConfirmPrompt, Notice},
    forms::{GameForm, MarkerForm},
    map_renderer::MapScene,
    marker_store::{SidebarOptions, SidebarView},
    state::ViewerState,
};
use gamemap_types::game::GameId;

/// Entry of the game selector.
#[derive(Debug, Clone, PartialEq)]
pub struct GameOption {
    pub id: GameId,
    pub name: String,
    pub selected: bool,
}

/// Snapshot of the viewer state handed to the page components.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerPage {
    pub games: Vec<GameOption>,
    pub current_game: Option<String>,
    pub settings_open: bool,
    pub info_open: bool,
    pub sidebar_zoom: i8,
    pub zoom_levels: Vec<i8>,
    pub sidebar: SidebarOptions,
    pub sidebar_view: SidebarView,
    pub game_form: GameForm,
    pub marker_form: MarkerForm,
    pub confirm: Option<ConfirmPrompt>,
    pub notices: Vec<Notice>,
    pub backend_url: String,
}

impl ViewerPage {
    pub fn from_state(state: &ViewerState, config: &Config, notices: Vec<Notice>) -> Self {
        let current = state.current_game_id();

        ViewerPage {
            games: state
                .games
                .iter()
                .map(|game| GameOption {
                    id: game.id,
                    name: game.name.clone(),
                    selected: Some(game.id) == current,
                })
                .collect(),
            current_game: state.current_game.as_ref().map(|game| game.name.clone()),
            settings_open: state.settings_open,
            info_open: state.info_open,
            sidebar_zoom: state.sidebar_zoom,
            zoom_levels: config.zoom_range.levels().collect(),
            sidebar: state.sidebar.clone(),
            sidebar_view: state.sidebar_view.clone(),
            game_form: state.game_form.clone(),
            marker_form: state.marker_form.clone(),
            confirm: state.pending.clone(),
            notices,
            backend_url: config.backend_url.clone(),
        }
    }

    pub fn has_game(&self) -> bool {
        self.current_game.is_some()
    }
}

/// Absolute URL for a file the backend serves (`/maps/...`, `/static/uploads/...`).
pub fn backend_asset_url(backend_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    format!(
        "{}/{}",
        backend_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Points the scene's backend-served files at the backend.
pub fn browser_scene(mut scene: MapScene, backend_url: &str) -> MapScene {
    if let Some(overlay) = scene.overlay.as_mut() {
        overlay.url = backend_asset_url(backend_url, &overlay.url);
    }

    for pin in &mut scene.pins {
        if let Some(path) = pin.popup.image_path.as_mut() {
            *path = backend_asset_url(backend_url, path);
        }
    }

    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_urls_are_rooted_at_backend() {
        assert_eq!(
            backend_asset_url("http://127.0.0.1:5000/", "/maps/dungeon.png"),
            "http://127.0.0.1:5000/maps/dungeon.png"
        );
        assert_eq!(
            backend_asset_url("http://127.0.0.1:5000", "https://cdn.example/x.png"),
            "https://cdn.example/x.png"
        );
    }
}
