use gamemap_types::{
    game::{Game, GameId},
    marker::Marker,
};

use crate::{
    config::Config,
    events::{ConfirmPrompt, Notice},
    forms::{GameForm, MarkerForm},
    generation::Generation,
    map_renderer::MapRenderer,
    marker_store::{MarkerStore, SidebarOptions, SidebarView},
};

/// Everything the viewer knows about the current session.
///
/// Owned by `Session` and only ever mutated under its lock.
#[derive(Debug)]
pub struct ViewerState {
    pub games: Vec<Game>,
    pub current_game: Option<Game>,
    pub store: MarkerStore,
    pub sidebar: SidebarOptions,
    pub sidebar_view: SidebarView,
    pub sidebar_zoom: i8,
    pub map: MapRenderer,
    pub game_form: GameForm,
    pub marker_form: MarkerForm,
    pub settings_open: bool,
    pub info_open: bool,
    pub pending: Option<ConfirmPrompt>,
    pub notices: Vec<Notice>,
    pub map_generation: Generation,
    pub marker_generation: Generation,
}

impl ViewerState {
    pub fn new(config: &Config) -> Self {
        Self {
            games: Vec::new(),
            current_game: None,
            store: MarkerStore::new(),
            sidebar: SidebarOptions::default(),
            sidebar_view: SidebarView::default(),
            sidebar_zoom: config.zoom_range.clamp(config.sidebar_zoom),
            map: MapRenderer::new(config.zoom_range),
            game_form: GameForm::default(),
            marker_form: MarkerForm::default(),
            settings_open: false,
            info_open: false,
            pending: None,
            notices: Vec::new(),
            map_generation: Generation::new(),
            marker_generation: Generation::new(),
        }
    }

    pub fn current_game_id(&self) -> Option<GameId> {
        self.current_game.as_ref().map(|game| game.id)
    }

    /// Re-derives the sidebar from the store and brings pin visibility in line
    /// with it.
    pub fn rerender_sidebar(&mut self) -> &SidebarView {
        let view = self.store.render(&self.sidebar);
        let changed = view.reconcile(&mut self.map);

        tracing::debug!(
            rows = view.rows().count(),
            visible = view.visible.len(),
            changed,
            "Sidebar rendered"
        );

        self.sidebar_view = view;
        &self.sidebar_view
    }

    /// Replaces the marker list and rebuilds every pin from it.
    pub fn replace_markers(&mut self, markers: Vec<Marker>) {
        self.map.clear_pins();
        for marker in &markers {
            self.map.add_pin(marker);
        }
        self.store.set_markers(markers);
        self.rerender_sidebar();
    }

    /// Drops the current game with its overlay, pins and sidebar rows, and
    /// makes every in-flight load stale.
    pub fn unload_game(&mut self) {
        self.current_game = None;
        self.map.clear();
        self.store.clear();
        self.sidebar_view = SidebarView::default();
        self.marker_form.close();
        self.marker_form.reset();
        self.map_generation.invalidate();
        self.marker_generation.invalidate();
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notices.push(Notice {
            message: message.into(),
        });
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
