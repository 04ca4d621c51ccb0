use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use gamemap_types::{
    errors::{AppError, ApplicationError},
    game::{GameId, NewGame},
    marker::{MarkerDraft, MarkerId},
};

use crate::{
    config::Config,
    events::{ConfirmPrompt, MarkerAction, Notice, PendingAction},
    forms::MarkerSubmission,
    gateway::BackendGateway,
    generation::LoadTicket,
    map_renderer::{MapClick, MapScene},
    marker_store::{SidebarOptions, SidebarView},
    state::ViewerState,
};

const FAILED_LOAD_GAMES: &str = "Failed to load games.";
const FAILED_LOAD_MARKERS: &str = "Failed to load markers.";
const FAILED_CREATE_GAME: &str = "Failed to create game.";
const FAILED_SAVE_MARKER: &str = "Failed to save marker.";
const FAILED_DELETE_MARKER: &str = "Failed to delete marker.";
const FAILED_DELETE_MAP: &str = "Failed to delete map.";

/// The viewer controller.
///
/// Owns the `ViewerState` and is its only writer. The lock is never held
/// across a backend call: each operation updates state, releases the lock,
/// talks to the gateway, then re-acquires the lock to apply the result. Load
/// completions are tagged with a `LoadTicket` and dropped when a newer load
/// has been issued in the meantime.
pub struct Session {
    state: Mutex<ViewerState>,
    gateway: Arc<dyn BackendGateway>,
    config: Arc<Config>,
}

impl Session {
    pub fn new(gateway: Arc<dyn BackendGateway>, config: Arc<Config>) -> Self {
        Self {
            state: Mutex::new(ViewerState::new(&config)),
            gateway,
            config,
        }
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Runs `f` against the current state, e.g. to render it.
    pub async fn read<R>(&self, f: impl FnOnce(&ViewerState) -> R) -> R {
        let state = self.state.lock().await;
        f(&state)
    }

    pub async fn take_notices(&self) -> Vec<Notice> {
        self.state.lock().await.take_notices()
    }

    pub async fn map_scene(&self) -> MapScene {
        self.state.lock().await.map.scene()
    }

    async fn lock(&self) -> MutexGuard<'_, ViewerState> {
        self.state.lock().await
    }

    /// Fetches the game list for the selector.
    pub async fn load_games(&self) -> Result<(), ApplicationError> {
        match self.gateway.list_games().await {
            Ok(games) => {
                tracing::debug!(count = games.len(), "Games loaded");
                self.lock().await.games = games;
                Ok(())
            }
            Err(err) => {
                surface(&mut *self.lock().await, &err, FAILED_LOAD_GAMES);
                Err(err)
            }
        }
    }

    /// Switches to `game_id`: clears the map, probes the map image for its
    /// size, shows it and then loads the game's markers.
    ///
    /// An image that cannot be loaded leaves the map without overlay and
    /// without markers; the failure is only logged.
    pub async fn select_game(&self, game_id: GameId) -> Result<(), ApplicationError> {
        let (ticket, map_path) = {
            let mut state = self.lock().await;
            let Some(game) = state.games.iter().find(|g| g.id == game_id).cloned() else {
                let err = ApplicationError::from(AppError::GameNotFound(game_id));
                surface(&mut state, &err, FAILED_LOAD_MARKERS);
                return Err(err);
            };

            state.unload_game();
            let map_path = game.map_path.clone();
            state.current_game = Some(game);
            (state.map_generation.issue(game_id), map_path)
        };

        tracing::info!(game_id, map_path = %map_path, "Loading game map");

        let size = match self.gateway.map_image_size(&map_path).await {
            Ok(size) => size,
            Err(err) => {
                tracing::warn!(game_id, map_path = %map_path, error = %err, "Map image failed to load");
                return Ok(());
            }
        };

        let marker_ticket = {
            let mut state = self.lock().await;
            if !state.map_generation.is_current(&ticket) {
                tracing::debug!(game_id, "Discarding stale map image");
                return Ok(());
            }

            state.map.show_image(&map_path, size);
            state.marker_generation.issue(game_id)
        };

        self.fetch_markers(marker_ticket).await
    }

    /// Reloads the marker list of the current game, replacing it in full.
    pub async fn reload_markers(&self) -> Result<(), ApplicationError> {
        let ticket = {
            let mut state = self.lock().await;
            let Some(game_id) = state.current_game_id() else {
                return Ok(());
            };
            state.marker_generation.issue(game_id)
        };

        self.fetch_markers(ticket).await
    }

    async fn fetch_markers(&self, ticket: LoadTicket) -> Result<(), ApplicationError> {
        let result = self.gateway.list_markers(ticket.game_id).await;

        let mut state = self.lock().await;
        if !state.marker_generation.is_current(&ticket) {
            tracing::debug!(game_id = ticket.game_id, "Discarding stale marker list");
            return Ok(());
        }

        match result {
            Ok(markers) => {
                tracing::debug!(game_id = ticket.game_id, count = markers.len(), "Markers loaded");
                state.replace_markers(markers);
                Ok(())
            }
            Err(err) => {
                surface(&mut state, &err, FAILED_LOAD_MARKERS);
                Err(err)
            }
        }
    }

    /// Applies new sidebar controls and returns the resulting view.
    pub async fn set_sidebar_options(&self, options: SidebarOptions) -> SidebarView {
        let mut state = self.lock().await;
        state.sidebar = options;
        state.rerender_sidebar().clone()
    }

    pub async fn set_sidebar_zoom(&self, zoom: i8) -> i8 {
        let mut state = self.lock().await;
        state.sidebar_zoom = self.config.zoom_range.clamp(zoom);
        state.sidebar_zoom
    }

    /// Opens the add-marker form when a game is loaded and the modifier key
    /// was held. Returns whether the form opened.
    pub async fn handle_map_click(&self, click: MapClick) -> bool {
        let mut state = self.lock().await;
        let game_loaded = state.current_game.is_some();

        match state.map.click_target(click, game_loaded) {
            Some(position) => {
                state.marker_form.open_add(position);
                true
            }
            None => false,
        }
    }

    pub async fn dispatch(&self, action: MarkerAction) -> Result<(), ApplicationError> {
        tracing::debug!(action = action.name(), marker_id = action.marker_id(), "Marker action");

        match action {
            MarkerAction::Focus(id) => self.focus_marker(id).await,
            MarkerAction::Edit(id) => self.open_edit_marker(id).await,
            MarkerAction::Delete(id) => self.request_marker_delete(id).await.map(|_| ()),
        }
    }

    /// Flies the map to a marker at the configured sidebar zoom level.
    pub async fn focus_marker(&self, id: MarkerId) -> Result<(), ApplicationError> {
        let mut state = self.lock().await;
        let position = state
            .store
            .get(id)
            .map(|marker| marker.position())
            .ok_or(AppError::MarkerNotFound(id))?;
        let zoom = state.sidebar_zoom;

        state.map.focus(position, zoom);
        Ok(())
    }

    pub async fn open_edit_marker(&self, id: MarkerId) -> Result<(), ApplicationError> {
        let mut state = self.lock().await;
        let marker = state
            .store
            .get(id)
            .cloned()
            .ok_or(AppError::MarkerNotFound(id))?;

        state.marker_form.open_edit(&marker);
        Ok(())
    }

    pub async fn close_marker_form(&self) {
        self.lock().await.marker_form.close();
    }

    pub async fn open_game_form(&self) {
        self.lock().await.game_form.open();
    }

    pub async fn close_game_form(&self) {
        self.lock().await.game_form.close();
    }

    /// Creates a game. On success the form closes and the game list reloads;
    /// on failure the form stays open with its fields.
    pub async fn submit_game_form(&self, game: NewGame) -> Result<(), ApplicationError> {
        self.lock().await.game_form.fields = game.clone();

        match self.gateway.create_game(&game).await {
            Ok(created) => {
                tracing::info!(game_id = created.id, name = %created.name, "Game created");
                {
                    let mut state = self.lock().await;
                    state.game_form.close();
                    state.game_form.reset();
                }
                self.load_games().await
            }
            Err(err) => {
                surface(&mut *self.lock().await, &err, FAILED_CREATE_GAME);
                Err(err)
            }
        }
    }

    /// Saves the marker form: updates when `id` is set, otherwise creates a
    /// marker on the current game. On success the marker list reloads.
    pub async fn submit_marker_form(
        &self,
        id: Option<MarkerId>,
        draft: MarkerDraft,
    ) -> Result<(), ApplicationError> {
        let submission = {
            let mut state = self.lock().await;
            match MarkerSubmission::new(id, draft, state.current_game_id()) {
                Ok(submission) => submission,
                Err(err) => {
                    surface(&mut state, &err, FAILED_SAVE_MARKER);
                    return Err(err);
                }
            }
        };

        let result = match &submission {
            MarkerSubmission::Create { game_id, draft } => self
                .gateway
                .create_marker(*game_id, draft)
                .await
                .map(|id| tracing::info!(game_id, marker_id = id, "Marker created")),
            MarkerSubmission::Update { id, draft } => self
                .gateway
                .update_marker(*id, draft)
                .await
                .map(|_| tracing::info!(marker_id = id, "Marker updated")),
        };

        if let Err(err) = result {
            surface(&mut *self.lock().await, &err, FAILED_SAVE_MARKER);
            return Err(err);
        }

        {
            let mut state = self.lock().await;
            state.marker_form.close();
            state.marker_form.reset();
        }
        self.reload_markers().await
    }

    /// Asks for confirmation before deleting a marker.
    pub async fn request_marker_delete(
        &self,
        id: MarkerId,
    ) -> Result<ConfirmPrompt, ApplicationError> {
        let mut state = self.lock().await;
        if state.store.get(id).is_none() {
            return Err(AppError::MarkerNotFound(id).into());
        }

        let prompt = ConfirmPrompt::delete_marker(id);
        state.pending = Some(prompt.clone());
        Ok(prompt)
    }

    /// Asks for confirmation before deleting the loaded game. Without a loaded
    /// game nothing is sent and the user is told so.
    pub async fn request_game_delete(&self) -> Result<ConfirmPrompt, ApplicationError> {
        let mut state = self.lock().await;
        let Some(game_id) = state.current_game_id() else {
            let err = ApplicationError::from(AppError::NoMapLoaded);
            surface(&mut state, &err, FAILED_DELETE_MAP);
            return Err(err);
        };

        let prompt = ConfirmPrompt::delete_game(game_id);
        state.pending = Some(prompt.clone());
        Ok(prompt)
    }

    pub async fn cancel_confirmation(&self) {
        self.lock().await.pending = None;
    }

    /// Runs the action waiting for confirmation.
    pub async fn confirm(&self) -> Result<(), ApplicationError> {
        let pending = self.lock().await.pending.take();

        match pending.map(|prompt| prompt.action) {
            Some(PendingAction::DeleteMarker(id)) => self.delete_marker(id).await,
            Some(PendingAction::DeleteGame(id)) => self.delete_game(id).await,
            None => Err(AppError::NothingToConfirm.into()),
        }
    }

    async fn delete_marker(&self, id: MarkerId) -> Result<(), ApplicationError> {
        if let Err(err) = self.gateway.delete_marker(id).await {
            surface(&mut *self.lock().await, &err, FAILED_DELETE_MARKER);
            return Err(err);
        }

        tracing::info!(marker_id = id, "Marker deleted");
        self.reload_markers().await
    }

    async fn delete_game(&self, id: GameId) -> Result<(), ApplicationError> {
        // Every unsuccessful delete reads the same, backend rejections included.
        if let Err(err) = self.gateway.delete_game(id).await {
            tracing::warn!(game_id = id, error = %err, "{FAILED_DELETE_MAP}");
            self.lock().await.notify(FAILED_DELETE_MAP);
            return Err(err);
        }

        tracing::info!(game_id = id, "Game deleted");
        {
            let mut state = self.lock().await;
            if state.current_game_id() == Some(id) {
                state.unload_game();
            }
            state.settings_open = false;
        }
        self.load_games().await
    }

    pub async fn toggle_settings(&self) -> bool {
        let mut state = self.lock().await;
        state.settings_open = !state.settings_open;
        state.settings_open
    }

    pub async fn set_info_open(&self, open: bool) {
        self.lock().await.info_open = open;
    }
}

fn surface(state: &mut ViewerState, err: &ApplicationError, fallback: &str) {
    let message = err.user_message(fallback);
    tracing::warn!(error = %err, "{message}");
    state.notify(message);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gamemap_types::{
        game::Game,
        geometry::{ImageSize, LatLng},
        marker::{Marker, MarkerKind},
    };

    use super::*;
    use crate::test_utils::tests::{GatewayCall, MockBackendGateway};

    fn game(id: GameId, map_path: &str) -> Game {
        Game {
            id,
            name: format!("Game {id}"),
            map_path: map_path.to_string(),
        }
    }

    fn marker(id: MarkerId, game_id: GameId, title: &str) -> Marker {
        Marker {
            id,
            game_id,
            lat: id as f64 * 10.0,
            lng: id as f64 * 20.0,
            title: title.to_string(),
            kind: Some("village".to_string()),
            game_coords: None,
            note: None,
            image_path: None,
        }
    }

    fn setup() -> (Arc<MockBackendGateway>, Session) {
        let gateway = Arc::new(MockBackendGateway::new());
        gateway.add_game(
            game(1, "dungeon.png"),
            ImageSize {
                width: 1024,
                height: 768,
            },
        );
        gateway.add_game(
            game(2, "forest.png"),
            ImageSize {
                width: 512,
                height: 512,
            },
        );
        gateway.add_marker(marker(1, 1, "North Gate"));
        gateway.add_marker(marker(2, 1, "Gatehouse"));
        gateway.add_marker(marker(3, 1, "Well"));
        gateway.add_marker(marker(4, 1, "Crypt"));
        gateway.add_marker(marker(10, 2, "Hollow Oak"));

        let session = Session::new(gateway.clone(), Arc::new(Config::default()));
        (gateway, session)
    }

    #[tokio::test]
    async fn select_game_loads_image_and_markers() {
        let (gateway, session) = setup();
        session.load_games().await.unwrap();
        session.select_game(1).await.unwrap();

        session
            .read(|state| {
                let overlay = state.map.overlay().unwrap();
                assert_eq!(overlay.url, "/maps/dungeon.png");
                assert_eq!(
                    <[[f64; 2]; 2]>::from(overlay.bounds),
                    [[0.0, 0.0], [768.0, 1024.0]]
                );
                assert_eq!(state.map.pin_count(), 4);
                assert_eq!(state.sidebar_view.rows().count(), 4);
            })
            .await;

        assert_eq!(
            gateway.calls(),
            vec![
                GatewayCall::ListGames,
                GatewayCall::MapImageSize("dungeon.png".to_string()),
                GatewayCall::ListMarkers(1),
            ]
        );

        let view = session
            .set_sidebar_options(SidebarOptions {
                filter_text: "gate".to_string(),
                ..Default::default()
            })
            .await;
        assert_eq!(view.visible.len(), 2);

        session
            .read(|state| {
                assert_eq!(state.map.visible_ids(), view.visible);
                assert_eq!(state.store.len(), 4);
                assert_eq!(state.map.pin_count(), 4);
            })
            .await;
    }

    #[tokio::test]
    async fn broken_image_leaves_map_empty() {
        let (gateway, session) = setup();
        gateway.break_image("dungeon.png");
        session.load_games().await.unwrap();

        session.select_game(1).await.unwrap();

        session
            .read(|state| {
                assert!(state.map.overlay().is_none());
                assert_eq!(state.map.pin_count(), 0);
                assert_eq!(state.current_game_id(), Some(1));
            })
            .await;
        assert!(!gateway.calls().contains(&GatewayCall::ListMarkers(1)));
    }

    #[tokio::test]
    async fn stale_marker_list_is_discarded() {
        let (gateway, session) = setup();
        let session = Arc::new(session);
        session.load_games().await.unwrap();

        let release = gateway.hold_markers(1);
        let first = {
            let session = session.clone();
            tokio::spawn(async move { session.select_game(1).await })
        };

        while !gateway.calls().contains(&GatewayCall::ListMarkers(1)) {
            tokio::task::yield_now().await;
        }

        session.select_game(2).await.unwrap();
        release.notify_one();
        first.await.unwrap().unwrap();

        session
            .read(|state| {
                assert_eq!(state.current_game_id(), Some(2));
                let ids: Vec<_> = state.store.markers().iter().map(|m| m.id).collect();
                assert_eq!(ids, vec![10]);
                assert_eq!(state.map.overlay().unwrap().url, "/maps/forest.png");
            })
            .await;
    }

    #[tokio::test]
    async fn stale_map_image_is_discarded() {
        let (gateway, session) = setup();
        let session = Arc::new(session);
        session.load_games().await.unwrap();

        let release = gateway.hold_image("dungeon.png");
        let first = {
            let session = session.clone();
            tokio::spawn(async move { session.select_game(1).await })
        };

        while !gateway
            .calls()
            .contains(&GatewayCall::MapImageSize("dungeon.png".to_string()))
        {
            tokio::task::yield_now().await;
        }

        session.select_game(2).await.unwrap();
        release.notify_one();
        first.await.unwrap().unwrap();

        assert!(!gateway.calls().contains(&GatewayCall::ListMarkers(1)));
        session
            .read(|state| {
                assert_eq!(state.current_game_id(), Some(2));
                assert_eq!(state.map.overlay().unwrap().url, "/maps/forest.png");
                let ids: Vec<_> = state.store.markers().iter().map(|m| m.id).collect();
                assert_eq!(ids, vec![10]);
            })
            .await;
    }

    #[tokio::test]
    async fn map_click_requires_game_and_modifier() {
        let (_gateway, session) = setup();
        let click = MapClick {
            position: LatLng::new(3.0, 4.0),
            modifier: true,
        };

        assert!(!session.handle_map_click(click).await);

        session.load_games().await.unwrap();
        session.select_game(1).await.unwrap();
        assert!(
            !session
                .handle_map_click(MapClick {
                    modifier: false,
                    ..click
                })
                .await
        );
        assert!(session.handle_map_click(click).await);

        session
            .read(|state| {
                assert!(state.marker_form.open);
                assert_eq!(state.marker_form.fields.id, None);
                assert_eq!(state.marker_form.fields.lat, 3.0);
            })
            .await;
    }

    #[tokio::test]
    async fn new_marker_is_created_on_current_game() {
        let (gateway, session) = setup();
        session.load_games().await.unwrap();
        session.select_game(1).await.unwrap();

        let draft = MarkerDraft {
            title: "Secret Door".to_string(),
            kind: MarkerKind::Danger,
            ..MarkerDraft::at(LatLng::new(5.0, 5.0))
        };
        session.submit_marker_form(None, draft).await.unwrap();

        assert!(gateway.calls().contains(&GatewayCall::CreateMarker {
            game_id: 1,
            title: "Secret Door".to_string()
        }));
        session
            .read(|state| {
                assert!(!state.marker_form.open);
                assert_eq!(state.store.len(), 5);
                assert_eq!(state.map.pin_count(), 5);
            })
            .await;
    }

    #[tokio::test]
    async fn edited_marker_is_updated_by_id() {
        let (gateway, session) = setup();
        session.load_games().await.unwrap();
        session.select_game(1).await.unwrap();

        session.dispatch(MarkerAction::Edit(3)).await.unwrap();
        let (id, mut draft) = session
            .read(|state| {
                let fields = &state.marker_form.fields;
                (
                    fields.id,
                    MarkerDraft {
                        title: fields.title.clone(),
                        ..MarkerDraft::at(LatLng::new(fields.lat, fields.lng))
                    },
                )
            })
            .await;
        draft.title = "Dry Well".to_string();

        session.submit_marker_form(id, draft).await.unwrap();

        assert!(gateway.calls().contains(&GatewayCall::UpdateMarker {
            id: 3,
            title: "Dry Well".to_string()
        }));
        assert!(
            !gateway
                .calls()
                .iter()
                .any(|call| matches!(call, GatewayCall::CreateMarker { .. }))
        );
        session
            .read(|state| assert_eq!(state.store.get(3).unwrap().title, "Dry Well"))
            .await;
    }

    #[tokio::test]
    async fn failed_marker_save_keeps_form_open() {
        let (gateway, session) = setup();
        session.load_games().await.unwrap();
        session.select_game(1).await.unwrap();
        session.dispatch(MarkerAction::Edit(1)).await.unwrap();
        gateway.fail("update_marker");

        let result = session
            .submit_marker_form(Some(1), MarkerDraft::default())
            .await;

        assert!(result.is_err());
        assert!(session.read(|state| state.marker_form.open).await);
        let notices = session.take_notices().await;
        assert_eq!(notices[0].message, "Failed to save marker.");
    }

    #[tokio::test]
    async fn marker_delete_needs_confirmation() {
        let (gateway, session) = setup();
        session.load_games().await.unwrap();
        session.select_game(1).await.unwrap();

        session.dispatch(MarkerAction::Delete(2)).await.unwrap();
        assert!(!gateway.calls().contains(&GatewayCall::DeleteMarker(2)));
        assert_eq!(
            session.read(|state| state.pending.clone()).await,
            Some(ConfirmPrompt::delete_marker(2))
        );

        session.confirm().await.unwrap();

        assert!(gateway.calls().contains(&GatewayCall::DeleteMarker(2)));
        session
            .read(|state| {
                assert!(state.pending.is_none());
                assert!(state.store.get(2).is_none());
                assert!(state.map.pin(2).is_none());
            })
            .await;
    }

    #[tokio::test]
    async fn cancelled_confirmation_sends_nothing() {
        let (gateway, session) = setup();
        session.load_games().await.unwrap();
        session.select_game(1).await.unwrap();

        session.request_marker_delete(2).await.unwrap();
        session.cancel_confirmation().await;

        assert!(matches!(
            session.confirm().await,
            Err(ApplicationError::App(AppError::NothingToConfirm))
        ));
        assert!(!gateway.calls().contains(&GatewayCall::DeleteMarker(2)));
    }

    #[tokio::test]
    async fn deleting_game_clears_viewer() {
        let (gateway, session) = setup();
        session.load_games().await.unwrap();
        session.select_game(1).await.unwrap();
        session.toggle_settings().await;

        session.request_game_delete().await.unwrap();
        session.confirm().await.unwrap();

        session
            .read(|state| {
                assert!(state.current_game.is_none());
                assert!(state.map.overlay().is_none());
                assert_eq!(state.map.pin_count(), 0);
                assert!(state.sidebar_view.is_empty());
                assert!(!state.settings_open);
                assert_eq!(state.games.len(), 1);
            })
            .await;

        let before = gateway.calls().len();
        session.reload_markers().await.unwrap();
        assert_eq!(gateway.calls().len(), before);
    }

    #[tokio::test]
    async fn in_flight_markers_for_deleted_game_are_dropped() {
        let (gateway, session) = setup();
        let session = Arc::new(session);
        session.load_games().await.unwrap();
        session.select_game(1).await.unwrap();

        let release = gateway.hold_markers(1);
        let reload = {
            let session = session.clone();
            tokio::spawn(async move { session.reload_markers().await })
        };
        while gateway
            .calls()
            .iter()
            .filter(|call| **call == GatewayCall::ListMarkers(1))
            .count()
            < 2
        {
            tokio::task::yield_now().await;
        }

        session.request_game_delete().await.unwrap();
        session.confirm().await.unwrap();
        release.notify_one();
        reload.await.unwrap().unwrap();

        session
            .read(|state| {
                assert!(state.store.is_empty());
                assert_eq!(state.map.pin_count(), 0);
            })
            .await;
    }

    #[tokio::test]
    async fn game_delete_without_loaded_map_is_refused_locally() {
        let (gateway, session) = setup();

        let result = session.request_game_delete().await;

        assert!(matches!(
            result,
            Err(ApplicationError::App(AppError::NoMapLoaded))
        ));
        assert!(gateway.calls().is_empty());
        let notices = session.take_notices().await;
        assert_eq!(notices[0].message, "No map is currently loaded.");
    }

    #[tokio::test]
    async fn rejected_game_keeps_form_open_with_backend_message() {
        let (gateway, session) = setup();
        gateway.reject_games_with("Name and map_path required");
        session.open_game_form().await;

        let result = session
            .submit_game_form(NewGame {
                name: "Caves".to_string(),
                map_path: String::new(),
            })
            .await;

        assert!(result.is_err());
        session
            .read(|state| {
                assert!(state.game_form.open);
                assert_eq!(state.game_form.fields.name, "Caves");
            })
            .await;
        assert_eq!(
            session.take_notices().await[0].message,
            "Name and map_path required"
        );
    }

    #[tokio::test]
    async fn created_game_closes_form_and_reloads_list() {
        let (gateway, session) = setup();
        session.load_games().await.unwrap();
        session.open_game_form().await;

        session
            .submit_game_form(NewGame {
                name: "Caves".to_string(),
                map_path: "caves.png".to_string(),
            })
            .await
            .unwrap();

        session
            .read(|state| {
                assert!(!state.game_form.open);
                assert_eq!(state.game_form.fields, NewGame::default());
                assert_eq!(state.games.len(), 3);
            })
            .await;
        assert_eq!(
            gateway
                .calls()
                .iter()
                .filter(|call| **call == GatewayCall::ListGames)
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn network_failure_on_game_delete_uses_generic_notice() {
        let (gateway, session) = setup();
        session.load_games().await.unwrap();
        session.select_game(1).await.unwrap();
        gateway.fail("delete_game");

        session.request_game_delete().await.unwrap();
        assert!(session.confirm().await.is_err());

        assert_eq!(
            session.take_notices().await[0].message,
            "Failed to delete map."
        );
        assert_eq!(session.read(|state| state.current_game_id()).await, Some(1));
    }

    #[tokio::test]
    async fn rejected_game_delete_uses_generic_notice() {
        let (gateway, session) = setup();
        session.load_games().await.unwrap();
        session.select_game(1).await.unwrap();
        // Removed behind the viewer's back; the backend answers "Game not found".
        gateway.delete_game(1).await.unwrap();

        session.request_game_delete().await.unwrap();
        let err = session.confirm().await.unwrap_err();
        assert!(err.is_rejection());

        assert_eq!(
            session.take_notices().await[0].message,
            "Failed to delete map."
        );
    }

    #[tokio::test]
    async fn focus_uses_sidebar_zoom() {
        let (_gateway, session) = setup();
        session.load_games().await.unwrap();
        session.select_game(1).await.unwrap();
        assert_eq!(session.set_sidebar_zoom(5).await, 2);

        session.dispatch(MarkerAction::Focus(2)).await.unwrap();

        let scene = session.map_scene().await;
        assert_eq!(
            scene.view,
            Some(crate::map_renderer::ViewCommand::FlyTo {
                center: LatLng::new(20.0, 40.0),
                zoom: 2
            })
        );
    }
}
