#[cfg(any(test, feature = "test-utils"))]
#[cfg(not(tarpaulin_include))]
pub mod tests {
    use async_trait::async_trait;
    use std::{
        collections::{HashMap, HashSet},
        sync::{Arc, Mutex},
    };
    use tokio::sync::Notify;

    use gamemap_types::{
        errors::{AppError, ApplicationError, GatewayError},
        game::{Game, GameId, NewGame},
        geometry::ImageSize,
        marker::{Marker, MarkerDraft, MarkerId},
    };

    use crate::gateway::BackendGateway;

    /// Every request the mock received, in order.
    #[derive(Debug, Clone, PartialEq)]
    pub enum GatewayCall {
        ListGames,
        CreateGame(String),
        DeleteGame(GameId),
        ListMarkers(GameId),
        CreateMarker { game_id: GameId, title: String },
        UpdateMarker { id: MarkerId, title: String },
        DeleteMarker(MarkerId),
        MapImageSize(String),
    }

    /// In-memory backend. Clones share the same data, so a test can keep a
    /// handle while the session owns another.
    #[derive(Default, Clone)]
    pub struct MockBackendGateway {
        games: Arc<Mutex<Vec<Game>>>,
        markers: Arc<Mutex<Vec<Marker>>>,
        images: Arc<Mutex<HashMap<String, ImageSize>>>,
        calls: Arc<Mutex<Vec<GatewayCall>>>,
        failing: Arc<Mutex<HashSet<&'static str>>>,
        game_rejection: Arc<Mutex<Option<String>>>,
        held_markers: Arc<Mutex<HashMap<GameId, Arc<Notify>>>>,
        held_images: Arc<Mutex<HashMap<String, Arc<Notify>>>>,
    }

    impl MockBackendGateway {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add_game(&self, game: Game, size: ImageSize) {
            self.images
                .lock()
                .unwrap()
                .insert(game.map_path.clone(), size);
            self.games.lock().unwrap().push(game);
        }

        pub fn add_marker(&self, marker: Marker) {
            self.markers.lock().unwrap().push(marker);
        }

        /// Makes the map image at `map_path` unreadable.
        pub fn break_image(&self, map_path: &str) {
            self.images.lock().unwrap().remove(map_path);
        }

        /// Makes `operation` (a trait method name) fail with a network error.
        pub fn fail(&self, operation: &'static str) {
            self.failing.lock().unwrap().insert(operation);
        }

        /// Makes game creation fail with a backend validation message.
        pub fn reject_games_with(&self, message: &str) {
            *self.game_rejection.lock().unwrap() = Some(message.to_string());
        }

        /// Parks the next marker listing for `game_id` until the returned
        /// handle is notified.
        pub fn hold_markers(&self, game_id: GameId) -> Arc<Notify> {
            let notify = Arc::new(Notify::new());
            self.held_markers
                .lock()
                .unwrap()
                .insert(game_id, notify.clone());
            notify
        }

        /// Parks the next size probe of `map_path` until the returned handle
        /// is notified.
        pub fn hold_image(&self, map_path: &str) -> Arc<Notify> {
            let notify = Arc::new(Notify::new());
            self.held_images
                .lock()
                .unwrap()
                .insert(map_path.to_string(), notify.clone());
            notify
        }

        pub fn calls(&self) -> Vec<GatewayCall> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: GatewayCall, operation: &str) -> Result<(), ApplicationError> {
            self.calls.lock().unwrap().push(call);

            if self.failing.lock().unwrap().contains(operation) {
                return Err(GatewayError::Network(format!("{operation}: connection refused")).into());
            }
            Ok(())
        }

        fn apply_draft(marker: &mut Marker, draft: &MarkerDraft) {
            marker.lat = draft.lat;
            marker.lng = draft.lng;
            marker.title = draft.title.clone();
            marker.kind = Some(draft.kind.as_str().to_string());
            marker.game_coords = draft.game_coords.clone();
            marker.note = draft.note.clone();
            if let Some(image) = &draft.image {
                marker.image_path = Some(format!("/static/uploads/{}", image.file_name));
            }
        }
    }

    #[async_trait]
    impl BackendGateway for MockBackendGateway {
        async fn list_games(&self) -> Result<Vec<Game>, ApplicationError> {
            self.record(GatewayCall::ListGames, "list_games")?;
            Ok(self.games.lock().unwrap().clone())
        }

        async fn create_game(&self, game: &NewGame) -> Result<Game, ApplicationError> {
            self.record(GatewayCall::CreateGame(game.name.clone()), "create_game")?;

            if let Some(message) = self.game_rejection.lock().unwrap().clone() {
                return Err(AppError::Rejected(message).into());
            }

            let mut games = self.games.lock().unwrap();
            let game = Game {
                id: games.iter().map(|g| g.id).max().unwrap_or(0) + 1,
                name: game.name.clone(),
                map_path: game.map_path.clone(),
            };
            games.push(game.clone());
            Ok(game)
        }

        async fn delete_game(&self, id: GameId) -> Result<(), ApplicationError> {
            self.record(GatewayCall::DeleteGame(id), "delete_game")?;

            let mut games = self.games.lock().unwrap();
            if !games.iter().any(|g| g.id == id) {
                return Err(AppError::Rejected("Game not found".to_string()).into());
            }
            games.retain(|g| g.id != id);
            drop(games);
            self.markers.lock().unwrap().retain(|m| m.game_id != id);
            Ok(())
        }

        async fn list_markers(&self, game_id: GameId) -> Result<Vec<Marker>, ApplicationError> {
            self.record(GatewayCall::ListMarkers(game_id), "list_markers")?;

            let held = self.held_markers.lock().unwrap().remove(&game_id);
            if let Some(notify) = held {
                notify.notified().await;
            }

            Ok(self
                .markers
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.game_id == game_id)
                .cloned()
                .collect())
        }

        async fn create_marker(
            &self,
            game_id: GameId,
            draft: &MarkerDraft,
        ) -> Result<MarkerId, ApplicationError> {
            self.record(
                GatewayCall::CreateMarker {
                    game_id,
                    title: draft.title.clone(),
                },
                "create_marker",
            )?;

            let mut markers = self.markers.lock().unwrap();
            let mut marker = Marker {
                id: markers.iter().map(|m| m.id).max().unwrap_or(0) + 1,
                game_id,
                lat: 0.0,
                lng: 0.0,
                title: String::new(),
                kind: None,
                game_coords: None,
                note: None,
                image_path: None,
            };
            Self::apply_draft(&mut marker, draft);
            let id = marker.id;
            markers.push(marker);
            Ok(id)
        }

        async fn update_marker(
            &self,
            id: MarkerId,
            draft: &MarkerDraft,
        ) -> Result<(), ApplicationError> {
            self.record(
                GatewayCall::UpdateMarker {
                    id,
                    title: draft.title.clone(),
                },
                "update_marker",
            )?;

            let mut markers = self.markers.lock().unwrap();
            let marker = markers
                .iter_mut()
                .find(|m| m.id == id)
                .ok_or(AppError::MarkerNotFound(id))?;
            Self::apply_draft(marker, draft);
            Ok(())
        }

        async fn delete_marker(&self, id: MarkerId) -> Result<(), ApplicationError> {
            self.record(GatewayCall::DeleteMarker(id), "delete_marker")?;
            self.markers.lock().unwrap().retain(|m| m.id != id);
            Ok(())
        }

        async fn map_image_size(&self, map_path: &str) -> Result<ImageSize, ApplicationError> {
            self.record(
                GatewayCall::MapImageSize(map_path.to_string()),
                "map_image_size",
            )?;

            let held = self.held_images.lock().unwrap().remove(map_path);
            if let Some(notify) = held {
                notify.notified().await;
            }

            self.images
                .lock()
                .unwrap()
                .get(map_path)
                .copied()
                .ok_or_else(|| {
                    GatewayError::Image {
                        path: map_path.to_string(),
                        reason: "not found".to_string(),
                    }
                    .into()
                })
        }
    }
}
