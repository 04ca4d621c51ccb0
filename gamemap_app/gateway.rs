use gamemap_types::{
    errors::ApplicationError,
    game::{Game, GameId, NewGame},
    geometry::ImageSize,
    marker::{Marker, MarkerDraft, MarkerId},
};

/// The REST backend owning games, markers and map images.
///
/// Implementations map backend validation failures to
/// `AppError::Rejected` and transport failures to `GatewayError`.
#[async_trait::async_trait]
pub trait BackendGateway: Send + Sync {
    /// `GET /api/games`
    async fn list_games(&self) -> Result<Vec<Game>, ApplicationError>;

    /// `POST /api/games`
    async fn create_game(&self, game: &NewGame) -> Result<Game, ApplicationError>;

    /// `DELETE /api/games/{id}`, cascades to the game's markers.
    async fn delete_game(&self, id: GameId) -> Result<(), ApplicationError>;

    /// `GET /api/markers/{game_id}`
    async fn list_markers(&self, game_id: GameId) -> Result<Vec<Marker>, ApplicationError>;

    /// `POST /api/markers`
    async fn create_marker(
        &self,
        game_id: GameId,
        draft: &MarkerDraft,
    ) -> Result<MarkerId, ApplicationError>;

    /// `PUT /api/markers/{id}`
    async fn update_marker(&self, id: MarkerId, draft: &MarkerDraft)
    -> Result<(), ApplicationError>;

    /// `DELETE /api/markers/{id}`
    async fn delete_marker(&self, id: MarkerId) -> Result<(), ApplicationError>;

    /// Loads `/maps/{map_path}` out-of-band and reports its pixel dimensions.
    async fn map_image_size(&self, map_path: &str) -> Result<ImageSize, ApplicationError>;
}
