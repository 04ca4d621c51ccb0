use async_trait::async_trait;
use image::ImageReader;
use serde::de::DeserializeOwned;
use std::io::Cursor;

use gamemap_app::gateway::BackendGateway;
use gamemap_types::{
    errors::{AppError, ApplicationError, GatewayError},
    game::{Game, GameId, NewGame, map_url},
    geometry::ImageSize,
    marker::{Marker, MarkerDraft, MarkerId},
};

use crate::models::{CreateGameResponse, CreatedMarker, ErrorBody, marker_form};

/// Talks to the REST backend over HTTP.
#[derive(Clone)]
pub struct HttpBackendGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackendGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and turns a non-2xx answer into an error: a JSON
    /// `{"error": ...}` body becomes a rejection carrying that message,
    /// anything else a status error.
    async fn send(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApplicationError> {
        let response = request.send().await.map_err(network_error)?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(path, status = status.as_u16(), body = %body, "Backend refused request");

        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(ErrorBody { error }) => Err(AppError::Rejected(error).into()),
            Err(_) => Err(GatewayError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            }
            .into()),
        }
    }

    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ApplicationError> {
        let bytes = response.bytes().await.map_err(network_error)?;

        serde_json::from_slice(&bytes).map_err(|e| {
            GatewayError::Decode {
                path: path.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl BackendGateway for HttpBackendGateway {
    async fn list_games(&self) -> Result<Vec<Game>, ApplicationError> {
        let path = "/api/games";
        let response = self.send(path, self.client.get(self.url(path))).await?;
        Self::decode(path, response).await
    }

    async fn create_game(&self, game: &NewGame) -> Result<Game, ApplicationError> {
        let path = "/api/games";
        let response = self
            .send(path, self.client.post(self.url(path)).json(game))
            .await?;

        match Self::decode(path, response).await? {
            CreateGameResponse::Created(game) => Ok(game),
            CreateGameResponse::Rejected(ErrorBody { error }) => {
                Err(AppError::Rejected(error).into())
            }
        }
    }

    async fn delete_game(&self, id: GameId) -> Result<(), ApplicationError> {
        let path = format!("/api/games/{id}");
        self.send(&path, self.client.delete(self.url(&path))).await?;
        Ok(())
    }

    async fn list_markers(&self, game_id: GameId) -> Result<Vec<Marker>, ApplicationError> {
        let path = format!("/api/markers/{game_id}");
        let response = self.send(&path, self.client.get(self.url(&path))).await?;
        Self::decode(&path, response).await
    }

    async fn create_marker(
        &self,
        game_id: GameId,
        draft: &MarkerDraft,
    ) -> Result<MarkerId, ApplicationError> {
        let path = "/api/markers";
        let form = marker_form(Some(game_id), draft).map_err(network_error)?;
        let response = self
            .send(path, self.client.post(self.url(path)).multipart(form))
            .await?;

        let created: CreatedMarker = Self::decode(path, response).await?;
        Ok(created.id)
    }

    async fn update_marker(
        &self,
        id: MarkerId,
        draft: &MarkerDraft,
    ) -> Result<(), ApplicationError> {
        let path = format!("/api/markers/{id}");
        let form = marker_form(None, draft).map_err(network_error)?;
        self.send(&path, self.client.put(self.url(&path)).multipart(form))
            .await?;
        Ok(())
    }

    async fn delete_marker(&self, id: MarkerId) -> Result<(), ApplicationError> {
        let path = format!("/api/markers/{id}");
        self.send(&path, self.client.delete(self.url(&path))).await?;
        Ok(())
    }

    async fn map_image_size(&self, map_path: &str) -> Result<ImageSize, ApplicationError> {
        let path = map_url(map_path);
        let response = self.send(&path, self.client.get(self.url(&path))).await?;
        let bytes = response.bytes().await.map_err(network_error)?;

        Ok(probe_dimensions(&path, &bytes)?)
    }
}

/// Reads the pixel size from the image header without decoding the pixels.
fn probe_dimensions(path: &str, bytes: &[u8]) -> Result<ImageSize, GatewayError> {
    let image_error = |reason: String| GatewayError::Image {
        path: path.to_string(),
        reason,
    };

    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| image_error(e.to_string()))?
        .into_dimensions()
        .map_err(|e| image_error(e.to_string()))?;

    Ok(ImageSize { width, height })
}

fn network_error(e: reqwest::Error) -> ApplicationError {
    GatewayError::Network(e.to_string()).into()
}
