use thiserror::Error;

use crate::{game::GameId, marker::MarkerId};

/// Errors for viewer logic (selection, forms, confirmations).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No map is currently loaded.")]
    NoMapLoaded,

    #[error("Select a game before adding markers.")]
    NoGameSelected,

    #[error("Game {0} not found")]
    GameNotFound(GameId),

    #[error("Marker {0} not found")]
    MarkerNotFound(MarkerId),

    #[error("Nothing to confirm")]
    NothingToConfirm,

    /// Message reported by the backend, e.g. a validation failure.
    #[error("{0}")]
    Rejected(String),
}
