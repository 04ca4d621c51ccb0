use thiserror::Error;

pub mod app_error;
pub mod gateway_error;

pub use app_error::AppError;
pub use gateway_error::GatewayError;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    /// Errors carrying a message the backend (or the viewer itself) wants shown verbatim.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ApplicationError::App(AppError::Rejected(_))
                | ApplicationError::App(AppError::NoMapLoaded)
                | ApplicationError::App(AppError::NoGameSelected)
        )
    }

    /// Text shown to the user. Rejections keep their own message, anything else
    /// collapses into `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        if self.is_rejection() {
            self.to_string()
        } else {
            fallback.to_string()
        }
    }
}
