use axum::response::Redirect;

use gamemap_types::errors::ApplicationError;

/// Post/redirect/get: every action lands back on the viewer page, which
/// renders whatever notice the action left behind.
pub fn back_to_viewer<T>(action: &str, result: Result<T, ApplicationError>) -> Redirect {
    if let Err(err) = result {
        tracing::debug!(action, error = %err, "Viewer action did not complete");
    }

    Redirect::to("/")
}
