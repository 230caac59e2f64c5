//! Route definitions for asset publication.

use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// Upload routes, merged at the API root.
///
/// ```text
/// POST /upload            -> upload_asset
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/upload", post(upload::upload_asset))
}
