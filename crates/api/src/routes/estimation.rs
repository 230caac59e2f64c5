//! Route definitions for minting cost estimation.

use axum::routing::get;
use axum::Router;

use crate::handlers::estimation;
use crate::state::AppState;

/// Estimation routes mounted at `/estimates`.
///
/// ```text
/// GET /single             -> estimate_single
/// GET /batch              -> estimate_batch
/// GET /collection         -> estimate_collection
/// GET /deployment         -> estimate_deployment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/single", get(estimation::estimate_single))
        .route("/batch", get(estimation::estimate_batch))
        .route("/collection", get(estimation::estimate_collection))
        .route("/deployment", get(estimation::estimate_deployment))
}
