pub mod estimation;
pub mod health;
pub mod upload;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /upload                         publish an asset (POST, multipart)
///
/// /estimates/single               single mint cost
/// /estimates/batch                one batch (?batch_size=)
/// /estimates/collection           whole collection (?collection_size=&batch_size=)
/// /estimates/deployment           contract deployment cost
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(upload::router())
        .nest("/estimates", estimation::router())
}
