//! Handler for publishing an uploaded asset to the storage network.

use axum::extract::{Multipart, State};
use axum::Json;
use mintpress_core::types::AssetDescriptor;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// MIME type assumed when the client sends none.
const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Typed response for the upload endpoint.
#[derive(Debug, Serialize)]
pub struct UploadResult {
    pub metadata_uri: String,
}

/// POST /api/upload
///
/// Accept a multipart form with an `image` file and `name` / `description`
/// text fields, publish it, and return the metadata URI.
pub async fn upload_asset(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<UploadResult>>> {
    let mut asset: Option<AssetDescriptor> = None;
    let mut name: Option<String> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "image" => {
                let original_name = field.file_name().unwrap_or("upload").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or(FALLBACK_MIME_TYPE)
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                asset = Some(AssetDescriptor::new(data.to_vec(), original_name, mime_type));
            }
            "name" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                name = Some(text);
            }
            "description" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                description = Some(text);
            }
            _ => {} // ignore unknown fields
        }
    }

    let asset =
        asset.ok_or_else(|| AppError::BadRequest("Missing required 'image' field".into()))?;

    // Missing text fields fall through to the pipeline's own validation.
    let locator = state
        .pipeline
        .publish(
            &asset,
            name.as_deref().unwrap_or(""),
            description.as_deref().unwrap_or(""),
        )
        .await?;

    Ok(Json(DataResponse {
        data: UploadResult {
            metadata_uri: locator.into_string(),
        },
    }))
}
