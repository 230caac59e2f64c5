//! REST client for the nft.storage `/store` endpoint.
//!
//! Uploads an image together with its ERC-1155 style metadata and returns the
//! `ipfs://` URL of the resulting `metadata.json`.

use std::time::Duration;

use async_trait::async_trait;
use mintpress_core::publication::{AssetStore, StoreError};
use mintpress_core::types::{Locator, MetadataEnvelope};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::config::StorageConfig;

/// Multipart field carrying the image file.
const IMAGE_FIELD: &str = "image";
/// Multipart field carrying the metadata JSON.
const META_FIELD: &str = "meta";

/// Errors from the storage API layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Cannot read staged asset: {0}")]
    Io(#[from] std::io::Error),

    /// The API returned a non-2xx status code.
    #[error("nft.storage API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// The API answered 2xx but reported `ok: false`.
    #[error("nft.storage rejected the upload: {0}")]
    Rejected(String),

    #[error("Malformed nft.storage response: {0}")]
    MalformedResponse(String),
}

/// Body of a `/store` response.
#[derive(Debug, Deserialize)]
pub struct StoreResponse {
    pub ok: bool,
    pub value: Option<StoredToken>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct StoredToken {
    /// Root CID of the stored token.
    pub ipnft: String,
    /// `ipfs://<cid>/metadata.json`
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub name: Option<String>,
    pub message: Option<String>,
}

/// HTTP client for the nft.storage API.
pub struct NftStorageClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NftStorageClient {
    /// Build a client with the configured request timeout.
    pub fn new(config: &StorageConfig) -> Result<Self, StorageClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(
            client,
            config.base_url.clone(),
            config.api_key.clone(),
        ))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Upload the staged image and its metadata in one `POST /store`.
    pub async fn store_token(
        &self,
        envelope: &MetadataEnvelope<'_>,
    ) -> Result<Locator, StorageClientError> {
        let bytes = tokio::fs::read(envelope.staged_path).await?;
        let image = Part::bytes(bytes)
            .file_name(envelope.asset.original_name.clone())
            .mime_str(&envelope.asset.mime_type)?;

        let form = Form::new()
            .text(META_FIELD, metadata_json(envelope).to_string())
            .part(IMAGE_FIELD, image);

        tracing::debug!(
            url = %self.base_url,
            file = %envelope.asset.original_name,
            "Uploading token to nft.storage"
        );

        let response = self
            .client
            .post(format!("{}/store", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        let body: StoreResponse = serde_json::from_str(&text)
            .map_err(|e| StorageClientError::MalformedResponse(e.to_string()))?;

        locator_from_response(body)
    }

    /// Return the response unchanged on 2xx, or an [`StorageClientError::ApiError`]
    /// with the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, StorageClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StorageClientError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl AssetStore for NftStorageClient {
    async fn store(&self, envelope: &MetadataEnvelope<'_>) -> Result<Locator, StoreError> {
        Ok(self.store_token(envelope).await?)
    }
}

/// Metadata JSON for the `meta` field. The image value is `null`; the API
/// substitutes the uploaded file's IPFS URL for it.
pub fn metadata_json(envelope: &MetadataEnvelope<'_>) -> serde_json::Value {
    serde_json::json!({
        "name": envelope.name,
        "description": envelope.description,
        "image": null,
    })
}

/// Extract the metadata URL from a decoded `/store` response.
pub fn locator_from_response(body: StoreResponse) -> Result<Locator, StorageClientError> {
    if !body.ok {
        let message = body
            .error
            .map(|e| match (e.name, e.message) {
                (Some(name), Some(message)) => format!("{name}: {message}"),
                (None, Some(message)) => message,
                (Some(name), None) => name,
                (None, None) => "unknown error".to_string(),
            })
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(StorageClientError::Rejected(message));
    }

    match body.value {
        Some(token) if !token.url.is_empty() => {
            tracing::debug!(ipnft = %token.ipnft, "Token stored");
            Ok(Locator::new(token.url))
        }
        _ => Err(StorageClientError::MalformedResponse(
            "response has no metadata url".into(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
