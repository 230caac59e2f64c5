#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use mintpress_api::config::ServerConfig;
use mintpress_api::router::build_app_router;
use mintpress_api::state::AppState;
use mintpress_core::publication::{AssetStore, PublicationPipeline, StoreError};
use mintpress_core::types::{Locator, MetadataEnvelope};
use tower::ServiceExt;

/// Multipart boundary used by [`multipart_request`].
pub const BOUNDARY: &str = "mintpress-test-boundary";

/// Asset store stub with a call counter.
pub struct StubStore {
    result: Result<String, String>,
    calls: AtomicUsize,
}

impl StubStore {
    pub fn succeeding(locator: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(locator.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetStore for StubStore {
    async fn store(&self, _envelope: &MetadataEnvelope<'_>) -> Result<Locator, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.result {
            Ok(uri) => Ok(Locator::new(uri.clone())),
            Err(msg) => Err(msg.clone().into()),
        }
    }
}

/// Build a test `ServerConfig` with default pricing and the given staging dir.
pub fn test_config(staging_dir: &std::path::Path) -> ServerConfig {
    let mut config = ServerConfig::from_lookup(|key| match key {
        "CORS_ORIGINS" => Some("http://localhost:5173".into()),
        _ => None,
    })
    .unwrap();
    config.host = "127.0.0.1".into();
    config.port = 0;
    config.staging_dir = staging_dir.to_path_buf();
    config
}

/// A running test app plus the staging directory it writes into.
pub struct TestApp {
    pub router: Router,
    pub staging: tempfile::TempDir,
}

impl TestApp {
    pub fn staged_entries(&self) -> usize {
        std::fs::read_dir(self.staging.path()).unwrap().count()
    }
}

/// Build the full application router (same middleware as production) around
/// the given asset store.
pub fn build_test_app(store: Arc<dyn AssetStore>) -> TestApp {
    let staging = tempfile::tempdir().unwrap();
    let config = test_config(staging.path());
    let pipeline = PublicationPipeline::new(store, staging.path());
    let router = build_app_router(AppState::new(config, pipeline)).unwrap();
    TestApp { router, staging }
}

pub async fn send(app: &TestApp, request: Request<Body>) -> Response<Body> {
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &TestApp, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// One multipart part: a text field, or a file with name and content type.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        field: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

/// Build a `POST` request with a `multipart/form-data` body.
pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                field,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
