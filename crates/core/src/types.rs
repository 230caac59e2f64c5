//! Shared value types for the publication pipeline.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A content-addressed URI returned by an asset store, e.g.
/// `ipfs://bafy.../metadata.json`. Passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw asset bytes plus the identity the caller uploaded them under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
    pub raw_bytes: Vec<u8>,
    pub original_name: String,
    pub mime_type: String,
}

impl AssetDescriptor {
    pub fn new(
        raw_bytes: impl Into<Vec<u8>>,
        original_name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            raw_bytes: raw_bytes.into(),
            original_name: original_name.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.raw_bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_bytes.is_empty()
    }
}

/// Everything an asset store needs for one publish: descriptive metadata,
/// the asset identity, and the staged local copy of its bytes.
///
/// Built fresh for each publish call and handed to the store exactly once.
#[derive(Debug, Clone, Copy)]
pub struct MetadataEnvelope<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub asset: &'a AssetDescriptor,
    /// Path of the staged file. Only valid for the duration of the store call.
    pub staged_path: &'a Path,
}
