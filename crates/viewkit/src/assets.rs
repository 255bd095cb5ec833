// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Built-in assets and the favicon handler.
//!
//! The crate ships its stylesheet and the main layout inside the binary.
//! They are served under `/viewkit/` and never change at runtime.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use include_dir::{include_dir, Dir};

use crate::error::{Result, ViewError};
use crate::tree::{AssetTree, EmbeddedTree};

/// The embedded asset bundle.
pub static ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// URL prefix of the embedded assets.
pub const ASSETS_PREFIX: &str = "/viewkit";

/// The main page layout.
pub const MAIN_LAYOUT: &str = "main.html";

/// The core stylesheet.
pub const STYLESHEET: &str = "style.css";

/// Favicon file name inside the static directory.
pub const FAVICON: &str = "favicon.ico";

/// Cache policy for a served favicon: one day.
pub const FAVICON_CACHE_CONTROL: &str = "public, max-age=86400";

/// Returns the embedded assets as an [`EmbeddedTree`].
pub fn tree() -> EmbeddedTree {
    EmbeddedTree::new(&ASSETS)
}

/// Returns an embedded asset as text.
pub fn text(path: &str) -> Result<&'static str> {
    ASSETS
        .get_file(path)
        .ok_or_else(|| ViewError::Asset(format!("{} is not embedded", path)))?
        .contents_utf8()
        .ok_or_else(|| ViewError::Asset(format!("{} is not valid UTF-8", path)))
}

/// Guesses a content type from a file extension.
pub fn content_type(path: &str) -> &'static str {
    let extension = path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default();
    match extension.to_ascii_lowercase().as_str() {
        "css" => "text/css; charset=utf-8",
        "html" | "htm" => "text/html; charset=utf-8",
        "js" => "text/javascript; charset=utf-8",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "png" => "image/png",
        _ => "application/octet-stream",
    }
}

/// Serves a file from the embedded bundle (`GET /viewkit/*path`).
pub async fn embedded(Path(path): Path<String>) -> Response {
    match tree().read(&path) {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type(&path))], bytes).into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Serves `favicon.ico` from the static directory (`GET /favicon.ico`).
///
/// Responds `204 No Content` when there is no favicon.
pub async fn favicon(State(static_dir): State<Arc<PathBuf>>) -> Response {
    match tokio::fs::read(static_dir.join(FAVICON)).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, content_type(FAVICON)),
                (header::CACHE_CONTROL, FAVICON_CACHE_CONTROL),
            ],
            bytes,
        )
            .into_response(),
        Err(_) => StatusCode::NO_CONTENT.into_response(),
    }
}
