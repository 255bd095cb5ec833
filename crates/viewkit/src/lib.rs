// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! # viewkit
//!
//! Named HTML views served from a single endpoint, as full pages or fragments.
//!
//! An application registers views (a Tera template defining a `body` block
//! plus a data source) and mounts them on an axum router. The first load of
//! the endpoint returns the main page: a shared shell with the main layout,
//! which then fetches fragments with the `X-Content-Request: true` header and
//! a `view=<name>` query parameter.
//!
//! ## Features
//!
//! - Explicit views and data sources registered from code
//! - Template discovery from a `templates/` folder, paired with sources by name
//! - A shared shell with every stylesheet of the static directory linked in
//! - Static files, favicon and built-in assets mounted alongside
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use viewkit::{Configuration, FileSystemTree, Viewer};
//!
//! let mut viewer = Viewer::new(Configuration::new("app"), FileSystemTree::new("."));
//! viewer.add_source("todos", |req| Ok(serde_json::json!({ "page": req.query("page") })));
//! let app = viewer.inject(axum::Router::new())?;
//! ```

/// Built-in assets and favicon handling.
pub mod assets;
/// Viewer configuration.
pub mod config;
/// Full-page and fragment dispatch.
pub mod dispatch;
/// Error types.
pub mod error;
/// View registry and data sources.
pub mod registry;
/// Request abstraction handed to data sources.
pub mod request;
/// The shared HTML shell.
pub mod shell;
/// Stylesheet aggregation.
pub mod styles;
/// Read-only asset trees.
pub mod tree;
/// Registration API.
pub mod viewer;
/// Recursive template and asset discovery.
pub mod walker;

pub use config::{Configuration, TemplateFn};
pub use dispatch::{dispatch, Mode};
pub use error::{DataError, DispatchError, RenderError, Result, ViewError};
pub use registry::{data_source, passthrough_source, DataFn, Registry, View, MAIN_VIEW};
pub use request::ViewRequest;
pub use shell::OuterShell;
pub use tree::{AssetTree, EmbeddedTree, FileSystemTree, MemoryTree, TreeEntry};
pub use viewer::Viewer;
