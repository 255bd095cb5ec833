// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Registration API for embedding applications.
//!
//! ```rust,no_run
//! use serde_json::json;
//! use viewkit::{Configuration, FileSystemTree, Viewer};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut viewer = Viewer::new(
//!     Configuration::new("/").with_title("Todos").with_start_view("todos"),
//!     FileSystemTree::new("."),
//! );
//! viewer.add_source("todos", |_| Ok(json!({ "items": ["write docs"] })));
//! viewer.add_view("about", "{% block body %}<p>About</p>{% endblock body %}", |_| Ok(json!({})))?;
//!
//! let app = viewer.inject(axum::Router::new())?;
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use axum::{routing::get, Router};
use serde_json::Value;
use tower_http::services::ServeDir;

use crate::assets::{self, ASSETS_PREFIX, FAVICON};
use crate::config::{validate_base_path, Configuration};
use crate::dispatch;
use crate::error::{DataError, Result};
use crate::registry::{data_source, Registry};
use crate::request::ViewRequest;
use crate::styles::STATIC_PREFIX;
use crate::tree::AssetTree;

/// Collects views and mounts them on a router.
///
/// Registration takes `&mut self`; [`Viewer::inject`] consumes the viewer,
/// so nothing can be registered once requests are being served.
#[derive(Debug)]
pub struct Viewer {
    registry: Registry,
}

impl Viewer {
    /// Creates a viewer discovering templates from the `templates/` folder of `templates`.
    pub fn new(config: Configuration, templates: impl AssetTree) -> Self {
        Self {
            registry: Registry::new(config, Arc::new(templates)),
        }
    }

    /// Registers a data source for a template that will be discovered later.
    pub fn add_source<F>(&mut self, name: &str, data: F) -> &mut Self
    where
        F: Fn(&ViewRequest) -> std::result::Result<Value, DataError> + Send + Sync + 'static,
    {
        self.registry.add_source(name, data_source(data));
        self
    }

    /// Registers a view from template text.
    ///
    /// The template must define a `body` block. Registering a name twice
    /// replaces the earlier view.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Template`](crate::ViewError::Template) if the
    /// template does not parse; startup should stop.
    pub fn add_view<F>(&mut self, name: &str, template: &str, data: F) -> Result<&mut Self>
    where
        F: Fn(&ViewRequest) -> std::result::Result<Value, DataError> + Send + Sync + 'static,
    {
        self.registry.add_view(name, template, data_source(data))?;
        Ok(self)
    }

    /// The registry built so far.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Registers the main view, then discovers template files.
    ///
    /// The main view goes first so that discovery can never register a
    /// reserved name.
    pub fn build(mut self) -> Result<Registry> {
        self.registry.add_main_view()?;
        let discovered = self.registry.discover()?;
        tracing::debug!(discovered, "template discovery finished");
        Ok(self.registry)
    }

    /// Builds the registry and mounts its routes on `router`.
    ///
    /// | Route               | Handler                                  |
    /// |---------------------|------------------------------------------|
    /// | `/<base_path>`      | view dispatcher                          |
    /// | `/favicon.ico`      | favicon from the static directory or 204 |
    /// | `/static/*`         | static directory                         |
    /// | `/viewkit/*`        | embedded stylesheet and layout           |
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::BasePath`](crate::ViewError::BasePath) if the base
    /// path collides with a fixed mount or contains route captures, and any
    /// error of [`Viewer::build`].
    pub fn inject<S>(self, router: Router<S>) -> Result<Router<S>>
    where
        S: Clone + Send + Sync + 'static,
    {
        validate_base_path(self.registry.config().base_path())?;
        let registry = Arc::new(self.build()?);
        let config = registry.config();
        let route = config.route();
        let static_dir = config.static_dir().to_path_buf();

        tracing::info!(
            route = %route,
            static_dir = %static_dir.display(),
            views = ?registry.view_names(),
            "mounting views"
        );

        Ok(router
            .route(&route, get(dispatch::handler).with_state(registry.clone()))
            .route(
                &format!("/{}", FAVICON),
                get(assets::favicon).with_state(Arc::new(static_dir.clone())),
            )
            .nest_service(STATIC_PREFIX, ServeDir::new(static_dir))
            .route(&format!("{}/*path", ASSETS_PREFIX), get(assets::embedded)))
    }
}
