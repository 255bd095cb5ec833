// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! The view registry.
//!
//! A view is a template paired with a data source. Every view is compiled
//! into its own [`Tera`] instance holding:
//!
//! - the shared shell ([`SHELL_TEMPLATE`])
//! - a bare parent that renders nothing but the `body` block
//! - the view as a child of the shell (full page)
//! - the view as a child of the bare parent (fragment)
//!
//! so a view can be rendered either as a complete document or as just its
//! body, and views never share parsed state.
//!
//! Data sources are stored separately from views. A source registered with
//! [`Registry::add_source`] is picked up later by [`Registry::discover`] when
//! a template file with the same base name is found.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tera::{Context, Tera};

use crate::assets;
use crate::config::Configuration;
use crate::error::{DataError, RenderError, Result, ViewError};
use crate::request::ViewRequest;
use crate::shell::{OuterShell, BODY_BLOCK, SHELL_TEMPLATE};
use crate::styles::aggregate_styles;
use crate::tree::{AssetTree, FileSystemTree};
use crate::walker::{overrides, view_name, walk};

/// Name of the view served for full-page requests.
pub const MAIN_VIEW: &str = "main";

/// Folder of the template tree searched by discovery.
pub const TEMPLATES_DIR: &str = "templates";

/// Query parameter naming the view to render.
pub const VIEW_PARAM: &str = "view";

/// Key under which the main view exposes the query parameters.
pub const PARAMS_KEY: &str = "Params";

/// Context key for data sources that return something other than an object.
pub const DATA_KEY: &str = "data";

const BARE_TEMPLATE: &str = "viewkit/bare.html";
const PAGE_TEMPLATE: &str = "view/page.html";
const FRAGMENT_TEMPLATE: &str = "view/fragment.html";

/// A request-scoped data producer.
pub type DataFn = Arc<dyn Fn(&ViewRequest) -> std::result::Result<Value, DataError> + Send + Sync>;

/// Wraps a closure as a [`DataFn`].
pub fn data_source<F>(f: F) -> DataFn
where
    F: Fn(&ViewRequest) -> std::result::Result<Value, DataError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Data source exposing the request's query parameters as the template context.
pub fn passthrough_source() -> DataFn {
    data_source(|request| Ok(Value::Object(request.query_object())))
}

/// A compiled, render-ready view.
pub struct View {
    name: String,
    tera: Tera,
    shell: OuterShell,
    source: DataFn,
}

impl View {
    /// The view name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renders the complete document: shell plus this view's body.
    pub fn render_page(&self, request: &ViewRequest) -> std::result::Result<String, RenderError> {
        self.render(PAGE_TEMPLATE, request)
    }

    /// Renders only this view's body.
    pub fn render_fragment(&self, request: &ViewRequest) -> std::result::Result<String, RenderError> {
        self.render(FRAGMENT_TEMPLATE, request)
    }

    fn render(&self, template: &str, request: &ViewRequest) -> std::result::Result<String, RenderError> {
        let data = (self.source)(request)?;
        let mut context = to_context(data);
        self.shell.insert_into(&mut context);
        Ok(self.tera.render(template, &context)?)
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Builds a template context from a data source's output.
///
/// Object keys become top-level variables; any other value is exposed as `data`.
fn to_context(data: Value) -> Context {
    let mut context = Context::new();
    match data {
        Value::Object(map) => {
            for (key, value) in map {
                context.insert(key, &value);
            }
        }
        other => context.insert(DATA_KEY, &other),
    }
    context
}

/// Registry of named views and data sources.
///
/// Built during a single-threaded registration phase, then shared read-only
/// with request handlers.
pub struct Registry {
    config: Configuration,
    shell: OuterShell,
    templates: Arc<dyn AssetTree>,
    views: HashMap<String, View>,
    sources: HashMap<String, DataFn>,
}

impl Registry {
    /// Creates an empty registry.
    ///
    /// The shell is built here, with a `<link>` for every stylesheet found
    /// in the configured static directory.
    pub fn new(config: Configuration, templates: Arc<dyn AssetTree>) -> Self {
        let styles = aggregate_styles(&FileSystemTree::new(config.static_dir()));
        let shell = OuterShell::build(config.title(), &styles);
        Self {
            config,
            shell,
            templates,
            views: HashMap::new(),
            sources: HashMap::new(),
        }
    }

    /// The configuration this registry was built with.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// The shell every view extends.
    pub fn shell(&self) -> &OuterShell {
        &self.shell
    }

    /// Looks up a view by name.
    pub fn get(&self, name: &str) -> Option<&View> {
        self.views.get(name)
    }

    /// Returns true if a view is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.views.contains_key(name)
    }

    /// Registered view names, sorted.
    pub fn view_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.views.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Stores a data source without compiling a template.
    pub fn add_source(&mut self, name: &str, data: DataFn) {
        self.sources.insert(name.to_string(), data);
    }

    /// Compiles `template` as a child of the shell and registers it as `name`.
    ///
    /// The data source is also stored under `name` so later discovery can reuse
    /// it. A view already registered under `name` is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Template`] if the template does not parse.
    pub fn add_view(&mut self, name: &str, template: &str, data: DataFn) -> Result<()> {
        self.sources.insert(name.to_string(), data.clone());
        let tera = self.compile(name, template)?;
        self.insert(name, tera, data);
        Ok(())
    }

    /// Registers the main view: the embedded layout plus any overrides found
    /// in the template tree.
    ///
    /// Overrides are the reserved files directly inside `templates/` (for
    /// example `main-header.tera`); the layout includes them by base name.
    /// An override that fails to parse is skipped with a warning.
    pub fn add_main_view(&mut self) -> Result<()> {
        let layout = assets::text(assets::MAIN_LAYOUT)?;
        let mut tera = self.compile(MAIN_VIEW, layout)?;

        let suffix = self.config.template_suffix().to_string();
        for path in overrides(self.templates.as_ref(), TEMPLATES_DIR, &suffix) {
            let name = view_name(&path, &suffix);
            let source = match self.templates.read_to_string(&path) {
                Ok(source) => source,
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "skipping unreadable main override");
                    continue;
                }
            };
            match tera.add_raw_template(&name, &source) {
                Ok(()) => tracing::debug!(template = %name, "registered main override"),
                Err(e) => tracing::warn!(path = %path, error = %e, "skipping invalid main override"),
            }
        }

        let start_view = self.config.start_view().to_string();
        let data = data_source(move |request| {
            let mut params = request.query_object();
            let missing = params
                .get(VIEW_PARAM)
                .and_then(Value::as_str)
                .map_or(true, str::is_empty);
            if missing {
                params.insert(VIEW_PARAM.to_string(), Value::String(start_view.clone()));
            }
            let mut data = Map::new();
            data.insert(PARAMS_KEY.to_string(), Value::Object(params));
            Ok(Value::Object(data))
        });

        self.insert(MAIN_VIEW, tera, data);
        Ok(())
    }

    /// Registers one view per template file found under `templates/`.
    ///
    /// The view name is the file name without the template suffix. Each view
    /// uses the data source registered under that name, or
    /// [`passthrough_source`] when there is none. A missing `templates/`
    /// folder registers nothing. Returns the number of views registered.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Read`] or [`ViewError::Template`] on the first
    /// template that cannot be loaded.
    pub fn discover(&mut self) -> Result<usize> {
        let suffix = self.config.template_suffix().to_string();
        let paths = walk(self.templates.as_ref(), TEMPLATES_DIR, &suffix);

        for path in &paths {
            let name = view_name(path, &suffix);
            let template = self
                .templates
                .read_to_string(path)
                .map_err(|source| ViewError::Read { path: path.clone(), source })?;
            let data = self
                .sources
                .get(&name)
                .cloned()
                .unwrap_or_else(passthrough_source);

            let tera = self.compile(&name, &template)?;
            self.insert(&name, tera, data);
        }

        Ok(paths.len())
    }

    fn insert(&mut self, name: &str, tera: Tera, source: DataFn) {
        if self.views.contains_key(name) {
            tracing::debug!(view = name, "replacing view");
        } else {
            tracing::debug!(view = name, "registered view");
        }
        self.views.insert(
            name.to_string(),
            View {
                name: name.to_string(),
                tera,
                shell: self.shell.clone(),
                source,
            },
        );
    }

    /// Builds the template set for one view.
    fn compile(&self, name: &str, template: &str) -> Result<Tera> {
        let mut tera = Tera::default();
        for (function, f) in self.config.functions() {
            let f = f.clone();
            tera.register_function(function, move |args: &HashMap<String, Value>| f(args));
        }

        let bare = format!("{{% block {0} %}}{{% endblock {0} %}}", BODY_BLOCK);
        tera.add_raw_templates(vec![
            (SHELL_TEMPLATE.to_string(), self.shell.source().to_string()),
            (BARE_TEMPLATE.to_string(), bare),
            (PAGE_TEMPLATE.to_string(), self.shell.extend(template)),
            (
                FRAGMENT_TEMPLATE.to_string(),
                format!("{{% extends \"{}\" %}}\n{}", BARE_TEMPLATE, template),
            ),
        ])
        .map_err(|source| ViewError::Template {
            name: name.to_string(),
            source,
        })?;

        Ok(tera)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sources: Vec<&String> = self.sources.keys().collect();
        sources.sort();
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("views", &self.view_names())
            .field("sources", &sources)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MemoryTree;
    use serde_json::json;

    fn registry(tree: MemoryTree) -> Registry {
        let config = Configuration::new("app")
            .with_start_view("home")
            .with_static_dir("/nonexistent/viewkit/static")
            .with_template_suffix(".tmpl");
        Registry::new(config, Arc::new(tree))
    }

    fn source(value: Value) -> DataFn {
        data_source(move |_| Ok(value.clone()))
    }

    fn request() -> ViewRequest {
        ViewRequest::new("/app", "GET")
    }

    #[test]
    fn test_explicit_view_fragment_and_page() {
        let mut reg = registry(MemoryTree::new());
        reg.add_view(
            "greet",
            "{% block body %}<p>Hello {{ name }}</p>{% endblock body %}",
            source(json!({ "name": "Ada" })),
        )
        .unwrap();

        let view = reg.get("greet").unwrap();
        assert_eq!(view.render_fragment(&request()).unwrap(), "<p>Hello Ada</p>");

        let page = view.render_page(&request()).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<p>Hello Ada</p>"));
    }

    #[test]
    fn test_invalid_template_is_an_error() {
        let mut reg = registry(MemoryTree::new());
        let err = reg
            .add_view("broken", "{% block body %}{{ unclosed {% endblock body %}", passthrough_source())
            .unwrap_err();
        assert!(matches!(err, ViewError::Template { ref name, .. } if name == "broken"));
        assert!(!reg.contains("broken"));
    }

    #[test]
    fn test_reregistering_replaces_view() {
        let mut reg = registry(MemoryTree::new());
        reg.add_view("x", "{% block body %}one {{ v }}{% endblock body %}", source(json!({ "v": 1 })))
            .unwrap();
        reg.add_view("x", "{% block body %}two {{ v }}{% endblock body %}", source(json!({ "v": 2 })))
            .unwrap();

        let html = reg.get("x").unwrap().render_fragment(&request()).unwrap();
        assert_eq!(html, "two 2");
    }

    #[test]
    fn test_non_object_data_exposed_as_data() {
        let mut reg = registry(MemoryTree::new());
        reg.add_view("list", "{% block body %}{{ data | length }}{% endblock body %}", source(json!([1, 2, 3])))
            .unwrap();
        assert_eq!(reg.get("list").unwrap().render_fragment(&request()).unwrap(), "3");
    }

    #[test]
    fn test_data_source_error() {
        let mut reg = registry(MemoryTree::new());
        let failing = data_source(|_| Err(DataError::new("no database")));
        reg.add_view("x", "{% block body %}x{% endblock body %}", failing).unwrap();

        let err = reg.get("x").unwrap().render_fragment(&request()).unwrap_err();
        assert!(matches!(err, RenderError::Data(_)));
        assert_eq!(err.to_string(), "no database");
    }

    #[test]
    fn test_basepath_function_available() {
        let mut reg = registry(MemoryTree::new());
        reg.add_view("link", "{% block body %}/{{ basepath() }}/x{% endblock body %}", passthrough_source())
            .unwrap();
        assert_eq!(reg.get("link").unwrap().render_fragment(&request()).unwrap(), "/app/x");
    }

    #[test]
    fn test_discovery_skips_reserved_files() {
        let tree = MemoryTree::new()
            .with_file("templates/foo.tmpl", "{% block body %}foo {{ q }}{% endblock body %}")
            .with_file("templates/main-header.tmpl", "<header>top</header>");
        let mut reg = registry(tree);

        assert_eq!(reg.discover().unwrap(), 1);
        assert!(reg.contains("foo"));
        assert!(!reg.contains("main-header"));

        let req = request().with_query_param("q", "bar");
        assert_eq!(reg.get("foo").unwrap().render_fragment(&req).unwrap(), "foo bar");
    }

    #[test]
    fn test_discovery_pairs_registered_source() {
        let tree = MemoryTree::new().with_file("templates/x.tmpl", "{% block body %}{{ origin }}{% endblock body %}");
        let mut reg = registry(tree);
        reg.add_source("x", source(json!({ "origin": "registered" })));
        reg.discover().unwrap();

        let req = request().with_query_param("origin", "query");
        assert_eq!(reg.get("x").unwrap().render_fragment(&req).unwrap(), "registered");
    }

    #[test]
    fn test_discovery_invalid_template_is_an_error() {
        let tree = MemoryTree::new().with_file("templates/bad.tmpl", "{% block body %}{% if %}{% endblock body %}");
        let mut reg = registry(tree);
        assert!(matches!(reg.discover(), Err(ViewError::Template { .. })));
    }

    #[test]
    fn test_discovery_without_templates_folder() {
        let mut reg = registry(MemoryTree::new().with_file("other/file.tmpl", ""));
        assert_eq!(reg.discover().unwrap(), 0);
    }

    #[test]
    fn test_main_view_defaults_start_view() {
        let mut reg = registry(MemoryTree::new());
        reg.add_main_view().unwrap();

        let html = reg.get(MAIN_VIEW).unwrap().render_page(&request()).unwrap();
        assert!(html.contains("data-view=\"home\""));
        assert!(html.contains("data-endpoint=\"/app\""));

        let html = reg
            .get(MAIN_VIEW)
            .unwrap()
            .render_page(&request().with_query_param("view", "todos"))
            .unwrap();
        assert!(html.contains("data-view=\"todos\""));
    }

    #[test]
    fn test_main_view_includes_overrides() {
        let tree = MemoryTree::new()
            .with_file("templates/main-header.tmpl", "<header>{{ Params.view }}</header>")
            .with_file("templates/main-footer.tmpl", "{% if %}");
        let mut reg = registry(tree);
        reg.add_main_view().unwrap();

        let html = reg.get(MAIN_VIEW).unwrap().render_page(&request()).unwrap();
        assert!(html.contains("<header>home</header>"));
    }

    #[test]
    fn test_title_with_template_syntax_compiles() {
        let config = Configuration::new("app")
            .with_title("Q&A {% endraw %}{{ x }}")
            .with_static_dir("/nonexistent/viewkit/static");
        let mut reg = Registry::new(config, Arc::new(MemoryTree::new()));
        reg.add_main_view().unwrap();
        reg.add_view("x", "{% block body %}x{% endblock body %}", passthrough_source())
            .unwrap();

        let html = reg.get("x").unwrap().render_page(&request()).unwrap();
        assert!(html.contains("<title>Q&A {% endraw %}{{ x }}</title>"));
        assert!(!reg.get("x").unwrap().render_fragment(&request()).unwrap().contains("<title>"));
    }
}
