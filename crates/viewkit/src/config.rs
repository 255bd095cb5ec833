// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Viewer configuration.
//!
//! # Example
//!
//! ```rust
//! use viewkit::Configuration;
//!
//! let config = Configuration::new("/app/")
//!     .with_title("Dashboard")
//!     .with_start_view("home")
//!     .with_function("year", |_| Ok(serde_json::json!(2026)));
//!
//! assert_eq!(config.base_path(), "app");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Result, ViewError};

/// Name of the template function returning the normalized base path.
pub const BASEPATH_FUNCTION: &str = "basepath";

/// Default template file suffix for discovered views.
pub const DEFAULT_TEMPLATE_SUFFIX: &str = ".tera";

/// Default static asset directory.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Top-level path segments taken by the fixed mounts of `Viewer::inject`.
pub const MOUNTED_SEGMENTS: [&str; 3] = ["static", "viewkit", "favicon.ico"];

/// A function callable from templates, e.g. `{{ basepath() }}`.
pub type TemplateFn =
    Arc<dyn Fn(&HashMap<String, serde_json::Value>) -> tera::Result<serde_json::Value> + Send + Sync>;

/// Immutable settings shared by every view of a viewer.
#[derive(Clone)]
pub struct Configuration {
    base_path: String,
    title: String,
    start_view: String,
    static_dir: PathBuf,
    template_suffix: String,
    functions: HashMap<String, TemplateFn>,
}

impl Configuration {
    /// Creates a configuration mounted at `base_path`.
    ///
    /// The path is normalized (`.` and empty segments dropped, `..` resolved,
    /// no leading or trailing `/`), and a `basepath()` template function
    /// returning it is installed.
    pub fn new(base_path: &str) -> Self {
        let mut config = Self {
            base_path: String::new(),
            title: String::new(),
            start_view: String::new(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            template_suffix: DEFAULT_TEMPLATE_SUFFIX.to_string(),
            functions: HashMap::new(),
        };
        config.set_base_path(base_path);
        config
    }

    /// Sets the document title. An empty title omits the `<title>` element.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the view preloaded by the main page when the request names none.
    pub fn with_start_view(mut self, view: impl Into<String>) -> Self {
        self.start_view = view.into();
        self
    }

    /// Sets the directory served under `/static` and scanned for stylesheets.
    pub fn with_static_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.static_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Sets the file suffix of discoverable templates.
    pub fn with_template_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.template_suffix = suffix.into();
        self
    }

    /// Registers a template function.
    ///
    /// `basepath` cannot be replaced; it always returns the normalized base path.
    pub fn with_function<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(&HashMap<String, serde_json::Value>) -> tera::Result<serde_json::Value>
            + Send
            + Sync
            + 'static,
    {
        if name != BASEPATH_FUNCTION {
            self.functions.insert(name.to_string(), Arc::new(f));
        }
        self
    }

    fn set_base_path(&mut self, raw: &str) {
        self.base_path = normalize_base_path(raw);
        let path = self.base_path.clone();
        self.functions.insert(
            BASEPATH_FUNCTION.to_string(),
            Arc::new(
                move |_: &HashMap<String, serde_json::Value>| -> tera::Result<serde_json::Value> {
                    Ok(serde_json::Value::String(path.clone()))
                },
            ),
        );
    }

    /// The normalized base path, without leading or trailing `/`.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// The route of the dispatcher endpoint (`/` followed by the base path).
    pub fn route(&self) -> String {
        format!("/{}", self.base_path)
    }

    /// The document title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The default view for the main page.
    pub fn start_view(&self) -> &str {
        &self.start_view
    }

    /// The static asset directory.
    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    /// The suffix of discoverable template files.
    pub fn template_suffix(&self) -> &str {
        &self.template_suffix
    }

    /// Template functions, `basepath` included.
    pub fn functions(&self) -> &HashMap<String, TemplateFn> {
        &self.functions
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut functions: Vec<&String> = self.functions.keys().collect();
        functions.sort();
        f.debug_struct("Configuration")
            .field("base_path", &self.base_path)
            .field("title", &self.title)
            .field("start_view", &self.start_view)
            .field("static_dir", &self.static_dir)
            .field("template_suffix", &self.template_suffix)
            .field("functions", &functions)
            .finish()
    }
}

/// Normalizes a URL base path lexically.
///
/// ```rust
/// assert_eq!(viewkit::config::normalize_base_path("//a/./b/../c/"), "a/c");
/// assert_eq!(viewkit::config::normalize_base_path("/"), "");
/// ```
pub fn normalize_base_path(raw: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Checks that a normalized base path can be mounted as a plain route.
///
/// Rejects paths whose first segment belongs to a fixed mount and segments
/// the router would read as captures (`:name`, `*rest`).
///
/// ```rust
/// use viewkit::config::validate_base_path;
///
/// assert!(validate_base_path("app/admin").is_ok());
/// assert!(validate_base_path("static").is_err());
/// assert!(validate_base_path("users/:id").is_err());
/// ```
pub fn validate_base_path(base_path: &str) -> Result<()> {
    let invalid = |reason: String| ViewError::BasePath {
        base_path: base_path.to_string(),
        reason,
    };

    if let Some(first) = base_path.split('/').next() {
        if MOUNTED_SEGMENTS.contains(&first) {
            return Err(invalid(format!("'/{}' is already mounted", first)));
        }
    }
    if let Some(segment) = base_path.split('/').find(|s| s.contains(':') || s.contains('*')) {
        return Err(invalid(format!("segment '{}' would be a route capture", segment)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_path() {
        assert_eq!(normalize_base_path(""), "");
        assert_eq!(normalize_base_path("/"), "");
        assert_eq!(normalize_base_path("app"), "app");
        assert_eq!(normalize_base_path("/app/"), "app");
        assert_eq!(normalize_base_path("//a/./b/../c/"), "a/c");
        assert_eq!(normalize_base_path("../../x"), "x");
    }

    #[test]
    fn test_basepath_function_installed() {
        let config = Configuration::new("/admin/panel/");
        let f = config.functions().get(BASEPATH_FUNCTION).unwrap();
        assert_eq!(f(&HashMap::new()).unwrap(), serde_json::json!("admin/panel"));
        assert_eq!(config.route(), "/admin/panel");
    }

    #[test]
    fn test_basepath_cannot_be_replaced() {
        let config = Configuration::new("app").with_function("basepath", |_| Ok("nope".into()));
        let f = config.functions().get(BASEPATH_FUNCTION).unwrap();
        assert_eq!(f(&HashMap::new()).unwrap(), serde_json::json!("app"));
    }

    #[test]
    fn test_defaults() {
        let config = Configuration::default();
        assert_eq!(config.route(), "/");
        assert_eq!(config.static_dir(), Path::new("static"));
        assert_eq!(config.template_suffix(), ".tera");
        assert_eq!(config.title(), "");
    }

    #[test]
    fn test_validate_base_path() {
        for ok in ["", "app", "admin/panel", "statics", "app/static", "my.viewkit"] {
            assert!(validate_base_path(ok).is_ok(), "{ok} should be accepted");
        }
        for bad in ["static", "static/x", "viewkit", "favicon.ico", ":id", "app/*rest", "a/b:c"] {
            let err = validate_base_path(bad).unwrap_err();
            assert!(matches!(err, ViewError::BasePath { ref base_path, .. } if base_path == bad));
        }
    }

    #[test]
    fn test_mounted_segments_match_mounts() {
        assert!(MOUNTED_SEGMENTS.contains(&crate::styles::STATIC_PREFIX.trim_start_matches('/')));
        assert!(MOUNTED_SEGMENTS.contains(&crate::assets::ASSETS_PREFIX.trim_start_matches('/')));
        assert!(MOUNTED_SEGMENTS.contains(&crate::assets::FAVICON));
    }
}
