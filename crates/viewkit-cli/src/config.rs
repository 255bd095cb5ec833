// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Project configuration.
//!
//! Configuration is loaded from `viewkit.toml` at the project root.
//!
//! # Example Configuration
//!
//! ```toml
//! [project]
//! name = "todos"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 3000
//!
//! [views]
//! base_path = "/app"
//! title = "Todos"
//! start_view = "list"
//! static_dir = "static"
//! templates_root = "."
//! template_suffix = ".tera"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use viewkit::config::{DEFAULT_STATIC_DIR, DEFAULT_TEMPLATE_SUFFIX};
use viewkit::Configuration;

/// File name of the project configuration.
pub const CONFIG_FILE: &str = "viewkit.toml";

/// Main configuration structure loaded from `viewkit.toml`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Project metadata.
    #[serde(default)]
    pub project: ProjectConfig,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// View settings.
    #[serde(default)]
    pub views: ViewsConfig,
}

/// Project metadata configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ProjectConfig {
    /// Project name (default: "unnamed").
    #[serde(default = "default_name")]
    pub name: String,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server host (default: "127.0.0.1").
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port (default: 3000).
    #[serde(default = "default_port")]
    pub port: u16,
}

/// View configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ViewsConfig {
    /// URL path of the view endpoint (default: "/").
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// Document title; empty omits the `<title>` element.
    #[serde(default)]
    pub title: String,
    /// View preloaded by the main page (default: none).
    #[serde(default)]
    pub start_view: String,
    /// Static asset directory, relative to the project root (default: "static").
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Directory containing the `templates/` folder (default: the project root).
    #[serde(default = "default_templates_root")]
    pub templates_root: String,
    /// Suffix of discoverable template files (default: ".tera").
    #[serde(default = "default_template_suffix")]
    pub template_suffix: String,
}

fn default_name() -> String {
    "unnamed".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_base_path() -> String {
    "/".to_string()
}

fn default_static_dir() -> String {
    DEFAULT_STATIC_DIR.to_string()
}

fn default_templates_root() -> String {
    ".".to_string()
}

fn default_template_suffix() -> String {
    DEFAULT_TEMPLATE_SUFFIX.to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self { name: default_name() }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            title: String::new(),
            start_view: String::new(),
            static_dir: default_static_dir(),
            templates_root: default_templates_root(),
            template_suffix: default_template_suffix(),
        }
    }
}

impl Config {
    /// Loads configuration from `viewkit.toml` in the current directory.
    ///
    /// If no configuration file exists, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be parsed.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Loads configuration from `viewkit.toml` in `root`.
    pub fn load_from(root: &Path) -> anyhow::Result<Self> {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl ViewsConfig {
    /// Builds the viewer configuration, resolving directories against `root`.
    pub fn to_configuration(&self, root: &Path) -> Configuration {
        Configuration::new(&self.base_path)
            .with_title(self.title.clone())
            .with_start_view(self.start_view.clone())
            .with_static_dir(root.join(&self.static_dir))
            .with_template_suffix(self.template_suffix.clone())
    }

    /// The directory that holds the `templates/` folder.
    pub fn templates_root(&self, root: &Path) -> PathBuf {
        root.join(&self.templates_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(dir.path()).unwrap();
        assert_eq!(config.project.name, "unnamed");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.views.base_path, "/");
        assert_eq!(config.views.template_suffix, ".tera");
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"
[project]
name = "todos"

[views]
base_path = "/app/"
title = "Todos"
start_view = "list"
"#,
        )
        .unwrap();

        let config = Config::load_from(dir.path()).unwrap();
        assert_eq!(config.project.name, "todos");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.views.start_view, "list");
        assert_eq!(config.views.static_dir, "static");

        let viewer_config = config.views.to_configuration(dir.path());
        assert_eq!(viewer_config.base_path(), "app");
        assert_eq!(viewer_config.title(), "Todos");
        assert_eq!(viewer_config.static_dir(), dir.path().join("static"));
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[server]\nport = \"not a number\"\n").unwrap();
        assert!(Config::load_from(dir.path()).is_err());
    }
}
