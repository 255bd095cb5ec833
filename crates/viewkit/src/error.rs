// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Error types for view registration and rendering.
//!
//! # Error Categories
//!
//! - [`ViewError`]: startup failures. A view whose template does not parse
//!   must never be served, so registration returns this instead of panicking
//!   and callers abort initialization.
//! - [`RenderError`]: per-request failures of a data source or of template
//!   execution. The dispatcher turns these into `500` responses.
//! - [`DispatchError`]: requests naming a view that does not exist (`400`).

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Registration-time error.
#[derive(Error, Debug)]
pub enum ViewError {
    /// A view template (explicit, discovered or the main layout) failed to parse.
    #[error("Template error in view '{name}': {source}")]
    Template {
        /// The view being registered.
        name: String,
        /// The underlying parse error.
        source: tera::Error,
    },

    /// A template file could not be read from its asset tree.
    #[error("Cannot read template '{path}': {source}")]
    Read {
        /// Path of the file inside the tree.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The base path cannot be mounted next to the fixed routes.
    #[error("Invalid base path '{base_path}': {reason}")]
    BasePath {
        /// The normalized base path.
        base_path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A built-in asset is missing or not valid UTF-8.
    #[error("Embedded asset error: {0}")]
    Asset(String),
}

/// Error raised by a data source.
///
/// Only the message is kept; it becomes the body of the `500` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataError(String);

impl DataError {
    /// Creates a data error from any displayable message.
    pub fn new(message: impl fmt::Display) -> Self {
        Self(message.to_string())
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for DataError {}

impl From<String> for DataError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

impl From<&str> for DataError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

/// Per-request rendering error.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The view's data source failed.
    #[error("{0}")]
    Data(#[from] DataError),

    /// Template execution failed.
    #[error("{}", chain(.0))]
    Template(#[from] tera::Error),
}

/// Dispatcher error for requests that cannot be routed to a view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No view is registered under the requested name.
    #[error("Unknown view: {0}")]
    UnknownView(String),
}

/// Joins an error with its sources.
///
/// Tera reports the useful part of a failure ("Variable `x` not found") in
/// the source chain and only "Failed to render 'view'" at the top.
fn chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut current = err.source();
    while let Some(source) = current {
        message.push_str(": ");
        message.push_str(&source.to_string());
        current = source.source();
    }
    message
}

/// Convenience type alias for registration results.
pub type Result<T> = std::result::Result<T, ViewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_error_display_is_message() {
        let err = RenderError::from(DataError::new("database unavailable"));
        assert_eq!(err.to_string(), "database unavailable");
    }

    #[test]
    fn test_unknown_view_message() {
        let err = DispatchError::UnknownView("doesnotexist".into());
        assert_eq!(err.to_string(), "Unknown view: doesnotexist");
    }

    #[test]
    fn test_template_error_includes_source_chain() {
        let mut tera = tera::Tera::default();
        tera.add_raw_template("t.html", "{{ missing }}").unwrap();
        let err = tera.render("t.html", &tera::Context::new()).unwrap_err();
        let message = RenderError::from(err).to_string();
        assert!(message.contains("t.html"));
        assert!(message.contains("missing"));
    }

    #[test]
    fn test_template_error_reports_cause_once() {
        let mut tera = tera::Tera::default();
        let parse_error = tera.add_raw_template("t.html", "{% if %}").unwrap_err();
        let top = parse_error.to_string();

        let err = ViewError::Template {
            name: "t".into(),
            source: parse_error,
        };
        assert_eq!(err.to_string(), format!("Template error in view 't': {}", top));
        assert!(err.source().is_some());
    }
}
