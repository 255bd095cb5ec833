// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! viewkit CLI library.
//!
//! Serves a project directory laid out as:
//!
//! ```text
//! viewkit.toml
//! templates/   views, one per file, plus main-* layout overrides
//! static/      stylesheets, scripts, favicon.ico
//! ```
//!
//! # Usage
//!
//! ```bash
//! viewkit serve    # Serve the project
//! viewkit check    # Compile every view and list them
//! ```

/// CLI commands (serve, check).
pub mod commands;
/// Project configuration from `viewkit.toml`.
pub mod config;
