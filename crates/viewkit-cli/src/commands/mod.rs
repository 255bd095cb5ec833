// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! CLI command implementations.
//!
//! - `serve`: Serve the project's views
//! - `check`: Compile every view without serving

use std::path::Path;

use viewkit::{FileSystemTree, Viewer};

use crate::config::Config;

/// View validation command.
pub mod check;
/// HTTP server command.
pub mod serve;

/// Creates a viewer for the project at `root`.
pub fn viewer(config: &Config, root: &Path) -> Viewer {
    Viewer::new(
        config.views.to_configuration(root),
        FileSystemTree::new(config.views.templates_root(root)),
    )
}
