// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Validates a project: every template must compile.

use std::path::Path;

use console::style;
use viewkit::config::validate_base_path;

use crate::config::Config;

/// Compiles all views of the project at `root` and returns their names.
///
/// # Errors
///
/// Returns an error for a base path that cannot be mounted, or for the
/// first template that fails to load or parse.
pub fn check(root: &Path) -> anyhow::Result<Vec<String>> {
    let config = Config::load_from(root)?;
    let viewer = super::viewer(&config, root);
    validate_base_path(viewer.registry().config().base_path())?;
    let registry = viewer.build()?;
    Ok(registry.view_names().into_iter().map(str::to_string).collect())
}

/// Runs the check command in the current directory.
pub async fn run() -> anyhow::Result<()> {
    let views = check(Path::new("."))?;
    println!("{} {} view(s)", style("Compiled").green().bold(), views.len());
    for view in &views {
        println!("  {}", view);
    }
    Ok(())
}
