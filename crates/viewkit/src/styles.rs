// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Stylesheet aggregation for the page shell.

use crate::tree::AssetTree;
use crate::walker::walk;

/// URL prefix under which the static tree is mounted.
pub const STATIC_PREFIX: &str = "/static";

/// Emits a `<link rel="stylesheet">` tag for every `.css` file in `tree`.
///
/// Each tag is preceded by a newline and a tab so the shell stays readable.
/// Returns an empty string when the tree holds no stylesheets.
pub fn aggregate_styles(tree: &dyn AssetTree) -> String {
    walk(tree, "", ".css")
        .iter()
        .map(|path| format!("\n\t<link rel=\"stylesheet\" href=\"{}/{}\">", STATIC_PREFIX, path))
        .collect()
}
