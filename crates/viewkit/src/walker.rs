// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Recursive file discovery over an [`AssetTree`].
//!
//! Discovery is best effort: a folder that cannot be listed contributes no
//! entries instead of failing the whole walk.
//!
//! Names containing [`RESERVED_MARKER`] are reserved for main-layout
//! overrides. [`is_reserved`] is the only place that rule is spelled out; the
//! walker applies it to files and folders alike, and the registry uses
//! [`overrides`] to pick those files up for the main view.

use crate::tree::{join, AssetTree};

/// Marker reserving a file or folder name for the main layout.
pub const RESERVED_MARKER: &str = "main";

/// Returns true if `name` is reserved for the main layout.
pub fn is_reserved(name: &str) -> bool {
    name.contains(RESERVED_MARKER)
}

/// Recursively lists files under `folder` whose names end with `suffix`.
///
/// Returned paths are relative to the tree root (`folder/sub/file.ext`).
/// Entries are visited in name order, so the output is stable for a given
/// tree. Reserved names are skipped.
pub fn walk(tree: &dyn AssetTree, folder: &str, suffix: &str) -> Vec<String> {
    let mut out = Vec::new();
    walk_into(tree, folder, suffix, &mut out);
    out
}

fn walk_into(tree: &dyn AssetTree, folder: &str, suffix: &str, out: &mut Vec<String>) {
    let mut entries = match tree.read_dir(folder) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::trace!(folder, error = %e, "skipping unreadable folder");
            return;
        }
    };
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    for entry in entries {
        if is_reserved(&entry.name) {
            continue;
        }

        let path = join(folder, &entry.name);
        if entry.is_dir {
            walk_into(tree, &path, suffix, out);
        } else if entry.name.ends_with(suffix) {
            out.push(path);
        }
    }
}

/// Lists the reserved files directly inside `folder` that end with `suffix`.
///
/// These are the main-layout overrides; sub-folders are not searched.
pub fn overrides(tree: &dyn AssetTree, folder: &str, suffix: &str) -> Vec<String> {
    let Ok(mut entries) = tree.read_dir(folder) else {
        return Vec::new();
    };
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    entries
        .into_iter()
        .filter(|entry| !entry.is_dir && is_reserved(&entry.name) && entry.name.ends_with(suffix))
        .map(|entry| join(folder, &entry.name))
        .collect()
}

/// Derives a view name from a template path: the file name without `suffix`.
///
/// `templates/admin/users.tera` becomes `users`.
pub fn view_name(path: &str, suffix: &str) -> String {
    let file = path.rsplit('/').next().unwrap_or(path);
    file.strip_suffix(suffix).unwrap_or(file).to_string()
}
