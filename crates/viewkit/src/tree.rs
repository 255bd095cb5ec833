// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Read-only asset trees.
//!
//! Templates and static assets are read through the [`AssetTree`] trait so the
//! registry does not care whether files live on disk, are compiled into the
//! binary, or were added programmatically.
//!
//! # Implementations
//!
//! - [`FileSystemTree`]: a directory on the local filesystem
//! - [`EmbeddedTree`]: a directory embedded with [`include_dir`]
//! - [`MemoryTree`]: an in-memory map of paths to contents (tests, generated views)
//!
//! Paths are always relative to the tree root and use `/` separators. The
//! empty path names the root itself.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use include_dir::{Dir, DirEntry};

/// A single entry returned by [`AssetTree::read_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// The entry's file name (last path segment).
    pub name: String,
    /// Whether the entry is a folder.
    pub is_dir: bool,
}

impl TreeEntry {
    /// Creates a file entry.
    pub fn file(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_dir: false }
    }

    /// Creates a folder entry.
    pub fn dir(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_dir: true }
    }
}

/// A read-only tree of named byte blobs organized in folders.
///
/// Implementations must be thread-safe; trees are shared with request
/// handlers once a viewer is mounted.
pub trait AssetTree: Send + Sync + 'static {
    /// Lists the entries of `folder`.
    fn read_dir(&self, folder: &str) -> io::Result<Vec<TreeEntry>>;

    /// Reads the contents of the file at `path`.
    fn read(&self, path: &str) -> io::Result<Vec<u8>>;

    /// Reads the file at `path` as UTF-8 text.
    fn read_to_string(&self, path: &str) -> io::Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Joins a folder and a name with `/`, treating an empty folder as the root.
pub fn join(folder: &str, name: &str) -> String {
    let folder = folder.trim_end_matches('/');
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", folder, name)
    }
}

fn not_found(path: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("not found: {}", path))
}

/// Filesystem-backed tree rooted at a directory.
///
/// # Examples
///
/// ```rust,no_run
/// use viewkit::{AssetTree, FileSystemTree};
///
/// let tree = FileSystemTree::new("./site");
/// let entries = tree.read_dir("templates")?;
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileSystemTree {
    root: PathBuf,
}

impl FileSystemTree {
    /// Creates a tree rooted at `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }
}

impl AssetTree for FileSystemTree {
    fn read_dir(&self, folder: &str) -> io::Result<Vec<TreeEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(self.resolve(folder))? {
            let entry = entry?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            let is_dir = entry.file_type()?.is_dir();
            entries.push(TreeEntry { name, is_dir });
        }
        Ok(entries)
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.resolve(path))
    }
}

/// Tree over a directory embedded at compile time with [`include_dir!`](include_dir::include_dir).
///
/// ```rust,ignore
/// use include_dir::{include_dir, Dir};
/// use viewkit::EmbeddedTree;
///
/// static SITE: Dir = include_dir!("$CARGO_MANIFEST_DIR/site");
/// let tree = EmbeddedTree::new(&SITE);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedTree {
    dir: &'static Dir<'static>,
}

impl EmbeddedTree {
    /// Wraps an embedded directory.
    pub fn new(dir: &'static Dir<'static>) -> Self {
        Self { dir }
    }

    fn folder(&self, folder: &str) -> Option<&'static Dir<'static>> {
        let folder = folder.trim_matches('/');
        if folder.is_empty() {
            Some(self.dir)
        } else {
            self.dir.get_dir(folder)
        }
    }
}

impl AssetTree for EmbeddedTree {
    fn read_dir(&self, folder: &str) -> io::Result<Vec<TreeEntry>> {
        let dir = self.folder(folder).ok_or_else(|| not_found(folder))?;
        Ok(dir
            .entries()
            .iter()
            .filter_map(|entry| {
                let name = entry.path().file_name()?.to_str()?.to_string();
                Some(match entry {
                    DirEntry::Dir(_) => TreeEntry::dir(name),
                    DirEntry::File(_) => TreeEntry::file(name),
                })
            })
            .collect())
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        self.dir
            .get_file(path.trim_start_matches('/'))
            .map(|file| file.contents().to_vec())
            .ok_or_else(|| not_found(path))
    }
}

/// In-memory tree.
///
/// Folders exist implicitly as prefixes of inserted file paths. Cloning is
/// cheap and clones share the same storage.
///
/// ```rust
/// use viewkit::{AssetTree, MemoryTree};
///
/// let tree = MemoryTree::new()
///     .with_file("templates/home.tera", "{% block body %}home{% endblock body %}");
/// assert_eq!(tree.read_dir("templates").unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    files: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file and returns the tree (builder style).
    pub fn with_file(self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.add_file(path, contents);
        self
    }

    /// Adds or replaces a file.
    pub fn add_file(&self, path: &str, contents: impl Into<Vec<u8>>) {
        let path = path.trim_matches('/').to_string();
        match self.files.write() {
            Ok(mut files) => {
                files.insert(path, contents.into());
            }
            Err(poisoned) => {
                poisoned.into_inner().insert(path, contents.into());
            }
        }
    }

    fn with_files<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&BTreeMap<String, Vec<u8>>) -> R,
    {
        match self.files.read() {
            Ok(files) => f(&files),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }
}

impl AssetTree for MemoryTree {
    fn read_dir(&self, folder: &str) -> io::Result<Vec<TreeEntry>> {
        let folder = folder.trim_matches('/');
        let prefix = if folder.is_empty() { String::new() } else { format!("{}/", folder) };

        self.with_files(|files| {
            let mut entries: Vec<TreeEntry> = Vec::new();
            for path in files.keys() {
                let Some(rest) = path.strip_prefix(&prefix) else {
                    continue;
                };
                let entry = match rest.split_once('/') {
                    Some((dir, _)) => TreeEntry::dir(dir),
                    None => TreeEntry::file(rest),
                };
                if !entries.contains(&entry) {
                    entries.push(entry);
                }
            }
            if entries.is_empty() {
                Err(not_found(folder))
            } else {
                Ok(entries)
            }
        })
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        let path = path.trim_matches('/');
        self.with_files(|files| files.get(path).cloned().ok_or_else(|| not_found(path)))
    }
}
