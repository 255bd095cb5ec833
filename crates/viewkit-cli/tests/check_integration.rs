// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Integration tests for project loading and the `check` command.

use std::fs;
use std::path::Path;

use tempfile::tempdir;
use viewkit_cli::commands::check::check;

/// Create a test project structure in a temp directory
fn setup_project(dir: &Path) {
    fs::create_dir_all(dir.join("site/templates/blog")).unwrap();
    fs::create_dir_all(dir.join("assets")).unwrap();

    fs::write(
        dir.join("viewkit.toml"),
        r#"
[project]
name = "blog"

[views]
base_path = "/blog"
start_view = "index"
static_dir = "assets"
templates_root = "site"
template_suffix = ".html.tera"
"#,
    )
    .unwrap();

    fs::write(
        dir.join("site/templates/index.html.tera"),
        "{% block body %}<h1>Posts</h1>{% endblock body %}",
    )
    .unwrap();
    fs::write(
        dir.join("site/templates/blog/post.html.tera"),
        "{% block body %}<article>{{ slug }}</article>{% endblock body %}",
    )
    .unwrap();
    fs::write(dir.join("site/templates/main-footer.html.tera"), "<footer>blog</footer>").unwrap();
    fs::write(dir.join("assets/blog.css"), "article { margin: 0; }").unwrap();
}

#[test]
fn test_check_lists_views() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());

    let views = check(dir.path()).unwrap();
    assert_eq!(views, vec!["index", "main", "post"]);
}

#[test]
fn test_check_reports_invalid_template() {
    let dir = tempdir().unwrap();
    setup_project(dir.path());
    fs::write(
        dir.path().join("site/templates/broken.html.tera"),
        "{% block body %}{% if %}{% endblock body %}",
    )
    .unwrap();

    let err = check(dir.path()).unwrap_err();
    assert!(err.to_string().contains("broken"));
}

#[test]
fn test_check_without_config_or_templates() {
    let dir = tempdir().unwrap();
    let views = check(dir.path()).unwrap();
    assert_eq!(views, vec!["main"]);
}

#[test]
fn test_check_rejects_mounted_base_path() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("viewkit.toml"), "[views]\nbase_path = \"/static\"\n").unwrap();

    let err = check(dir.path()).unwrap_err();
    assert!(err.to_string().contains("Invalid base path"));
}
