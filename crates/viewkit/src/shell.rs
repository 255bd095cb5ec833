// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! The shared HTML shell every view extends.
//!
//! The shell is built once from the configuration. Each view template is
//! registered as a child of it and fills in the `body` block:
//!
//! ```text
//! {% block body %}<h1>Hello</h1>{% endblock body %}
//! ```

use tera::Context;

/// Template name of the shell inside each view's template set.
pub const SHELL_TEMPLATE: &str = "viewkit/inner.html";

/// Name of the block every view must define.
pub const BODY_BLOCK: &str = "body";

/// Stylesheet shipped with the crate, served under `/viewkit/`.
pub const CORE_STYLESHEET: &str = "/viewkit/style.css";

/// Context key carrying the rendered `<head>` contents.
pub const HEAD_KEY: &str = "__viewkit_head";

/// Shell template source. The head is a context value, so nothing from the
/// configuration is ever parsed as template syntax.
const SHELL_SOURCE: &str = "<!DOCTYPE html>\n\
<html>\n  \
<head>\n    \
{{ __viewkit_head | safe }}\n  \
</head>\n  \
<body>\n    \
{% block body %}{% endblock body %}\n  \
</body>\n\
</html>\n";

/// The shared shell: a fixed template plus the head built from the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OuterShell {
    head: String,
}

impl OuterShell {
    /// Builds the shell from a document title and pre-rendered `<link>` tags.
    ///
    /// The title is emitted verbatim; an empty title omits the `<title>` element.
    pub fn build(title: &str, styles: &str) -> Self {
        let mut head = String::new();
        if !title.is_empty() {
            head.push_str(&format!("<title>{}</title>\n\t", title));
        }
        head.push_str(&format!("<link rel=\"stylesheet\" href=\"{}\">", CORE_STYLESHEET));
        head.push_str(styles);
        Self { head }
    }

    /// The shell template source.
    pub fn source(&self) -> &'static str {
        SHELL_SOURCE
    }

    /// The contents of `<head>`.
    pub fn head(&self) -> &str {
        &self.head
    }

    /// Adds the head to a render context.
    pub fn insert_into(&self, context: &mut Context) {
        context.insert(HEAD_KEY, &self.head);
    }

    /// Wraps a view template so it extends the shell.
    pub fn extend(&self, view_source: &str) -> String {
        format!("{{% extends \"{}\" %}}\n{}", SHELL_TEMPLATE, view_source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(shell: &OuterShell, body: &str) -> String {
        let mut tera = tera::Tera::default();
        tera.add_raw_templates(vec![
            (SHELL_TEMPLATE, shell.source().to_string()),
            ("view.html", shell.extend(body)),
        ])
        .unwrap();
        let mut context = Context::new();
        shell.insert_into(&mut context);
        tera.render("view.html", &context).unwrap()
    }

    #[test]
    fn test_empty_title_has_no_title_element() {
        let html = render(&OuterShell::build("", ""), "{% block body %}x{% endblock body %}");
        assert!(!html.contains("<title>"));
    }

    #[test]
    fn test_title_rendered_once() {
        let html = render(&OuterShell::build("Dashboard", ""), "{% block body %}x{% endblock body %}");
        assert_eq!(html.matches("<title>Dashboard</title>").count(), 1);
    }

    #[test]
    fn test_title_is_verbatim() {
        let html = render(&OuterShell::build("A & B", ""), "{% block body %}x{% endblock body %}");
        assert!(html.contains("<title>A & B</title>"));
    }

    #[test]
    fn test_title_with_template_delimiters() {
        let title = "x{% endraw %}{{ y }}{# z";
        let html = render(&OuterShell::build(title, ""), "{% block body %}x{% endblock body %}");
        assert!(html.contains("<title>x{% endraw %}{{ y }}{# z</title>"));
    }

    #[test]
    fn test_source_is_independent_of_configuration() {
        let shell = OuterShell::build("{% if %}", "<link>");
        assert!(!shell.source().contains("{% if %}"));
        assert!(shell.head().contains("{% if %}"));
    }

    #[test]
    fn test_shell_layout() {
        let styles = "\n\t<link rel=\"stylesheet\" href=\"/static/site.css\">";
        let html = render(&OuterShell::build("", styles), "{% block body %}<p>hi</p>{% endblock body %}");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"/viewkit/style.css\">"));
        assert!(html.contains("href=\"/static/site.css\""));
        let body_start = html.find("<body>").unwrap();
        let p = html.find("<p>hi</p>").unwrap();
        assert!(p > body_start);
    }
}
