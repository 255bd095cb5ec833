// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! The single HTTP entry point.
//!
//! Requests carrying `X-Content-Request: true` are fragment requests: the
//! view named by the `view` query parameter is rendered without the shell.
//! Every other request gets the full page, which is always the main view;
//! the main view's data tells the page which fragment to load.
//!
//! | Outcome               | Status | Body                   |
//! |-----------------------|--------|------------------------|
//! | rendered              | 200    | HTML                   |
//! | unknown fragment view | 400    | `Unknown view: <name>` |
//! | data or render error  | 500    | the error message      |

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::error::{DispatchError, RenderError};
use crate::registry::{Registry, MAIN_VIEW, VIEW_PARAM};
use crate::request::ViewRequest;

/// Header selecting fragment mode.
pub const CONTENT_REQUEST_HEADER: &str = "x-content-request";

/// Response mode of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Complete document with the shell (first load).
    FullPage,
    /// A single view's body (partial refresh).
    Fragment,
}

impl Mode {
    /// Determines the mode from the `X-Content-Request` header.
    pub fn of(request: &ViewRequest) -> Self {
        match request.header(CONTENT_REQUEST_HEADER) {
            Some(value) if value.trim().eq_ignore_ascii_case("true") => Mode::Fragment,
            _ => Mode::FullPage,
        }
    }
}

/// Axum handler for the view endpoint.
pub async fn handler(State(registry): State<Arc<Registry>>, request: Request) -> Response {
    let (parts, _body) = request.into_parts();
    let request = ViewRequest::from_parts(&parts);
    dispatch(&registry, &request)
}

/// Renders the response for `request`.
pub fn dispatch(registry: &Registry, request: &ViewRequest) -> Response {
    match Mode::of(request) {
        Mode::FullPage => match registry.get(MAIN_VIEW) {
            Some(view) => respond(view.render_page(request), request, MAIN_VIEW),
            None => {
                tracing::error!("main view is not registered");
                let err = DispatchError::UnknownView(MAIN_VIEW.to_string());
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        },
        Mode::Fragment => {
            let name = request.query(VIEW_PARAM).unwrap_or_default();
            match registry.get(name) {
                Some(view) => respond(view.render_fragment(request), request, name),
                None => {
                    let err = DispatchError::UnknownView(name.to_string());
                    (StatusCode::BAD_REQUEST, err.to_string()).into_response()
                }
            }
        }
    }
}

fn respond(result: Result<String, RenderError>, request: &ViewRequest, view: &str) -> Response {
    match result {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::debug!(
                method = %request.method,
                path = %request.path,
                view,
                error = %e,
                "failed to render view"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
