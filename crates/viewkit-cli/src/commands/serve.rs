// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! HTTP server command.

use std::path::Path;

use axum::Router;
use console::style;

use crate::config::Config;

/// Serves the project in the current directory.
///
/// `host` and `port` override the `[server]` section of `viewkit.toml`.
pub async fn run(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let root = Path::new(".");
    let config = Config::load_from(root)?;

    let app: Router = super::viewer(&config, root).inject(Router::new())?;

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let addr = format!("{}:{}", host, port);
    let base_path = config.views.to_configuration(root).route();

    println!(
        "{} {}",
        style("Serving").green().bold(),
        style(&config.project.name).cyan()
    );
    println!(
        "{} {}",
        style("Views at").dim(),
        style(format!("http://{}{}", addr, base_path)).cyan().underlined()
    );
    println!("{}", style("Press Ctrl+C to stop").dim());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
