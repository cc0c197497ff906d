//! Preview server command.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::Router;
use tower_http::services::ServeDir;

use crate::config::load_config;

/// Run the serve command.
///
/// The output root is mounted under the configured base prefix so that the
/// decks' absolute asset links resolve the same way they will when deployed.
pub async fn run(
    config_path: &Path,
    port: u16,
    dir: Option<PathBuf>,
    open_browser: bool,
) -> Result<()> {
    let file_config = load_config(config_path)?;
    let dir = dir.unwrap_or_else(|| PathBuf::from(&file_config.output.dir));

    if !dir.exists() {
        anyhow::bail!(
            "Directory not found: {}. Run 'slidepack build' first.",
            dir.display()
        );
    }

    let addr: SocketAddr = format!("127.0.0.1:{}", port)
        .parse()
        .context("Invalid address")?;

    let mount = mount_path(&file_config.output.base_prefix);
    let app = match &mount {
        Some(mount) => Router::new().nest_service(mount, ServeDir::new(&dir)),
        None => Router::new().fallback_service(ServeDir::new(&dir)),
    };

    let url = format!("http://{}{}/", addr, mount.as_deref().unwrap_or(""));
    tracing::info!("Serving {} at {}", dir.display(), url);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    if open_browser {
        if let Err(e) = open::that(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    axum::serve(listener, app).await?;

    Ok(())
}

/// Route prefix for a base prefix, `None` when decks live at the root.
fn mount_path(base_prefix: &str) -> Option<String> {
    let trimmed = base_prefix.trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{}", trimmed))
    }
}
