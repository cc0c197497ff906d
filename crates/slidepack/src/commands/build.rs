//! Aggregate build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use slidepack_static::StaticBuilder;

use crate::config::load_config;

/// Run the build command.
pub async fn run(
    config_path: &Path,
    output: Option<PathBuf>,
    root: Option<PathBuf>,
    minify: bool,
) -> Result<()> {
    let file_config = load_config(config_path)?;
    let config = file_config.build_config(output, root, minify);

    tracing::info!(
        "Building presentations from {}",
        config.presentations_dir.display()
    );

    let result = StaticBuilder::with_renderer(config, file_config.renderer())
        .build()
        .await?;

    tracing::info!(
        "Build completed! Generated {} presentations in {}ms",
        result.decks.len(),
        result.duration_ms
    );
    for deck in &result.decks {
        tracing::info!("  - {}", deck);
    }

    tracing::info!("Output directory: {}", result.output_dir.display());
    tracing::info!("Index page: {}", result.index_path.display());

    Ok(())
}
