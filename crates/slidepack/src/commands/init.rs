//! Initialize a presentations workspace.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::DEFAULT_CONFIG;

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    scaffold(config_path, Path::new("presentations"), yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'slidepack build' to build every presentation.");

    Ok(())
}

fn scaffold(config_path: &Path, presentations_dir: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing slidepack...");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    let sample_dir = presentations_dir.join("getting-started");
    fs::create_dir_all(&sample_dir).context("Failed to create presentations directory")?;

    let sample_path = sample_dir.join("slides.md");
    if !sample_path.exists() || yes {
        fs::write(&sample_path, SAMPLE_SLIDES).context("Failed to write sample slides")?;
        tracing::info!("Created {}", sample_path.display());
    }

    Ok(())
}

const SAMPLE_SLIDES: &str = r#"---
title: Getting Started
---

# Getting Started

Every directory under `presentations/` with a `slides.md` becomes a deck.

---

# Building

```bash
slidepack build
```

Decks land in `dist/<name>/` with a landing page at `dist/index.html`.
"#;
