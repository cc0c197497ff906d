//! Configuration file structure (slidepack.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use slidepack_static::{BuildConfig, CommandRenderer};

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub presentations: PresentationsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
pub struct PresentationsConfig {
    #[serde(default = "default_presentations_dir")]
    pub dir: String,
    /// File marking a directory as a deck
    #[serde(default = "default_entry")]
    pub entry: String,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
    /// URL prefix decks are deployed under
    #[serde(default = "default_base_prefix")]
    pub base_prefix: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub minify: bool,
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_args")]
    pub args: Vec<String>,
}

impl Default for PresentationsConfig {
    fn default() -> Self {
        Self {
            dir: default_presentations_dir(),
            entry: default_entry(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            base_prefix: default_base_prefix(),
            title: default_title(),
            minify: false,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
        }
    }
}

fn default_presentations_dir() -> String {
    "presentations".to_string()
}
fn default_entry() -> String {
    "slides.md".to_string()
}
fn default_output_dir() -> String {
    "dist".to_string()
}
fn default_base_prefix() -> String {
    "/slidev/".to_string()
}
fn default_title() -> String {
    "Slidev Presentations".to_string()
}
fn default_program() -> String {
    "npx".to_string()
}
fn default_args() -> Vec<String> {
    vec!["slidev".to_string(), "build".to_string()]
}

impl ConfigFile {
    /// Builder configuration, with CLI overrides applied.
    pub fn build_config(
        &self,
        output: Option<PathBuf>,
        root: Option<PathBuf>,
        minify: bool,
    ) -> BuildConfig {
        BuildConfig {
            presentations_dir: root.unwrap_or_else(|| PathBuf::from(&self.presentations.dir)),
            output_dir: output.unwrap_or_else(|| PathBuf::from(&self.output.dir)),
            entry_file: self.presentations.entry.clone(),
            base_prefix: self.output.base_prefix.clone(),
            title: self.output.title.clone(),
            minify: minify || self.output.minify,
        }
    }

    pub fn renderer(&self) -> CommandRenderer {
        CommandRenderer::new(&self.render.program, self.render.args.clone())
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());

    Ok(config)
}

pub const DEFAULT_CONFIG: &str = r#"# Slidepack Configuration

[presentations]
# Directory with one subdirectory per presentation
dir = "presentations"

# File that marks a subdirectory as a presentation
entry = "slides.md"

[output]
# Output directory, wiped on every build
dir = "dist"

# URL prefix the presentations are deployed under
base_prefix = "/slidev/"

# Landing page title
title = "Slidev Presentations"

# Minify the landing page stylesheet
minify = false

[render]
# Render tool, invoked as: <program> <args...> --base <path> --out <dir>
program = "npx"
args = ["slidev", "build"]
"#;
