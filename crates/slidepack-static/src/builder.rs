//! Aggregate site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::assets::AssetPipeline;
use crate::discovery::{discover_decks, valid_decks, Deck};
use crate::render::{CommandRenderer, RenderError, RenderJob, Renderer};
use crate::templates::{DeckLink, IndexContext, TemplateEngine};

/// Name of the landing page written at the output root.
pub const INDEX_FILE: &str = "index.html";

/// Configuration for building the aggregate site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory holding one subdirectory per presentation
    pub presentations_dir: PathBuf,

    /// Output root, wiped at the start of every build
    pub output_dir: PathBuf,

    /// File whose presence marks a directory as a deck
    pub entry_file: String,

    /// URL prefix the decks are served under
    pub base_prefix: String,

    /// Landing page title
    pub title: String,

    /// Minify the landing page stylesheet
    pub minify: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            presentations_dir: PathBuf::from("presentations"),
            output_dir: PathBuf::from("dist"),
            entry_file: "slides.md".to_string(),
            base_prefix: "/slidev/".to_string(),
            title: "Slidev Presentations".to_string(),
            minify: false,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Names of the decks that were built, in build order
    pub decks: Vec<String>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,

    /// Path of the generated landing page
    pub index_path: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to reset output directory: {0}")]
    Reset(String),

    #[error("Failed to read presentations directory: {0}")]
    Discovery(String),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Failed to render template: {0}")]
    Template(String),

    #[error("Failed to write output: {0}")]
    Write(String),
}

impl BuildError {
    /// Exit code to report for this error.
    ///
    /// Render tool failures pass the tool's own code through.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::Render(e) => e.exit_code().filter(|code| *code != 0).unwrap_or(1),
            _ => 1,
        }
    }
}

/// Aggregate site builder.
pub struct StaticBuilder<R = CommandRenderer> {
    config: BuildConfig,
    renderer: R,
    templates: TemplateEngine,
}

impl StaticBuilder<CommandRenderer> {
    /// Create a new builder that renders with the default command.
    pub fn new(config: BuildConfig) -> Self {
        Self::with_renderer(config, CommandRenderer::default())
    }
}

impl<R: Renderer> StaticBuilder<R> {
    /// Create a new builder with a custom renderer.
    pub fn with_renderer(config: BuildConfig, renderer: R) -> Self {
        Self {
            config,
            renderer,
            templates: TemplateEngine::new(),
        }
    }

    /// Build every deck and the landing page.
    ///
    /// Decks are rendered one after another in name order. The first render
    /// failure aborts the build: later decks are not attempted and no landing
    /// page is written.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let output_dir = self.reset_output()?;

        let decks = valid_decks(discover_decks(
            &self.config.presentations_dir,
            &self.config.entry_file,
        )?);

        for deck in &decks {
            tracing::info!("Building presentation: {}", deck.name);

            let job = self.job_for(deck, &output_dir);
            self.renderer.render(&job).await?;

            tracing::info!("Built: {}", deck.name);
        }

        let index_path = self.write_index(&decks, &output_dir)?;

        let duration = start.elapsed();

        Ok(BuildResult {
            decks: decks.into_iter().map(|d| d.name).collect(),
            duration_ms: duration.as_millis() as u64,
            output_dir,
            index_path,
        })
    }

    /// Remove any previous output and recreate the directory empty.
    ///
    /// Returns the canonical output path so renderers running inside a deck
    /// directory get an absolute target.
    fn reset_output(&self) -> Result<PathBuf, BuildError> {
        let output_dir = &self.config.output_dir;

        if output_dir.exists() {
            tracing::debug!("Removing {}", output_dir.display());
            fs::remove_dir_all(output_dir)
                .map_err(|e| BuildError::Reset(format!("{}: {}", output_dir.display(), e)))?;
        }

        fs::create_dir_all(output_dir)
            .map_err(|e| BuildError::Reset(format!("{}: {}", output_dir.display(), e)))?;

        fs::canonicalize(output_dir)
            .map_err(|e| BuildError::Reset(format!("{}: {}", output_dir.display(), e)))
    }

    fn job_for(&self, deck: &Deck, output_dir: &Path) -> RenderJob {
        RenderJob {
            deck: deck.name.clone(),
            working_dir: deck.source_path.clone(),
            base_path: base_path(&self.config.base_prefix, &deck.name),
            output_dir: output_dir.join(&deck.name),
        }
    }

    /// Render the landing page and write it to the output root.
    fn write_index(&self, decks: &[Deck], output_dir: &Path) -> Result<PathBuf, BuildError> {
        let context = IndexContext {
            title: self.config.title.clone(),
            css: AssetPipeline::index_css(self.config.minify),
            decks: decks
                .iter()
                .map(|deck| DeckLink {
                    name: deck.name.clone(),
                    title: deck.title(),
                })
                .collect(),
        };

        let html = self
            .templates
            .render_index(&context)
            .map_err(|e| BuildError::Template(e.to_string()))?;

        let index_path = output_dir.join(INDEX_FILE);
        fs::write(&index_path, html)
            .map_err(|e| BuildError::Write(format!("{}: {}", index_path.display(), e)))?;

        Ok(index_path)
    }
}

/// URL base path for a deck: `/<prefix>/<name>/`.
pub fn base_path(prefix: &str, name: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("/{}/", name)
    } else {
        format!("/{}/{}/", prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;
    use std::sync::Mutex;
    use tempfile::{tempdir, TempDir};

    /// Renderer that writes a stub deck and records every job.
    #[derive(Default)]
    struct StubRenderer {
        jobs: Mutex<Vec<RenderJob>>,
        fail_on: Option<String>,
    }

    impl StubRenderer {
        fn failing_on(deck: &str) -> Self {
            Self {
                fail_on: Some(deck.to_string()),
                ..Default::default()
            }
        }

        fn rendered(&self) -> Vec<String> {
            self.jobs
                .lock()
                .unwrap()
                .iter()
                .map(|j| j.deck.clone())
                .collect()
        }
    }

    impl Renderer for StubRenderer {
        async fn render(&self, job: &RenderJob) -> Result<(), RenderError> {
            self.jobs.lock().unwrap().push(job.clone());

            if self.fail_on.as_deref() == Some(job.deck.as_str()) {
                return Err(RenderError::Failed {
                    deck: job.deck.clone(),
                    code: Some(2),
                });
            }

            fs::create_dir_all(&job.output_dir).unwrap();
            fs::write(job.output_dir.join("index.html"), &job.base_path).unwrap();
            Ok(())
        }
    }

    fn add_deck(root: &Path, name: &str) {
        fs::create_dir_all(root.join(name)).unwrap();
        fs::write(root.join(name).join("slides.md"), "# Slides").unwrap();
    }

    fn setup() -> (TempDir, BuildConfig) {
        let temp = tempdir().unwrap();
        let presentations = temp.path().join("presentations");
        fs::create_dir_all(&presentations).unwrap();

        let config = BuildConfig {
            presentations_dir: presentations,
            output_dir: temp.path().join("dist"),
            ..Default::default()
        };

        (temp, config)
    }

    fn entries(dir: &Path) -> BTreeSet<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    fn hrefs(html: &str) -> BTreeSet<String> {
        html.split("href=\"./")
            .skip(1)
            .map(|rest| rest.split('/').next().unwrap().to_string())
            .collect()
    }

    #[test]
    fn normalizes_base_path() {
        assert_eq!(base_path("/slidev/", "intro"), "/slidev/intro/");
        assert_eq!(base_path("/slidev", "intro"), "/slidev/intro/");
        assert_eq!(base_path("slidev/", "intro"), "/slidev/intro/");
        assert_eq!(base_path("/", "intro"), "/intro/");
        assert_eq!(base_path("", "intro"), "/intro/");
        assert_eq!(base_path("/talks/2024/", "intro"), "/talks/2024/intro/");
    }

    #[tokio::test]
    async fn builds_valid_decks_and_index() {
        let (_temp, config) = setup();
        let root = config.presentations_dir.clone();
        let out = config.output_dir.clone();

        add_deck(&root, "intro");
        add_deck(&root, "deep-dive");
        fs::create_dir_all(root.join("scratch")).unwrap();
        fs::write(root.join("scratch/notes.txt"), "notes").unwrap();

        let builder = StaticBuilder::with_renderer(config, StubRenderer::default());
        let result = builder.build().await.unwrap();

        assert_eq!(result.decks, vec!["deep-dive", "intro"]);
        assert_eq!(
            entries(&out),
            BTreeSet::from(["deep-dive".to_string(), "intro".to_string(), "index.html".to_string()])
        );

        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert_eq!(
            hrefs(&html),
            BTreeSet::from(["deep-dive".to_string(), "intro".to_string()])
        );
        assert!(html.contains(">Intro</div>"));
        assert!(html.contains(">Deep Dive</div>"));
        assert!(!html.contains("scratch"));
        assert_eq!(result.index_path, fs::canonicalize(&out).unwrap().join("index.html"));
    }

    #[tokio::test]
    async fn passes_base_path_and_absolute_output() {
        let (_temp, config) = setup();
        add_deck(&config.presentations_dir, "intro");
        let root = config.presentations_dir.clone();

        let renderer = StubRenderer::default();
        let builder = StaticBuilder::with_renderer(config, renderer);
        let result = builder.build().await.unwrap();

        let jobs = builder.renderer.jobs.lock().unwrap().clone();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].base_path, "/slidev/intro/");
        assert_eq!(jobs[0].working_dir, root.join("intro"));
        assert!(jobs[0].output_dir.is_absolute());
        assert_eq!(jobs[0].output_dir, result.output_dir.join("intro"));
    }

    #[tokio::test]
    async fn empty_root_produces_only_index() {
        let (_temp, config) = setup();
        let out = config.output_dir.clone();

        let builder = StaticBuilder::with_renderer(config, StubRenderer::default());
        let result = builder.build().await.unwrap();

        assert!(result.decks.is_empty());
        assert_eq!(entries(&out), BTreeSet::from(["index.html".to_string()]));

        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(hrefs(&html).is_empty());
    }

    #[tokio::test]
    async fn removes_stale_output() {
        let (_temp, config) = setup();
        let out = config.output_dir.clone();
        add_deck(&config.presentations_dir, "intro");

        fs::create_dir_all(out.join("old-deck")).unwrap();
        fs::write(out.join("old-deck/index.html"), "stale").unwrap();
        fs::write(out.join("unrelated.txt"), "stale").unwrap();

        let builder = StaticBuilder::with_renderer(config, StubRenderer::default());
        builder.build().await.unwrap();

        assert_eq!(
            entries(&out),
            BTreeSet::from(["index.html".to_string(), "intro".to_string()])
        );
    }

    #[tokio::test]
    async fn repeated_builds_are_identical() {
        let (_temp, config) = setup();
        let out = config.output_dir.clone();
        add_deck(&config.presentations_dir, "intro");
        add_deck(&config.presentations_dir, "deep-dive");

        let builder = StaticBuilder::with_renderer(config, StubRenderer::default());

        builder.build().await.unwrap();
        let first_entries = entries(&out);
        let first_index = fs::read(out.join("index.html")).unwrap();

        builder.build().await.unwrap();
        let second_entries = entries(&out);
        let second_index = fs::read(out.join("index.html")).unwrap();

        assert_eq!(first_entries, second_entries);
        assert_eq!(first_index, second_index);
    }

    #[tokio::test]
    async fn render_failure_aborts_build() {
        let (_temp, config) = setup();
        let out = config.output_dir.clone();
        for name in ["a", "b", "c"] {
            add_deck(&config.presentations_dir, name);
        }

        let builder = StaticBuilder::with_renderer(config, StubRenderer::failing_on("b"));
        let err = builder.build().await.unwrap_err();

        assert!(matches!(
            err,
            BuildError::Render(RenderError::Failed { ref deck, .. }) if deck == "b"
        ));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(builder.renderer.rendered(), vec!["a", "b"]);
        assert!(!out.join("index.html").exists());
        assert!(!out.join("c").exists());
    }

    #[tokio::test]
    async fn missing_presentations_dir_fails() {
        let (temp, mut config) = setup();
        config.presentations_dir = temp.path().join("missing");

        let builder = StaticBuilder::with_renderer(config, StubRenderer::default());
        let err = builder.build().await.unwrap_err();

        assert!(matches!(err, BuildError::Discovery(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn uses_configured_title_and_entry_file() {
        let (_temp, mut config) = setup();
        let root = config.presentations_dir.clone();
        fs::create_dir_all(root.join("talk")).unwrap();
        fs::write(root.join("talk/deck.md"), "# Talk").unwrap();
        add_deck(&root, "other");

        config.entry_file = "deck.md".to_string();
        config.title = "Team Talks".to_string();
        config.minify = true;
        let out = config.output_dir.clone();

        let builder = StaticBuilder::with_renderer(config, StubRenderer::default());
        let result = builder.build().await.unwrap();

        assert_eq!(result.decks, vec!["talk"]);
        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains("<title>Team Talks</title>"));
        assert!(html.contains(".presentation{"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn builds_with_external_command() {
        let (_temp, config) = setup();
        let out = config.output_dir.clone();
        add_deck(&config.presentations_dir, "intro");
        add_deck(&config.presentations_dir, "deep-dive");

        // $1..$4 are --base <base> --out <dir>
        let renderer = CommandRenderer::new(
            "sh",
            vec![
                "-c".to_string(),
                r#"test -f slides.md && mkdir -p "$4" && printf '%s' "$2" > "$4/index.html""#
                    .to_string(),
                "render".to_string(),
            ],
        );

        let builder = StaticBuilder::with_renderer(config, renderer);
        builder.build().await.unwrap();

        assert_eq!(
            fs::read_to_string(out.join("deep-dive/index.html")).unwrap(),
            "/slidev/deep-dive/"
        );
        assert_eq!(
            fs::read_to_string(out.join("intro/index.html")).unwrap(),
            "/slidev/intro/"
        );
        assert!(out.join("index.html").exists());
    }
}
