//! External render tool invocation.

use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

/// A single deck to hand to the render tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    /// Deck name
    pub deck: String,

    /// Working directory for the render tool (the deck's source directory)
    pub working_dir: PathBuf,

    /// URL base path the deck is served under, e.g. `/slidev/intro/`
    pub base_path: String,

    /// Absolute output directory for this deck
    pub output_dir: PathBuf,
}

/// Errors that can occur while rendering a deck.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to start render tool `{program}` for {deck}: {message}")]
    Spawn {
        deck: String,
        program: String,
        message: String,
    },

    #[error("Render tool failed for {deck} ({})", describe_code(.code))]
    Failed { deck: String, code: Option<i32> },
}

impl RenderError {
    /// Exit code of the render tool, if it exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RenderError::Failed { code, .. } => *code,
            RenderError::Spawn { .. } => None,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Something that turns a deck directory into a built static deck.
pub trait Renderer: Send + Sync {
    /// Render one deck. Must not return before the output is complete.
    fn render(&self, job: &RenderJob) -> impl Future<Output = Result<(), RenderError>> + Send;
}

/// Renders decks by running an external command.
///
/// The command is invoked as `<program> <args...> --base <base> --out <dir>`
/// from inside the deck directory, with stdio inherited so the tool's output
/// streams straight to the terminal.
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    program: String,
    args: Vec<String>,
}

impl CommandRenderer {
    /// Create a renderer for the given program and leading arguments.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Full argument list for a job.
    pub fn args_for(&self, job: &RenderJob) -> Vec<String> {
        let mut args = self.args.clone();
        args.push("--base".to_string());
        args.push(job.base_path.clone());
        args.push("--out".to_string());
        args.push(job.output_dir.to_string_lossy().into_owned());
        args
    }
}

impl Default for CommandRenderer {
    fn default() -> Self {
        Self::new("npx", vec!["slidev".to_string(), "build".to_string()])
    }
}

impl Renderer for CommandRenderer {
    async fn render(&self, job: &RenderJob) -> Result<(), RenderError> {
        let args = self.args_for(job);
        tracing::debug!("Running {} {}", self.program, args.join(" "));

        let status = Command::new(&self.program)
            .args(&args)
            .current_dir(&job.working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| RenderError::Spawn {
                deck: job.deck.clone(),
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(RenderError::Failed {
                deck: job.deck.clone(),
                code: status.code(),
            })
        }
    }
}
