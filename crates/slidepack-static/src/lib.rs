//! Static site aggregator for slide decks.
//!
//! Discovers presentation directories, hands each one to an external render
//! tool and writes a landing page linking to every built deck.

pub mod assets;
pub mod builder;
pub mod discovery;
pub mod render;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use discovery::{deck_title, discover_decks, valid_decks, Deck};
pub use render::{CommandRenderer, RenderError, RenderJob, Renderer};
