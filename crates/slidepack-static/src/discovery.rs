//! Presentation discovery.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::builder::BuildError;

/// A candidate presentation directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    /// Directory name, used as output subpath and slug
    pub name: String,

    /// Source directory
    pub source_path: PathBuf,

    /// Whether the entry file is present
    pub has_entry_file: bool,
}

impl Deck {
    /// Human-readable title for the landing page.
    pub fn title(&self) -> String {
        deck_title(&self.name)
    }
}

/// Enumerate the immediate subdirectories of `root`, sorted by name.
///
/// Every subdirectory is returned; `has_entry_file` tells whether it can be
/// built. Plain files and entries that cannot be resolved (such as dangling
/// symlinks) are skipped. Only an unreadable `root` is an error.
pub fn discover_decks(root: &Path, entry_file: &str) -> Result<Vec<Deck>, BuildError> {
    fs::read_dir(root)
        .map_err(|e| BuildError::Discovery(format!("{}: {}", root.display(), e)))?;

    let mut decks = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(BuildError::Discovery(format!("{}: {}", root.display(), e)));
            }
            Err(e) => {
                tracing::debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            tracing::warn!("Skipping non UTF-8 directory name: {}", entry.path().display());
            continue;
        };

        let source_path = entry.path().to_path_buf();
        let has_entry_file = source_path.join(entry_file).exists();

        decks.push(Deck {
            name: name.to_string(),
            source_path,
            has_entry_file,
        });
    }

    Ok(decks)
}

/// Keep only decks that carry an entry file, logging the rest.
pub fn valid_decks(decks: Vec<Deck>) -> Vec<Deck> {
    decks
        .into_iter()
        .filter(|deck| {
            if !deck.has_entry_file {
                tracing::debug!("Skipping {}: no entry file", deck.name);
            }
            deck.has_entry_file
        })
        .collect()
}

/// Derive a display title from a deck name.
///
/// Dashes become spaces and the first ASCII word character after every word
/// boundary is uppercased. Everything else is left untouched, so `my_deck`
/// stays `My_deck` and `2024-recap` becomes `2024 Recap`.
pub fn deck_title(name: &str) -> String {
    let mut title = String::with_capacity(name.len());
    let mut prev_is_word = false;

    for c in name.chars() {
        let c = if c == '-' { ' ' } else { c };
        let is_word = c.is_ascii_alphanumeric() || c == '_';

        if is_word && !prev_is_word {
            title.push(c.to_ascii_uppercase());
        } else {
            title.push(c);
        }

        prev_is_word = is_word;
    }

    title
}
