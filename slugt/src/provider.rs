//! Dictionary metadata loading for the CLI.
//!
//! `slugt suggest` works against a JSON file describing dictionaries and
//! tags. Without one, a small built-in demo set keeps the command usable
//! for experimentation.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use slug_suggest::{DictionaryKind, StaticProvider, TagEntry};

use crate::error::Result;

/// On-disk dictionary metadata.
#[derive(Debug, Deserialize)]
struct DictionaryFile {
    #[serde(default)]
    dictionaries: Vec<DictionaryKind>,
    #[serde(default)]
    tags: Vec<TagEntry>,
}

/// Loads a provider from a JSON metadata file.
pub fn load_provider(path: &Path) -> Result<StaticProvider> {
    let contents = std::fs::read_to_string(path)?;
    let file: DictionaryFile = serde_json::from_str(&contents)?;
    debug!(
        dictionaries = file.dictionaries.len(),
        tags = file.tags.len(),
        "loaded dictionary metadata"
    );
    Ok(StaticProvider::new(file.dictionaries, file.tags))
}

/// A small built-in dictionary set for use without a metadata file.
pub fn demo_provider() -> StaticProvider {
    StaticProvider::from_names(
        &[
            ("adjective", 250),
            ("adverb", 76),
            ("noun", 480),
            ("verb", 180),
        ],
        &[
            ("noun", "animal", "living creatures"),
            ("noun", "artifact", "man-made objects"),
            ("noun", "plant", "flora"),
            ("noun", "place", "locations"),
            ("adjective", "color", "colors"),
            ("adjective", "size", "sizes and extents"),
        ],
    )
}
