//! Dictionary provider contract.
//!
//! The engine is purely syntactic and learns which dictionaries and tags
//! exist from a provider. Both queries are idempotent and cacheable; the
//! engine treats the results as read-only and matches kinds
//! case-insensitively. Caching, signing and transport belong to the
//! embedding, not to this crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One dictionary known to the backing word store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryKind {
    /// Dictionary name, e.g. `noun`.
    pub kind: String,
    /// Number of words in the dictionary.
    pub count: u64,
}

/// One tag of a dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    /// Dictionary the tag belongs to.
    pub kind: String,
    /// Tag name, e.g. `animal`.
    pub tag: String,
    /// Human-readable description shown next to the suggestion.
    #[serde(default)]
    pub description: String,
    /// True if words carry the tag only when explicitly requested.
    #[serde(default)]
    pub opt_in: bool,
    /// Number of words carrying the tag.
    #[serde(default)]
    pub word_count: u64,
}

/// Error reported by a dictionary provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider could not be reached or refused the query.
    #[error("dictionary provider unavailable: {0}")]
    Unavailable(String),

    /// The provider answered with data the engine cannot use.
    #[error("malformed provider data: {0}")]
    Malformed(String),
}

/// Source of dictionary and tag metadata.
#[cfg_attr(test, mockall::automock)]
pub trait DictionaryProvider {
    /// Lists the available dictionaries.
    fn dictionaries(&self) -> Result<Vec<DictionaryKind>, ProviderError>;

    /// Lists all tags across dictionaries.
    fn tags(&self) -> Result<Vec<TagEntry>, ProviderError>;
}

/// In-memory provider backed by fixed lists.
///
/// Used by tests and by tooling that loads dictionary metadata from a
/// file.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    dictionaries: Vec<DictionaryKind>,
    tags: Vec<TagEntry>,
}

impl StaticProvider {
    /// Creates a provider over the given rows.
    pub fn new(dictionaries: Vec<DictionaryKind>, tags: Vec<TagEntry>) -> Self {
        Self { dictionaries, tags }
    }

    /// Convenience constructor from plain names: `(kind, count)` pairs
    /// and `(kind, tag, description)` triples.
    pub fn from_names(
        dictionaries: &[(&str, u64)],
        tags: &[(&str, &str, &str)],
    ) -> Self {
        Self {
            dictionaries: dictionaries
                .iter()
                .map(|(kind, count)| DictionaryKind {
                    kind: kind.to_string(),
                    count: *count,
                })
                .collect(),
            tags: tags
                .iter()
                .map(|(kind, tag, description)| TagEntry {
                    kind: kind.to_string(),
                    tag: tag.to_string(),
                    description: description.to_string(),
                    opt_in: false,
                    word_count: 0,
                })
                .collect(),
        }
    }
}

impl DictionaryProvider for StaticProvider {
    fn dictionaries(&self) -> Result<Vec<DictionaryKind>, ProviderError> {
        Ok(self.dictionaries.clone())
    }

    fn tags(&self) -> Result<Vec<TagEntry>, ProviderError> {
        Ok(self.tags.clone())
    }
}
