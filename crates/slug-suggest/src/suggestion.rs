//! Suggestion value types.

use serde::Serialize;

/// Half-open character interval a suggestion would overwrite when
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReplaceRange {
    pub start: usize,
    pub end: usize,
}

impl ReplaceRange {
    /// A zero-width range that inserts at the given offset.
    pub fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// A range spanning `start..end`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Category of a completion suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// A generator name: a dictionary kind or `number`/`special`.
    Generator,
    /// A tag name.
    Tag,
    /// A tag sign or comparison operator.
    Operator,
    /// A structural symbol such as `{`, `}`, `:` or `@`.
    Symbol,
    /// A language identifier.
    Language,
    /// A numeric base letter.
    Base,
}

/// One completion the editor can offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// The text to insert.
    pub text: String,
    /// What the text is.
    pub kind: SuggestionKind,
    /// Optional human-readable annotation.
    pub description: Option<String>,
    /// The interval of the pattern the text replaces.
    pub replace_range: ReplaceRange,
}

impl Suggestion {
    /// Creates a suggestion without a description.
    pub fn new(text: impl Into<String>, kind: SuggestionKind, replace_range: ReplaceRange) -> Self {
        Self {
            text: text.into(),
            kind,
            description: None,
            replace_range,
        }
    }

    /// Attaches a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Sort key for generator suggestions: `number`/`special` first, then
/// lowercase, uppercase, titlecase and mixed-case completions. Within a
/// group the text orders lexicographically.
pub(crate) fn case_group(text: &str) -> u8 {
    if text == "number" || text == "special" {
        return 0;
    }
    let has_upper = text.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = text.chars().any(|c| c.is_ascii_lowercase());
    if !has_upper {
        return 1;
    }
    if !has_lower {
        return 2;
    }
    let mut chars = text.chars();
    let first_upper = chars.next().is_some_and(|c| c.is_ascii_uppercase());
    if first_upper && chars.all(|c| !c.is_ascii_uppercase()) {
        3
    } else {
        4
    }
}
