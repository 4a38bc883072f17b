//! Parser context descriptor and partially-constructed elements.

use serde::Serialize;

use crate::ast::{NumberBase, Options, SizeLimit};

use super::state::{ExpectedToken, ParserState};

/// Everything known about where a partial parse stopped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParserContextInfo {
    /// Deepest parser state reached.
    pub state: ParserState,
    /// 0-based byte offset where parsing stopped: the end of the input,
    /// or the position of the first definite error.
    pub position: usize,
    /// The input up to `position`.
    pub parsed_so_far: String,
    /// Token classes that may legally continue the input.
    pub expected_next: Vec<ExpectedToken>,
    /// The most recently consumed identifier, number, comparison operator
    /// or base name.
    pub last_parsed_token: Option<String>,
    /// False only for definite syntax errors; incompleteness alone keeps
    /// the context valid.
    pub is_valid: bool,
    /// Error description when `is_valid` is false.
    pub error_message: Option<String>,
    /// The element under construction when parsing stopped inside a
    /// placeholder or settings block.
    pub partial_element: Option<PartialElement>,
}

/// A partially-constructed pattern element.
///
/// Holds whatever sub-parts were successfully recognized before the
/// partial parse stopped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PartialElement {
    Selector(PartialSelector),
    Number(PartialNumberGen),
    Special(PartialSpecialGen),
    GlobalSettings(PartialGlobalSettings),
}

/// Accumulated parts of a dictionary selector.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PartialSelector {
    pub kind: String,
    pub language: Option<String>,
    pub include_tags: Vec<String>,
    pub exclude_tags: Vec<String>,
    pub size_limit: Option<SizeLimit>,
    pub options: Options,
}

impl PartialSelector {
    /// Creates a partial selector that has recognized its kind.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Returns true if the tag is already present on either list.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.include_tags.iter().any(|t| t == tag) || self.exclude_tags.iter().any(|t| t == tag)
    }
}

/// Accumulated parts of a `number` generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PartialNumberGen {
    pub max_length: Option<u32>,
    pub base: Option<NumberBase>,
}

/// Accumulated parts of a `special` generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PartialSpecialGen {
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
}

/// Accumulated parts of a global settings block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PartialGlobalSettings {
    pub language: Option<String>,
    pub include_tags: Vec<String>,
    pub exclude_tags: Vec<String>,
    pub size_limit: Option<SizeLimit>,
    pub options: Options,
}

impl PartialGlobalSettings {
    /// Returns true if the tag is already present on either list.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.include_tags.iter().any(|t| t == tag) || self.exclude_tags.iter().any(|t| t == tag)
    }
}
