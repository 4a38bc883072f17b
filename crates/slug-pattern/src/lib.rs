//! slug-pattern - Front-end for the slug pattern language.
//!
//! A pattern mixes literal text with `{...}` placeholders that reference
//! dictionaries (`noun`, `adjective`, ...) or the built-in `number` and
//! `special` generators, optionally followed by a `[...]` global settings
//! block:
//!
//! ```text
//! {adjective:+color}-{noun@en:+animal >3,case=lower}-{number:4x}
//! ```
//!
//! Two parsers share this grammar. The full parser turns a complete
//! pattern into a [`ParsedPattern`] or fails at the first violation with
//! a positioned [`ParseError`]. The partial parser accepts an arbitrary
//! prefix and reports a [`ParserContextInfo`] describing the deepest
//! state reached, the element under construction and the token classes
//! that may legally continue the input. Editors use the partial parser
//! for liveness while typing and the full parser on save or submit.
//!
//! Everything here is purely computational over immutable input: no
//! globals, no shared state, no I/O. Concurrent callers need no
//! synchronization.
//!
//! # Example
//!
//! ```
//! let pattern = slug_pattern::parse("{noun:+animal >3}").unwrap();
//! assert_eq!(pattern.elements.len(), 1);
//! assert_eq!(pattern.text_chunks.len(), 2);
//!
//! let context = slug_pattern::parse_partial("{noun:+ani");
//! assert!(context.is_valid);
//! assert!(!slug_pattern::is_complete("{noun:+ani"));
//! ```

pub mod ast;
pub mod cursor;
pub mod error;
mod parser;
mod partial;

pub use ast::{
    CompareOp, GlobalSettings, NumberBase, NumberGen, Options, ParsedPattern, PatternElement,
    Selector, SizeLimit, SpecialCharGen,
};
pub use error::ParseError;
pub use parser::Parser;
pub use partial::{
    parse_partial, ExpectedToken, ParserContextInfo, PartialElement, PartialGlobalSettings,
    PartialNumberGen, PartialSelector, PartialSpecialGen, ParserState,
};

/// Parses a complete pattern.
///
/// # Errors
///
/// Returns the first violation with its 0-based position.
///
/// # Example
///
/// ```
/// let pattern = slug_pattern::parse("{number:5,hex}").unwrap();
/// assert_eq!(pattern.elements.len(), 1);
/// assert!(slug_pattern::parse("{number:5,Dec}").is_err());
/// ```
pub fn parse(pattern: &str) -> error::Result<ParsedPattern> {
    Parser::new(pattern).parse()
}

/// Returns true if the pattern parses without errors.
pub fn validate(pattern: &str) -> bool {
    parse(pattern).is_ok()
}

/// Returns true if the full parser would accept the pattern.
pub fn is_complete(pattern: &str) -> bool {
    parse(pattern).is_ok()
}

/// Returns the longest prefix of the pattern for which a partial parse
/// reaches a recognized state. Equals the whole pattern when it contains
/// no definite syntax error.
///
/// # Example
///
/// ```
/// assert_eq!(slug_pattern::valid_prefix("{noun:+animal"), "{noun:+animal");
/// assert_eq!(slug_pattern::valid_prefix("ab}cd"), "ab");
/// ```
pub fn valid_prefix(pattern: &str) -> &str {
    let context = parse_partial(pattern);
    if context.is_valid {
        pattern
    } else {
        &pattern[..context.position]
    }
}

/// Returns the token classes that may legally continue the pattern.
pub fn expected_next(pattern: &str) -> Vec<ExpectedToken> {
    parse_partial(pattern).expected_next
}
