//! slug-suggest - Context-aware completion for slug patterns.
//!
//! Given a pattern, a cursor offset and a dictionary provider, the
//! engine returns a ranked list of completions (generator names with
//! case variants, tags filtered by the ones already used, operators,
//! delimiters, numeric bases) together with the exact character range
//! each suggestion should replace.
//!
//! The engine is a pure function of its three inputs. It performs no
//! caching and holds no shared state; its only failure mode is a
//! provider error, which it passes through unchanged. Everything the
//! engine cannot make sense of degrades to a narrower suggestion set
//! instead of an error, so an editor can keep querying while the user
//! types through incomplete or broken input.
//!
//! # Example
//!
//! ```
//! use slug_suggest::{suggest, StaticProvider};
//!
//! let provider = StaticProvider::from_names(
//!     &[("adjective", 200), ("noun", 300)],
//!     &[("noun", "animal", "living creatures")],
//! );
//! let suggestions = suggest("{a", 2, &provider).unwrap();
//! assert_eq!(suggestions[0].text, "adjective");
//! ```

mod case;
mod engine;
mod provider;
mod suggestion;

pub use case::{alternating, completions, detect, to_title, CaseStyle};
pub use engine::{SuggestError, SuggestionEngine};
pub use provider::{DictionaryKind, DictionaryProvider, ProviderError, StaticProvider, TagEntry};
pub use suggestion::{ReplaceRange, Suggestion, SuggestionKind};

/// Computes completions for `pattern` at the `cursor` offset using the
/// given provider.
///
/// A cursor past the end of the pattern is clamped to the end. The
/// result is deterministic for fixed inputs and provider data.
pub fn suggest(
    pattern: &str,
    cursor: usize,
    provider: &dyn DictionaryProvider,
) -> Result<Vec<Suggestion>, SuggestError> {
    SuggestionEngine::new(provider).suggest(pattern, cursor)
}
