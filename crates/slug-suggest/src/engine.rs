//! Context-aware suggestion engine.
//!
//! Given a pattern and a cursor offset, the engine localizes the cursor
//! within a placeholder, classifies the region it sits in and emits
//! ranked completions together with the exact interval each one should
//! replace. Parse uncertainty never surfaces as an error; the engine
//! degrades to a narrower suggestion set instead. Provider failures are
//! the only errors a caller sees.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{debug, trace};

use crate::case;
use crate::provider::DictionaryProvider;
use crate::provider::ProviderError;
use crate::suggestion::{case_group, ReplaceRange, Suggestion, SuggestionKind};

/// A size constraint somewhere in the settings fragment.
static SIZE_LIMIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[=!<>]=?\s*\d+").unwrap()
});

/// A tag marker with its (possibly empty) partial name, ending at the
/// cursor.
static PARTIAL_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([+-])(\w*)$").unwrap()
});

/// Tags already written out in a settings fragment.
static USED_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[+-](\w+)").unwrap()
});

/// Error produced by the suggestion engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestError {
    /// The dictionary provider failed; nothing sensible can be offered.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Completion engine over a dictionary provider.
///
/// The engine holds no state of its own; `suggest` is a pure function of
/// the pattern, the cursor and the provider results.
pub struct SuggestionEngine<'a> {
    provider: &'a dyn DictionaryProvider,
}

impl<'a> SuggestionEngine<'a> {
    /// Creates an engine over the given provider.
    pub fn new(provider: &'a dyn DictionaryProvider) -> Self {
        Self { provider }
    }

    /// Computes completions for the pattern at the cursor offset.
    ///
    /// Offsets are byte offsets; a cursor past the end of the pattern is
    /// clamped to the end.
    pub fn suggest(
        &self,
        pattern: &str,
        cursor: usize,
    ) -> Result<Vec<Suggestion>, SuggestError> {
        let mut cursor = cursor.min(pattern.len());
        while cursor > 0 && !pattern.is_char_boundary(cursor) {
            cursor -= 1;
        }
        debug!(cursor, len = pattern.len(), "computing suggestions");

        // Localize the cursor: the nearest unclosed `{` to the left, the
        // next `}` (or end of input) to the right.
        let Some(start) = placeholder_start(pattern, cursor) else {
            trace!("cursor outside any placeholder");
            return Ok(vec![Suggestion::new(
                "{",
                SuggestionKind::Symbol,
                ReplaceRange::at(cursor),
            )]);
        };
        let end = pattern[cursor..]
            .find('}')
            .map(|offset| cursor + offset)
            .unwrap_or(pattern.len());
        let content = &pattern[start + 1..end];
        let relative = cursor - start - 1;

        match content.find(':') {
            Some(colon) if relative > colon => {
                self.suggest_settings(content, colon, relative, cursor)
            }
            _ => self.suggest_generator_name(content, relative, start, cursor),
        }
    }

    // =========================================================================
    // GENERATOR NAME REGION
    // =========================================================================

    fn suggest_generator_name(
        &self,
        content: &str,
        relative: usize,
        start: usize,
        cursor: usize,
    ) -> Result<Vec<Suggestion>, SuggestError> {
        let typed = content[..relative].trim_start();
        trace!(typed, "generator-name region");

        // A language part is in progress; no completion rules apply.
        if typed.contains('@') {
            return Ok(Vec::new());
        }

        if typed == "number" {
            return Ok(vec![Suggestion::new(
                ":",
                SuggestionKind::Symbol,
                ReplaceRange::at(cursor),
            )]);
        }
        if typed == "special" {
            return Ok(vec![
                Suggestion::new("}", SuggestionKind::Symbol, ReplaceRange::at(cursor)),
                Suggestion::new(":", SuggestionKind::Symbol, ReplaceRange::at(cursor)),
            ]);
        }

        let dictionaries = self.provider.dictionaries()?;
        let range = ReplaceRange::new(start + 1, cursor);

        if typed.is_empty() {
            let mut suggestions = vec![
                Suggestion::new("number", SuggestionKind::Generator, range)
                    .with_description("built-in generator"),
                Suggestion::new("special", SuggestionKind::Generator, range)
                    .with_description("built-in generator"),
            ];
            for dictionary in &dictionaries {
                let base = dictionary.kind.to_ascii_lowercase();
                let description = format!("{} words", dictionary.count);
                for text in [
                    base.clone(),
                    base.to_ascii_uppercase(),
                    case::to_title(&base),
                    case::alternating(&base, false),
                ] {
                    suggestions.push(
                        Suggestion::new(text, SuggestionKind::Generator, range)
                            .with_description(description.clone()),
                    );
                }
            }
            dedup_and_sort(&mut suggestions);
            return Ok(suggestions);
        }

        if dictionaries
            .iter()
            .any(|d| d.kind.eq_ignore_ascii_case(typed))
        {
            return Ok(vec![
                Suggestion::new("}", SuggestionKind::Symbol, ReplaceRange::at(cursor)),
                Suggestion::new("@", SuggestionKind::Symbol, ReplaceRange::at(cursor)),
                Suggestion::new(":", SuggestionKind::Symbol, ReplaceRange::at(cursor)),
            ]);
        }

        let typed_lower = typed.to_ascii_lowercase();
        let mut suggestions = Vec::new();
        for dictionary in &dictionaries {
            if dictionary
                .kind
                .to_ascii_lowercase()
                .starts_with(&typed_lower)
            {
                let description = format!("{} words", dictionary.count);
                for text in case::completions(typed, &dictionary.kind) {
                    suggestions.push(
                        Suggestion::new(text, SuggestionKind::Generator, range)
                            .with_description(description.clone()),
                    );
                }
            }
        }
        for builtin in ["number", "special"] {
            if builtin.starts_with(&typed_lower) {
                suggestions.push(
                    Suggestion::new(builtin, SuggestionKind::Generator, range)
                        .with_description("built-in generator"),
                );
            }
        }
        dedup_and_sort(&mut suggestions);
        Ok(suggestions)
    }

    // =========================================================================
    // SETTINGS REGION
    // =========================================================================

    fn suggest_settings(
        &self,
        content: &str,
        colon: usize,
        relative: usize,
        cursor: usize,
    ) -> Result<Vec<Suggestion>, SuggestError> {
        let name = content[..colon].trim();
        let kind = name.split('@').next().unwrap_or(name).trim();
        let before = &content[colon + 1..relative];
        trace!(kind, before, "settings region");

        match kind {
            "number" => Ok(number_settings(before, cursor)),
            "special" => Ok(special_settings(before, cursor)),
            _ => self.selector_settings(kind, content, colon, before, cursor),
        }
    }

    fn selector_settings(
        &self,
        kind: &str,
        content: &str,
        colon: usize,
        before: &str,
        cursor: usize,
    ) -> Result<Vec<Suggestion>, SuggestError> {
        // A complete comparison operator waits for its digits.
        if ["==", "!=", "<=", ">="].iter().any(|op| before.ends_with(op)) {
            return Ok(Vec::new());
        }
        // A lone comparison character completes with `=`.
        if before.ends_with(['=', '!', '<', '>']) {
            return Ok(vec![Suggestion::new(
                "=",
                SuggestionKind::Operator,
                ReplaceRange::at(cursor),
            )]);
        }

        let has_size_limit = SIZE_LIMIT_RE.is_match(before);

        if let Some(caps) = PARTIAL_TAG_RE.captures(before) {
            let partial = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            return self.tag_suggestions(kind, content, colon, partial, true, has_size_limit, cursor);
        }

        if has_size_limit {
            // The one size limit exists; only more tags or the closer.
            return Ok(tag_operators(cursor));
        }

        if before.trim().is_empty() || before.ends_with(char::is_whitespace) {
            return Ok(neutral_operators(cursor));
        }

        // Anything else is treated as tag context without a marker.
        self.tag_suggestions(kind, content, colon, "", false, has_size_limit, cursor)
    }

    /// Emits tag completions for the selector's kind, dropping tags the
    /// placeholder already uses.
    #[allow(clippy::too_many_arguments)]
    fn tag_suggestions(
        &self,
        kind: &str,
        content: &str,
        colon: usize,
        partial: &str,
        has_marker: bool,
        has_size_limit: bool,
        cursor: usize,
    ) -> Result<Vec<Suggestion>, SuggestError> {
        let all_tags = self.provider.tags()?;
        let tags: Vec<_> = all_tags
            .iter()
            .filter(|t| t.kind.eq_ignore_ascii_case(kind))
            .collect();

        // A fully typed tag switches back to operators and the closer.
        // A placeholder that already carries its size limit never gets a
        // second comparison operator offered.
        if !partial.is_empty() && tags.iter().any(|t| t.tag.eq_ignore_ascii_case(partial)) {
            if has_size_limit {
                return Ok(tag_operators(cursor));
            }
            return Ok(neutral_operators(cursor));
        }

        let settings = &content[colon + 1..];
        let mut used = FxHashSet::default();
        for caps in USED_TAG_RE.captures_iter(settings) {
            if let Some(m) = caps.get(1) {
                used.insert(m.as_str().to_ascii_lowercase());
            }
        }

        let range = if has_marker && !partial.is_empty() {
            ReplaceRange::new(cursor - partial.len(), cursor)
        } else {
            ReplaceRange::at(cursor)
        };
        let partial_lower = partial.to_ascii_lowercase();

        let mut suggestions = Vec::new();
        for tag in tags {
            if used.contains(&tag.tag.to_ascii_lowercase()) {
                continue;
            }
            if !partial.is_empty() && !tag.tag.to_ascii_lowercase().starts_with(&partial_lower) {
                continue;
            }
            let mut suggestion = Suggestion::new(tag.tag.clone(), SuggestionKind::Tag, range);
            if !tag.description.is_empty() {
                suggestion = suggestion.with_description(tag.description.clone());
            }
            suggestions.push(suggestion);
        }
        Ok(suggestions)
    }
}

/// Scans left of the cursor for the placeholder opener. A closer seen
/// first means the cursor sits between placeholders.
fn placeholder_start(pattern: &str, cursor: usize) -> Option<usize> {
    let bytes = pattern.as_bytes();
    for i in (0..cursor).rev() {
        match bytes[i] {
            b'{' => return Some(i),
            b'}' => return None,
            _ => {}
        }
    }
    None
}

/// The reduced operator set once a size limit exists: more tags or
/// close.
fn tag_operators(cursor: usize) -> Vec<Suggestion> {
    vec![
        Suggestion::new("+", SuggestionKind::Operator, ReplaceRange::at(cursor)),
        Suggestion::new("-", SuggestionKind::Operator, ReplaceRange::at(cursor)),
        Suggestion::new("}", SuggestionKind::Symbol, ReplaceRange::at(cursor)),
    ]
}

/// The settings-neutral operator set: more tags, one size limit, or
/// close.
fn neutral_operators(cursor: usize) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = ["+", "-", "==", "!=", "<", "<=", ">", ">="]
        .iter()
        .map(|op| Suggestion::new(*op, SuggestionKind::Operator, ReplaceRange::at(cursor)))
        .collect();
    suggestions.push(Suggestion::new(
        "}",
        SuggestionKind::Symbol,
        ReplaceRange::at(cursor),
    ));
    suggestions
}

/// Suggestions inside `{number:...}` settings.
fn number_settings(before: &str, cursor: usize) -> Vec<Suggestion> {
    let fragment = before.trim_start();
    if fragment.is_empty() {
        return Vec::new();
    }
    if fragment.chars().all(|c| c.is_ascii_digit()) {
        return [("d", "dec"), ("x", "hex"), ("X", "HEX"), ("r", "roman"), ("R", "ROMAN")]
            .iter()
            .map(|(letter, name)| {
                Suggestion::new(*letter, SuggestionKind::Base, ReplaceRange::at(cursor))
                    .with_description(*name)
            })
            .collect();
    }
    if fragment.len() >= 2 {
        let (digits, last) = fragment.split_at(fragment.len() - 1);
        if digits.chars().all(|c| c.is_ascii_digit())
            && matches!(last, "d" | "x" | "X" | "r" | "R")
        {
            return vec![Suggestion::new(
                "}",
                SuggestionKind::Symbol,
                ReplaceRange::at(cursor),
            )];
        }
    }
    Vec::new()
}

/// Suggestions inside `{special:...}` settings.
fn special_settings(before: &str, cursor: usize) -> Vec<Suggestion> {
    let fragment = before.trim_start();
    if fragment.is_empty() {
        return Vec::new();
    }
    if fragment.chars().all(|c| c.is_ascii_digit()) {
        return vec![
            Suggestion::new("-", SuggestionKind::Symbol, ReplaceRange::at(cursor)),
            Suggestion::new("}", SuggestionKind::Symbol, ReplaceRange::at(cursor)),
        ];
    }
    if let Some((min, max)) = fragment.split_once('-') {
        let min_ok = !min.is_empty() && min.chars().all(|c| c.is_ascii_digit());
        if min_ok && max.is_empty() {
            return Vec::new();
        }
        if min_ok && !max.is_empty() && max.chars().all(|c| c.is_ascii_digit()) {
            return vec![Suggestion::new(
                "}",
                SuggestionKind::Symbol,
                ReplaceRange::at(cursor),
            )];
        }
    }
    Vec::new()
}

/// Drops duplicate texts and orders generator suggestions by case group,
/// then lexicographically. The sort is stable.
fn dedup_and_sort(suggestions: &mut Vec<Suggestion>) {
    let mut seen = FxHashSet::default();
    suggestions.retain(|s| seen.insert(s.text.clone()));
    suggestions.sort_by(|a, b| {
        case_group(&a.text)
            .cmp(&case_group(&b.text))
            .then_with(|| a.text.cmp(&b.text))
    });
}
