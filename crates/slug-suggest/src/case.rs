//! Case-pattern inference for generator-name completion.
//!
//! When the user has typed a prefix of a dictionary name, the completions
//! mirror the case shape of what was typed: `adj` completes to
//! `adjective` and `aDjEcTiVe`, `ADJ` to `ADJECTIVE`, `Adjective` and
//! `AdJeCtIvE`, `Adj` to `Adjective` alone, and a mixed prefix like `aDj`
//! is preserved verbatim with the rest of the word continuing the
//! alternation.

/// Case shape of a typed generator-name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStyle {
    /// No uppercase letters.
    Lower,
    /// No lowercase letters.
    Upper,
    /// Uppercase first letter, lowercase rest (needs two characters or
    /// more to be distinguishable from `Upper`).
    Title,
    /// Anything else.
    Mixed,
}

/// Detects the case shape of a non-empty input.
pub fn detect(input: &str) -> CaseStyle {
    let has_upper = input.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = input.chars().any(|c| c.is_ascii_lowercase());
    if !has_upper {
        return CaseStyle::Lower;
    }
    if !has_lower {
        return CaseStyle::Upper;
    }
    let mut chars = input.chars();
    let first_upper = chars.next().is_some_and(|c| c.is_ascii_uppercase());
    if first_upper && chars.all(|c| !c.is_ascii_uppercase()) {
        CaseStyle::Title
    } else {
        CaseStyle::Mixed
    }
}

/// Uppercases the first letter and lowercases the rest.
pub fn to_title(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
        }
        None => String::new(),
    }
}

/// Renders the word in alternating case, starting upper or lower.
/// Parity advances with every character.
pub fn alternating(word: &str, start_upper: bool) -> String {
    word.chars()
        .enumerate()
        .map(|(i, c)| {
            if (i % 2 == 0) == start_upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

/// Completes `base` in the case shapes implied by the typed `input`.
///
/// `input` must be a case-insensitive prefix of `base`; `base` is taken
/// in its canonical lowercase form.
pub fn completions(input: &str, base: &str) -> Vec<String> {
    let base = base.to_ascii_lowercase();
    match detect(input) {
        CaseStyle::Lower => vec![base.clone(), alternating(&base, false)],
        CaseStyle::Upper => vec![
            base.to_ascii_uppercase(),
            to_title(&base),
            alternating(&base, true),
        ],
        CaseStyle::Title => vec![to_title(&base)],
        CaseStyle::Mixed => vec![mixed_continuation(input, &base)],
    }
}

/// Preserves the user's exact prefix and continues the remainder of the
/// word in alternating case, starting from the opposite of the user's
/// last cased character.
fn mixed_continuation(input: &str, base: &str) -> String {
    let rest = &base[input.len().min(base.len())..];
    let last_cased = input.chars().rev().find(|c| c.is_ascii_alphabetic());
    let start_upper = last_cased.is_some_and(|c| c.is_ascii_lowercase());
    input.to_string() + &alternating(rest, start_upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_lower() {
        assert_eq!(detect("adj"), CaseStyle::Lower);
        assert_eq!(detect("a"), CaseStyle::Lower);
    }

    #[test]
    fn test_detect_upper() {
        assert_eq!(detect("ADJ"), CaseStyle::Upper);
        assert_eq!(detect("A"), CaseStyle::Upper);
    }

    #[test]
    fn test_detect_title() {
        assert_eq!(detect("Adj"), CaseStyle::Title);
        assert_eq!(detect("Adjective"), CaseStyle::Title);
    }

    #[test]
    fn test_detect_mixed() {
        assert_eq!(detect("aDj"), CaseStyle::Mixed);
        assert_eq!(detect("adJ"), CaseStyle::Mixed);
    }

    #[test]
    fn test_to_title() {
        assert_eq!(to_title("adjective"), "Adjective");
        assert_eq!(to_title("ADJECTIVE"), "Adjective");
        assert_eq!(to_title(""), "");
    }

    #[test]
    fn test_alternating_start_lower() {
        assert_eq!(alternating("adjective", false), "aDjEcTiVe");
        assert_eq!(alternating("noun", false), "nOuN");
    }

    #[test]
    fn test_alternating_start_upper() {
        assert_eq!(alternating("adjective", true), "AdJeCtIvE");
    }

    #[test]
    fn test_completions_lower() {
        assert_eq!(completions("a", "adjective"), ["adjective", "aDjEcTiVe"]);
    }

    #[test]
    fn test_completions_upper() {
        assert_eq!(
            completions("AD", "adjective"),
            ["ADJECTIVE", "Adjective", "AdJeCtIvE"]
        );
    }

    #[test]
    fn test_completions_single_upper_char() {
        assert_eq!(
            completions("A", "adjective"),
            ["ADJECTIVE", "Adjective", "AdJeCtIvE"]
        );
    }

    #[test]
    fn test_completions_title() {
        assert_eq!(completions("Adj", "adjective"), ["Adjective"]);
    }

    #[test]
    fn test_completions_mixed_preserves_prefix() {
        // The typed prefix survives verbatim, the rest alternates from
        // the opposite of the last typed character.
        assert_eq!(completions("aDj", "adjective"), ["aDjEcTiVe"]);
        assert_eq!(completions("aD", "adverb"), ["aDvErB"]);
    }
}
