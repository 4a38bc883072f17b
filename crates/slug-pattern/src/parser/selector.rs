//! Selector parsing.
//!
//! Handles the dictionary selector production and its settings body: the
//! language tag, include/exclude tags, the single size limit and the
//! option list. The body is shared with the global settings block.

use crate::ast::{CompareOp, Options, Selector, SizeLimit};
use crate::cursor::{is_identifier_start, is_value_char};
use crate::error::{ParseError, Result};

use super::Parser;

/// Accumulator for the shared selector-body production.
#[derive(Debug, Default)]
pub(crate) struct SelectorBody {
    pub include_tags: Vec<String>,
    pub exclude_tags: Vec<String>,
    pub size_limit: Option<SizeLimit>,
    pub options: Options,
}

impl SelectorBody {
    fn has_tag(&self, tag: &str) -> bool {
        self.include_tags.iter().any(|t| t == tag) || self.exclude_tags.iter().any(|t| t == tag)
    }
}

impl<'a> Parser<'a> {
    /// Parses a selector after its kind identifier has been consumed.
    ///
    /// Grammar: `ident ( "@" ident )? ( ":" sel_body )?`
    pub(crate) fn parse_selector(&mut self, kind: &str) -> Result<Selector> {
        let mut selector = Selector::new(kind);

        if self.cursor.match_char('@') {
            selector.language = Some(self.cursor.parse_identifier()?.to_string());
        }

        self.cursor.skip_whitespace();
        if self.cursor.match_char(':') {
            let body = self.parse_selector_body()?;
            selector.include_tags = body.include_tags;
            selector.exclude_tags = body.exclude_tags;
            selector.size_limit = body.size_limit;
            selector.options = body.options;
        }

        Ok(selector)
    }

    /// Parses the tag / size limit / options body shared by selectors and
    /// the global settings block.
    ///
    /// Tag atoms and the single size limit may interleave freely; options
    /// terminate the body. Options follow a comma, or attach directly when
    /// nothing or a size limit precedes them. Directly after tags they
    /// require the comma.
    pub(crate) fn parse_selector_body(&mut self) -> Result<SelectorBody> {
        let mut body = SelectorBody::default();

        loop {
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                Some(sign @ ('+' | '-')) => {
                    self.cursor.advance();
                    let position = self.cursor.position();
                    let tag = match self.cursor.peek() {
                        Some(c) if is_identifier_start(c) => self.cursor.parse_identifier()?,
                        _ => return Err(ParseError::EmptyTag { position }),
                    };
                    if body.has_tag(tag) {
                        return Err(ParseError::DuplicateTag {
                            position,
                            tag: tag.to_string(),
                        });
                    }
                    if sign == '+' {
                        body.include_tags.push(tag.to_string());
                    } else {
                        body.exclude_tags.push(tag.to_string());
                    }
                }
                Some('<' | '>' | '=' | '!') => {
                    let position = self.cursor.position();
                    if body.size_limit.is_some() {
                        return Err(ParseError::SecondSizeLimit { position });
                    }
                    let op = self.parse_compare_op()?;
                    self.cursor.skip_whitespace();
                    let value = self.cursor.parse_number()?;
                    body.size_limit = Some(SizeLimit { op, value });
                }
                Some(',') => {
                    let position = self.cursor.position();
                    self.cursor.advance();
                    self.cursor.skip_whitespace();
                    match self.cursor.peek() {
                        Some(c) if is_identifier_start(c) => {
                            self.parse_options(&mut body.options)?;
                        }
                        _ => return Err(ParseError::TrailingComma { position }),
                    }
                    break;
                }
                Some(c) if is_identifier_start(c) => {
                    let tags_present =
                        !body.include_tags.is_empty() || !body.exclude_tags.is_empty();
                    if tags_present && body.size_limit.is_none() {
                        return Err(ParseError::MissingComma {
                            position: self.cursor.position(),
                        });
                    }
                    self.parse_options(&mut body.options)?;
                    break;
                }
                _ => break,
            }
        }

        Ok(body)
    }

    /// Parses a comparison operator, tokenized greedily. A lone `=` or `!`
    /// is an error since only `==` and `!=` are operators.
    pub(crate) fn parse_compare_op(&mut self) -> Result<CompareOp> {
        let start = self.cursor.position();
        let op = match self.cursor.advance() {
            Some('<') => {
                if self.cursor.match_char('=') {
                    CompareOp::Le
                } else {
                    CompareOp::Lt
                }
            }
            Some('>') => {
                if self.cursor.match_char('=') {
                    CompareOp::Ge
                } else {
                    CompareOp::Gt
                }
            }
            Some('=') => {
                if self.cursor.match_char('=') {
                    CompareOp::Eq
                } else {
                    return Err(ParseError::IncompleteOperator { position: start });
                }
            }
            Some('!') => {
                if self.cursor.match_char('=') {
                    CompareOp::Ne
                } else {
                    return Err(ParseError::IncompleteOperator { position: start });
                }
            }
            other => {
                return Err(ParseError::UnexpectedChar {
                    position: start,
                    found: other.unwrap_or(' '),
                });
            }
        };
        if self.cursor.position() - start > 1 {
            self.cursor.record_token(start);
        }
        Ok(op)
    }

    /// Parses `ident "=" value ("," ws* ident "=" value)*`.
    ///
    /// Values are possibly empty runs of `[A-Za-z0-9_]`. Duplicate keys
    /// overwrite earlier values but keep their original position.
    pub(crate) fn parse_options(&mut self, options: &mut Options) -> Result<()> {
        loop {
            let key = self.cursor.parse_identifier()?.to_string();
            if !self.cursor.match_char('=') {
                return Err(ParseError::MissingEquals {
                    position: self.cursor.position(),
                    key,
                });
            }
            let start = self.cursor.position();
            while matches!(self.cursor.peek(), Some(c) if is_value_char(c)) {
                self.cursor.advance();
            }
            let value = self.cursor.slice_from(start).to_string();
            options.insert(key, value);

            let comma_position = self.cursor.position();
            if !self.cursor.match_char(',') {
                break;
            }
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                Some(c) if is_identifier_start(c) => {}
                _ => return Err(ParseError::TrailingComma { position: comma_position }),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ParsedPattern, PatternElement};

    fn parse(input: &str) -> Result<ParsedPattern> {
        Parser::new(input).parse()
    }

    fn selector(input: &str) -> Selector {
        let pattern = parse(input).unwrap();
        match &pattern.elements[0] {
            PatternElement::Selector(selector) => selector.clone(),
            other => panic!("expected selector, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_selector() {
        let sel = selector("{noun}");
        assert_eq!(sel.kind, "noun");
        assert!(sel.language.is_none());
        assert!(sel.include_tags.is_empty());
    }

    #[test]
    fn test_selector_with_language() {
        let sel = selector("{noun@en}");
        assert_eq!(sel.language.as_deref(), Some("en"));
    }

    #[test]
    fn test_selector_full_settings() {
        let sel = selector("{noun@en:+animal -nsfw >3,case=lower}");
        assert_eq!(sel.kind, "noun");
        assert_eq!(sel.language.as_deref(), Some("en"));
        assert_eq!(sel.include_tags, ["animal"]);
        assert_eq!(sel.exclude_tags, ["nsfw"]);
        assert_eq!(
            sel.size_limit,
            Some(SizeLimit {
                op: CompareOp::Gt,
                value: 3
            })
        );
        assert_eq!(sel.options["case"], "lower");
    }

    #[test]
    fn test_multiple_tags() {
        let sel = selector("{noun:+animal +plant -nsfw}");
        assert_eq!(sel.include_tags, ["animal", "plant"]);
        assert_eq!(sel.exclude_tags, ["nsfw"]);
    }

    #[test]
    fn test_tags_after_size_limit() {
        let sel = selector("{noun:>3 +animal}");
        assert_eq!(sel.include_tags, ["animal"]);
        assert_eq!(
            sel.size_limit,
            Some(SizeLimit {
                op: CompareOp::Gt,
                value: 3
            })
        );
    }

    #[test]
    fn test_empty_tag() {
        assert!(matches!(
            parse("{noun:+}").unwrap_err(),
            ParseError::EmptyTag { .. }
        ));
        assert!(matches!(
            parse("{noun:+ animal}").unwrap_err(),
            ParseError::EmptyTag { .. }
        ));
    }

    #[test]
    fn test_duplicate_tag() {
        assert!(matches!(
            parse("{noun:+animal +animal}").unwrap_err(),
            ParseError::DuplicateTag { .. }
        ));
        // Include and exclude lists share the at-most-once rule.
        assert!(matches!(
            parse("{noun:+animal -animal}").unwrap_err(),
            ParseError::DuplicateTag { .. }
        ));
    }

    #[test]
    fn test_all_comparison_operators() {
        for (text, op) in [
            ("==", CompareOp::Eq),
            ("!=", CompareOp::Ne),
            ("<", CompareOp::Lt),
            ("<=", CompareOp::Le),
            (">", CompareOp::Gt),
            (">=", CompareOp::Ge),
        ] {
            let sel = selector(&format!("{{noun:{text}4}}"));
            assert_eq!(sel.size_limit, Some(SizeLimit { op, value: 4 }));
        }
    }

    #[test]
    fn test_whitespace_after_operator() {
        let sel = selector("{noun:>= 10}");
        assert_eq!(
            sel.size_limit,
            Some(SizeLimit {
                op: CompareOp::Ge,
                value: 10
            })
        );
    }

    #[test]
    fn test_lone_equals_is_error() {
        assert!(matches!(
            parse("{noun:=4}").unwrap_err(),
            ParseError::IncompleteOperator { .. }
        ));
    }

    #[test]
    fn test_lone_bang_is_error() {
        assert!(matches!(
            parse("{noun:!4}").unwrap_err(),
            ParseError::IncompleteOperator { .. }
        ));
    }

    #[test]
    fn test_second_size_limit_is_error() {
        assert!(matches!(
            parse("{noun:>3 <8}").unwrap_err(),
            ParseError::SecondSizeLimit { .. }
        ));
    }

    #[test]
    fn test_options_directly_after_colon() {
        let sel = selector("{noun:case=upper}");
        assert_eq!(sel.options["case"], "upper");
    }

    #[test]
    fn test_options_directly_after_size_limit() {
        // Accepted without a comma when a size limit precedes them.
        let sel = selector("{noun:>3 case=lower}");
        assert_eq!(sel.options["case"], "lower");
    }

    #[test]
    fn test_options_after_tags_require_comma() {
        assert!(matches!(
            parse("{noun:+animal case=lower}").unwrap_err(),
            ParseError::MissingComma { .. }
        ));
        let sel = selector("{noun:+animal,case=lower}");
        assert_eq!(sel.options["case"], "lower");
    }

    #[test]
    fn test_multiple_options() {
        let sel = selector("{noun:case=lower,sep=_,limit=2}");
        let keys: Vec<_> = sel.options.keys().cloned().collect();
        assert_eq!(keys, ["case", "sep", "limit"]);
    }

    #[test]
    fn test_duplicate_option_key_overwrites() {
        let sel = selector("{noun:case=lower,case=upper}");
        assert_eq!(sel.options.len(), 1);
        assert_eq!(sel.options["case"], "upper");
    }

    #[test]
    fn test_empty_option_value() {
        let sel = selector("{noun:sep=}");
        assert_eq!(sel.options["sep"], "");
    }

    #[test]
    fn test_option_missing_equals() {
        assert!(matches!(
            parse("{noun:case=lower,bad}").unwrap_err(),
            ParseError::MissingEquals { .. }
        ));
    }

    #[test]
    fn test_trailing_comma_in_options() {
        assert!(matches!(
            parse("{noun:case=lower,}").unwrap_err(),
            ParseError::TrailingComma { .. }
        ));
    }

    #[test]
    fn test_trailing_comma_after_tags() {
        assert!(matches!(
            parse("{noun:+animal,}").unwrap_err(),
            ParseError::TrailingComma { .. }
        ));
    }
}
