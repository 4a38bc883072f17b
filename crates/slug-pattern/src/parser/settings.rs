//! Global settings parsing.
//!
//! The `[...]` block shares the selector body grammar, prefixed by an
//! optional `@language`, and must be the final non-whitespace construct
//! of the pattern.

use crate::ast::GlobalSettings;
use crate::error::{ParseError, Result};

use super::Parser;

impl<'a> Parser<'a> {
    /// Parses the trailing `[ ... ]` global settings block.
    ///
    /// Grammar: `"[" ( "@" ident ws* )? sel_body "]"`. Anything other
    /// than whitespace after the closing bracket is an error.
    pub(crate) fn parse_global_settings(&mut self) -> Result<GlobalSettings> {
        self.cursor.expect('[')?;
        self.cursor.skip_whitespace();

        let mut settings = GlobalSettings::default();
        if self.cursor.match_char('@') {
            settings.language = Some(self.cursor.parse_identifier()?.to_string());
        }

        let body = self.parse_selector_body()?;
        settings.include_tags = body.include_tags;
        settings.exclude_tags = body.exclude_tags;
        settings.size_limit = body.size_limit;
        settings.options = body.options;

        self.cursor.skip_whitespace();
        self.cursor.expect(']')?;

        self.cursor.skip_whitespace();
        if !self.cursor.is_at_end() {
            return Err(ParseError::ContentAfterSettings {
                position: self.cursor.position(),
            });
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CompareOp, ParsedPattern, SizeLimit};

    fn parse(input: &str) -> Result<ParsedPattern> {
        Parser::new(input).parse()
    }

    fn settings(input: &str) -> GlobalSettings {
        parse(input).unwrap().global_settings.expect("global settings")
    }

    #[test]
    fn test_empty_settings_block() {
        let settings = settings("{noun}[]");
        assert!(settings.language.is_none());
        assert!(settings.include_tags.is_empty());
    }

    #[test]
    fn test_language_only() {
        let settings = settings("[@en]");
        assert_eq!(settings.language.as_deref(), Some("en"));
    }

    #[test]
    fn test_full_settings() {
        let settings = settings("{noun}-{verb}[@en +common -rare <=8,case=lower]");
        assert_eq!(settings.language.as_deref(), Some("en"));
        assert_eq!(settings.include_tags, ["common"]);
        assert_eq!(settings.exclude_tags, ["rare"]);
        assert_eq!(
            settings.size_limit,
            Some(SizeLimit {
                op: CompareOp::Le,
                value: 8
            })
        );
        assert_eq!(settings.options["case"], "lower");
    }

    #[test]
    fn test_settings_freeze_final_chunk() {
        let pattern = parse("a{noun}b[@en]").unwrap();
        assert_eq!(pattern.text_chunks, ["a", "b"]);
        assert!(pattern.global_settings.is_some());
    }

    #[test]
    fn test_trailing_whitespace_allowed() {
        assert!(parse("{noun}[@en]  \n").is_ok());
    }

    #[test]
    fn test_content_after_settings_is_error() {
        assert!(matches!(
            parse("{noun}[@en] more").unwrap_err(),
            ParseError::ContentAfterSettings { .. }
        ));
        assert!(matches!(
            parse("[@en]{noun}").unwrap_err(),
            ParseError::ContentAfterSettings { .. }
        ));
    }

    #[test]
    fn test_unterminated_settings() {
        assert!(parse("{noun}[@en").is_err());
        assert!(parse("[").is_err());
    }

    #[test]
    fn test_duplicate_tag_in_settings() {
        assert!(matches!(
            parse("[+a +a]").unwrap_err(),
            ParseError::DuplicateTag { .. }
        ));
    }
}
