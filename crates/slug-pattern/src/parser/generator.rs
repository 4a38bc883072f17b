//! Built-in generator parsing.
//!
//! Handles the settings of the reserved `number` and `special`
//! placeholders.

use crate::ast::{NumberBase, NumberGen, SpecialCharGen};
use crate::error::{ParseError, Result};

use super::Parser;

impl<'a> Parser<'a> {
    /// Parses the settings of a `number` generator after the identifier.
    ///
    /// Grammar: `"number" ( ":" digits ( [dxXrR] | "," ws* long-base )? )?`
    ///
    /// Short and long base forms cannot be mixed, and only one base may be
    /// given; anything after a complete base must be the closing brace.
    pub(crate) fn parse_number_settings(&mut self) -> Result<NumberGen> {
        self.cursor.skip_whitespace();
        if !self.cursor.match_char(':') {
            return Ok(NumberGen::default());
        }

        self.cursor.skip_whitespace();
        let max_length = self.cursor.parse_number()?;

        let base = match self.cursor.peek() {
            Some(c) if NumberBase::from_short(c).is_some() => {
                self.cursor.advance();
                // from_short is Some by the guard above
                NumberBase::from_short(c).unwrap_or_default()
            }
            Some(',') => {
                self.cursor.advance();
                self.cursor.skip_whitespace();
                let position = self.cursor.position();
                let name = self.cursor.parse_identifier()?;
                NumberBase::from_long(name).ok_or_else(|| ParseError::InvalidBase {
                    position,
                    base: name.to_string(),
                })?
            }
            _ => NumberBase::Dec,
        };

        Ok(NumberGen { max_length, base })
    }

    /// Parses the settings of a `special` generator after the identifier.
    ///
    /// Grammar: `"special" ( ":" digits ( "-" digits )? )?`
    pub(crate) fn parse_special_settings(&mut self) -> Result<SpecialCharGen> {
        self.cursor.skip_whitespace();
        if !self.cursor.match_char(':') {
            return Ok(SpecialCharGen::default());
        }

        self.cursor.skip_whitespace();
        let position = self.cursor.position();
        let min_length = self.cursor.parse_number()?;
        let max_length = if self.cursor.match_char('-') {
            self.cursor.parse_number()?
        } else {
            min_length
        };

        if min_length == 0 {
            return Err(ParseError::ZeroLength { position });
        }
        if min_length > max_length {
            return Err(ParseError::InvalidRange {
                position,
                min: min_length,
                max: max_length,
            });
        }

        Ok(SpecialCharGen {
            min_length,
            max_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ParsedPattern, PatternElement};

    fn parse(input: &str) -> Result<ParsedPattern> {
        Parser::new(input).parse()
    }

    fn number(input: &str) -> NumberGen {
        match parse(input).unwrap().elements[0] {
            PatternElement::Number(gen) => gen,
            ref other => panic!("expected number generator, got {other:?}"),
        }
    }

    fn special(input: &str) -> SpecialCharGen {
        match parse(input).unwrap().elements[0] {
            PatternElement::Special(gen) => gen,
            ref other => panic!("expected special generator, got {other:?}"),
        }
    }

    #[test]
    fn test_number_defaults() {
        let gen = number("{number}");
        assert_eq!(gen.max_length, 1);
        assert_eq!(gen.base, NumberBase::Dec);
    }

    #[test]
    fn test_number_length_only() {
        let gen = number("{number:5}");
        assert_eq!(gen.max_length, 5);
        assert_eq!(gen.base, NumberBase::Dec);
    }

    #[test]
    fn test_number_short_bases() {
        assert_eq!(number("{number:5d}").base, NumberBase::Dec);
        assert_eq!(number("{number:5x}").base, NumberBase::Hex);
        assert_eq!(number("{number:5X}").base, NumberBase::HexUpper);
        assert_eq!(number("{number:5r}").base, NumberBase::Roman);
        assert_eq!(number("{number:5R}").base, NumberBase::RomanUpper);
    }

    #[test]
    fn test_number_long_bases() {
        assert_eq!(number("{number:5,hex}").base, NumberBase::Hex);
        assert_eq!(number("{number:5,HEX}").base, NumberBase::HexUpper);
        assert_eq!(number("{number:5, roman}").base, NumberBase::Roman);
        assert_eq!(number("{number:5,ROMAN}").base, NumberBase::RomanUpper);
        assert_eq!(number("{number:5,dec}").base, NumberBase::Dec);
    }

    #[test]
    fn test_number_base_wrong_case_is_error() {
        assert!(matches!(
            parse("{number:5,Dec}").unwrap_err(),
            ParseError::InvalidBase { .. }
        ));
        assert!(matches!(
            parse("{number:5,Hex}").unwrap_err(),
            ParseError::InvalidBase { .. }
        ));
    }

    #[test]
    fn test_number_mixed_base_forms_is_error() {
        assert!(parse("{number:5d,dec}").is_err());
        assert!(parse("{number:5dec}").is_err());
    }

    #[test]
    fn test_number_double_base_is_error() {
        assert!(parse("{number:5,hex,dec}").is_err());
    }

    #[test]
    fn test_number_colon_without_length_is_error() {
        assert!(parse("{number:}").is_err());
        assert!(parse("{number:,hex}").is_err());
    }

    #[test]
    fn test_special_defaults() {
        let gen = special("{special}");
        assert_eq!((gen.min_length, gen.max_length), (1, 1));
    }

    #[test]
    fn test_special_single_length() {
        let gen = special("{special:4}");
        assert_eq!((gen.min_length, gen.max_length), (4, 4));
    }

    #[test]
    fn test_special_range() {
        let gen = special("{special:3-7}");
        assert_eq!((gen.min_length, gen.max_length), (3, 7));
    }

    #[test]
    fn test_special_inverted_range_is_error() {
        assert!(matches!(
            parse("{special:5-3}").unwrap_err(),
            ParseError::InvalidRange {
                min: 5,
                max: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_special_zero_length_is_error() {
        assert!(matches!(
            parse("{special:0}").unwrap_err(),
            ParseError::ZeroLength { .. }
        ));
        assert!(matches!(
            parse("{special:0-3}").unwrap_err(),
            ParseError::ZeroLength { .. }
        ));
    }

    #[test]
    fn test_special_dangling_dash_is_error() {
        assert!(parse("{special:3-}").is_err());
    }
}
