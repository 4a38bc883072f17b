//! Character cursor for traversing pattern text.
//!
//! This module provides the `Cursor` struct which maintains position state
//! while iterating through a pattern string. The grammar itself is ASCII,
//! so positions are byte offsets; literal text between placeholders may
//! still contain multi-byte UTF-8 sequences and is traversed correctly.

use crate::error::{ParseError, Result};

/// A cursor for traversing a pattern character by character.
///
/// The cursor maintains the current position in the input and provides
/// methods for advancing, peeking ahead, matching expected characters and
/// consuming identifiers and numbers. Every successful multi-character
/// consumption records the consumed text, which the partial parser exposes
/// as the last parsed token.
///
/// # Example
///
/// ```
/// use slug_pattern::cursor::Cursor;
///
/// let mut cursor = Cursor::new("noun:+animal");
/// assert_eq!(cursor.parse_identifier().unwrap(), "noun");
/// assert!(cursor.match_char(':'));
/// assert_eq!(cursor.peek(), Some('+'));
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    /// The pattern text being traversed.
    input: &'a str,

    /// Current byte position in the input.
    position: usize,

    /// Byte range of the most recently consumed multi-character token.
    last_token: Option<(usize, usize)>,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor positioned at the start of the input.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            last_token: None,
        }
    }

    /// Returns the character at the cursor position without consuming it.
    ///
    /// Returns `None` at the end of the input.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        if self.position >= self.input.len() {
            return None;
        }

        // Fast path for ASCII (the whole grammar is ASCII)
        let b = self.input.as_bytes()[self.position];
        if b < 128 {
            return Some(b as char);
        }

        // Slow path for UTF-8 inside literal runs
        self.input[self.position..].chars().next()
    }

    /// Consumes and returns the character at the cursor position.
    ///
    /// Returns `None` at the end of the input.
    #[inline]
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// Consumes the expected character if it is next.
    ///
    /// Returns true if the character was matched and consumed.
    ///
    /// # Example
    ///
    /// ```
    /// use slug_pattern::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new(">=");
    /// assert!(cursor.match_char('>'));
    /// assert!(!cursor.match_char('>'));
    /// assert!(cursor.match_char('='));
    /// ```
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the expected character or fails with a positioned error.
    pub fn expect(&mut self, expected: char) -> Result<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            Some(_) => Err(ParseError::ExpectedChar {
                position: self.position,
                expected,
            }),
            None => Err(ParseError::UnexpectedEnd {
                position: self.position,
                expected: "closing delimiter",
            }),
        }
    }

    /// Skips consecutive whitespace characters.
    pub fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    /// Returns true if the cursor is at the end of the input.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Returns the current byte position in the input.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the full input text.
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Returns a slice of the input from `start` to the current position.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.input[start..self.position]
    }

    /// Parses a non-negative decimal integer.
    ///
    /// Fails if the next character is not a digit, or if the value does not
    /// fit in a `u32`. The consumed digits are recorded as the last token.
    ///
    /// # Example
    ///
    /// ```
    /// use slug_pattern::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new("42x");
    /// assert_eq!(cursor.parse_number().unwrap(), 42);
    /// assert_eq!(cursor.peek(), Some('x'));
    /// ```
    pub fn parse_number(&mut self) -> Result<u32> {
        let start = self.position;
        match self.peek() {
            Some(c) if c.is_ascii_digit() => {}
            Some(_) => {
                return Err(ParseError::ExpectedNumber { position: start });
            }
            None => {
                return Err(ParseError::UnexpectedEnd {
                    position: start,
                    expected: "number",
                });
            }
        }

        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }

        let text = self.slice_from(start);
        let value = text
            .parse::<u32>()
            .map_err(|_| ParseError::NumberTooLarge { position: start })?;
        self.record_token(start);
        Ok(value)
    }

    /// Parses an identifier (`[A-Za-z_][A-Za-z0-9_]*`).
    ///
    /// Fails if the next character is not a letter or underscore. The
    /// consumed identifier is recorded as the last token.
    pub fn parse_identifier(&mut self) -> Result<&'a str> {
        let start = self.position;
        match self.peek() {
            Some(c) if is_identifier_start(c) => {}
            Some(_) => {
                return Err(ParseError::ExpectedIdentifier { position: start });
            }
            None => {
                return Err(ParseError::UnexpectedEnd {
                    position: start,
                    expected: "identifier",
                });
            }
        }

        while matches!(self.peek(), Some(c) if is_identifier_continue(c)) {
            self.advance();
        }

        self.record_token(start);
        Ok(self.slice_from(start))
    }

    /// Records the input from `start` to the current position as the most
    /// recently consumed token.
    pub fn record_token(&mut self, start: usize) {
        self.last_token = Some((start, self.position));
    }

    /// Returns the most recently consumed multi-character token.
    pub fn last_token(&self) -> Option<&'a str> {
        self.last_token.map(|(start, end)| &self.input[start..end])
    }
}

/// Returns true if `c` can start an identifier.
#[inline]
pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Returns true if `c` can continue an identifier.
#[inline]
pub fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Returns true if `c` is valid inside an option value.
#[inline]
pub fn is_value_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cursor() {
        let cursor = Cursor::new("noun");
        assert_eq!(cursor.peek(), Some('n'));
        assert_eq!(cursor.position(), 0);
        assert!(!cursor.is_at_end());
    }

    #[test]
    fn test_advance() {
        let mut cursor = Cursor::new("abc");
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.advance(), Some('b'));
        assert_eq!(cursor.advance(), Some('c'));
        assert_eq!(cursor.advance(), None);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_advance_utf8() {
        let mut cursor = Cursor::new("héllo");
        assert_eq!(cursor.advance(), Some('h'));
        assert_eq!(cursor.advance(), Some('é'));
        assert_eq!(cursor.advance(), Some('l'));
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_match_char() {
        let mut cursor = Cursor::new("==");
        assert!(cursor.match_char('='));
        assert!(cursor.match_char('='));
        assert!(!cursor.match_char('='));
    }

    #[test]
    fn test_expect_success() {
        let mut cursor = Cursor::new("}");
        assert!(cursor.expect('}').is_ok());
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_expect_wrong_char() {
        let mut cursor = Cursor::new("]");
        let err = cursor.expect('}').unwrap_err();
        assert_eq!(err.position(), 0);
    }

    #[test]
    fn test_expect_at_end() {
        let mut cursor = Cursor::new("");
        assert!(cursor.expect('}').is_err());
    }

    #[test]
    fn test_skip_whitespace() {
        let mut cursor = Cursor::new("  \t\n+tag");
        cursor.skip_whitespace();
        assert_eq!(cursor.peek(), Some('+'));
    }

    #[test]
    fn test_parse_number() {
        let mut cursor = Cursor::new("123}");
        assert_eq!(cursor.parse_number().unwrap(), 123);
        assert_eq!(cursor.peek(), Some('}'));
        assert_eq!(cursor.last_token(), Some("123"));
    }

    #[test]
    fn test_parse_number_no_digit() {
        let mut cursor = Cursor::new("x");
        assert!(matches!(
            cursor.parse_number(),
            Err(ParseError::ExpectedNumber { position: 0 })
        ));
    }

    #[test]
    fn test_parse_number_overflow() {
        let mut cursor = Cursor::new("99999999999999999999");
        assert!(matches!(
            cursor.parse_number(),
            Err(ParseError::NumberTooLarge { position: 0 })
        ));
    }

    #[test]
    fn test_parse_identifier() {
        let mut cursor = Cursor::new("noun_2@en");
        assert_eq!(cursor.parse_identifier().unwrap(), "noun_2");
        assert_eq!(cursor.peek(), Some('@'));
        assert_eq!(cursor.last_token(), Some("noun_2"));
    }

    #[test]
    fn test_parse_identifier_leading_underscore() {
        let mut cursor = Cursor::new("_kind");
        assert_eq!(cursor.parse_identifier().unwrap(), "_kind");
    }

    #[test]
    fn test_parse_identifier_rejects_digit() {
        let mut cursor = Cursor::new("2fast");
        assert!(cursor.parse_identifier().is_err());
    }

    #[test]
    fn test_slice_from() {
        let mut cursor = Cursor::new("noun:>3");
        let start = cursor.position();
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.slice_from(start), "no");
    }

    #[test]
    fn test_empty_input() {
        let mut cursor = Cursor::new("");
        assert!(cursor.is_at_end());
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.advance(), None);
    }
}
