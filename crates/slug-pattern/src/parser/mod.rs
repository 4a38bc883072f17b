//! Full recursive-descent parser for the pattern language.
//!
//! The parser walks the input once, collecting literal text chunks and
//! placeholder elements. It stops at the first violation and reports the
//! 0-based position. The resumable variant that never fails past an
//! unfinished construct lives in the `partial` module.
//!
//! Text chunk accounting: a chunk is pushed before every `{` and once at
//! the end of the input (or at the `[` of the global settings block), so a
//! parsed pattern always holds exactly one more chunk than elements.

mod generator;
mod selector;
mod settings;

use crate::ast::{ParsedPattern, PatternElement};
use crate::cursor::Cursor;
use crate::error::{ParseError, Result};

/// Recursive-descent parser over a pattern string.
///
/// A parser instance owns its cursor for the duration of one `parse` call
/// and is consumed by it; nothing is shared across calls.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    elements: Vec<PatternElement>,
    text_chunks: Vec<String>,
    chunk_start: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser for the given pattern.
    pub fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
            elements: Vec::new(),
            text_chunks: Vec::new(),
            chunk_start: 0,
        }
    }

    /// Parses the complete pattern into its structured form.
    ///
    /// # Errors
    ///
    /// Returns the first violation together with its 0-based position.
    pub fn parse(mut self) -> Result<ParsedPattern> {
        let mut global_settings = None;

        while let Some(c) = self.cursor.peek() {
            match c {
                '\\' => self.consume_escape()?,
                '{' => {
                    self.flush_chunk();
                    let element = self.parse_placeholder()?;
                    self.elements.push(element);
                    self.chunk_start = self.cursor.position();
                }
                '[' => {
                    // The final text chunk ends where the settings begin.
                    self.flush_chunk();
                    global_settings = Some(self.parse_global_settings()?);
                    break;
                }
                '}' | ']' => {
                    return Err(ParseError::UnmatchedCloser {
                        position: self.cursor.position(),
                        found: c,
                    });
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }

        if self.text_chunks.len() == self.elements.len() {
            self.flush_chunk();
        }

        Ok(ParsedPattern {
            elements: self.elements,
            global_settings,
            text_chunks: self.text_chunks,
        })
    }

    /// Consumes a backslash escape, keeping it verbatim in the current
    /// text chunk. Only `\{`, `\}` and `\\` are valid.
    fn consume_escape(&mut self) -> Result<()> {
        let position = self.cursor.position();
        self.cursor.advance();
        match self.cursor.peek() {
            Some('{') | Some('}') | Some('\\') => {
                self.cursor.advance();
                Ok(())
            }
            Some(_) => Err(ParseError::InvalidEscape { position }),
            None => Err(ParseError::UnexpectedEnd {
                position,
                expected: "escape character",
            }),
        }
    }

    /// Parses one `{ ... }` placeholder. The reserved identifiers `number`
    /// and `special` select the built-in generators; every other
    /// identifier starts a dictionary selector.
    fn parse_placeholder(&mut self) -> Result<PatternElement> {
        self.cursor.expect('{')?;
        self.cursor.skip_whitespace();
        let kind = self.cursor.parse_identifier()?;

        let element = match kind {
            "number" => PatternElement::Number(self.parse_number_settings()?),
            "special" => PatternElement::Special(self.parse_special_settings()?),
            _ => PatternElement::Selector(self.parse_selector(kind)?),
        };

        self.cursor.skip_whitespace();
        self.cursor.expect('}')?;
        Ok(element)
    }

    /// Pushes the literal run since `chunk_start` as a text chunk.
    fn flush_chunk(&mut self) {
        let chunk = self.cursor.slice_from(self.chunk_start);
        self.text_chunks.push(chunk.to_string());
    }
}
