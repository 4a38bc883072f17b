//! Resumable partial parser.
//!
//! The partial parser follows the same grammar as the full parser but
//! never fails past the first unfinished construct. For any prefix of a
//! well-formed pattern it reports the deepest state reached, the element
//! under construction and the token classes that may legally continue the
//! input. Definite syntax errors mark the context invalid without losing
//! the state, so editors can keep completing while the user types through
//! an error.

mod context;
mod state;

pub use context::{
    ParserContextInfo, PartialElement, PartialGlobalSettings, PartialNumberGen, PartialSelector,
    PartialSpecialGen,
};
pub use state::{ExpectedToken, ParserState};

use crate::ast::{CompareOp, NumberBase, SizeLimit};
use crate::cursor::{is_identifier_start, is_value_char, Cursor};
use crate::error::ParseError;

/// Parses an arbitrary prefix of a pattern and describes where parsing
/// stopped.
///
/// # Example
///
/// ```
/// use slug_pattern::{parse_partial, ParserState};
///
/// let context = parse_partial("{noun:");
/// assert_eq!(context.state, ParserState::ExpectingTagOrSizeLimit);
/// assert!(context.is_valid);
/// ```
pub fn parse_partial(input: &str) -> ParserContextInfo {
    PartialParser::new(input).run()
}

/// Outcome of a scan step that could not complete its construct.
enum Stop {
    /// The input ended inside the construct; the prefix stays valid.
    Incomplete(ParserState),
    /// A definite syntax error.
    Invalid {
        state: ParserState,
        position: usize,
        message: String,
    },
}

/// Converts a cursor-level error into an invalid stop at its position.
fn invalid(state: ParserState, error: ParseError) -> Stop {
    Stop::Invalid {
        state,
        position: error.position(),
        message: error.to_string(),
    }
}

type Scan<T> = std::result::Result<T, Stop>;

/// Scanner that mirrors the full parser while recording state instead of
/// failing.
struct PartialParser<'a> {
    cursor: Cursor<'a>,
    partial: Option<PartialElement>,
    /// True while scanning the `[...]` block; between-item stops then
    /// report the bracket state instead of the brace states.
    in_global: bool,
    /// True once a size limit was consumed in the current body.
    size_limit_seen: bool,
    /// True once a tag was consumed in the current body.
    tags_seen: bool,
}

impl<'a> PartialParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
            partial: None,
            in_global: false,
            size_limit_seen: false,
            tags_seen: false,
        }
    }

    fn run(mut self) -> ParserContextInfo {
        match self.scan_pattern() {
            Ok(state) => self.finish(state),
            Err(Stop::Incomplete(state)) => self.finish(state),
            Err(Stop::Invalid {
                state,
                position,
                message,
            }) => self.finish_invalid(state, position, message),
        }
    }

    fn finish(&self, state: ParserState) -> ParserContextInfo {
        let position = self.cursor.position();
        ParserContextInfo {
            state,
            position,
            parsed_so_far: self.cursor.input()[..position].to_string(),
            expected_next: state.expected_tokens().to_vec(),
            last_parsed_token: self.cursor.last_token().map(str::to_string),
            is_valid: true,
            error_message: None,
            partial_element: self.partial.clone(),
        }
    }

    fn finish_invalid(
        &self,
        state: ParserState,
        position: usize,
        message: String,
    ) -> ParserContextInfo {
        ParserContextInfo {
            state,
            position,
            parsed_so_far: self.cursor.input()[..position].to_string(),
            expected_next: state.expected_tokens().to_vec(),
            last_parsed_token: self.cursor.last_token().map(str::to_string),
            is_valid: false,
            error_message: Some(message),
            partial_element: self.partial.clone(),
        }
    }

    // =========================================================================
    // TOP LEVEL
    // =========================================================================

    fn scan_pattern(&mut self) -> Scan<ParserState> {
        loop {
            match self.cursor.peek() {
                None => return Ok(ParserState::OutsidePlaceholder),
                Some('\\') => {
                    let position = self.cursor.position();
                    self.cursor.advance();
                    match self.cursor.peek() {
                        None => return Err(Stop::Incomplete(ParserState::Incomplete)),
                        Some('{') | Some('}') | Some('\\') => {
                            self.cursor.advance();
                        }
                        Some(_) => {
                            return Err(Stop::Invalid {
                                state: ParserState::Invalid,
                                position,
                                message: "invalid escape sequence".to_string(),
                            });
                        }
                    }
                }
                Some('{') => {
                    self.cursor.advance();
                    self.scan_placeholder()?;
                    self.partial = None;
                }
                Some('[') => {
                    self.cursor.advance();
                    self.in_global = true;
                    self.scan_global_settings()?;
                    self.partial = None;
                    self.cursor.skip_whitespace();
                    if self.cursor.is_at_end() {
                        return Ok(ParserState::Complete);
                    }
                    return Err(Stop::Invalid {
                        state: ParserState::Invalid,
                        position: self.cursor.position(),
                        message: "unexpected content after global settings".to_string(),
                    });
                }
                Some(c @ ('}' | ']')) => {
                    return Err(Stop::Invalid {
                        state: ParserState::Invalid,
                        position: self.cursor.position(),
                        message: format!("unmatched '{c}'"),
                    });
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    // =========================================================================
    // PLACEHOLDERS
    // =========================================================================

    fn scan_placeholder(&mut self) -> Scan<()> {
        self.tags_seen = false;
        self.size_limit_seen = false;

        if self.cursor.is_at_end() {
            return Err(Stop::Incomplete(ParserState::InPlaceholder));
        }
        let mut head_state = ParserState::InPlaceholder;
        if matches!(self.cursor.peek(), Some(c) if c.is_whitespace()) {
            self.cursor.skip_whitespace();
            head_state = ParserState::ExpectingIdentifier;
            if self.cursor.is_at_end() {
                return Err(Stop::Incomplete(head_state));
            }
        }

        let kind = self.identifier(head_state)?;
        match kind {
            "number" => {
                self.partial = Some(PartialElement::Number(PartialNumberGen::default()));
                if self.cursor.is_at_end() {
                    return Err(Stop::Incomplete(ParserState::PartialNumberGen));
                }
                self.scan_number_settings()
            }
            "special" => {
                self.partial = Some(PartialElement::Special(PartialSpecialGen::default()));
                if self.cursor.is_at_end() {
                    return Err(Stop::Incomplete(ParserState::PartialSpecialGen));
                }
                self.scan_special_settings()
            }
            _ => {
                self.partial = Some(PartialElement::Selector(PartialSelector::new(kind)));
                if self.cursor.is_at_end() {
                    return Err(Stop::Incomplete(ParserState::PartialSelector));
                }
                self.scan_selector()
            }
        }
    }

    fn scan_selector(&mut self) -> Scan<()> {
        let mut head_state = ParserState::PartialSelector;

        if self.cursor.match_char('@') {
            if self.cursor.is_at_end() {
                return Err(Stop::Incomplete(ParserState::ExpectingLanguageIdentifier));
            }
            let language = self.identifier(ParserState::ExpectingLanguageIdentifier)?;
            self.set_language(language);
            head_state = ParserState::ExpectingAfterLanguage;
            if self.cursor.is_at_end() {
                return Err(Stop::Incomplete(head_state));
            }
        }

        if matches!(self.cursor.peek(), Some(c) if c.is_whitespace()) {
            self.cursor.skip_whitespace();
            head_state = ParserState::ExpectingColon;
            if self.cursor.is_at_end() {
                return Err(Stop::Incomplete(head_state));
            }
        }

        match self.cursor.peek() {
            Some(':') => {
                self.cursor.advance();
                self.scan_selector_body('}')
            }
            Some('}') => {
                self.cursor.advance();
                Ok(())
            }
            Some(c) => Err(Stop::Invalid {
                state: head_state,
                position: self.cursor.position(),
                message: format!("expected ':' or '}}', found '{c}'"),
            }),
            None => Err(Stop::Incomplete(head_state)),
        }
    }

    // =========================================================================
    // SELECTOR BODY (shared with global settings)
    // =========================================================================

    /// The state reported between body items, where the next tag, size
    /// limit, option or the closer may start.
    fn between_state(&self) -> ParserState {
        if self.in_global {
            ParserState::ExpectingCloseBracket
        } else if self.size_limit_seen {
            ParserState::ExpectingTagOnly
        } else {
            ParserState::ExpectingTagOrSizeLimit
        }
    }

    fn scan_selector_body(&mut self, closer: char) -> Scan<()> {
        loop {
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                None => return Err(Stop::Incomplete(self.between_state())),
                Some(c) if c == closer => {
                    self.cursor.advance();
                    return Ok(());
                }
                Some('+') | Some('-') => self.scan_tag()?,
                Some('<' | '>' | '=' | '!') => self.scan_size_limit()?,
                Some(',') => {
                    let comma_position = self.cursor.position();
                    self.cursor.advance();
                    self.cursor.skip_whitespace();
                    match self.cursor.peek() {
                        None => return Err(Stop::Incomplete(ParserState::ExpectingOption)),
                        Some(c) if is_identifier_start(c) => {
                            return self.scan_options(closer);
                        }
                        Some(c) if c == closer => {
                            return Err(Stop::Invalid {
                                state: ParserState::ExpectingOption,
                                position: comma_position,
                                message: "trailing comma".to_string(),
                            });
                        }
                        Some(c) => {
                            return Err(Stop::Invalid {
                                state: ParserState::ExpectingOption,
                                position: self.cursor.position(),
                                message: format!("expected option name, found '{c}'"),
                            });
                        }
                    }
                }
                Some(c) if is_identifier_start(c) => {
                    if self.tags_seen && !self.size_limit_seen {
                        return Err(Stop::Invalid {
                            state: self.between_state(),
                            position: self.cursor.position(),
                            message: "expected ',' before options".to_string(),
                        });
                    }
                    return self.scan_options(closer);
                }
                Some(c) => {
                    return Err(Stop::Invalid {
                        state: self.between_state(),
                        position: self.cursor.position(),
                        message: format!("unexpected character '{c}'"),
                    });
                }
            }
        }
    }

    fn scan_tag(&mut self) -> Scan<()> {
        let include = self.cursor.advance() == Some('+');
        if self.cursor.is_at_end() {
            return Err(Stop::Incomplete(ParserState::ExpectingTagIdentifier));
        }
        let position = self.cursor.position();
        let tag = match self.cursor.peek() {
            Some(c) if is_identifier_start(c) => self
                .cursor
                .parse_identifier()
                .map_err(|e| invalid(ParserState::ExpectingTagIdentifier, e))?,
            _ => {
                return Err(Stop::Invalid {
                    state: ParserState::ExpectingTagIdentifier,
                    position,
                    message: "empty tag name".to_string(),
                });
            }
        };
        if self.has_tag(tag) {
            return Err(Stop::Invalid {
                state: self.between_state(),
                position,
                message: format!("duplicate tag '{tag}'"),
            });
        }
        self.add_tag(include, tag);
        self.tags_seen = true;
        Ok(())
    }

    fn scan_size_limit(&mut self) -> Scan<()> {
        let position = self.cursor.position();
        if self.size_limit_seen {
            return Err(Stop::Invalid {
                state: self.between_state(),
                position,
                message: "only one size limit is allowed per placeholder".to_string(),
            });
        }

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
            Some(first @ ('=' | '!')) => match self.cursor.peek() {
                None => return Err(Stop::Incomplete(ParserState::ExpectingSizeLimit)),
                Some('=') => {
                    self.cursor.advance();
                    if first == '=' {
                        CompareOp::Eq
                    } else {
                        CompareOp::Ne
                    }
                }
                Some(_) => {
                    return Err(Stop::Invalid {
                        state: ParserState::ExpectingSizeLimit,
                        position,
                        message: "incomplete comparison operator".to_string(),
                    });
                }
            },
            other => {
                return Err(Stop::Invalid {
                    state: self.between_state(),
                    position,
                    message: format!("unexpected character '{}'", other.unwrap_or(' ')),
                });
            }
        };
        if self.cursor.position() - position > 1 {
            self.cursor.record_token(position);
        }

        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            None => return Err(Stop::Incomplete(ParserState::ExpectingSizeLimit)),
            Some(c) if c.is_ascii_digit() => {}
            Some(c) => {
                return Err(Stop::Invalid {
                    state: ParserState::ExpectingSizeLimit,
                    position: self.cursor.position(),
                    message: format!("expected number, found '{c}'"),
                });
            }
        }
        let value = self
            .cursor
            .parse_number()
            .map_err(|e| invalid(ParserState::ExpectingSizeLimit, e))?;
        self.set_size_limit(SizeLimit { op, value });
        self.size_limit_seen = true;
        Ok(())
    }

    /// Scans option atoms until the closer, consuming it.
    fn scan_options(&mut self, closer: char) -> Scan<()> {
        loop {
            let key = self.identifier(ParserState::ExpectingOption)?.to_string();
            if self.cursor.is_at_end() {
                return Err(Stop::Incomplete(ParserState::ExpectingOption));
            }
            if !self.cursor.match_char('=') {
                return Err(Stop::Invalid {
                    state: ParserState::ExpectingOption,
                    position: self.cursor.position(),
                    message: format!("option '{key}' is missing '='"),
                });
            }
            let start = self.cursor.position();
            while matches!(self.cursor.peek(), Some(c) if is_value_char(c)) {
                self.cursor.advance();
            }
            let value = self.cursor.slice_from(start).to_string();
            self.add_option(key, value);

            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                None => return Err(Stop::Incomplete(ParserState::ExpectingOption)),
                Some(c) if c == closer => {
                    self.cursor.advance();
                    return Ok(());
                }
                Some(',') => {
                    let comma_position = self.cursor.position();
                    self.cursor.advance();
                    self.cursor.skip_whitespace();
                    match self.cursor.peek() {
                        None => return Err(Stop::Incomplete(ParserState::ExpectingOption)),
                        Some(c) if is_identifier_start(c) => {}
                        Some(c) if c == closer => {
                            return Err(Stop::Invalid {
                                state: ParserState::ExpectingOption,
                                position: comma_position,
                                message: "trailing comma".to_string(),
                            });
                        }
                        Some(c) => {
                            return Err(Stop::Invalid {
                                state: ParserState::ExpectingOption,
                                position: self.cursor.position(),
                                message: format!("expected option name, found '{c}'"),
                            });
                        }
                    }
                }
                Some(c) => {
                    return Err(Stop::Invalid {
                        state: ParserState::ExpectingOption,
                        position: self.cursor.position(),
                        message: format!("unexpected character '{c}'"),
                    });
                }
            }
        }
    }

    // =========================================================================
    // BUILT-IN GENERATORS
    // =========================================================================

    fn scan_number_settings(&mut self) -> Scan<()> {
        let mut head_state = ParserState::PartialNumberGen;
        if matches!(self.cursor.peek(), Some(c) if c.is_whitespace()) {
            self.cursor.skip_whitespace();
            head_state = ParserState::ExpectingColon;
            if self.cursor.is_at_end() {
                return Err(Stop::Incomplete(head_state));
            }
        }

        match self.cursor.peek() {
            Some('}') => {
                self.cursor.advance();
                Ok(())
            }
            Some(':') => {
                self.cursor.advance();
                self.cursor.skip_whitespace();
                match self.cursor.peek() {
                    None => return Err(Stop::Incomplete(ParserState::ExpectingNumberLength)),
                    Some(c) if c.is_ascii_digit() => {}
                    Some(c) => {
                        return Err(Stop::Invalid {
                            state: ParserState::ExpectingNumberLength,
                            position: self.cursor.position(),
                            message: format!("expected number, found '{c}'"),
                        });
                    }
                }
                let length = self
                    .cursor
                    .parse_number()
                    .map_err(|e| invalid(ParserState::ExpectingNumberLength, e))?;
                self.set_number_length(length);

                match self.cursor.peek() {
                    None => Err(Stop::Incomplete(ParserState::ExpectingNumberBase)),
                    Some('}') => {
                        self.cursor.advance();
                        Ok(())
                    }
                    Some(c) if NumberBase::from_short(c).is_some() => {
                        self.cursor.advance();
                        if let Some(base) = NumberBase::from_short(c) {
                            self.set_number_base(base);
                        }
                        self.scan_generator_close()
                    }
                    Some(',') => {
                        self.cursor.advance();
                        self.cursor.skip_whitespace();
                        self.scan_long_base()
                    }
                    Some(c) if c.is_whitespace() => self.scan_generator_close(),
                    Some(c) => Err(Stop::Invalid {
                        state: ParserState::ExpectingNumberBase,
                        position: self.cursor.position(),
                        message: format!("unexpected character '{c}'"),
                    }),
                }
            }
            Some(c) => Err(Stop::Invalid {
                state: head_state,
                position: self.cursor.position(),
                message: format!("expected ':' or '}}', found '{c}'"),
            }),
            None => Err(Stop::Incomplete(head_state)),
        }
    }

    /// Scans the `,long-base` tail of a number generator. At end of input
    /// a strict prefix of a base name keeps the context valid.
    fn scan_long_base(&mut self) -> Scan<()> {
        if self.cursor.is_at_end() {
            return Err(Stop::Incomplete(ParserState::ExpectingNumberBase));
        }
        let position = self.cursor.position();
        let name = self.identifier(ParserState::ExpectingNumberBase)?;
        match NumberBase::from_long(name) {
            Some(base) => {
                self.set_number_base(base);
                self.scan_generator_close()
            }
            None => {
                if self.cursor.is_at_end() && is_long_base_prefix(name) {
                    Err(Stop::Incomplete(ParserState::ExpectingNumberBase))
                } else {
                    Err(Stop::Invalid {
                        state: ParserState::ExpectingNumberBase,
                        position,
                        message: format!("invalid number base '{name}'"),
                    })
                }
            }
        }
    }

    fn scan_special_settings(&mut self) -> Scan<()> {
        let mut head_state = ParserState::PartialSpecialGen;
        if matches!(self.cursor.peek(), Some(c) if c.is_whitespace()) {
            self.cursor.skip_whitespace();
            head_state = ParserState::ExpectingColon;
            if self.cursor.is_at_end() {
                return Err(Stop::Incomplete(head_state));
            }
        }

        match self.cursor.peek() {
            Some('}') => {
                self.cursor.advance();
                Ok(())
            }
            Some(':') => {
                self.cursor.advance();
                self.cursor.skip_whitespace();
                match self.cursor.peek() {
                    None => return Err(Stop::Incomplete(ParserState::ExpectingSpecialLength)),
                    Some(c) if c.is_ascii_digit() => {}
                    Some(c) => {
                        return Err(Stop::Invalid {
                            state: ParserState::ExpectingSpecialLength,
                            position: self.cursor.position(),
                            message: format!("expected number, found '{c}'"),
                        });
                    }
                }
                let position = self.cursor.position();
                let min = self
                    .cursor
                    .parse_number()
                    .map_err(|e| invalid(ParserState::ExpectingSpecialLength, e))?;
                if min == 0 {
                    return Err(Stop::Invalid {
                        state: ParserState::ExpectingSpecialLength,
                        position,
                        message: "length must be at least 1".to_string(),
                    });
                }
                self.set_special_min(min);

                match self.cursor.peek() {
                    None => Err(Stop::Incomplete(ParserState::ExpectingSpecialLength)),
                    Some('}') => {
                        self.cursor.advance();
                        Ok(())
                    }
                    Some('-') => {
                        self.cursor.advance();
                        if self.cursor.is_at_end() {
                            return Err(Stop::Incomplete(ParserState::ExpectingSpecialRange));
                        }
                        match self.cursor.peek() {
                            Some(c) if c.is_ascii_digit() => {}
                            Some(c) => {
                                return Err(Stop::Invalid {
                                    state: ParserState::ExpectingSpecialRange,
                                    position: self.cursor.position(),
                                    message: format!("expected number, found '{c}'"),
                                });
                            }
                            None => {
                                return Err(Stop::Incomplete(ParserState::ExpectingSpecialRange))
                            }
                        }
                        let max_position = self.cursor.position();
                        let max = self
                            .cursor
                            .parse_number()
                            .map_err(|e| invalid(ParserState::ExpectingSpecialRange, e))?;
                        if min > max {
                            return Err(Stop::Invalid {
                                state: ParserState::ExpectingSpecialRange,
                                position: max_position,
                                message: format!("invalid length range {min}-{max}"),
                            });
                        }
                        self.set_special_max(max);
                        self.scan_generator_close()
                    }
                    Some(c) if c.is_whitespace() => self.scan_generator_close(),
                    Some(c) => Err(Stop::Invalid {
                        state: ParserState::ExpectingSpecialLength,
                        position: self.cursor.position(),
                        message: format!("unexpected character '{c}'"),
                    }),
                }
            }
            Some(c) => Err(Stop::Invalid {
                state: head_state,
                position: self.cursor.position(),
                message: format!("expected ':' or '}}', found '{c}'"),
            }),
            None => Err(Stop::Incomplete(head_state)),
        }
    }

    /// Consumes trailing whitespace and the closing brace of a generator.
    fn scan_generator_close(&mut self) -> Scan<()> {
        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            None => Err(Stop::Incomplete(ParserState::ExpectingCloseBrace)),
            Some('}') => {
                self.cursor.advance();
                Ok(())
            }
            Some(c) => Err(Stop::Invalid {
                state: ParserState::ExpectingCloseBrace,
                position: self.cursor.position(),
                message: format!("expected '}}', found '{c}'"),
            }),
        }
    }

    // =========================================================================
    // GLOBAL SETTINGS
    // =========================================================================

    fn scan_global_settings(&mut self) -> Scan<()> {
        self.tags_seen = false;
        self.size_limit_seen = false;
        self.partial = Some(PartialElement::GlobalSettings(
            PartialGlobalSettings::default(),
        ));

        self.cursor.skip_whitespace();
        if self.cursor.is_at_end() {
            return Err(Stop::Incomplete(ParserState::InGlobalSettings));
        }
        if self.cursor.match_char('@') {
            if self.cursor.is_at_end() {
                return Err(Stop::Incomplete(ParserState::ExpectingLanguageIdentifier));
            }
            let language = self.identifier(ParserState::ExpectingLanguageIdentifier)?;
            self.set_language(language);
        }
        self.scan_selector_body(']')
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    /// Reads an identifier or stops in the given state.
    fn identifier(&mut self, state: ParserState) -> Scan<&'a str> {
        match self.cursor.peek() {
            Some(c) if is_identifier_start(c) => {
                self.cursor.parse_identifier().map_err(|e| invalid(state, e))
            }
            Some(c) => Err(Stop::Invalid {
                state,
                position: self.cursor.position(),
                message: format!("expected identifier, found '{c}'"),
            }),
            None => Err(Stop::Incomplete(state)),
        }
    }

    fn set_language(&mut self, language: &str) {
        match &mut self.partial {
            Some(PartialElement::Selector(sel)) => sel.language = Some(language.to_string()),
            Some(PartialElement::GlobalSettings(settings)) => {
                settings.language = Some(language.to_string());
            }
            _ => {}
        }
    }

    fn has_tag(&self, tag: &str) -> bool {
        match &self.partial {
            Some(PartialElement::Selector(sel)) => sel.has_tag(tag),
            Some(PartialElement::GlobalSettings(settings)) => settings.has_tag(tag),
            _ => false,
        }
    }

    fn add_tag(&mut self, include: bool, tag: &str) {
        let (include_tags, exclude_tags) = match &mut self.partial {
            Some(PartialElement::Selector(sel)) => (&mut sel.include_tags, &mut sel.exclude_tags),
            Some(PartialElement::GlobalSettings(settings)) => {
                (&mut settings.include_tags, &mut settings.exclude_tags)
            }
            _ => return,
        };
        if include {
            include_tags.push(tag.to_string());
        } else {
            exclude_tags.push(tag.to_string());
        }
    }

    fn set_size_limit(&mut self, limit: SizeLimit) {
        match &mut self.partial {
            Some(PartialElement::Selector(sel)) => sel.size_limit = Some(limit),
            Some(PartialElement::GlobalSettings(settings)) => settings.size_limit = Some(limit),
            _ => {}
        }
    }

    fn add_option(&mut self, key: String, value: String) {
        match &mut self.partial {
            Some(PartialElement::Selector(sel)) => {
                sel.options.insert(key, value);
            }
            Some(PartialElement::GlobalSettings(settings)) => {
                settings.options.insert(key, value);
            }
            _ => {}
        }
    }

    fn set_number_length(&mut self, length: u32) {
        if let Some(PartialElement::Number(gen)) = &mut self.partial {
            gen.max_length = Some(length);
        }
    }

    fn set_number_base(&mut self, base: NumberBase) {
        if let Some(PartialElement::Number(gen)) = &mut self.partial {
            gen.base = Some(base);
        }
    }

    fn set_special_min(&mut self, min: u32) {
        if let Some(PartialElement::Special(gen)) = &mut self.partial {
            gen.min_length = Some(min);
        }
    }

    fn set_special_max(&mut self, max: u32) {
        if let Some(PartialElement::Special(gen)) = &mut self.partial {
            gen.max_length = Some(max);
        }
    }
}

/// Returns true if `name` is a strict prefix of a long base name.
fn is_long_base_prefix(name: &str) -> bool {
    ["dec", "hex", "HEX", "roman", "ROMAN"]
        .iter()
        .any(|base| base.len() > name.len() && base.starts_with(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let context = parse_partial("");
        assert_eq!(context.state, ParserState::OutsidePlaceholder);
        assert!(context.is_valid);
        assert_eq!(context.position, 0);
    }

    #[test]
    fn test_literal_only() {
        let context = parse_partial("hello world");
        assert_eq!(context.state, ParserState::OutsidePlaceholder);
        assert!(context.is_valid);
        assert_eq!(context.parsed_so_far, "hello world");
    }

    #[test]
    fn test_closed_placeholder_returns_to_literal() {
        let context = parse_partial("a{noun}b");
        assert_eq!(context.state, ParserState::OutsidePlaceholder);
        assert!(context.partial_element.is_none());
    }

    #[test]
    fn test_open_brace() {
        let context = parse_partial("{");
        assert_eq!(context.state, ParserState::InPlaceholder);
        assert_eq!(context.expected_next, [ExpectedToken::Identifier]);
    }

    #[test]
    fn test_open_brace_with_whitespace() {
        let context = parse_partial("{  ");
        assert_eq!(context.state, ParserState::ExpectingIdentifier);
    }

    #[test]
    fn test_partial_selector_kind() {
        let context = parse_partial("{noun");
        assert_eq!(context.state, ParserState::PartialSelector);
        assert_eq!(context.last_parsed_token.as_deref(), Some("noun"));
        match context.partial_element {
            Some(PartialElement::Selector(sel)) => assert_eq!(sel.kind, "noun"),
            other => panic!("expected partial selector, got {other:?}"),
        }
    }

    #[test]
    fn test_partial_number_and_special() {
        assert_eq!(parse_partial("{number").state, ParserState::PartialNumberGen);
        assert_eq!(
            parse_partial("{special").state,
            ParserState::PartialSpecialGen
        );
    }

    #[test]
    fn test_language_states() {
        assert_eq!(
            parse_partial("{noun@").state,
            ParserState::ExpectingLanguageIdentifier
        );
        assert_eq!(
            parse_partial("{noun@en").state,
            ParserState::ExpectingAfterLanguage
        );
    }

    #[test]
    fn test_colon_enters_body() {
        let context = parse_partial("{noun:");
        assert_eq!(context.state, ParserState::ExpectingTagOrSizeLimit);
        assert!(context.is_valid);
        for token in [
            ExpectedToken::TagSpec,
            ExpectedToken::ComparisonOp,
            ExpectedToken::OptionKey,
            ExpectedToken::CloseBrace,
        ] {
            assert!(context.expected_next.contains(&token), "missing {token:?}");
        }
    }

    #[test]
    fn test_colon_with_whitespace() {
        assert_eq!(
            parse_partial("{noun:  ").state,
            ParserState::ExpectingTagOrSizeLimit
        );
    }

    #[test]
    fn test_tag_sign_only() {
        assert_eq!(
            parse_partial("{noun:+").state,
            ParserState::ExpectingTagIdentifier
        );
        assert_eq!(
            parse_partial("{noun:-").state,
            ParserState::ExpectingTagIdentifier
        );
    }

    #[test]
    fn test_complete_tag_returns_between_state() {
        let context = parse_partial("{noun:+animal");
        assert_eq!(context.state, ParserState::ExpectingTagOrSizeLimit);
        match context.partial_element {
            Some(PartialElement::Selector(sel)) => {
                assert_eq!(sel.include_tags, ["animal"]);
            }
            other => panic!("expected partial selector, got {other:?}"),
        }
    }

    #[test]
    fn test_size_limit_operator_states() {
        assert_eq!(
            parse_partial("{noun:>").state,
            ParserState::ExpectingSizeLimit
        );
        assert_eq!(
            parse_partial("{noun:==").state,
            ParserState::ExpectingSizeLimit
        );
        assert_eq!(
            parse_partial("{noun:=").state,
            ParserState::ExpectingSizeLimit
        );
    }

    #[test]
    fn test_size_limit_switches_to_tag_only() {
        let context = parse_partial("{noun:>5");
        assert_eq!(context.state, ParserState::ExpectingTagOnly);
        assert!(!context.expected_next.contains(&ExpectedToken::ComparisonOp));
        assert!(context.is_valid);
    }

    #[test]
    fn test_second_size_limit_is_invalid() {
        let context = parse_partial("{noun:>5 <");
        assert!(!context.is_valid);
        assert_eq!(context.state, ParserState::ExpectingTagOnly);
        assert!(context.error_message.is_some());
    }

    #[test]
    fn test_lone_equals_midway_is_invalid() {
        let context = parse_partial("{noun:=4");
        assert!(!context.is_valid);
        assert_eq!(context.state, ParserState::ExpectingSizeLimit);
    }

    #[test]
    fn test_option_states() {
        assert_eq!(
            parse_partial("{noun:case").state,
            ParserState::ExpectingOption
        );
        assert_eq!(
            parse_partial("{noun:case=").state,
            ParserState::ExpectingOption
        );
        assert_eq!(
            parse_partial("{noun:case=lower,").state,
            ParserState::ExpectingOption
        );
    }

    #[test]
    fn test_option_accumulates_in_partial() {
        let context = parse_partial("{noun:case=lower,sep=");
        match context.partial_element {
            Some(PartialElement::Selector(sel)) => {
                assert_eq!(sel.options["case"], "lower");
                assert_eq!(sel.options["sep"], "");
            }
            other => panic!("expected partial selector, got {other:?}"),
        }
    }

    #[test]
    fn test_number_states() {
        assert_eq!(
            parse_partial("{number:").state,
            ParserState::ExpectingNumberLength
        );
        assert_eq!(
            parse_partial("{number:5").state,
            ParserState::ExpectingNumberBase
        );
        assert_eq!(
            parse_partial("{number:5d").state,
            ParserState::ExpectingCloseBrace
        );
        assert_eq!(
            parse_partial("{number:5,").state,
            ParserState::ExpectingNumberBase
        );
        assert_eq!(
            parse_partial("{number:5,he").state,
            ParserState::ExpectingNumberBase
        );
    }

    #[test]
    fn test_number_invalid_long_base() {
        let context = parse_partial("{number:5,Dex");
        assert!(!context.is_valid);
        assert_eq!(context.state, ParserState::ExpectingNumberBase);
    }

    #[test]
    fn test_number_partial_keeps_length() {
        let context = parse_partial("{number:12");
        match context.partial_element {
            Some(PartialElement::Number(gen)) => {
                assert_eq!(gen.max_length, Some(12));
                assert_eq!(gen.base, None);
            }
            other => panic!("expected partial number, got {other:?}"),
        }
    }

    #[test]
    fn test_special_states() {
        assert_eq!(
            parse_partial("{special:").state,
            ParserState::ExpectingSpecialLength
        );
        assert_eq!(
            parse_partial("{special:3").state,
            ParserState::ExpectingSpecialLength
        );
        assert_eq!(
            parse_partial("{special:3-").state,
            ParserState::ExpectingSpecialRange
        );
        assert_eq!(
            parse_partial("{special:3-7").state,
            ParserState::ExpectingCloseBrace
        );
    }

    #[test]
    fn test_special_inverted_range_is_invalid() {
        let context = parse_partial("{special:5-3");
        assert!(!context.is_valid);
        assert_eq!(context.state, ParserState::ExpectingSpecialRange);
    }

    #[test]
    fn test_global_settings_states() {
        assert_eq!(parse_partial("[").state, ParserState::InGlobalSettings);
        assert_eq!(
            parse_partial("[@").state,
            ParserState::ExpectingLanguageIdentifier
        );
        assert_eq!(
            parse_partial("[@en").state,
            ParserState::ExpectingCloseBracket
        );
        assert_eq!(
            parse_partial("[+common").state,
            ParserState::ExpectingCloseBracket
        );
    }

    #[test]
    fn test_closed_settings_is_complete() {
        let context = parse_partial("{noun}[@en]");
        assert_eq!(context.state, ParserState::Complete);
        assert!(context.is_valid);
        assert!(context.expected_next.is_empty());
    }

    #[test]
    fn test_trailing_backslash_is_incomplete() {
        let context = parse_partial("abc\\");
        assert_eq!(context.state, ParserState::Incomplete);
        assert!(context.is_valid);
    }

    #[test]
    fn test_unmatched_closer_is_invalid() {
        let context = parse_partial("ab}c");
        assert_eq!(context.state, ParserState::Invalid);
        assert!(!context.is_valid);
        assert_eq!(context.position, 2);
        assert_eq!(context.parsed_so_far, "ab");
    }

    #[test]
    fn test_invalid_escape_is_invalid() {
        let context = parse_partial("a\\nb");
        assert_eq!(context.state, ParserState::Invalid);
        assert!(!context.is_valid);
        assert_eq!(context.position, 1);
    }

    #[test]
    fn test_content_after_settings_is_invalid() {
        let context = parse_partial("[@en] x");
        assert_eq!(context.state, ParserState::Invalid);
        assert!(!context.is_valid);
    }

    #[test]
    fn test_duplicate_tag_is_invalid_but_keeps_state() {
        let context = parse_partial("{noun:+a +a");
        assert!(!context.is_valid);
        assert_eq!(context.state, ParserState::ExpectingTagOrSizeLimit);
    }

    #[test]
    fn test_partial_element_cleared_after_close() {
        let context = parse_partial("{noun}{verb");
        match context.partial_element {
            Some(PartialElement::Selector(sel)) => assert_eq!(sel.kind, "verb"),
            other => panic!("expected partial selector, got {other:?}"),
        }
    }
}
