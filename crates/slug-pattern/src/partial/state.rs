//! Parser states and the expected-token table.
//!
//! `ParserState` identifies the production where a partial parse halted;
//! `ExpectedToken` names the token classes that may legally continue the
//! input from a given state. The mapping between the two is a pure lookup
//! table, kept as data so it can be tested exhaustively.

use serde::Serialize;

/// State reached by the partial parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParserState {
    /// Scanning a literal run between constructs. The input can continue
    /// with more literal text, a placeholder or the settings block.
    OutsidePlaceholder,
    /// Immediately after `{`.
    InPlaceholder,
    /// Immediately inside `[`, before any body item.
    InGlobalSettings,
    /// After `{` plus whitespace, a generator identifier is required.
    ExpectingIdentifier,
    /// After a generator identifier plus whitespace, only `:` or the
    /// closing brace can follow.
    ExpectingColon,
    /// After `@` with no language characters yet.
    ExpectingLanguageIdentifier,
    /// After a non-empty language identifier.
    ExpectingAfterLanguage,
    /// Inside a selector body with no size limit so far.
    ExpectingTagOrSizeLimit,
    /// Inside a selector body once a size limit exists. Comparison
    /// operators are no longer advertised: a selector has at most one
    /// size constraint.
    ExpectingTagOnly,
    /// After `+` or `-` with an empty tag so far.
    ExpectingTagIdentifier,
    /// After a comparison operator, before its number. Also covers a lone
    /// `=` or `!` that still needs its `=`.
    ExpectingSizeLimit,
    /// Inside the option list: key, `=` or value position.
    ExpectingOption,
    /// After `number:`.
    ExpectingNumberLength,
    /// After the number length; a base or the closing brace may follow.
    ExpectingNumberBase,
    /// After `special:`; also after its first digits, where a dash or the
    /// closing brace remain possible.
    ExpectingSpecialLength,
    /// After the dash of a special range.
    ExpectingSpecialRange,
    /// Only the closing brace can follow.
    ExpectingCloseBrace,
    /// Between body items inside `[...]`, where `]` would be legal.
    ExpectingCloseBracket,
    /// A selector kind is in progress.
    PartialSelector,
    /// The identifier read so far is exactly `number`.
    PartialNumberGen,
    /// The identifier read so far is exactly `special`.
    PartialSpecialGen,
    /// The pattern ended with a closed global settings block; nothing but
    /// whitespace may follow.
    Complete,
    /// The input ended directly after a backslash.
    Incomplete,
    /// A definite syntax error in the literal region, outside any
    /// construct that could carry the state.
    Invalid,
}

/// Token class that may legally continue a partial input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedToken {
    Identifier,
    Colon,
    CloseBrace,
    CloseBracket,
    TagSpec,
    ComparisonOp,
    Number,
    #[serde(rename = "option")]
    OptionKey,
    OpenBrace,
    OpenBracket,
    Equals,
    Exclamation,
    Plus,
    Minus,
    Dash,
    NumberBase,
    AtSign,
}

impl ParserState {
    /// Returns the token classes that may legally continue the input from
    /// this state.
    pub fn expected_tokens(self) -> &'static [ExpectedToken] {
        use ExpectedToken::*;
        match self {
            Self::OutsidePlaceholder => &[OpenBrace, OpenBracket],
            Self::InPlaceholder => &[Identifier],
            Self::InGlobalSettings => &[AtSign, TagSpec, ComparisonOp, OptionKey, CloseBracket],
            Self::ExpectingIdentifier => &[Identifier],
            Self::ExpectingColon => &[Colon, CloseBrace],
            Self::ExpectingLanguageIdentifier => &[Identifier],
            Self::ExpectingAfterLanguage => &[Colon, CloseBrace],
            Self::ExpectingTagOrSizeLimit => &[
                TagSpec,
                ComparisonOp,
                Equals,
                Exclamation,
                OptionKey,
                CloseBrace,
            ],
            Self::ExpectingTagOnly => &[TagSpec, Plus, Minus, OptionKey, CloseBrace],
            Self::ExpectingTagIdentifier => &[Identifier],
            Self::ExpectingSizeLimit => &[Number, CloseBrace],
            Self::ExpectingOption => &[Identifier, Equals, CloseBrace],
            Self::ExpectingNumberLength => &[Number],
            Self::ExpectingNumberBase => &[NumberBase, CloseBrace],
            Self::ExpectingSpecialLength => &[Number, Dash, CloseBrace],
            Self::ExpectingSpecialRange => &[Number],
            Self::ExpectingCloseBrace => &[CloseBrace],
            Self::ExpectingCloseBracket => &[TagSpec, ComparisonOp, OptionKey, CloseBracket],
            Self::PartialSelector => &[Identifier, AtSign, Colon, CloseBrace],
            Self::PartialNumberGen => &[Colon, CloseBrace],
            Self::PartialSpecialGen => &[Colon, CloseBrace],
            Self::Complete => &[],
            Self::Incomplete => &[OpenBrace, CloseBrace],
            Self::Invalid => &[],
        }
    }
}
