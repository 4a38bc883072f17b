//! Grammar model for parsed slug patterns.
//!
//! A pattern is a sequence of literal text chunks interleaved with
//! placeholders, optionally followed by a single global settings block.
//! All types here are plain immutable values; a `ParsedPattern` owns its
//! elements and text chunks and nothing is shared between parse calls.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// Comparison operator of a size limit.
///
/// Absence of a size limit is modeled as `Option<SizeLimit>`, so there is
/// no "none" operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl CompareOp {
    /// Returns the surface syntax of the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering base of a number generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum NumberBase {
    /// Decimal digits.
    #[default]
    #[serde(rename = "dec")]
    Dec,
    /// Lowercase hexadecimal.
    #[serde(rename = "hex")]
    Hex,
    /// Uppercase hexadecimal.
    #[serde(rename = "HEX")]
    HexUpper,
    /// Lowercase roman numerals.
    #[serde(rename = "roman")]
    Roman,
    /// Uppercase roman numerals.
    #[serde(rename = "ROMAN")]
    RomanUpper,
}

impl NumberBase {
    /// Resolves a single-letter base suffix (`d`, `x`, `X`, `r`, `R`).
    pub fn from_short(c: char) -> Option<Self> {
        match c {
            'd' => Some(Self::Dec),
            'x' => Some(Self::Hex),
            'X' => Some(Self::HexUpper),
            'r' => Some(Self::Roman),
            'R' => Some(Self::RomanUpper),
            _ => None,
        }
    }

    /// Resolves a long base name. Matching is case-sensitive: `dec`,
    /// `hex`, `HEX`, `roman` and `ROMAN` are the only accepted spellings.
    pub fn from_long(name: &str) -> Option<Self> {
        match name {
            "dec" => Some(Self::Dec),
            "hex" => Some(Self::Hex),
            "HEX" => Some(Self::HexUpper),
            "roman" => Some(Self::Roman),
            "ROMAN" => Some(Self::RomanUpper),
            _ => None,
        }
    }

    /// Returns the single-letter suffix used when rendering (`""` for
    /// decimal, which is the default).
    pub fn short_suffix(self) -> &'static str {
        match self {
            Self::Dec => "",
            Self::Hex => "x",
            Self::HexUpper => "X",
            Self::Roman => "r",
            Self::RomanUpper => "R",
        }
    }

    /// Returns the long name of the base.
    pub fn long_name(self) -> &'static str {
        match self {
            Self::Dec => "dec",
            Self::Hex => "hex",
            Self::HexUpper => "HEX",
            Self::Roman => "roman",
            Self::RomanUpper => "ROMAN",
        }
    }
}

impl fmt::Display for NumberBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}

/// A constraint on the length of a generated word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeLimit {
    /// The comparison applied to the word length.
    pub op: CompareOp,
    /// The length the comparison is made against.
    pub value: u32,
}

impl fmt::Display for SizeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.value)
    }
}

/// Ordered option map. Keys keep their source order; assigning an existing
/// key overwrites its value in place.
pub type Options = IndexMap<String, String>;

/// A dictionary placeholder such as `{noun@en:+animal -nsfw >3,case=lower}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Selector {
    /// Dictionary kind, e.g. `noun`. Never `number` or `special`; those
    /// spellings select the built-in generators instead.
    pub kind: String,
    /// Optional language tag following `@`.
    pub language: Option<String>,
    /// Tags required to be present, in source order.
    pub include_tags: Vec<String>,
    /// Tags required to be absent, in source order.
    pub exclude_tags: Vec<String>,
    /// At most one size limit per selector.
    pub size_limit: Option<SizeLimit>,
    /// Rendering options in source order.
    pub options: Options,
}

impl Selector {
    /// Creates a selector for the given dictionary kind with no settings.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Returns true if the tag is already used by this selector, either
    /// as an include or as an exclude.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.include_tags.iter().any(|t| t == tag) || self.exclude_tags.iter().any(|t| t == tag)
    }

    /// Returns true if the selector carries no settings at all.
    fn body_is_empty(&self) -> bool {
        self.include_tags.is_empty()
            && self.exclude_tags.is_empty()
            && self.size_limit.is_none()
            && self.options.is_empty()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.kind)?;
        if let Some(language) = &self.language {
            write!(f, "@{language}")?;
        }
        if !self.body_is_empty() {
            f.write_str(":")?;
            write_body(
                f,
                &self.include_tags,
                &self.exclude_tags,
                self.size_limit,
                &self.options,
            )?;
        }
        Ok(())
    }
}

/// Writes the shared tag / size limit / options body of selectors and
/// global settings in canonical form.
fn write_body(
    f: &mut fmt::Formatter<'_>,
    include_tags: &[String],
    exclude_tags: &[String],
    size_limit: Option<SizeLimit>,
    options: &Options,
) -> fmt::Result {
    let mut wrote = false;
    for tag in include_tags {
        if wrote {
            f.write_str(" ")?;
        }
        write!(f, "+{tag}")?;
        wrote = true;
    }
    for tag in exclude_tags {
        if wrote {
            f.write_str(" ")?;
        }
        write!(f, "-{tag}")?;
        wrote = true;
    }
    if let Some(limit) = size_limit {
        if wrote {
            f.write_str(" ")?;
        }
        write!(f, "{limit}")?;
        wrote = true;
    }
    if !options.is_empty() {
        if wrote {
            f.write_str(",")?;
        }
        for (i, (key, value)) in options.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}={value}")?;
        }
    }
    Ok(())
}

/// The built-in `{number}` generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberGen {
    /// Maximum number of digits to generate.
    pub max_length: u32,
    /// Rendering base.
    pub base: NumberBase,
}

impl Default for NumberGen {
    fn default() -> Self {
        Self {
            max_length: 1,
            base: NumberBase::Dec,
        }
    }
}

impl fmt::Display for NumberGen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("number")?;
        if self.max_length != 1 || self.base != NumberBase::Dec {
            write!(f, ":{}{}", self.max_length, self.base.short_suffix())?;
        }
        Ok(())
    }
}

/// The built-in `{special}` generator producing special-character runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpecialCharGen {
    /// Minimum run length, at least 1.
    pub min_length: u32,
    /// Maximum run length, never below `min_length`.
    pub max_length: u32,
}

impl Default for SpecialCharGen {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: 1,
        }
    }
}

impl fmt::Display for SpecialCharGen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("special")?;
        if (self.min_length, self.max_length) == (1, 1) {
            Ok(())
        } else if self.min_length == self.max_length {
            write!(f, ":{}", self.min_length)
        } else {
            write!(f, ":{}-{}", self.min_length, self.max_length)
        }
    }
}

/// One placeholder of a pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PatternElement {
    /// A dictionary selector.
    Selector(Selector),
    /// A `{number}` generator.
    Number(NumberGen),
    /// A `{special}` generator.
    Special(SpecialCharGen),
}

impl fmt::Display for PatternElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selector(selector) => selector.fmt(f),
            Self::Number(gen) => gen.fmt(f),
            Self::Special(gen) => gen.fmt(f),
        }
    }
}

/// Document-wide defaults from the trailing `[...]` block.
///
/// The shape matches `Selector` minus the dictionary kind.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GlobalSettings {
    /// Optional default language following `@`.
    pub language: Option<String>,
    /// Default include tags in source order.
    pub include_tags: Vec<String>,
    /// Default exclude tags in source order.
    pub exclude_tags: Vec<String>,
    /// Optional default size limit.
    pub size_limit: Option<SizeLimit>,
    /// Default rendering options in source order.
    pub options: Options,
}

impl GlobalSettings {
    /// Returns true if the tag is already used by this block.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.include_tags.iter().any(|t| t == tag) || self.exclude_tags.iter().any(|t| t == tag)
    }
}

impl fmt::Display for GlobalSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(language) = &self.language {
            write!(f, "@{language}")?;
            let has_body = !self.include_tags.is_empty()
                || !self.exclude_tags.is_empty()
                || self.size_limit.is_some()
                || !self.options.is_empty();
            if has_body {
                f.write_str(" ")?;
            }
        }
        write_body(
            f,
            &self.include_tags,
            &self.exclude_tags,
            self.size_limit,
            &self.options,
        )
    }
}

/// The result of a successful full parse.
///
/// `text_chunks` always holds exactly one more entry than `elements`:
/// chunk 0, element 0, chunk 1, element 1, ... chunk n. Rendering the
/// chunks and elements in that order, followed by the optional settings
/// block, reproduces the pattern up to whitespace normalization inside
/// settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ParsedPattern {
    /// Placeholders in source order.
    pub elements: Vec<PatternElement>,
    /// Global settings block, if the pattern ends with one.
    pub global_settings: Option<GlobalSettings>,
    /// Literal text between placeholders, escapes preserved verbatim.
    pub text_chunks: Vec<String>,
}

impl ParsedPattern {
    /// Renders the pattern back to surface syntax.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ParsedPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chunk) in self.text_chunks.iter().enumerate() {
            f.write_str(chunk)?;
            if let Some(element) = self.elements.get(i) {
                write!(f, "{{{element}}}")?;
            }
        }
        if let Some(settings) = &self.global_settings {
            write!(f, "[{settings}]")?;
        }
        Ok(())
    }
}
