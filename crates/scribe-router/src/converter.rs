//! Typed placeholders in the native path syntax.
//!
//! Routes are declared with `<converter:name>` placeholders (or a bare
//! `<name>`, which behaves like `string`). The converter decides which
//! request segments the placeholder accepts.

use std::fmt;
use std::str::FromStr;

/// The type attached to a path placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Converter {
    /// Any single segment (`<name>` or `<string:name>`).
    #[default]
    String,
    /// A segment that parses as a signed 64-bit integer.
    Int,
    /// A segment that parses as a floating point number.
    Float,
    /// A segment that parses as a UUID.
    Uuid,
    /// The remainder of the path, slashes included. Must be last.
    Path,
}

impl Converter {
    /// Looks up a converter by the name used inside a placeholder.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "uuid" => Some(Self::Uuid),
            "path" => Some(Self::Path),
            _ => None,
        }
    }

    /// The converter's name as written in a route.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Uuid => "uuid",
            Self::Path => "path",
        }
    }

    /// Returns true if `value` is acceptable for this converter.
    #[must_use]
    pub fn accepts(self, value: &str) -> bool {
        match self {
            Self::String | Self::Path => !value.is_empty(),
            Self::Int => i64::from_str(value).is_ok(),
            Self::Float => f64::from_str(value).is_ok_and(f64::is_finite),
            Self::Uuid => uuid::Uuid::parse_str(value).is_ok(),
        }
    }
}

impl fmt::Display for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `<converter:name>` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Parameter name.
    pub name: String,
    /// Declared converter.
    pub converter: Converter,
}

impl Placeholder {
    /// Parses a whole segment such as `<int:id>` or `<slug>`.
    ///
    /// Returns `None` for anything that is not a well-formed placeholder with
    /// a known converter; such segments are treated as literal text.
    #[must_use]
    pub fn parse(segment: &str) -> Option<Self> {
        let inner = segment.strip_prefix('<')?.strip_suffix('>')?;
        let (converter, name) = match inner.split_once(':') {
            Some((conv, name)) => (Converter::from_name(conv)?, name),
            None => (Converter::String, inner),
        };
        if !is_identifier(name) {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            converter,
        })
    }
}

/// Returns true for names usable as a placeholder (`[A-Za-z_][A-Za-z0-9_]*`).
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
