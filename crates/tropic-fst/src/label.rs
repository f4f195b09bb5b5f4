// Transition input labels and the epsilon marker.

use std::fmt;

/// Marker used by the text grammar for epsilon input when no other is configured.
pub const DEFAULT_EPSILON_MARKER: &str = "0";

/// Input label of a transition.
///
/// Epsilon is a dedicated variant rather than a reserved symbol, so every
/// string is available as a concrete symbol. Mapping a textual marker to
/// [`Label::Epsilon`] is the loader's job (see [`crate::LoadOptions`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// Consumes no input.
    Epsilon,
    /// Consumes one input character equal to the symbol.
    Symbol(String),
}

impl Label {
    /// Create a concrete symbol label.
    pub fn symbol(symbol: impl Into<String>) -> Self {
        Label::Symbol(symbol.into())
    }

    /// Map a textual token to a label, treating `epsilon_marker` as epsilon.
    pub fn from_token(token: &str, epsilon_marker: Option<&str>) -> Self {
        match epsilon_marker {
            Some(marker) if marker == token => Label::Epsilon,
            _ => Label::Symbol(token.to_string()),
        }
    }

    #[inline]
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Label::Epsilon)
    }

    /// Whether this label consumes exactly the character `ch`.
    ///
    /// Multi-character symbols never match: the engine consumes one input
    /// character per transition.
    #[inline]
    pub fn matches(&self, ch: char) -> bool {
        match self {
            Label::Epsilon => false,
            Label::Symbol(s) => {
                let mut chars = s.chars();
                chars.next() == Some(ch) && chars.next().is_none()
            }
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Epsilon => f.write_str("<eps>"),
            Label::Symbol(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Label {
    fn from(symbol: &str) -> Self {
        Label::symbol(symbol)
    }
}

impl From<char> for Label {
    fn from(ch: char) -> Self {
        Label::Symbol(ch.to_string())
    }
}
