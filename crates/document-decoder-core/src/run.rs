//! Runs and attribute sets
//!
//! A [`Run`] is a contiguous span of text sharing one [`AttributeSet`].
//! The key space of an attribute set is fixed; presentation layers map each
//! key onto their own rich-text primitive.

use std::collections::BTreeMap;
use std::fmt;

/// Foreground colors a run can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
    Red,
    Green,
    Blue,
    Yellow,
    Gray,
    Orange,
    Purple,
    /// The host's accent color (used for links)
    Tint,
}

impl Color {
    /// Look up a CSS color keyword from the supported palette.
    ///
    /// Matching ignores ASCII case and surrounding whitespace. Keywords
    /// outside the palette (and any functional notation) return `None`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let keyword = keyword.trim().to_ascii_lowercase();
        let color = match keyword.as_str() {
            "black" => Color::Black,
            "white" => Color::White,
            "red" => Color::Red,
            "green" => Color::Green,
            "blue" => Color::Blue,
            "yellow" => Color::Yellow,
            "gray" | "grey" => Color::Gray,
            "orange" => Color::Orange,
            "purple" => Color::Purple,
            _ => return None,
        };
        Some(color)
    }

    /// Lowercase name of this color
    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Gray => "gray",
            Color::Orange => "orange",
            Color::Purple => "purple",
            Color::Tint => "tint",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of presentation attributes attached to a run.
///
/// Flags are "set" when `true`; optional values are set when `Some`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    /// Strong emphasis (bold)
    pub strong: bool,

    /// Emphasis (italic)
    pub italic: bool,

    /// Single underline
    pub underline: bool,

    /// Single strikethrough
    pub strikethrough: bool,

    /// Monospaced (code) presentation
    pub monospace: bool,

    /// Foreground color
    pub foreground_color: Option<Color>,

    /// Link target URL
    pub link: Option<String>,

    /// Raw attributes of the originating element (set for anchors).
    ///
    /// A std map keeps this crate dependency-free; keys are name-ordered.
    pub html: Option<BTreeMap<String, String>>,
}

impl AttributeSet {
    /// Check if no key is set
    pub fn is_empty(&self) -> bool {
        *self == AttributeSet::default()
    }

    /// Fill every key this set leaves unset from `outer`.
    ///
    /// Keys already present are never overwritten, so the innermost element
    /// that sets a key wins.
    pub fn merge_missing(&mut self, outer: &AttributeSet) {
        self.strong |= outer.strong;
        self.italic |= outer.italic;
        self.underline |= outer.underline;
        self.strikethrough |= outer.strikethrough;
        self.monospace |= outer.monospace;

        if self.foreground_color.is_none() {
            self.foreground_color = outer.foreground_color;
        }
        if self.link.is_none() {
            self.link.clone_from(&outer.link);
        }
        if self.html.is_none() {
            self.html.clone_from(&outer.html);
        }
    }
}

/// A span of text with a single attribute set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub attributes: AttributeSet,
}

impl Run {
    pub fn new(text: impl Into<String>, attributes: AttributeSet) -> Self {
        Self {
            text: text.into(),
            attributes,
        }
    }

    /// A run without attributes
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, AttributeSet::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_keywords() {
        assert_eq!(Color::from_keyword("red"), Some(Color::Red));
        assert_eq!(Color::from_keyword(" Grey "), Some(Color::Gray));
        assert_eq!(Color::from_keyword("GRAY"), Some(Color::Gray));
        assert_eq!(Color::from_keyword("#ff0000"), None);
        assert_eq!(Color::from_keyword("rebeccapurple"), None);
    }

    #[test]
    fn test_merge_fills_unset_keys() {
        let mut inner = AttributeSet {
            italic: true,
            ..Default::default()
        };
        let outer = AttributeSet {
            strong: true,
            foreground_color: Some(Color::Blue),
            ..Default::default()
        };

        inner.merge_missing(&outer);

        assert!(inner.strong);
        assert!(inner.italic);
        assert_eq!(inner.foreground_color, Some(Color::Blue));
    }

    #[test]
    fn test_merge_keeps_inner_values() {
        let mut inner = AttributeSet {
            foreground_color: Some(Color::Red),
            link: Some("https://inner.example".to_string()),
            ..Default::default()
        };
        let outer = AttributeSet {
            foreground_color: Some(Color::Tint),
            link: Some("https://outer.example".to_string()),
            ..Default::default()
        };

        inner.merge_missing(&outer);

        assert_eq!(inner.foreground_color, Some(Color::Red));
        assert_eq!(inner.link.as_deref(), Some("https://inner.example"));
    }

    #[test]
    fn test_is_empty() {
        assert!(AttributeSet::default().is_empty());
        let set = AttributeSet {
            monospace: true,
            ..Default::default()
        };
        assert!(!set.is_empty());
    }
}
