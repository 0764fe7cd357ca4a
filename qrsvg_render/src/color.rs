use serde::{Deserialize, Serialize};

/// A color value as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    /// Any CSS color string: a keyword, a hex code, an `rgb()` expression...
    Css(String),
    /// Red, green, blue and alpha channels.
    Rgba([u8; 4]),
}

impl Color {
    /// Canonical form of the color: CSS strings are trimmed and lowercased, channel quadruples are kept as they are.
    /// # Example
    /// ```
    /// use qrsvg_render::Color;
    /// assert_eq!(Color::from(" #FFAA00 ").normalized(), Color::from("#ffaa00"));
    /// ```
    pub fn normalized(&self) -> Self {
        match self {
            Self::Css(css) => Self::Css(css.trim().to_lowercase()),
            Self::Rgba(channels) => Self::Rgba(*channels),
        }
    }

    /// Whether `self` and `other` denote the same color once normalized.
    pub fn same_as(&self, other: &Self) -> bool {
        self == other || self.normalized() == other.normalized()
    }

    /// Fully transparent color.
    pub fn transparent() -> Self {
        Self::Css("transparent".into())
    }

    /// Black.
    pub fn black() -> Self {
        Self::Css("black".into())
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::Css(value.into())
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self::Css(value)
    }
}

impl From<[u8; 4]> for Color {
    fn from(value: [u8; 4]) -> Self {
        Self::Rgba(value)
    }
}

impl std::fmt::Display for Color {
    /// Write the color as an SVG paint value.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css(css) => write!(f, "{}", css),
            Self::Rgba([r, g, b, 0xff]) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
            Self::Rgba([r, g, b, a]) => write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_normalized_lowercases_css() {
        assert_eq!(Color::from("Black").normalized(), Color::black());
        assert!(Color::from("RED").same_as(&Color::from("red")));
        assert!(!Color::from("red").same_as(&Color::from("blue")));
    }

    #[test]
    fn test_rgba_paint() {
        assert_eq!(Color::from([0x12, 0xab, 0x00, 0xff]).to_string(), "#12ab00");
        assert_eq!(Color::from([0x12, 0xab, 0x00, 0x80]).to_string(), "#12ab0080");
        assert_eq!(Color::from([1, 2, 3, 4]).normalized(), Color::Rgba([1, 2, 3, 4]));
    }
}
