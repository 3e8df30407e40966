//! Background colors, as the `#rrggbb`-style strings the client trades in.
//!
//! The registry treats a color as an opaque string - whatever the caller set
//! is what readers get back, byte for byte. The checked constructors exist
//! for callers that want validation *before* handing a color over, not as a
//! gate inside the registry.

/// A CSS-style color string.
///
/// Stores the string verbatim. Use [`Color::from_hex`] when the input should
/// be validated, [`Color::new`] when it is already trusted.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Color(String);

impl Color {
    /// The background of a freshly created layer.
    pub const WHITE: &'static str = "#ffffff";

    /// Wrap a color string as-is, no validation.
    pub fn new(color: impl Into<String>) -> Self {
        Self(color.into())
    }
    /// Parse a `#rrggbb` or `#rrggbbaa` string, rejecting anything else.
    pub fn from_hex(color: &str) -> Result<Self, ColorError> {
        let digits = color.strip_prefix('#').ok_or(ColorError::MissingHash)?;
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorError::BadLength(digits.len()));
        }
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorError::BadDigit(bad));
        }
        // Normalize to lowercase so that equality over parsed colors behaves.
        Ok(Self(format!("#{}", digits.to_ascii_lowercase())))
    }
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
    /// Decode to `[r, g, b, a]` bytes, if this happens to be a well-formed
    /// hex color. Colors that came in through [`Color::new`] may not be.
    #[must_use]
    pub fn channels(&self) -> Option<[u8; 4]> {
        let digits = self.0.strip_prefix('#')?;
        let byte_at = |idx: usize| u8::from_str_radix(digits.get(idx..idx + 2)?, 16).ok();
        match digits.len() {
            6 => Some([byte_at(0)?, byte_at(2)?, byte_at(4)?, 0xFF]),
            8 => Some([byte_at(0)?, byte_at(2)?, byte_at(4)?, byte_at(6)?]),
            _ => None,
        }
    }
}
impl Default for Color {
    fn default() -> Self {
        Self(Self::WHITE.to_owned())
    }
}
impl std::str::FromStr for Color {
    type Err = ColorError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorError {
    #[error("color does not start with '#'")]
    MissingHash,
    #[error("expected 6 or 8 hex digits, got {}", .0)]
    BadLength(usize),
    #[error("'{}' is not a hex digit", .0)]
    BadDigit(char),
}
