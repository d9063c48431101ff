//! Indentation configuration for rendered source.

/// Indentation style for rendered code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width (e.g., 2 or 4).
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 2-space indentation, the `dart format` house style.
    pub const DART: Self = Self::Spaces(2);

    /// The text written for one indent level.
    pub fn unit(&self) -> String {
        match self {
            Self::Spaces(width) => " ".repeat(usize::from(*width)),
            Self::Tab => "\t".to_string(),
        }
    }

    /// Build an indent from a configured width, where `0` means tabs.
    pub fn from_width(width: u8) -> Self {
        match width {
            0 => Self::Tab,
            n => Self::Spaces(n),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::DART
    }
}
