//! Indentation configuration for generated scripts.

use serde::Deserialize;

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "u8")]
pub enum Indent {
    /// Spaces with the specified width.
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 4-space indentation, the Visual Studio default for C#.
    pub const CSHARP: Self = Self::Spaces(4);

    /// Append one indent level to `buffer`.
    pub fn push_to(&self, buffer: &mut String) {
        match self {
            Self::Spaces(width) => {
                for _ in 0..*width {
                    buffer.push(' ');
                }
            }
            Self::Tab => buffer.push('\t'),
        }
    }
}

/// `0` selects tabs, any other value is a number of spaces.
impl From<u8> for Indent {
    fn from(width: u8) -> Self {
        match width {
            0 => Self::Tab,
            width => Self::Spaces(width),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::CSHARP
    }
}
