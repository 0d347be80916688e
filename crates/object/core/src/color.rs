//! Display colours.
//!
//! Only the sixteen base colours are known here; the full terminal palette
//! belongs to the front end.

/// Base display colour.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum Color {
    Dark,
    #[default]
    White,
    Slate,
    Orange,
    Red,
    Green,
    Blue,
    Umber,
    LightDark,
    LightSlate,
    LightPurple,
    Yellow,
    LightRed,
    LightGreen,
    LightBlue,
    LightUmber,
}

impl Color {
    /// Resolves a colour by single-character code.
    pub fn from_code(code: char) -> Option<Self> {
        let color = match code {
            'd' => Self::Dark,
            'w' => Self::White,
            's' => Self::Slate,
            'o' => Self::Orange,
            'r' => Self::Red,
            'g' => Self::Green,
            'b' => Self::Blue,
            'u' => Self::Umber,
            'D' => Self::LightDark,
            'W' => Self::LightSlate,
            'P' => Self::LightPurple,
            'y' => Self::Yellow,
            'R' => Self::LightRed,
            'G' => Self::LightGreen,
            'B' => Self::LightBlue,
            'U' => Self::LightUmber,
            _ => return None,
        };
        Some(color)
    }

    /// Resolves a colour symbol from a data file.
    ///
    /// A one-character symbol is a colour code; anything longer is a colour
    /// name, where `_` and ` ` are interchangeable.
    pub fn lookup(symbol: &str) -> Option<Self> {
        let mut chars = symbol.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Self::from_code(code),
            (Some(_), Some(_)) => symbol.replace(' ', "_").parse().ok(),
            _ => None,
        }
    }
}
