//! Constant random values (`base + XdY + M bonus`).

use core::fmt;
use core::str::FromStr;

use crate::dice::{Dice, DiceError};

/// A value rolled at generation time: `base + dice d sides`, with an
/// additional level-scaled magic bonus of up to `m_bonus`.
///
/// The data-file grammar is shared with [`Dice`] but may not use variables:
/// `5`, `2d6`, `1+1d4`, `d8M3`, `-3`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomValue {
    pub base: i32,
    pub dice: i32,
    pub sides: i32,
    pub m_bonus: i32,
}

impl RandomValue {
    /// A value that always produces `base`.
    pub const fn fixed(base: i32) -> Self {
        Self {
            base,
            dice: 0,
            sides: 0,
            m_bonus: 0,
        }
    }

    pub fn parse(text: &str) -> Result<Self, DiceError> {
        Dice::parse(text)?.to_constant()
    }

    /// Returns true if the value can only ever produce zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Smallest value a roll can produce, ignoring the magic bonus.
    pub fn min(&self) -> i32 {
        self.base + if self.sides > 0 { self.dice } else { 0 }
    }

    /// Largest value a roll can produce, including the magic bonus.
    pub fn max(&self) -> i32 {
        self.base + self.dice * self.sides + self.m_bonus
    }
}

impl FromStr for RandomValue {
    type Err = DiceError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl fmt::Display for RandomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let has_roll = self.dice != 0 && self.sides != 0;
        if self.base != 0 || (!has_roll && self.m_bonus == 0) {
            write!(f, "{}", self.base)?;
            if has_roll {
                f.write_str("+")?;
            }
        }
        if has_roll {
            write!(f, "{}d{}", self.dice, self.sides)?;
        }
        if self.m_bonus != 0 {
            write!(f, "M{}", self.m_bonus)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(RandomValue::parse("5").unwrap(), RandomValue::fixed(5));
        assert_eq!(RandomValue::parse("-3").unwrap(), RandomValue::fixed(-3));
        assert_eq!(
            RandomValue::parse("1+2d4").unwrap(),
            RandomValue { base: 1, dice: 2, sides: 4, m_bonus: 0 }
        );
        assert_eq!(
            RandomValue::parse("d8M3").unwrap(),
            RandomValue { base: 0, dice: 1, sides: 8, m_bonus: 3 }
        );
    }

    #[test]
    fn test_variables_are_rejected() {
        assert!(matches!(
            RandomValue::parse("$Bd4"),
            Err(DiceError::Symbolic(_))
        ));
    }

    #[test]
    fn test_display_uses_data_grammar() {
        for text in ["5", "-3", "2d6", "1+2d4", "1d8M3", "0", "M4"] {
            assert_eq!(RandomValue::parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_bounds() {
        let value = RandomValue::parse("2+3d4M5").unwrap();
        assert_eq!(value.min(), 5);
        assert_eq!(value.max(), 19);
    }
}
