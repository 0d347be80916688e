//! Dice strings with symbolic operands.
//!
//! Grammar (no whitespace):
//!
//! ```text
//! dice    := [base] ['+' [roll]] [roll] [('M' | 'm') operand]
//! roll    := [operand] 'd' operand
//! operand := ['-'] digits | '$' 'A'..='Z'
//! ```
//!
//! Variables (`$B`, `$S`, ...) are placeholders for named expressions that
//! are bound after parsing with [`Dice::bind`] and evaluated when the dice
//! are rolled.

use core::fmt;

use crate::error::{ContentError, ErrorSeverity};
use crate::expression::{Expression, ValueSource};
use crate::random::RandomValue;

/// Errors raised by the dice grammar and by expression binding.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiceError {
    #[error("invalid dice string '{0}'")]
    Invalid(String),

    /// Variables were used where a constant value is required.
    #[error("dice string '{0}' uses variables where a constant is required")]
    Symbolic(String),

    #[error("dice has no variable named '{0}'")]
    UnknownVariable(String),

    #[error("variable '{0}' is already bound")]
    AlreadyBound(String),

    #[error("variable '{0}' has no bound expression")]
    Unbound(char),
}

impl ContentError for DiceError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "DICE_INVALID",
            Self::Symbolic(_) => "DICE_SYMBOLIC",
            Self::UnknownVariable(_) => "DICE_UNKNOWN_VARIABLE",
            Self::AlreadyBound(_) => "DICE_ALREADY_BOUND",
            Self::Unbound(_) => "DICE_UNBOUND",
        }
    }
}

/// One position in a dice string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operand {
    Literal(i32),
    Variable(char),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Variable(name) => write!(f, "${name}"),
        }
    }
}

/// A variable and the expression bound to it, if any.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Binding {
    pub name: char,
    pub expression: Option<Expression>,
}

/// A parsed dice string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dice {
    text: String,
    base: Option<Operand>,
    count: Option<Operand>,
    sides: Option<Operand>,
    m_bonus: Option<Operand>,
    /// Variables in order of first appearance.
    bindings: Vec<Binding>,
}

impl Dice {
    pub fn parse(text: &str) -> Result<Self, DiceError> {
        let invalid = || DiceError::Invalid(text.to_owned());
        let mut cursor = Cursor::new(text.trim());

        let mut dice = Self {
            text: text.trim().to_owned(),
            base: None,
            count: None,
            sides: None,
            m_bonus: None,
            bindings: Vec::new(),
        };

        let first = cursor.operand().ok_or_else(invalid)?;
        if cursor.eat(b'd') {
            dice.count = Some(first.unwrap_or(Operand::Literal(1)));
            dice.sides = Some(cursor.operand().ok_or_else(invalid)?.ok_or_else(invalid)?);
        } else {
            dice.base = first;
            if cursor.eat(b'+') {
                if dice.base.is_none() {
                    return Err(invalid());
                }
                let count = cursor.operand().ok_or_else(invalid)?;
                if cursor.eat(b'd') {
                    dice.count = Some(count.unwrap_or(Operand::Literal(1)));
                    dice.sides = Some(cursor.operand().ok_or_else(invalid)?.ok_or_else(invalid)?);
                } else if count.is_some() {
                    return Err(invalid());
                }
            }
        }

        if cursor.eat(b'M') || cursor.eat(b'm') {
            dice.m_bonus = Some(cursor.operand().ok_or_else(invalid)?.ok_or_else(invalid)?);
        }

        if !cursor.at_end() {
            return Err(invalid());
        }
        if dice.base.is_none() && dice.sides.is_none() && dice.m_bonus.is_none() {
            return Err(invalid());
        }

        for operand in [dice.base, dice.count, dice.sides, dice.m_bonus]
            .into_iter()
            .flatten()
        {
            if let Operand::Variable(name) = operand
                && !dice.bindings.iter().any(|binding| binding.name == name)
            {
                dice.bindings.push(Binding {
                    name,
                    expression: None,
                });
            }
        }

        Ok(dice)
    }

    /// Returns the string this dice was parsed from.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Returns true if any operand is a variable.
    pub fn is_symbolic(&self) -> bool {
        !self.bindings.is_empty()
    }

    /// Binds `expression` to the variable `name` (`"B"` or `"$B"`).
    ///
    /// The dice keeps its own copy. Fails if the dice has no such variable
    /// or if the variable is already bound.
    pub fn bind(&mut self, name: &str, expression: &Expression) -> Result<(), DiceError> {
        let unknown = || DiceError::UnknownVariable(name.to_owned());
        let key = variable_name(name).ok_or_else(unknown)?;
        let binding = self
            .bindings
            .iter_mut()
            .find(|binding| binding.name == key)
            .ok_or_else(unknown)?;

        if binding.expression.is_some() {
            return Err(DiceError::AlreadyBound(name.to_owned()));
        }
        binding.expression = Some(expression.clone());
        Ok(())
    }

    /// Converts a dice without variables into a [`RandomValue`].
    pub fn to_constant(&self) -> Result<RandomValue, DiceError> {
        if self.is_symbolic() {
            return Err(DiceError::Symbolic(self.text.clone()));
        }
        self.resolve(|operand| match operand {
            Operand::Literal(value) => Ok(value),
            Operand::Variable(_) => Err(DiceError::Symbolic(self.text.clone())),
        })
    }

    /// Substitutes every variable with its evaluated expression.
    pub fn evaluate(&self, source: &dyn ValueSource) -> Result<RandomValue, DiceError> {
        self.resolve(|operand| match operand {
            Operand::Literal(value) => Ok(value),
            Operand::Variable(name) => self
                .bindings
                .iter()
                .find(|binding| binding.name == name)
                .and_then(|binding| binding.expression.as_ref())
                .map(|expression| expression.evaluate(source))
                .ok_or(DiceError::Unbound(name)),
        })
    }

    fn resolve(
        &self,
        value_of: impl Fn(Operand) -> Result<i32, DiceError>,
    ) -> Result<RandomValue, DiceError> {
        let value = |operand: Option<Operand>| operand.map_or(Ok(0), &value_of);
        Ok(RandomValue {
            base: value(self.base)?,
            dice: value(self.count)?,
            sides: value(self.sides)?,
            m_bonus: value(self.m_bonus)?,
        })
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn variable_name(name: &str) -> Option<char> {
    let name = name.strip_prefix('$').unwrap_or(name);
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => Some(c),
        _ => None,
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Reads an operand if one starts here.
    ///
    /// `None` means the text is malformed; `Some(None)` means no operand.
    fn operand(&mut self) -> Option<Option<Operand>> {
        match self.peek() {
            Some(b'$') => {
                self.pos += 1;
                let name = self.peek().filter(u8::is_ascii_uppercase)?;
                self.pos += 1;
                Some(Some(Operand::Variable(char::from(name))))
            }
            Some(b'-' | b'0'..=b'9') => {
                let start = self.pos;
                self.eat(b'-');
                while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                    self.pos += 1;
                }
                let digits = core::str::from_utf8(&self.bytes[start..self.pos]).ok()?;
                digits.parse().ok().map(|value| Some(Operand::Literal(value)))
            }
            _ => Some(None),
        }
    }
}
