//! Named expressions bound into dice.
//!
//! An expression starts from a base value supplied by the game at evaluation
//! time (player level, dungeon level, ...) and applies a left-to-right list
//! of integer operations:
//!
//! ```text
//! PLAYER_LEVEL  "* 3 / 2"     -> level * 3 / 2
//! DUNGEON_LEVEL "+ 5 n"       -> -(depth + 5)
//! ```

use crate::error::{ContentError, ErrorSeverity};

/// A value the game supplies when a bound expression is evaluated.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BaseValue {
    PlayerLevel,
    DungeonLevel,
    PlayerHp,
    MaxSight,
    WeaponDamage,
    MonsterPercentHpGone,
}

impl BaseValue {
    /// Looks up a base-value function by its exact name.
    pub fn find(name: &str) -> Option<Self> {
        name.parse().ok()
    }
}

/// Supplies base values when expressions are evaluated.
pub trait ValueSource {
    fn base_value(&self, base: BaseValue) -> i32;
}

/// A single step applied to the running value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operation {
    Add(i32),
    Sub(i32),
    Mul(i32),
    /// Integer division, saturating at `i32::MAX`.
    Div(i32),
    Negate,
}

impl Operation {
    fn apply(self, value: i32) -> i32 {
        match self {
            Self::Add(operand) => value.saturating_add(operand),
            Self::Sub(operand) => value.saturating_sub(operand),
            Self::Mul(operand) => value.saturating_mul(operand),
            Self::Div(operand) => value.checked_div(operand).unwrap_or(i32::MAX),
            Self::Negate => value.saturating_neg(),
        }
    }
}

/// Errors raised while building an expression.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExpressionError {
    /// The base-value function name is not known.
    #[error("unknown base value '{0}'")]
    UnknownBase(String),

    /// A token is neither an operator nor a valid operand.
    #[error("unexpected token '{0}' in operation string")]
    BadToken(String),

    /// A binary operator was not followed by an operand.
    #[error("operator '{0}' is missing its operand")]
    MissingOperand(char),

    /// The operation string divides by a literal zero.
    #[error("division by zero in operation string")]
    DivisionByZero,
}

impl ContentError for ExpressionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownBase(_) => "EXPR_UNKNOWN_BASE",
            Self::BadToken(_) => "EXPR_BAD_TOKEN",
            Self::MissingOperand(_) => "EXPR_MISSING_OPERAND",
            Self::DivisionByZero => "EXPR_DIVISION_BY_ZERO",
        }
    }
}

/// A base value followed by operations.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expression {
    base: BaseValue,
    operations: Vec<Operation>,
}

impl Expression {
    pub fn new(base: BaseValue) -> Self {
        Self {
            base,
            operations: Vec::new(),
        }
    }

    /// Creates an expression from a base-value name.
    pub fn with_base_name(name: &str) -> Result<Self, ExpressionError> {
        BaseValue::find(name)
            .map(Self::new)
            .ok_or_else(|| ExpressionError::UnknownBase(name.to_owned()))
    }

    pub fn base(&self) -> BaseValue {
        self.base
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Parses an operation string and appends its operations.
    ///
    /// Tokens are separated by whitespace. Binary operators (`+ - * /`) take
    /// the next token as operand, or may be written fused (`+5`); `n`
    /// negates the running value. Nothing is appended if the string is
    /// rejected.
    ///
    /// Returns the number of operations appended.
    pub fn add_operations(&mut self, text: &str) -> Result<usize, ExpressionError> {
        let mut parsed = Vec::new();
        let mut tokens = text.split_whitespace();

        while let Some(token) = tokens.next() {
            if token == "n" {
                parsed.push(Operation::Negate);
                continue;
            }

            let mut chars = token.chars();
            let operator = chars.next().filter(|c| matches!(c, '+' | '-' | '*' | '/'));
            let Some(operator) = operator else {
                return Err(ExpressionError::BadToken(token.to_owned()));
            };

            let fused = chars.as_str();
            let operand_text = if fused.is_empty() {
                tokens.next().ok_or(ExpressionError::MissingOperand(operator))?
            } else {
                fused
            };
            let operand: i32 = operand_text
                .parse()
                .map_err(|_| ExpressionError::BadToken(operand_text.to_owned()))?;

            parsed.push(match operator {
                '+' => Operation::Add(operand),
                '-' => Operation::Sub(operand),
                '*' => Operation::Mul(operand),
                _ if operand == 0 => return Err(ExpressionError::DivisionByZero),
                _ => Operation::Div(operand),
            });
        }

        let added = parsed.len();
        self.operations.extend(parsed);
        Ok(added)
    }

    /// Evaluates the expression against the game's current values.
    pub fn evaluate(&self, source: &dyn ValueSource) -> i32 {
        self.operations
            .iter()
            .fold(source.base_value(self.base), |value, op| op.apply(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(i32);

    impl ValueSource for Fixed {
        fn base_value(&self, _base: BaseValue) -> i32 {
            self.0
        }
    }

    #[test]
    fn test_operations_apply_left_to_right() {
        let mut expr = Expression::with_base_name("PLAYER_LEVEL").unwrap();
        assert_eq!(expr.add_operations("* 3 / 2").unwrap(), 2);
        assert_eq!(expr.evaluate(&Fixed(10)), 15);

        let mut expr = Expression::new(BaseValue::DungeonLevel);
        expr.add_operations("+5 n").unwrap();
        assert_eq!(expr.evaluate(&Fixed(3)), -8);
    }

    #[test]
    fn test_division_saturates() {
        let mut expr = Expression::new(BaseValue::PlayerHp);
        expr.add_operations("/ -1").unwrap();
        assert_eq!(expr.evaluate(&Fixed(i32::MIN)), i32::MAX);
        assert_eq!(expr.evaluate(&Fixed(7)), -7);
        assert_eq!(Operation::Div(0).apply(5), i32::MAX);
    }

    #[test]
    fn test_unknown_base() {
        assert_eq!(
            Expression::with_base_name("PLAYER_MOOD"),
            Err(ExpressionError::UnknownBase("PLAYER_MOOD".into()))
        );
    }

    #[test]
    fn test_rejected_strings_append_nothing() {
        let mut expr = Expression::new(BaseValue::PlayerHp);
        assert_eq!(
            expr.add_operations("+ 1 *"),
            Err(ExpressionError::MissingOperand('*'))
        );
        assert_eq!(
            expr.add_operations("+ x"),
            Err(ExpressionError::BadToken("x".into()))
        );
        assert_eq!(
            expr.add_operations("% 2"),
            Err(ExpressionError::BadToken("%".into()))
        );
        assert_eq!(
            expr.add_operations("/ 0"),
            Err(ExpressionError::DivisionByZero)
        );
        assert!(expr.operations().is_empty());
    }
}
