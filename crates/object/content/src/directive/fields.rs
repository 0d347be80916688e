//! Typed field values of one directive line.

use object_core::RandomValue;

use super::pattern::{FieldSpec, FieldType};
use crate::error::{ParseError, ParseResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Int(i32),
    Uint(u32),
    Sym(&'a str),
    Str(&'a str),
    Char(char),
    Rand(RandomValue),
}

/// The fields of a matched directive line, by name.
#[derive(Clone, Debug, Default)]
pub struct Fields<'a> {
    values: Vec<(&'a str, FieldValue<'a>)>,
}

impl<'a> Fields<'a> {
    /// Splits `rest` (the line after its keyword) according to `specs`.
    pub(crate) fn read(specs: &'a [FieldSpec], rest: &'a str) -> ParseResult<Self> {
        let mut values = Vec::with_capacity(specs.len());
        let mut rest = rest.trim_start();

        for spec in specs {
            if rest.is_empty() {
                if spec.optional {
                    break;
                }
                return Err(ParseError::MissingField(spec.name.clone()));
            }

            let token = if spec.ty == FieldType::Str {
                let text = rest.trim_end();
                rest = "";
                text
            } else {
                let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                let (token, tail) = rest.split_at(end);
                rest = tail.trim_start();
                token
            };

            values.push((spec.name.as_str(), convert(spec, token)?));
        }

        if !rest.is_empty() {
            return Err(ParseError::TrailingInput(rest.to_owned()));
        }
        Ok(Self { values })
    }

    fn get(&self, name: &str) -> Option<&FieldValue<'a>> {
        self.values
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    fn require(&self, name: &str) -> ParseResult<&FieldValue<'a>> {
        self.get(name)
            .ok_or_else(|| ParseError::MissingField(name.to_owned()))
    }

    /// Returns true if the (optional) field was present on the line.
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn int(&self, name: &str) -> ParseResult<i32> {
        match self.require(name)? {
            FieldValue::Int(value) => Ok(*value),
            other => Err(wrong_type(name, other)),
        }
    }

    pub fn uint(&self, name: &str) -> ParseResult<u32> {
        match self.require(name)? {
            FieldValue::Uint(value) => Ok(*value),
            other => Err(wrong_type(name, other)),
        }
    }

    pub fn sym(&self, name: &str) -> ParseResult<&'a str> {
        match self.require(name)? {
            FieldValue::Sym(value) => Ok(value),
            other => Err(wrong_type(name, other)),
        }
    }

    pub fn str(&self, name: &str) -> ParseResult<&'a str> {
        match self.require(name)? {
            FieldValue::Str(value) => Ok(value),
            other => Err(wrong_type(name, other)),
        }
    }

    pub fn char(&self, name: &str) -> ParseResult<char> {
        match self.require(name)? {
            FieldValue::Char(value) => Ok(*value),
            other => Err(wrong_type(name, other)),
        }
    }

    pub fn rand(&self, name: &str) -> ParseResult<RandomValue> {
        match self.require(name)? {
            FieldValue::Rand(value) => Ok(*value),
            other => Err(wrong_type(name, other)),
        }
    }

    /// Reads an optional `int` field.
    pub fn opt_int(&self, name: &str) -> ParseResult<Option<i32>> {
        if self.has(name) {
            self.int(name).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Reads an optional `sym` field.
    pub fn opt_sym(&self, name: &str) -> ParseResult<Option<&'a str>> {
        if self.has(name) {
            self.sym(name).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Reads an optional `str` field.
    pub fn opt_str(&self, name: &str) -> ParseResult<Option<&'a str>> {
        if self.has(name) {
            self.str(name).map(Some)
        } else {
            Ok(None)
        }
    }
}

fn convert<'a>(spec: &FieldSpec, token: &'a str) -> ParseResult<FieldValue<'a>> {
    let invalid = || ParseError::InvalidField {
        field: spec.name.clone(),
        value: token.to_owned(),
    };

    let value = match spec.ty {
        FieldType::Int => FieldValue::Int(token.parse().map_err(|_| invalid())?),
        FieldType::Uint => FieldValue::Uint(token.parse().map_err(|_| invalid())?),
        FieldType::Sym => FieldValue::Sym(token),
        FieldType::Str => FieldValue::Str(token),
        FieldType::Char => {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => FieldValue::Char(c),
                _ => return Err(invalid()),
            }
        }
        FieldType::Rand => FieldValue::Rand(RandomValue::parse(token).map_err(|_| invalid())?),
    };
    Ok(value)
}

fn wrong_type(name: &str, value: &FieldValue<'_>) -> ParseError {
    ParseError::Internal(format!("field '{name}' read with the wrong type ({value:?})"))
}
