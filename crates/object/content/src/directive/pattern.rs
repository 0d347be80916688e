//! Directive patterns: `keyword type name [?type name ...]`.

use crate::error::{ParseError, ParseResult};

/// Declared type of a directive field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldType {
    Int,
    Uint,
    /// A single whitespace-free token.
    Sym,
    /// The rest of the line.
    Str,
    Char,
    /// A [`RandomValue`](object_core::RandomValue).
    Rand,
}

impl FieldType {
    fn from_tag(tag: &str) -> Option<Self> {
        let ty = match tag {
            "int" => Self::Int,
            "uint" => Self::Uint,
            "sym" => Self::Sym,
            "str" => Self::Str,
            "char" => Self::Char,
            "rand" => Self::Rand,
            _ => return None,
        };
        Some(ty)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub ty: FieldType,
    pub optional: bool,
}

/// A parsed directive pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub keyword: String,
    pub fields: Vec<FieldSpec>,
}

impl Pattern {
    /// Parses a pattern such as `effect sym eff ?sym type ?int xtra`.
    ///
    /// A `str` field must be last, and no required field may follow an
    /// optional one.
    pub fn parse(pattern: &str) -> ParseResult<Self> {
        let malformed = |why: &str| ParseError::Internal(format!("pattern '{pattern}': {why}"));

        let mut tokens = pattern.split_whitespace();
        let keyword = tokens.next().ok_or_else(|| malformed("empty"))?;

        let mut fields: Vec<FieldSpec> = Vec::new();
        while let Some(tag) = tokens.next() {
            let name = tokens.next().ok_or_else(|| malformed("field without a name"))?;
            let (optional, tag) = match tag.strip_prefix('?') {
                Some(tag) => (true, tag),
                None => (false, tag),
            };
            let ty = FieldType::from_tag(tag).ok_or_else(|| malformed("unknown field type"))?;

            if fields.last().is_some_and(|f| f.ty == FieldType::Str) {
                return Err(malformed("str field must be last"));
            }
            if !optional && fields.last().is_some_and(|f| f.optional) {
                return Err(malformed("required field after optional field"));
            }

            fields.push(FieldSpec {
                name: name.to_owned(),
                ty,
                optional,
            });
        }

        Ok(Self {
            keyword: keyword.to_owned(),
            fields,
        })
    }
}
