//! Flag and value token resolution.
//!
//! Flag strings are split on spaces and `|`. Each token is offered to the
//! namespaces a record accepts, in a fixed order, and the first namespace
//! that recognises it wins:
//!
//! 1. object flags (`SEE_INVIS`, and the placeholder `NONE`)
//! 2. kind flags (`INSTA_ART`)
//! 3. element flags (`IGNORE_FIRE`, `HATES_ACID`)
//!
//! Value strings use `NAME[value]`, where `NAME` is a modifier (`SPEED[2]`)
//! or an element resistance (`RES_FIRE[1]`).
//!
//! Both grammars stop at the first token they cannot resolve. Tokens before
//! it have already been applied and stay applied.

use core::str::FromStr;

use object_core::{
    Element, ElementFlags, ElementTable, KindFlags, Modifier, ModifierTable, ObjectFlags,
};

use crate::error::{ParseError, ParseResult};

/// A flag namespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Namespace {
    Object,
    Kind,
    Element,
}

/// A token resolved in one namespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagMatch {
    Object(ObjectFlags),
    Kind(KindFlags),
    Element(Element, ElementFlags),
}

impl Namespace {
    pub fn resolve(self, token: &str) -> Option<FlagMatch> {
        match self {
            Self::Object => resolve_object(token),
            Self::Kind => KindFlags::from_name(token).map(FlagMatch::Kind),
            Self::Element => resolve_element(token),
        }
    }
}

fn resolve_object(token: &str) -> Option<FlagMatch> {
    if token == ObjectFlags::NONE_TOKEN {
        return Some(FlagMatch::Object(ObjectFlags::empty()));
    }
    ObjectFlags::from_name(token).map(FlagMatch::Object)
}

/// Resolves `PREFIX_SUFFIX`, with `PREFIX` one of `IGNORE`/`HATES` and
/// `SUFFIX` an element name.
fn resolve_element(token: &str) -> Option<FlagMatch> {
    let (prefix, suffix) = token.split_once('_')?;
    let flag = match prefix {
        "IGNORE" => ElementFlags::IGNORE,
        "HATES" => ElementFlags::HATES,
        _ => return None,
    };
    Element::find(suffix).map(|element| FlagMatch::Element(element, flag))
}

/// Tries `namespaces` in order.
pub fn resolve_flag(token: &str, namespaces: &[Namespace]) -> Option<FlagMatch> {
    namespaces
        .iter()
        .find_map(|namespace| namespace.resolve(token))
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split([' ', '|']).filter(|token| !token.is_empty())
}

/// The flag fields of a record that a flag string may write to.
///
/// The namespaces tried follow from which fields are present: object flags
/// always, kind flags and element flags only when given.
pub struct FlagFields<'a> {
    pub flags: &'a mut ObjectFlags,
    pub kind_flags: Option<&'a mut KindFlags>,
    pub elements: Option<&'a mut ElementTable>,
}

impl<'a> FlagFields<'a> {
    /// Object flags only.
    pub fn object(flags: &'a mut ObjectFlags) -> Self {
        Self {
            flags,
            kind_flags: None,
            elements: None,
        }
    }

    /// Object and element flags.
    pub fn with_elements(flags: &'a mut ObjectFlags, elements: &'a mut ElementTable) -> Self {
        Self {
            flags,
            kind_flags: None,
            elements: Some(elements),
        }
    }

    /// Object, kind and element flags.
    pub fn all(
        flags: &'a mut ObjectFlags,
        kind_flags: &'a mut KindFlags,
        elements: &'a mut ElementTable,
    ) -> Self {
        Self {
            flags,
            kind_flags: Some(kind_flags),
            elements: Some(elements),
        }
    }

    fn namespaces(&self) -> Vec<Namespace> {
        let mut namespaces = vec![Namespace::Object];
        if self.kind_flags.is_some() {
            namespaces.push(Namespace::Kind);
        }
        if self.elements.is_some() {
            namespaces.push(Namespace::Element);
        }
        namespaces
    }

    fn apply(&mut self, matched: FlagMatch) {
        match matched {
            FlagMatch::Object(flag) => *self.flags |= flag,
            FlagMatch::Kind(flag) => {
                if let Some(kind_flags) = self.kind_flags.as_deref_mut() {
                    *kind_flags |= flag;
                }
            }
            FlagMatch::Element(element, flag) => {
                if let Some(elements) = self.elements.as_deref_mut() {
                    elements.flag(element, flag);
                }
            }
        }
    }

    /// Applies every token of `text`, stopping at the first unknown one.
    ///
    /// Returns the number of tokens applied.
    pub fn parse(&mut self, text: &str) -> ParseResult<usize> {
        let namespaces = self.namespaces();
        let mut applied = 0;
        for token in tokens(text) {
            let matched = resolve_flag(token, &namespaces)
                .ok_or_else(|| ParseError::InvalidFlag(token.to_owned()))?;
            self.apply(matched);
            applied += 1;
        }
        Ok(applied)
    }
}

/// A `NAME[value]` token resolved against modifiers or resistances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueMatch<T> {
    Modifier(Modifier, T),
    Resist(Element, i16),
}

/// Splits `NAME[value]`.
fn split_value(token: &str) -> Option<(&str, &str)> {
    let (name, rest) = token.split_once('[')?;
    let value = rest.strip_suffix(']')?;
    Some((name, value))
}

/// Resolves one value token. Modifiers are tried before resistances.
pub fn resolve_value<T: FromStr>(token: &str, resists: bool) -> Option<ValueMatch<T>> {
    let (name, value) = split_value(token)?;
    if let Some(modifier) = Modifier::find(name) {
        return value
            .parse()
            .ok()
            .map(|value| ValueMatch::Modifier(modifier, value));
    }
    if !resists {
        return None;
    }
    let element = Element::find(name.strip_prefix("RES_")?)?;
    value
        .parse()
        .ok()
        .map(|level| ValueMatch::Resist(element, level))
}

/// The value fields of a record that a value string may write to.
pub struct ValueFields<'a, T> {
    pub modifiers: &'a mut ModifierTable<T>,
    pub elements: Option<&'a mut ElementTable>,
}

impl<'a, T: FromStr + Copy> ValueFields<'a, T> {
    /// Modifiers only.
    pub fn modifiers(modifiers: &'a mut ModifierTable<T>) -> Self {
        Self {
            modifiers,
            elements: None,
        }
    }

    /// Modifiers and element resistances.
    pub fn with_resists(
        modifiers: &'a mut ModifierTable<T>,
        elements: &'a mut ElementTable,
    ) -> Self {
        Self {
            modifiers,
            elements: Some(elements),
        }
    }

    /// Applies every token of `text`, stopping at the first bad one.
    ///
    /// Returns the number of tokens applied.
    pub fn parse(&mut self, text: &str) -> ParseResult<usize> {
        let resists = self.elements.is_some();
        let mut applied = 0;
        for token in tokens(text) {
            let matched = resolve_value::<T>(token, resists)
                .ok_or_else(|| ParseError::InvalidValue(token.to_owned()))?;
            match matched {
                ValueMatch::Modifier(modifier, value) => self.modifiers[modifier] = value,
                ValueMatch::Resist(element, level) => {
                    if let Some(elements) = self.elements.as_deref_mut() {
                        elements.set_resist(element, level);
                    }
                }
            }
            applied += 1;
        }
        Ok(applied)
    }
}

/// Parses an allocation range `"<min> to <max>"` with both ends in 0..=255.
pub fn parse_range(text: &str) -> ParseResult<(u8, u8)> {
    let malformed = || ParseError::InvalidAllocation(text.to_owned());

    let parts: Vec<&str> = text.split_whitespace().collect();
    let [min, "to", max] = parts.as_slice() else {
        return Err(malformed());
    };
    let min: i64 = min.parse().map_err(|_| malformed())?;
    let max: i64 = max.parse().map_err(|_| malformed())?;

    let bounded =
        |value: i64| u8::try_from(value).map_err(|_| ParseError::OutOfBounds(text.to_owned()));
    Ok((bounded(min)?, bounded(max)?))
}

#[cfg(test)]
mod tests {
    use object_core::RandomValue;

    use super::*;

    #[test]
    fn test_namespace_order_and_element_grammar() {
        let all = [Namespace::Object, Namespace::Kind, Namespace::Element];
        assert_eq!(
            resolve_flag("SEE_INVIS", &all),
            Some(FlagMatch::Object(ObjectFlags::SEE_INVIS))
        );
        assert_eq!(
            resolve_flag("INSTA_ART", &all),
            Some(FlagMatch::Kind(KindFlags::INSTA_ART))
        );
        assert_eq!(
            resolve_flag("HATES_HOLY_ORB", &all),
            Some(FlagMatch::Element(Element::HolyOrb, ElementFlags::HATES))
        );
        assert_eq!(resolve_flag("IGNORE_WIND", &all), None);
        assert_eq!(resolve_flag("RESIST_FIRE", &all), None);
        assert_eq!(resolve_flag("INSTA_ART", &[Namespace::Object]), None);
        assert_eq!(
            resolve_flag("NONE", &all),
            Some(FlagMatch::Object(ObjectFlags::empty()))
        );
    }

    #[test]
    fn test_flags_partial_application() {
        let mut flags = ObjectFlags::empty();
        let mut kind_flags = KindFlags::empty();
        let mut elements = ElementTable::default();

        let err = FlagFields::all(&mut flags, &mut kind_flags, &mut elements)
            .parse("FREE_ACT | GOOD IGNORE_FIRE BOGUS SEE_INVIS")
            .unwrap_err();
        assert_eq!(err, ParseError::InvalidFlag("BOGUS".into()));

        assert_eq!(flags, ObjectFlags::FREE_ACT);
        assert_eq!(kind_flags, KindFlags::GOOD);
        assert!(elements.has(Element::Fire, ElementFlags::IGNORE));
        assert!(!flags.contains(ObjectFlags::SEE_INVIS));
    }

    #[test]
    fn test_flags_respect_namespaces() {
        let mut flags = ObjectFlags::empty();
        let result = FlagFields::object(&mut flags).parse("STICKY IGNORE_ACID");
        assert_eq!(result, Err(ParseError::InvalidFlag("IGNORE_ACID".into())));
        assert_eq!(flags, ObjectFlags::STICKY);

        let mut flags = ObjectFlags::empty();
        let mut elements = ElementTable::default();
        let applied = FlagFields::with_elements(&mut flags, &mut elements)
            .parse("NONE|IGNORE_ACID")
            .unwrap();
        assert_eq!(applied, 2);
        assert!(flags.is_empty());
    }

    #[test]
    fn test_values() {
        let mut modifiers = ModifierTable::<RandomValue>::default();
        let mut elements = ElementTable::default();
        let err = ValueFields::with_resists(&mut modifiers, &mut elements)
            .parse("SPEED[1+d4] RES_FIRE[1] | STR[2] LUCK[3] INT[1]")
            .unwrap_err();
        assert_eq!(err, ParseError::InvalidValue("LUCK[3]".into()));

        assert_eq!(modifiers[Modifier::Speed], RandomValue::parse("1+d4").unwrap());
        assert_eq!(modifiers[Modifier::Str], RandomValue::fixed(2));
        assert_eq!(modifiers[Modifier::Int], RandomValue::default());
        assert_eq!(elements[Element::Fire].res_level, 1);
    }

    #[test]
    fn test_values_without_resists() {
        let mut modifiers = ModifierTable::<i32>::default();
        let result = ValueFields::modifiers(&mut modifiers).parse("DEX[-2] RES_COLD[1]");
        assert_eq!(result, Err(ParseError::InvalidValue("RES_COLD[1]".into())));
        assert_eq!(modifiers[Modifier::Dex], -2);

        assert_eq!(resolve_value::<i32>("STR[x]", true), None);
        assert_eq!(resolve_value::<i32>("STR[2", true), None);
        assert_eq!(resolve_value::<i32>("STR", true), None);
    }

    #[test]
    fn test_range() {
        assert_eq!(parse_range("0 to 255"), Ok((0, 255)));
        assert_eq!(parse_range("5  to 40"), Ok((5, 40)));
        for bad in ["5-40", "5 to", "to 40", "a to b", "5 through 40", "5 to 40 to 60", ""] {
            assert_eq!(parse_range(bad), Err(ParseError::InvalidAllocation(bad.into())));
        }
        for out in ["0 to 256", "-1 to 10", "300 to 300"] {
            assert_eq!(parse_range(out), Err(ParseError::OutOfBounds(out.into())));
        }
    }
}
