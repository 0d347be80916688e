//! Numeric object modifiers (stats and skills).

use core::ops::{Index, IndexMut};

use strum::{EnumCount, IntoEnumIterator};

/// A modifier an object applies to its wielder.
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
    strum::EnumCount,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Modifier {
    Str,
    Int,
    Wis,
    Dex,
    Con,
    Stealth,
    Search,
    Infra,
    Tunnel,
    Speed,
    Blows,
    Shots,
    Might,
    Light,
}

impl Modifier {
    pub const COUNT: usize = <Self as EnumCount>::COUNT;

    pub fn find(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }

    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

/// Player stat, the sub-parameter of stat effects.
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
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Stat {
    Str,
    Int,
    Wis,
    Dex,
    Con,
}

/// One value per [`Modifier`].
///
/// Kinds and egos store random values, artifacts and curses plain integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierTable<T> {
    values: [T; Modifier::COUNT],
}

impl<T: Copy + Default> Default for ModifierTable<T> {
    fn default() -> Self {
        Self {
            values: [T::default(); Modifier::COUNT],
        }
    }
}

impl<T: Copy + Default + PartialEq> ModifierTable<T> {
    /// Iterates over modifiers whose value differs from the default.
    pub fn iter_set(&self) -> impl Iterator<Item = (Modifier, T)> {
        Modifier::all()
            .map(|modifier| (modifier, self.values[modifier.as_index()]))
            .filter(|(_, value)| *value != T::default())
    }
}

impl<T> Index<Modifier> for ModifierTable<T> {
    type Output = T;

    fn index(&self, modifier: Modifier) -> &T {
        &self.values[modifier.as_index()]
    }
}

impl<T> IndexMut<Modifier> for ModifierTable<T> {
    fn index_mut(&mut self, modifier: Modifier) -> &mut T {
        &mut self.values[modifier.as_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_names() {
        assert_eq!(Modifier::find("SPEED"), Some(Modifier::Speed));
        assert_eq!(Modifier::find("STR"), Some(Modifier::Str));
        assert_eq!(Modifier::find("RES_FIRE"), None);
        assert_eq!("CON".parse::<Stat>().ok(), Some(Stat::Con));
    }

    #[test]
    fn test_table_iter_set() {
        let mut table = ModifierTable::<i32>::default();
        table[Modifier::Speed] = 10;
        table[Modifier::Str] = -2;
        let set: Vec<_> = table.iter_set().collect();
        assert_eq!(set, vec![(Modifier::Str, -2), (Modifier::Speed, 10)]);
    }
}
