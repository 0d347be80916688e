//! Elements and per-element object information.

use core::ops::{Index, IndexMut};

use strum::{EnumCount, IntoEnumIterator};

use crate::flags::ElementFlags;

/// Projectable element.
///
/// Names match the data files exactly (`HOLY_ORB`, not `holy_orb`).
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
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Element {
    Acid,
    Elec,
    Fire,
    Cold,
    Pois,
    Light,
    Dark,
    Sound,
    Shard,
    Nexus,
    Nether,
    Chaos,
    Disen,
    Water,
    Ice,
    Gravity,
    Inertia,
    Force,
    Time,
    Plasma,
    Meteor,
    Missile,
    Mana,
    HolyOrb,
    Arrow,
}

impl Element {
    pub const COUNT: usize = <Self as EnumCount>::COUNT;

    /// The four base elements every artifact ignores by default.
    pub const BASE: [Element; 4] = [Element::Acid, Element::Elec, Element::Fire, Element::Cold];

    /// Looks up an element by its exact data-file name.
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

    pub const fn is_base(self) -> bool {
        matches!(self, Self::Acid | Self::Elec | Self::Fire | Self::Cold)
    }
}

/// Resistance level and ignore/hates flags for one element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementInfo {
    pub res_level: i16,
    pub flags: ElementFlags,
}

/// Per-element information for one record, indexed by [`Element`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementTable {
    entries: [ElementInfo; Element::COUNT],
}

impl Default for ElementTable {
    fn default() -> Self {
        Self {
            entries: [ElementInfo::default(); Element::COUNT],
        }
    }
}

impl ElementTable {
    /// Adds `flags` to the entry for `element`.
    pub fn flag(&mut self, element: Element, flags: ElementFlags) {
        self[element].flags |= flags;
    }

    pub fn set_resist(&mut self, element: Element, level: i16) {
        self[element].res_level = level;
    }

    pub fn has(&self, element: Element, flags: ElementFlags) -> bool {
        self[element].flags.contains(flags)
    }

    /// Iterates over elements with a non-default entry.
    pub fn iter_set(&self) -> impl Iterator<Item = (Element, &ElementInfo)> {
        Element::all()
            .map(|element| (element, &self.entries[element.as_index()]))
            .filter(|(_, info)| **info != ElementInfo::default())
    }
}

impl Index<Element> for ElementTable {
    type Output = ElementInfo;

    fn index(&self, element: Element) -> &Self::Output {
        &self.entries[element.as_index()]
    }
}

impl IndexMut<Element> for ElementTable {
    fn index_mut(&mut self, element: Element) -> &mut Self::Output {
        &mut self.entries[element.as_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_names() {
        assert_eq!(Element::find("HOLY_ORB"), Some(Element::HolyOrb));
        assert_eq!(Element::find("FIRE"), Some(Element::Fire));
        assert_eq!(Element::find("fire"), None);
        assert_eq!(Element::HolyOrb.to_string(), "HOLY_ORB");
    }

    #[test]
    fn test_base_elements() {
        let base: Vec<_> = Element::all().filter(|e| e.is_base()).collect();
        assert_eq!(base, Element::BASE.to_vec());
    }

    #[test]
    fn test_table_flags_and_resist() {
        let mut table = ElementTable::default();
        table.flag(Element::Fire, ElementFlags::IGNORE);
        table.flag(Element::Fire, ElementFlags::HATES);
        table.set_resist(Element::Cold, 1);

        assert!(table.has(Element::Fire, ElementFlags::IGNORE | ElementFlags::HATES));
        assert_eq!(table[Element::Cold].res_level, 1);
        assert_eq!(table.iter_set().count(), 2);
    }
}
