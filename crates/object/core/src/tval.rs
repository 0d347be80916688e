//! Item types (tvals).
//!
//! Every object kind, base and artifact belongs to exactly one tval. The
//! object-base table is keyed directly by tval, so [`TVal::COUNT`] is its size.

use strum::{EnumCount, IntoEnumIterator};

/// Item type.
///
/// Data files name tvals in snake case; lookup ignores ASCII case.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumCount,
    strum::EnumIter,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum TVal {
    /// Placeholder type for engine-internal kinds (piles, unknown items).
    #[default]
    None,
    Chest,
    Shot,
    Arrow,
    Bolt,
    Bow,
    Digger,
    Hafted,
    Polearm,
    Sword,
    Boots,
    Gloves,
    Helm,
    Crown,
    Shield,
    Cloak,
    SoftArmor,
    HardArmor,
    DragonArmor,
    Light,
    Amulet,
    Ring,
    Staff,
    Wand,
    Rod,
    Scroll,
    Potion,
    Flask,
    Food,
    Mushroom,
    MagicBook,
    PrayerBook,
    Gold,
}

impl TVal {
    /// Number of item types; the size of the object-base table.
    pub const COUNT: usize = <Self as EnumCount>::COUNT;

    /// Looks up a tval by its data-file name.
    pub fn find(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// Position of this tval in tval-keyed tables.
    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }

    /// Returns the tval stored at `index` in a tval-keyed table.
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index).ok().and_then(Self::from_repr)
    }

    /// Iterates over every tval in table order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

/// A set of tvals, used for the item types a curse may appear on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TValSet(u64);

impl TValSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, tval: TVal) {
        self.0 |= 1u64 << tval.as_index();
    }

    pub fn contains(&self, tval: TVal) -> bool {
        self.0 & (1u64 << tval.as_index()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = TVal> + '_ {
        TVal::all().filter(|tval| self.contains(*tval))
    }
}
