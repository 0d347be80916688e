//! Table indices and cross-reference sets.
//!
//! Every reference from one table into another is an index, never an
//! address, so a table may grow without invalidating its referrers.

use core::fmt;
use core::marker::PhantomData;

/// An index into one of the compiled tables.
pub trait TableId: Copy + Eq + fmt::Debug {
    fn from_index(index: usize) -> Self;
    fn index(self) -> usize;
}

macro_rules! table_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl TableId for $name {
            #[inline]
            fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            #[inline]
            fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

table_id!(
    /// Position in the kind table (`kidx`).
    KindId
);
table_id!(
    /// Position in the ego-item table (`eidx`).
    EgoId
);
table_id!(
    /// Position in the artifact table (`aidx`).
    ArtifactId
);
table_id!(
    /// Position in the slay table; 0 is the sentinel.
    SlayId
);
table_id!(
    /// Position in the brand table; 0 is the sentinel.
    BrandId
);
table_id!(
    /// Position in the curse table; 0 is the sentinel.
    CurseId
);
table_id!(
    /// Position in the activation table; 0 is the sentinel.
    ActivationId
);

/// Boolean membership in a finalized table, sized to that table's count.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MembershipSet<I> {
    members: Vec<bool>,
    #[cfg_attr(feature = "serde", serde(skip))]
    _id: PhantomData<I>,
}

impl<I: TableId> MembershipSet<I> {
    /// Creates an empty set for a table of `len` entries.
    pub fn with_len(len: usize) -> Self {
        Self {
            members: vec![false; len],
            _id: PhantomData,
        }
    }

    pub fn insert(&mut self, id: I) {
        if let Some(member) = self.members.get_mut(id.index()) {
            *member = true;
        }
    }

    pub fn contains(&self, id: I) -> bool {
        self.members.get(id.index()).copied().unwrap_or(false)
    }

    /// Size of the table this set was allocated against.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = I> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, member)| **member)
            .map(|(index, _)| I::from_index(index))
    }
}

/// A power value per entry of a finalized table; zero means absent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerMap<I> {
    powers: Vec<i32>,
    #[cfg_attr(feature = "serde", serde(skip))]
    _id: PhantomData<I>,
}

impl<I: TableId> PowerMap<I> {
    pub fn with_len(len: usize) -> Self {
        Self {
            powers: vec![0; len],
            _id: PhantomData,
        }
    }

    pub fn set(&mut self, id: I, power: i32) {
        if let Some(slot) = self.powers.get_mut(id.index()) {
            *slot = power;
        }
    }

    pub fn power(&self, id: I) -> i32 {
        self.powers.get(id.index()).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.powers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }

    /// Entries with a non-zero power.
    pub fn iter(&self) -> impl Iterator<Item = (I, i32)> + '_ {
        self.powers
            .iter()
            .enumerate()
            .filter(|(_, power)| **power != 0)
            .map(|(index, power)| (I::from_index(index), *power))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_set() {
        let mut set = MembershipSet::<SlayId>::with_len(4);
        set.insert(SlayId(2));
        set.insert(SlayId(9));
        assert!(set.contains(SlayId(2)));
        assert!(!set.contains(SlayId(9)));
        assert_eq!(set.len(), 4);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![SlayId(2)]);
    }

    #[test]
    fn test_power_map() {
        let mut powers = PowerMap::<CurseId>::with_len(3);
        powers.set(CurseId(1), 40);
        assert_eq!(powers.power(CurseId(1)), 40);
        assert_eq!(powers.power(CurseId(2)), 0);
        assert_eq!(powers.iter().collect::<Vec<_>>(), vec![(CurseId(1), 40)]);
    }
}
