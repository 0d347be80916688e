//! Flag namespaces used by object records.
//!
//! Object flags and kind flags are independent namespaces: a token in a data
//! file is looked up in each namespace by its exact constant name
//! (see `bitflags`' `from_name`).

use bitflags::bitflags;

bitflags! {
    /// Properties an object grants or suffers (sustains, protections, curses).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ObjectFlags: u64 {
        const SUST_STR    = 1 << 0;
        const SUST_INT    = 1 << 1;
        const SUST_WIS    = 1 << 2;
        const SUST_DEX    = 1 << 3;
        const SUST_CON    = 1 << 4;
        const PROT_FEAR   = 1 << 5;
        const PROT_BLIND  = 1 << 6;
        const PROT_CONF   = 1 << 7;
        const PROT_STUN   = 1 << 8;
        const SLOW_DIGEST = 1 << 9;
        const FEATHER     = 1 << 10;
        const REGEN       = 1 << 11;
        const TELEPATHY   = 1 << 12;
        const SEE_INVIS   = 1 << 13;
        const FREE_ACT    = 1 << 14;
        const HOLD_LIFE   = 1 << 15;
        const IMPACT      = 1 << 16;
        const BLESSED     = 1 << 17;
        const BURNS_OUT   = 1 << 18;
        const TAKES_FUEL  = 1 << 19;
        const NO_FUEL     = 1 << 20;
        const IMPAIR_HP   = 1 << 21;
        const IMPAIR_MANA = 1 << 22;
        const AFRAID      = 1 << 23;
        const NO_TELEPORT = 1 << 24;
        const AGGRAVATE   = 1 << 25;
        const DRAIN_EXP   = 1 << 26;
        const STICKY      = 1 << 27;
        const FRAGILE     = 1 << 28;
        const LIGHT_2     = 1 << 29;
        const LIGHT_3     = 1 << 30;
        const DIG_1       = 1 << 31;
        const DIG_2       = 1 << 32;
        const DIG_3       = 1 << 33;
        const EXPLODE     = 1 << 34;
        const TRAP_IMMUNE = 1 << 35;
        const THROWING    = 1 << 36;
    }
}

impl ObjectFlags {
    /// Placeholder token accepted in flag lists; it names no flag.
    pub const NONE_TOKEN: &'static str = "NONE";
}

bitflags! {
    /// Properties of an object kind as a whole (generation and display hints).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct KindFlags: u32 {
        const RAND_HI_RES    = 1 << 0;
        const RAND_SUSTAIN   = 1 << 1;
        const RAND_POWER     = 1 << 2;
        const INSTA_ART      = 1 << 3;
        const QUEST_ART      = 1 << 4;
        const EASY_KNOW      = 1 << 5;
        const GOOD           = 1 << 6;
        const SHOW_DICE      = 1 << 7;
        const SHOW_MULT      = 1 << 8;
        const SHOOTS_SHOTS   = 1 << 9;
        const SHOOTS_ARROWS  = 1 << 10;
        const SHOOTS_BOLTS   = 1 << 11;
        const RAND_BASE_RES  = 1 << 12;
        const RAND_RES_POWER = 1 << 13;
    }
}

bitflags! {
    /// How an object relates to an element besides its resistance level.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ElementFlags: u8 {
        /// The object is not damaged by the element.
        const IGNORE = 1 << 0;
        /// The object is damaged by the element.
        const HATES  = 1 << 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_is_exact() {
        assert_eq!(ObjectFlags::from_name("SEE_INVIS"), Some(ObjectFlags::SEE_INVIS));
        assert_eq!(ObjectFlags::from_name("see_invis"), None);
        assert_eq!(ObjectFlags::from_name("SEE"), None);
        assert_eq!(KindFlags::from_name("INSTA_ART"), Some(KindFlags::INSTA_ART));
        assert_eq!(KindFlags::from_name("SEE_INVIS"), None);
    }

    #[test]
    fn test_namespaces_are_disjoint() {
        for (name, _) in ObjectFlags::all().iter_names() {
            assert!(KindFlags::from_name(name).is_none(), "{name} in both namespaces");
        }
    }

    #[test]
    fn test_high_bits_fit() {
        assert!(ObjectFlags::THROWING.bits() > u64::from(u32::MAX));
        assert_eq!(ObjectFlags::all().iter().count(), 37);
    }
}
