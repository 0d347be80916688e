//! Slays and brands.

/// Extra damage against a class of monsters.
///
/// A slay targets either a monster race flag or a monster base, never both.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slay {
    pub code: String,
    pub name: String,
    pub race_flag: Option<String>,
    pub base: Option<String>,
    pub multiplier: u32,
    pub power: u32,
    pub melee_verb: String,
    pub range_verb: String,
}

/// Extra elemental damage, resisted by monsters carrying `resist_flag`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Brand {
    pub code: String,
    pub name: String,
    pub verb: String,
    pub multiplier: u32,
    pub power: u32,
    pub resist_flag: Option<String>,
}
