//! Object kinds: the base item definitions.

use crate::color::Color;
use crate::effect::EffectChain;
use crate::element::ElementTable;
use crate::flags::{KindFlags, ObjectFlags};
use crate::modifier::ModifierTable;
use crate::random::RandomValue;
use crate::tval::TVal;

use super::ids::{BrandId, CurseId, KindId, MembershipSet, PowerMap, SlayId};

/// Generation probability and depth range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allocation {
    pub prob: i32,
    pub min: u8,
    pub max: u8,
}

/// One object kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectKind {
    pub kidx: KindId,
    pub name: String,
    pub text: String,
    pub tval: TVal,
    /// Subtype number within `tval`, counting from 1 in declaration order.
    pub sval: u32,
    pub glyph: char,
    pub attr: Color,

    pub level: i32,
    pub weight: i32,
    pub cost: i32,
    pub alloc: Allocation,

    pub ac: i32,
    pub dd: i32,
    pub ds: i32,
    pub to_h: RandomValue,
    pub to_d: RandomValue,
    pub to_a: RandomValue,

    pub charge: RandomValue,
    pub gen_mult_prob: i32,
    pub stack_size: RandomValue,

    pub flags: ObjectFlags,
    pub kind_flags: KindFlags,
    pub elements: ElementTable,
    pub power: i32,

    pub effects: EffectChain,
    pub effect_msg: String,
    pub time: RandomValue,
    pub pval: RandomValue,
    pub modifiers: ModifierTable<RandomValue>,

    pub slays: Option<MembershipSet<SlayId>>,
    pub brands: Option<MembershipSet<BrandId>>,
    pub curses: Option<PowerMap<CurseId>>,

    /// The next kind in declaration order.
    pub next: Option<KindId>,
}

impl ObjectKind {
    pub fn new(kidx: KindId, name: impl Into<String>) -> Self {
        Self {
            kidx,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns true if this kind exists only to carry an artifact.
    pub fn is_insta_art(&self) -> bool {
        self.kind_flags.contains(KindFlags::INSTA_ART)
    }

    /// The kind name without the article marker `& ` and plural marker `~`.
    pub fn base_name(&self) -> String {
        strip_name_markers(&self.name)
    }
}

/// Removes the article and plural markers from a kind name.
pub fn strip_name_markers(name: &str) -> String {
    name.strip_prefix("& ").unwrap_or(name).replace('~', "")
}
