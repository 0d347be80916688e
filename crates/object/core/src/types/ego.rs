//! Ego items: enchantment templates applied to matching kinds.

use crate::effect::EffectChain;
use crate::element::ElementTable;
use crate::flags::{KindFlags, ObjectFlags};
use crate::modifier::ModifierTable;
use crate::random::RandomValue;

use super::ids::{BrandId, CurseId, EgoId, KindId, MembershipSet, PowerMap, SlayId};
use super::kind::Allocation;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EgoItem {
    pub eidx: EgoId,
    pub name: String,
    pub text: String,
    pub cost: i32,
    pub rating: i32,
    pub alloc: Allocation,

    /// Kinds this ego can be applied to, in the order they were added.
    pub possible: Vec<KindId>,

    pub to_h: RandomValue,
    pub to_d: RandomValue,
    pub to_a: RandomValue,
    pub min_to_h: i32,
    pub min_to_d: i32,
    pub min_to_a: i32,

    pub effects: EffectChain,
    pub time: RandomValue,

    pub flags: ObjectFlags,
    /// Object flags removed from the base kind.
    pub flags_off: ObjectFlags,
    pub kind_flags: KindFlags,
    pub elements: ElementTable,
    pub modifiers: ModifierTable<RandomValue>,
    pub min_modifiers: ModifierTable<i32>,

    pub slays: Option<MembershipSet<SlayId>>,
    pub brands: Option<MembershipSet<BrandId>>,
    pub curses: Option<PowerMap<CurseId>>,

    /// The next ego in declaration order.
    pub next: Option<EgoId>,
}

impl EgoItem {
    pub fn new(eidx: EgoId, name: impl Into<String>) -> Self {
        Self {
            eidx,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds `kind` to the possible kinds unless it is already present.
    pub fn add_possible(&mut self, kind: KindId) {
        if !self.possible.contains(&kind) {
            self.possible.push(kind);
        }
    }
}
