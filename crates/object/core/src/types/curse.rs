//! Curses and the pseudo-objects that carry their properties.

use crate::effect::EffectChain;
use crate::element::ElementTable;
use crate::flags::ObjectFlags;
use crate::modifier::ModifierTable;
use crate::random::RandomValue;
use crate::tval::TValSet;

use super::ids::KindId;

/// Kind and sval of the `<curse object>` singleton, as the player knows it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnownObject {
    pub kind: Option<KindId>,
    pub sval: u32,
}

/// The properties a curse imposes on the object it is attached to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurseObject {
    /// The `<curse object>` kind, filled in once the kind table is ready.
    pub kind: Option<KindId>,
    pub sval: u32,
    pub known: Option<KnownObject>,
    pub to_h: i32,
    pub to_d: i32,
    pub to_a: i32,
    pub flags: ObjectFlags,
    pub elements: ElementTable,
    pub modifiers: ModifierTable<i32>,
    pub effects: EffectChain,
    pub effect_msg: String,
    pub time: RandomValue,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Curse {
    pub name: String,
    /// Item types the curse may appear on.
    pub possible: TValSet,
    pub desc: String,
    pub obj: CurseObject,
}
