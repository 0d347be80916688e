//! Object bases: per-tval defaults shared by every kind of that tval.

use crate::color::Color;
use crate::element::ElementTable;
use crate::flags::{KindFlags, ObjectFlags};
use crate::tval::TVal;

/// Shared properties of one item type.
///
/// The object-base table is keyed by [`TVal`]; tvals without a declaration
/// keep the default record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectBase {
    /// Display name of the type, if the data file gives one.
    pub name: Option<String>,
    pub tval: TVal,
    pub attr: Color,
    pub flags: ObjectFlags,
    pub kind_flags: KindFlags,
    pub elements: ElementTable,
    /// Percentage chance that a thrown or fired item breaks.
    pub break_perc: i32,
}

impl ObjectBase {
    pub fn new(tval: TVal) -> Self {
        Self {
            tval,
            ..Self::default()
        }
    }

    /// Returns true if this slot was filled from a data file.
    pub fn is_declared(&self) -> bool {
        self.name.is_some() || self.tval != TVal::None
    }
}
