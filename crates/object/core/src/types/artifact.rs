//! Unique artifacts.

use crate::element::{Element, ElementTable};
use crate::flags::{ElementFlags, ObjectFlags};
use crate::modifier::ModifierTable;
use crate::random::RandomValue;
use crate::tval::TVal;

use super::ids::{ActivationId, ArtifactId, BrandId, CurseId, MembershipSet, PowerMap, SlayId};
use super::kind::Allocation;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Artifact {
    pub aidx: ArtifactId,
    pub name: String,
    pub text: String,
    pub tval: TVal,
    pub sval: u32,

    pub level: i32,
    pub weight: i32,
    pub cost: i32,
    pub alloc: Allocation,

    pub ac: i32,
    pub dd: i32,
    pub ds: i32,
    pub to_h: i32,
    pub to_d: i32,
    pub to_a: i32,

    pub flags: ObjectFlags,
    pub elements: ElementTable,
    pub modifiers: ModifierTable<i32>,

    pub activation: Option<ActivationId>,
    pub time: RandomValue,
    pub alt_msg: String,

    pub slays: Option<MembershipSet<SlayId>>,
    pub brands: Option<MembershipSet<BrandId>>,
    pub curses: Option<PowerMap<CurseId>>,

    /// The next artifact in declaration order.
    pub next: Option<ArtifactId>,
}

impl Artifact {
    /// Creates an artifact that ignores the base elements.
    pub fn new(aidx: ArtifactId, name: impl Into<String>) -> Self {
        let mut artifact = Self {
            aidx,
            name: name.into(),
            ..Self::default()
        };
        for element in Element::BASE {
            artifact.elements.flag(element, ElementFlags::IGNORE);
        }
        artifact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_artifact_ignores_base_elements() {
        let artifact = Artifact::new(ArtifactId(3), "of Testing");
        for element in Element::BASE {
            assert!(artifact.elements.has(element, ElementFlags::IGNORE));
        }
        assert!(!artifact.elements.has(Element::Pois, ElementFlags::IGNORE));
    }
}
