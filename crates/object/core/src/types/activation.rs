use crate::effect::EffectChain;

use super::ids::ActivationId;

/// An effect an artifact can be activated for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Activation {
    /// Position in the activation table, assigned at finalization.
    pub index: ActivationId,
    pub name: String,
    /// Whether the activation needs a direction.
    pub aim: bool,
    pub power: u32,
    pub effects: EffectChain,
    pub message: String,
    pub desc: String,
}
