//! Effects attached to curses, activations, kinds and egos.
//!
//! An [`EffectChain`] keeps effects in declaration order. Data files build a
//! chain one `effect` line at a time and then refine the most recent node
//! with `param`, `dice` and `expr` lines, so the chain exposes its last node
//! directly.

use crate::dice::Dice;
use crate::element::Element;
use crate::modifier::Stat;

/// Vocabulary an effect's `type` sub-parameter is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// The effect takes no sub-parameter.
    None,
    Element,
    Timed,
    Stat,
}

/// Effect catalogue.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectKind {
    HealHp,
    Nourish,
    Cure,
    TimedSet,
    TimedInc,
    TimedDec,
    RestoreStat,
    DrainStat,
    GainStat,
    LoseRandomStat,
    RestoreExp,
    GainExp,
    LoseExp,
    RestoreMana,
    RemoveCurse,
    MapArea,
    DetectTraps,
    DetectDoors,
    DetectGold,
    DetectObjects,
    DetectVisibleMonsters,
    DetectInvisibleMonsters,
    DetectEvil,
    Identify,
    Recharge,
    Enchant,
    Teleport,
    TeleportLevel,
    Recall,
    DeepDescent,
    LightArea,
    DarkenArea,
    Earthquake,
    Destruction,
    Banish,
    MassBanish,
    Probe,
    Summon,
    Wake,
    Damage,
    Spot,
    Sphere,
    Ball,
    Breath,
    Arc,
    Bolt,
    BoltOrBeam,
    Beam,
    Line,
    Strike,
    ProjectLos,
}

impl EffectKind {
    pub fn find(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// The vocabulary of this effect's `type` sub-parameter.
    pub const fn param_kind(self) -> ParamKind {
        match self {
            Self::Cure | Self::TimedSet | Self::TimedInc | Self::TimedDec => ParamKind::Timed,
            Self::RestoreStat | Self::DrainStat | Self::GainStat => ParamKind::Stat,
            Self::Spot
            | Self::Sphere
            | Self::Ball
            | Self::Breath
            | Self::Arc
            | Self::Bolt
            | Self::BoltOrBeam
            | Self::Beam
            | Self::Line
            | Self::Strike
            | Self::ProjectLos => ParamKind::Element,
            _ => ParamKind::None,
        }
    }

    /// Resolves a `type` sub-parameter name to its numeric value.
    pub fn resolve_param(self, name: &str) -> Option<i32> {
        match self.param_kind() {
            ParamKind::None => None,
            ParamKind::Element => Element::find(name).map(|e| e as i32),
            ParamKind::Timed => name.parse::<TimedEffect>().ok().map(|t| t as i32),
            ParamKind::Stat => name.parse::<Stat>().ok().map(|s| s as i32),
        }
    }
}

/// Timed player effects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum TimedEffect {
    Fast,
    Slow,
    Blind,
    Paralyzed,
    Confused,
    Afraid,
    Image,
    Poisoned,
    Cut,
    Stun,
    Protevil,
    Invuln,
    Hero,
    Shero,
    Shield,
    Blessed,
    Sinvis,
    Sinfra,
    OppAcid,
    OppElec,
    OppFire,
    OppCold,
    OppPois,
    OppConf,
    Amnesia,
    Telepathy,
    Stoneskin,
    Terror,
    Sprint,
    Bold,
}

/// One effect node.
///
/// `params[0]` holds the resolved `type` sub-parameter, `params[1]` and
/// `params[2]` the numeric parameters set by `effect ... xtra` and `param`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub kind: EffectKind,
    pub dice: Option<Dice>,
    pub params: [i32; 3],
}

impl Effect {
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            dice: None,
            params: [0; 3],
        }
    }
}

/// Effects in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectChain {
    effects: Vec<Effect>,
}

impl EffectChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an effect at the tail.
    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// The most recently appended effect.
    pub fn last(&self) -> Option<&Effect> {
        self.effects.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut Effect> {
        self.effects.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub fn as_slice(&self) -> &[Effect] {
        &self.effects
    }
}

impl<'a> IntoIterator for &'a EffectChain {
    type Item = &'a Effect;
    type IntoIter = core::slice::Iter<'a, Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.effects.iter()
    }
}
