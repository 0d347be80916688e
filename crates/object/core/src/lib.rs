//! Vocabulary and record types for compiled object content.
//!
//! `object-core` defines what the compiled tables contain: item types, flag
//! namespaces, elements, modifiers, random values, dice, expressions and
//! effects, plus one record type per table. It has no knowledge of data
//! files; parsing and table construction live in `object-content`.
pub mod color;
pub mod dice;
pub mod effect;
pub mod element;
pub mod error;
pub mod expression;
pub mod flags;
pub mod modifier;
pub mod random;
pub mod tval;
pub mod types;

pub use color::Color;
pub use dice::{Binding, Dice, DiceError, Operand};
pub use effect::{Effect, EffectChain, EffectKind, ParamKind, TimedEffect};
pub use element::{Element, ElementInfo, ElementTable};
pub use error::{ContentError, ErrorSeverity};
pub use expression::{BaseValue, Expression, ExpressionError, Operation, ValueSource};
pub use flags::{ElementFlags, KindFlags, ObjectFlags};
pub use modifier::{Modifier, ModifierTable, Stat};
pub use random::RandomValue;
pub use tval::{TVal, TValSet};
pub use types::{
    Activation, ActivationId, Allocation, Artifact, ArtifactId, Brand, BrandId, Curse, CurseId,
    CurseObject, EgoId, EgoItem, KindId, KnownObject, MembershipSet, ObjectBase, ObjectKind,
    PowerMap, Slay, SlayId, TableId, strip_name_markers,
};
