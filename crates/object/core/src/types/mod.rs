//! Record types of the compiled tables.

pub mod activation;
pub mod artifact;
pub mod base;
pub mod curse;
pub mod ego;
pub mod ids;
pub mod kind;
pub mod slay;

pub use activation::Activation;
pub use artifact::Artifact;
pub use base::ObjectBase;
pub use curse::{Curse, CurseObject, KnownObject};
pub use ego::EgoItem;
pub use ids::{
    ActivationId, ArtifactId, BrandId, CurseId, EgoId, KindId, MembershipSet, PowerMap, SlayId,
    TableId,
};
pub use kind::{Allocation, ObjectKind, strip_name_markers};
pub use slay::{Brand, Slay};
