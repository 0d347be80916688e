//! Compiler for object content data files.
//!
//! Each table is read from a line-oriented text file, built record by record
//! and finalized into a dense array. Tables refer to one another by index and
//! load in a fixed order:
//!
//! ```text
//! object_base, slay, brand, curse, activation -> object -> ego_item, artifact
//! ```
//!
//! [`ContentRegistry`] owns the tables and enforces that order.
pub mod builder;
#[cfg(feature = "config")]
pub mod config;
pub mod directive;
pub mod effects;
pub mod error;
pub mod finalize;
pub mod monster;
pub mod registry;
pub mod resolve;
pub mod source;
pub mod tables;
pub mod xref;

pub use builder::{RecordBuilder, TableSession};
#[cfg(feature = "config")]
pub use config::CompilerConfig;
pub use directive::{DirectiveParser, Fields, Handler, LineError};
pub use effects::HasEffects;
pub use error::{
    LifecycleError, LifecycleResult, LoadError, ParseError, ParseResult, SourceError,
};
pub use finalize::{Linked, SparseTable};
pub use monster::{MonsterVocabulary, StaticMonsters};
pub use registry::{ContentRegistry, Singletons, TableState};
pub use resolve::{FlagFields, FlagMatch, Namespace, ValueFields, ValueMatch};
pub use source::{DataDir, DataSource, MemorySource};
pub use tables::TableKind;
pub use xref::{CrossLinked, CrossRefs};

/// Common result type for configuration loading.
pub type LoadResult<T> = anyhow::Result<T>;
