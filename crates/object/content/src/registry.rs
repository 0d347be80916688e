//! Ownership and lifecycle of the compiled tables.
//!
//! Every table moves through
//!
//! ```text
//! Uninitialized -> Loading -> Ready -> Released
//! ```
//!
//! A table can only be loaded once its dependencies are ready and only be
//! read while it is ready. A failed load puts the table back into
//! `Uninitialized` with nothing committed. [`ContentRegistry::release`] ends
//! the lifecycle of every table at once.
//!
//! Loading the artifact table also resolves the engine's singleton kinds and
//! points every curse at the `<curse object>` kind.

use object_core::{
    Activation, ActivationId, Artifact, Brand, Curse, EgoItem, KindId, KnownObject, ObjectBase,
    ObjectKind, Slay, TVal,
};
use tracing::{info, warn};

use crate::builder::TableSession;
use crate::directive::{DirectiveParser, LineError};
use crate::error::{LifecycleError, LifecycleResult, LoadError, ParseResult, SourceError};
use crate::finalize::SparseTable;
use crate::monster::{MonsterVocabulary, StaticMonsters};
use crate::source::DataSource;
use crate::tables::{TableKind, activation, artifact, brand, curse, ego, kind, object_base, slay};
use crate::xref::{CrossRefs, find_activation};

/// Lifecycle state of one table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TableState {
    #[default]
    Uninitialized,
    Loading,
    Ready,
    Released,
}

/// One table and its lifecycle state.
#[derive(Clone, Debug, Default)]
struct TableSlot<T> {
    state: TableState,
    table: T,
}

impl<T: Default> TableSlot<T> {
    fn get(&self, kind: TableKind) -> LifecycleResult<&T> {
        match self.state {
            TableState::Ready => Ok(&self.table),
            TableState::Released => Err(LifecycleError::Released),
            state => Err(LifecycleError::NotReady { table: kind, state }),
        }
    }

    fn commit(&mut self, table: T) {
        self.table = table;
        self.state = TableState::Ready;
    }

    fn release(&mut self) {
        self.table = T::default();
        self.state = TableState::Released;
    }
}

/// Kinds the engine refers to by name rather than by index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Singletons {
    pub unknown_item: Option<KindId>,
    pub unknown_treasure: Option<KindId>,
    pub pile: Option<KindId>,
    pub curse_object: Option<KindId>,
}

/// Owns every compiled table.
pub struct ContentRegistry {
    monsters: Box<dyn MonsterVocabulary>,
    bases: TableSlot<Vec<ObjectBase>>,
    slays: TableSlot<Vec<Slay>>,
    brands: TableSlot<Vec<Brand>>,
    curses: TableSlot<Vec<Curse>>,
    activations: TableSlot<Vec<Activation>>,
    kinds: TableSlot<SparseTable<ObjectKind>>,
    egos: TableSlot<SparseTable<EgoItem>>,
    artifacts: TableSlot<SparseTable<Artifact>>,
    singletons: Singletons,
    released: bool,
}

impl Default for ContentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `parser` over `text`, turning a line failure into a [`LoadError`].
fn run<S>(
    table: TableKind,
    parser: ParseResult<DirectiveParser<S>>,
    session: &mut S,
    text: &str,
) -> Result<(), LoadError> {
    let parse_error = |line, source| LoadError::Parse {
        table,
        line,
        source,
    };
    let parser = parser.map_err(|source| parse_error(0, source))?;
    parser
        .parse_str(session, text)
        .map_err(|LineError { line, error }| parse_error(line, error))
}

impl ContentRegistry {
    /// A registry using the default monster vocabulary.
    pub fn new() -> Self {
        Self::with_monsters(Box::new(StaticMonsters::default()))
    }

    /// A registry checking slay and brand targets against `monsters`.
    pub fn with_monsters(monsters: Box<dyn MonsterVocabulary>) -> Self {
        Self {
            monsters,
            bases: TableSlot::default(),
            slays: TableSlot::default(),
            brands: TableSlot::default(),
            curses: TableSlot::default(),
            activations: TableSlot::default(),
            kinds: TableSlot::default(),
            egos: TableSlot::default(),
            artifacts: TableSlot::default(),
            singletons: Singletons::default(),
            released: false,
        }
    }

    pub fn state(&self, table: TableKind) -> TableState {
        match table {
            TableKind::ObjectBase => self.bases.state,
            TableKind::Slay => self.slays.state,
            TableKind::Brand => self.brands.state,
            TableKind::Curse => self.curses.state,
            TableKind::Activation => self.activations.state,
            TableKind::Object => self.kinds.state,
            TableKind::EgoItem => self.egos.state,
            TableKind::Artifact => self.artifacts.state,
        }
    }

    fn set_state(&mut self, table: TableKind, state: TableState) {
        let slot = match table {
            TableKind::ObjectBase => &mut self.bases.state,
            TableKind::Slay => &mut self.slays.state,
            TableKind::Brand => &mut self.brands.state,
            TableKind::Curse => &mut self.curses.state,
            TableKind::Activation => &mut self.activations.state,
            TableKind::Object => &mut self.kinds.state,
            TableKind::EgoItem => &mut self.egos.state,
            TableKind::Artifact => &mut self.artifacts.state,
        };
        *slot = state;
    }

    /// Checks that `table` may be loaded now.
    fn check_loadable(&self, table: TableKind) -> LifecycleResult<()> {
        if self.released {
            return Err(LifecycleError::Released);
        }
        let state = self.state(table);
        if state != TableState::Uninitialized {
            return Err(LifecycleError::AlreadyLoaded { table, state });
        }
        for &dependency in table.dependencies() {
            if self.state(dependency) != TableState::Ready {
                return Err(LifecycleError::DependencyNotReady { table, dependency });
            }
        }
        Ok(())
    }

    /// Views of every table that is ready. Tables that are not ready are
    /// empty.
    fn refs(&self) -> CrossRefs<'_> {
        fn ready<T>(slot: &TableSlot<Vec<T>>) -> &[T] {
            match slot.state {
                TableState::Ready => slot.table.as_slice(),
                _ => &[],
            }
        }

        CrossRefs {
            bases: ready(&self.bases),
            slays: ready(&self.slays),
            brands: ready(&self.brands),
            curses: ready(&self.curses),
            activations: ready(&self.activations),
            kinds: match self.kinds.state {
                TableState::Ready => self.kinds.table.as_slice(),
                _ => &[],
            },
            monsters: self.monsters.as_ref(),
        }
    }

    /// Compiles `text` as the data of `table`.
    ///
    /// Returns the number of records declared.
    pub fn load_str(&mut self, table: TableKind, text: &str) -> Result<usize, LoadError> {
        self.check_loadable(table)?;
        self.set_state(table, TableState::Loading);

        let result = self.compile(table, text);
        if result.is_err() {
            self.set_state(table, TableState::Uninitialized);
        }
        result
    }

    /// Reads `table` from `source` and compiles it.
    ///
    /// With `optional` set, a missing data file yields a table holding only
    /// its sentinel.
    pub fn load_table(
        &mut self,
        table: TableKind,
        source: &dyn DataSource,
        optional: bool,
    ) -> Result<usize, LoadError> {
        self.check_loadable(table)?;
        let text = match source.read(table) {
            Ok(text) => text,
            Err(SourceError::NotFound { path, .. }) if optional => {
                warn!(%table, path = %path, "data file not found, using an empty table");
                String::new()
            }
            Err(err) => return Err(err.into()),
        };
        self.load_str(table, &text)
    }

    /// Loads every table in dependency order.
    ///
    /// `optional` decides per table whether a missing data file is
    /// tolerated.
    pub fn load_all(
        &mut self,
        source: &dyn DataSource,
        optional: impl Fn(TableKind) -> bool,
    ) -> Result<(), LoadError> {
        for table in TableKind::ORDER {
            self.load_table(table, source, optional(table))?;
        }
        Ok(())
    }

    fn compile(&mut self, table: TableKind, text: &str) -> Result<usize, LoadError> {
        let refs = self.refs();
        let count = match table {
            TableKind::ObjectBase => {
                let mut session = TableSession::with_extra(refs, ObjectBase::default());
                run(table, object_base::parser(), &mut session, text)?;
                let count = session.builder.len();
                let finished = object_base::finish(session);
                self.bases.commit(finished);
                count
            }
            TableKind::Slay => {
                let mut session = TableSession::new(refs);
                run(table, slay::parser(), &mut session, text)?;
                let count = session.builder.len();
                let finished = slay::finish(session);
                self.slays.commit(finished);
                count
            }
            TableKind::Brand => {
                let mut session = TableSession::new(refs);
                run(table, brand::parser(), &mut session, text)?;
                let count = session.builder.len();
                let finished = brand::finish(session);
                self.brands.commit(finished);
                count
            }
            TableKind::Curse => {
                let mut session = TableSession::new(refs);
                run(table, curse::parser(), &mut session, text)?;
                let count = session.builder.len();
                let finished = curse::finish(session);
                self.curses.commit(finished);
                count
            }
            TableKind::Activation => {
                let mut session = TableSession::new(refs);
                run(table, activation::parser(), &mut session, text)?;
                let count = session.builder.len();
                let finished = activation::finish(session);
                self.activations.commit(finished);
                count
            }
            TableKind::Object => {
                let mut session = TableSession::new(refs);
                run(table, kind::parser(), &mut session, text)?;
                let count = session.builder.len();
                let finished = kind::finish(session);
                self.kinds.commit(finished);
                count
            }
            TableKind::EgoItem => {
                let mut session = TableSession::new(refs);
                run(table, ego::parser(), &mut session, text)?;
                let count = session.builder.len();
                let finished = ego::finish(session);
                self.egos.commit(finished);
                count
            }
            TableKind::Artifact => {
                // Kinds added for artifacts only become visible if the whole
                // file loads.
                let mut kinds = self.kinds.table.clone();
                let refs = CrossRefs { kinds: &[], ..refs };
                let mut session = TableSession::with_extra(refs, &mut kinds);
                run(table, artifact::parser(), &mut session, text)?;
                let count = session.builder.len();
                let artifacts = artifact::finish(session);

                let added = kinds.len() - self.kinds.table.len();
                self.kinds.table = kinds;
                self.artifacts.commit(artifacts);
                self.resolve_singletons();
                info!(added, "object kinds added for artifacts");
                count
            }
        };

        info!(%table, records = count, slots = self.slots(table), "table ready");
        Ok(count)
    }

    /// Number of slots in `table`, sentinel included.
    pub fn slots(&self, table: TableKind) -> usize {
        match table {
            TableKind::ObjectBase => self.bases.table.len(),
            TableKind::Slay => self.slays.table.len(),
            TableKind::Brand => self.brands.table.len(),
            TableKind::Curse => self.curses.table.len(),
            TableKind::Activation => self.activations.table.len(),
            TableKind::Object => self.kinds.table.len(),
            TableKind::EgoItem => self.egos.table.len(),
            TableKind::Artifact => self.artifacts.table.len(),
        }
    }

    /// Finds the singleton kinds and points every curse at the curse
    /// object.
    fn resolve_singletons(&mut self) {
        let kinds = self.kinds.table.as_slice();
        let find = |name: &str| {
            let found = kind::lookup_sval(kinds, TVal::None, name)
                .and_then(|sval| kind::lookup_kind(kinds, TVal::None, sval));
            if found.is_none() {
                warn!(name, "singleton object kind is missing");
            }
            found
        };

        self.singletons = Singletons {
            unknown_item: find("<unknown item>"),
            unknown_treasure: find("<unknown treasure>"),
            pile: find("<pile>"),
            curse_object: find("<curse object>"),
        };

        let kind = self.singletons.curse_object;
        let sval = kind
            .and_then(|kidx| self.kinds.table.get(kidx))
            .map_or(0, |curse_object| curse_object.sval);
        for curse in self.curses.table.iter_mut().skip(1) {
            curse.obj.kind = kind;
            curse.obj.sval = sval;
            curse.obj.known = Some(KnownObject { kind, sval });
        }
    }

    /// Drops every table. The registry cannot be used afterwards.
    pub fn release(&mut self) -> LifecycleResult<()> {
        if self.released {
            return Err(LifecycleError::Released);
        }
        self.bases.release();
        self.slays.release();
        self.brands.release();
        self.curses.release();
        self.activations.release();
        self.kinds.release();
        self.egos.release();
        self.artifacts.release();
        self.singletons = Singletons::default();
        self.released = true;
        info!("content tables released");
        Ok(())
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// The object-base table, indexed by tval.
    pub fn object_bases(&self) -> LifecycleResult<&[ObjectBase]> {
        self.bases.get(TableKind::ObjectBase).map(Vec::as_slice)
    }

    pub fn object_base(&self, tval: TVal) -> LifecycleResult<Option<&ObjectBase>> {
        Ok(kind::declared_base(self.object_bases()?, tval))
    }

    pub fn slays(&self) -> LifecycleResult<&[Slay]> {
        self.slays.get(TableKind::Slay).map(Vec::as_slice)
    }

    pub fn brands(&self) -> LifecycleResult<&[Brand]> {
        self.brands.get(TableKind::Brand).map(Vec::as_slice)
    }

    pub fn curses(&self) -> LifecycleResult<&[Curse]> {
        self.curses.get(TableKind::Curse).map(Vec::as_slice)
    }

    pub fn activations(&self) -> LifecycleResult<&[Activation]> {
        self.activations
            .get(TableKind::Activation)
            .map(Vec::as_slice)
    }

    pub fn kinds(&self) -> LifecycleResult<&SparseTable<ObjectKind>> {
        self.kinds.get(TableKind::Object)
    }

    pub fn egos(&self) -> LifecycleResult<&SparseTable<EgoItem>> {
        self.egos.get(TableKind::EgoItem)
    }

    pub fn artifacts(&self) -> LifecycleResult<&SparseTable<Artifact>> {
        self.artifacts.get(TableKind::Artifact)
    }

    /// The singleton kinds, resolved once artifacts are loaded.
    pub fn singletons(&self) -> LifecycleResult<Singletons> {
        self.artifacts.get(TableKind::Artifact)?;
        Ok(self.singletons)
    }

    /// Finds an activation by exact name.
    pub fn lookup_activation(&self, name: &str) -> LifecycleResult<Option<ActivationId>> {
        Ok(find_activation(self.activations()?, name))
    }

    pub fn lookup_kind(&self, tval: TVal, sval: u32) -> LifecycleResult<Option<KindId>> {
        Ok(kind::lookup_kind(self.kinds()?.as_slice(), tval, sval))
    }

    pub fn lookup_sval(&self, tval: TVal, name: &str) -> LifecycleResult<Option<u32>> {
        Ok(kind::lookup_sval(self.kinds()?.as_slice(), tval, name))
    }

    /// Number of sub-types declared for `tval`.
    pub fn num_svals(&self, tval: TVal) -> LifecycleResult<u32> {
        Ok(kind::num_svals(self.kinds()?.as_slice(), tval))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_state_display() {
        assert_eq!(TableState::Uninitialized.to_string(), "uninitialized");
        assert_eq!(TableState::Ready.to_string(), "ready");
    }

    #[test]
    fn test_lifecycle_order() {
        let mut registry = ContentRegistry::new();
        assert_eq!(
            registry.slays().unwrap_err(),
            LifecycleError::NotReady {
                table: TableKind::Slay,
                state: TableState::Uninitialized
            }
        );

        let err = registry.load_str(TableKind::Object, "").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Lifecycle(LifecycleError::DependencyNotReady {
                table: TableKind::Object,
                dependency: TableKind::ObjectBase
            })
        ));

        assert_eq!(registry.load_str(TableKind::Slay, "code EVIL_2").unwrap(), 1);
        assert_eq!(registry.slays().unwrap().len(), 2);
        assert!(matches!(
            registry.load_str(TableKind::Slay, "code EVIL_2"),
            Err(LoadError::Lifecycle(LifecycleError::AlreadyLoaded { .. }))
        ));
    }

    #[test]
    fn test_failed_load_commits_nothing() {
        let mut registry = ContentRegistry::new();
        let err = registry
            .load_str(TableKind::Brand, "code FIRE_3\nname fire\nglow bright")
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 3, .. }));
        assert_eq!(registry.state(TableKind::Brand), TableState::Uninitialized);

        registry.load_str(TableKind::Brand, "code COLD_3").unwrap();
        assert_eq!(registry.brands().unwrap()[1].code, "COLD_3");
    }

    #[test]
    fn test_release_is_terminal() {
        let mut registry = ContentRegistry::new();
        registry.load_str(TableKind::Activation, "name LIGHT").unwrap();
        assert_eq!(
            registry.lookup_activation("LIGHT").unwrap(),
            Some(ActivationId(1))
        );

        registry.release().unwrap();
        assert_eq!(registry.release(), Err(LifecycleError::Released));
        assert_eq!(registry.activations().unwrap_err(), LifecycleError::Released);
        assert_eq!(registry.state(TableKind::Activation), TableState::Released);
        assert!(matches!(
            registry.load_str(TableKind::Slay, ""),
            Err(LoadError::Lifecycle(LifecycleError::Released))
        ));
    }
}
