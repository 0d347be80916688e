//! Turning builder records into permanent tables.
//!
//! Dense tables are numbered by the engine: slot 0 is a default sentinel and
//! records follow at 1..=N in declaration order. Sparse tables are numbered
//! by the data file: each record sits at its own index, unused slots keep
//! the default record, and `next` links walk the records in declaration
//! order.

use object_core::{
    Artifact, ArtifactId, EgoId, EgoItem, KindId, ObjectBase, ObjectKind, TVal, TableId,
};
use tracing::warn;

/// Largest index a sparse-table record may claim.
pub const MAX_RECORD_INDEX: usize = u16::MAX as usize;

/// Builds a dense table: a default sentinel followed by `records`.
pub fn finalize_dense<R: Default>(records: Vec<R>) -> Vec<R> {
    let mut table = Vec::with_capacity(records.len() + 1);
    table.push(R::default());
    table.extend(records);
    table
}

/// Builds the tval-keyed object-base table.
///
/// The first declaration of a tval keeps its slot; later ones are dropped.
pub fn finalize_bases(records: Vec<ObjectBase>) -> Vec<ObjectBase> {
    let mut table = vec![ObjectBase::default(); TVal::COUNT];
    let mut taken = vec![false; TVal::COUNT];
    for base in records {
        let slot = base.tval.as_index();
        if taken[slot] {
            warn!(tval = %base.tval, "duplicate object base ignored");
            continue;
        }
        taken[slot] = true;
        table[slot] = base;
    }
    table
}

/// Records of a sparse table, numbered by the data file and chained in
/// declaration order.
pub trait Linked: Default {
    type Id: TableId;

    fn id(&self) -> Self::Id;
    fn next(&self) -> Option<Self::Id>;
    fn set_next(&mut self, next: Option<Self::Id>);
}

macro_rules! impl_linked {
    ($record:ty, $id:ty, $field:ident) => {
        impl Linked for $record {
            type Id = $id;

            fn id(&self) -> $id {
                self.$field
            }

            fn next(&self) -> Option<$id> {
                self.next
            }

            fn set_next(&mut self, next: Option<$id>) {
                self.next = next;
            }
        }
    };
}

impl_linked!(ObjectKind, KindId, kidx);
impl_linked!(EgoItem, EgoId, eidx);
impl_linked!(Artifact, ArtifactId, aidx);

/// A finalized sparse table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseTable<R: Linked> {
    entries: Vec<R>,
    head: Option<R::Id>,
    tail: Option<R::Id>,
}

impl<R: Linked> Default for SparseTable<R> {
    fn default() -> Self {
        Self {
            entries: vec![R::default()],
            head: None,
            tail: None,
        }
    }
}

impl<R: Linked> SparseTable<R> {
    /// Places every record at its own index.
    ///
    /// The table is sized `max(index) + 1` (at least one slot). When two
    /// records share an index the first declaration keeps the slot and the
    /// later one is dropped, chain position included.
    pub fn from_records(records: Vec<R>) -> Self {
        let len = records
            .iter()
            .map(|record| record.id().index() + 1)
            .max()
            .unwrap_or(1);

        let mut entries: Vec<R> = (0..len).map(|_| R::default()).collect();
        let mut taken = vec![false; len];
        let mut order: Vec<R::Id> = Vec::with_capacity(records.len());
        for record in records {
            let id = record.id();
            if taken[id.index()] {
                warn!(index = id.index(), "duplicate record index ignored");
                continue;
            }
            taken[id.index()] = true;
            order.push(id);
            entries[id.index()] = record;
        }

        for pair in order.windows(2) {
            entries[pair[0].index()].set_next(Some(pair[1]));
        }
        if let Some(&last) = order.last() {
            entries[last.index()].set_next(None);
        }

        Self {
            entries,
            head: order.first().copied(),
            tail: order.last().copied(),
        }
    }

    /// Every slot, sentinel and unused ones included.
    pub fn as_slice(&self) -> &[R] {
        &self.entries
    }

    /// Returns the record in slot `id`, if the table has that many slots.
    pub fn get(&self, id: R::Id) -> Option<&R> {
        self.entries.get(id.index())
    }

    /// Mutable access to the record in slot `id`.
    pub fn get_mut(&mut self, id: R::Id) -> Option<&mut R> {
        self.entries.get_mut(id.index())
    }

    /// Number of slots, including unused ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first declared record.
    pub fn head(&self) -> Option<R::Id> {
        self.head
    }

    /// Walks the records in declaration order.
    pub fn iter_declared(&self) -> impl Iterator<Item = &R> {
        let mut cursor = self.head;
        core::iter::from_fn(move || {
            let record = self.get(cursor?)?;
            cursor = record.next();
            Some(record)
        })
    }

    /// Appends `record` at the end of the table and the chain.
    ///
    /// The record's id must equal the current length.
    pub fn append(&mut self, mut record: R) -> R::Id {
        let id = R::Id::from_index(self.entries.len());
        debug_assert_eq!(record.id(), id);
        record.set_next(None);
        self.entries.push(record);

        match self.tail {
            Some(tail) => self.entries[tail.index()].set_next(Some(id)),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Consumes the table, returning every slot.
    pub fn into_entries(self) -> Vec<R> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(index: u32, name: &str) -> ObjectKind {
        ObjectKind::new(KindId(index), name)
    }

    fn declared_names(table: &SparseTable<ObjectKind>) -> Vec<&str> {
        table.iter_declared().map(|k| k.name.as_str()).collect()
    }

    #[test]
    fn test_dense_has_sentinel() {
        let table = finalize_dense(vec![1u32, 2, 3]);
        assert_eq!(table, vec![0, 1, 2, 3]);
        assert_eq!(finalize_dense(Vec::<u32>::new()), vec![0]);
    }

    #[test]
    fn test_bases_keyed_by_tval() {
        let mut sword = ObjectBase::new(TVal::Sword);
        sword.name = Some("Sword".into());
        let mut sword_again = ObjectBase::new(TVal::Sword);
        sword_again.name = Some("Blade".into());

        let table = finalize_bases(vec![sword, ObjectBase::new(TVal::Ring), sword_again]);
        assert_eq!(table.len(), TVal::COUNT);
        assert_eq!(table[TVal::Sword.as_index()].name.as_deref(), Some("Sword"));
        assert_eq!(table[TVal::Ring.as_index()].tval, TVal::Ring);
        assert!(!table[TVal::Bow.as_index()].is_declared());
    }

    #[test]
    fn test_sparse_declaration_order() {
        let table = SparseTable::from_records(vec![kind(5, "e"), kind(2, "b"), kind(9, "i")]);
        assert_eq!(table.len(), 10);
        assert_eq!(table.head(), Some(KindId(5)));
        assert_eq!(declared_names(&table), vec!["e", "b", "i"]);
        assert_eq!(table.get(KindId(2)).unwrap().next, Some(KindId(9)));
        assert_eq!(table.get(KindId(9)).unwrap().next, None);
        assert_eq!(table.get(KindId(3)).unwrap(), &ObjectKind::default());
    }

    #[test]
    fn test_sparse_duplicate_index_first_wins() {
        let table =
            SparseTable::from_records(vec![kind(1, "first"), kind(2, "b"), kind(1, "second")]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(KindId(1)).unwrap().name, "first");
        assert_eq!(declared_names(&table), vec!["first", "b"]);
        assert_eq!(table.get(KindId(2)).unwrap().next, None);
    }

    #[test]
    fn test_sparse_empty_and_append() {
        let mut table = SparseTable::<ObjectKind>::from_records(Vec::new());
        assert_eq!(table.len(), 1);
        assert_eq!(table.iter_declared().count(), 0);

        let id = table.append(kind(1, "dummy"));
        assert_eq!(id, KindId(1));
        assert_eq!(declared_names(&table), vec!["dummy"]);

        let mut table = SparseTable::from_records(vec![kind(3, "c"), kind(1, "a")]);
        table.append(kind(4, "d"));
        assert_eq!(declared_names(&table), vec!["c", "a", "d"]);
    }
}
