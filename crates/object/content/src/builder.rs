//! Record accumulation while a data file is parsed.
//!
//! Records are kept in declaration order. The record opened by the most
//! recent header directive is the active one; field directives only ever
//! touch the active record.

use crate::error::{ParseError, ParseResult};
use crate::xref::CrossRefs;

/// Declaration-ordered records of one table.
#[derive(Clone, Debug)]
pub struct RecordBuilder<R> {
    records: Vec<R>,
}

impl<R> Default for RecordBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RecordBuilder<R> {
    /// Creates a builder with no records.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Opens a new record and makes it the active one.
    pub fn begin(&mut self, record: R) -> &mut R {
        self.records.push(record);
        let last = self.records.len() - 1;
        &mut self.records[last]
    }

    /// The active record.
    pub fn current(&self) -> Option<&R> {
        self.records.last()
    }

    /// The active record, or [`ParseError::MissingRecordHeader`].
    pub fn current_mut(&mut self) -> ParseResult<&mut R> {
        self.records
            .last_mut()
            .ok_or(ParseError::MissingRecordHeader)
    }

    /// Returns the number of records begun so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no record has been begun.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in declaration order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Consumes the builder, returning its records in declaration order.
    pub fn into_records(self) -> Vec<R> {
        self.records
    }
}

/// Parse state of one table load.
///
/// `extra` carries table-specific state: accumulated defaults for object
/// bases, the growable kind table for artifacts.
pub struct TableSession<'a, R, X = ()> {
    pub builder: RecordBuilder<R>,
    pub refs: CrossRefs<'a>,
    pub extra: X,
}

impl<'a, R> TableSession<'a, R> {
    /// A session without table-specific state.
    pub fn new(refs: CrossRefs<'a>) -> Self {
        Self::with_extra(refs, ())
    }
}

impl<'a, R, X> TableSession<'a, R, X> {
    /// A session carrying `extra` alongside the builder.
    pub fn with_extra(refs: CrossRefs<'a>, extra: X) -> Self {
        Self {
            builder: RecordBuilder::new(),
            refs,
            extra,
        }
    }

    /// The active record.
    pub fn record_mut(&mut self) -> ParseResult<&mut R> {
        self.builder.current_mut()
    }

    /// The active record together with the cross-reference tables.
    pub fn record_and_refs(&mut self) -> ParseResult<(&mut R, &CrossRefs<'a>)> {
        let record = self.builder.current_mut()?;
        Ok((record, &self.refs))
    }

    /// The active record together with the table-specific state.
    pub fn record_and_extra(&mut self) -> ParseResult<(&mut R, &CrossRefs<'a>, &mut X)> {
        let record = self.builder.current_mut()?;
        Ok((record, &self.refs, &mut self.extra))
    }

    /// Consumes the session, returning its records in declaration order.
    pub fn into_records(self) -> Vec<R> {
        self.builder.into_records()
    }
}
