//! `ego_item.txt`.
//!
//! Egos name the kinds they apply to either by whole tval (`type`) or one
//! kind at a time (`item`). Both look the kinds up in the finalized kind
//! table.

use object_core::{EgoId, EgoItem, TVal};

use crate::builder::TableSession;
use crate::directive::{DirectiveParser, Fields};
use crate::effects::register_effects;
use crate::error::{ParseError, ParseResult};
use crate::finalize::SparseTable;
use crate::resolve::{FlagFields, ValueFields};
use crate::xref::register_cross_references;

use super::append_text;
use super::kind::{allocation, lookup_kind, lookup_sval, record_index};

pub type EgoSession<'a> = TableSession<'a, EgoItem>;

fn find_tval(fields: &Fields<'_>) -> ParseResult<TVal> {
    let name = fields.sym("tval")?;
    TVal::find(name).ok_or_else(|| ParseError::UnrecognisedTval(name.to_owned()))
}

fn parse_name(session: &mut EgoSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let eidx: EgoId = record_index(fields)?;
    let name = fields.str("name")?;
    session.builder.begin(EgoItem::new(eidx, name));
    Ok(())
}

fn parse_info(session: &mut EgoSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let ego = session.record_mut()?;
    ego.cost = fields.int("cost")?;
    ego.rating = fields.int("rating")?;
    Ok(())
}

fn parse_alloc(session: &mut EgoSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let alloc = allocation(fields)?;
    session.record_mut()?.alloc = alloc;
    Ok(())
}

/// Adds every kind of the given tval.
fn parse_type(session: &mut EgoSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let tval = find_tval(fields)?;
    let (ego, refs) = session.record_and_refs()?;

    let mut found = false;
    for kind in refs.kinds {
        if kind.tval == tval && !kind.name.is_empty() {
            ego.add_possible(kind.kidx);
            found = true;
        }
    }
    if !found {
        return Err(ParseError::NoKindForEgoType(tval));
    }
    Ok(())
}

/// Adds a single kind by tval and sval name.
fn parse_item(session: &mut EgoSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let tval = find_tval(fields)?;
    let sval_name = fields.sym("sval")?;
    let (ego, refs) = session.record_and_refs()?;

    let sval = lookup_sval(refs.kinds, tval, sval_name)
        .ok_or_else(|| ParseError::UnrecognisedSval(sval_name.to_owned()))?;
    let kind =
        lookup_kind(refs.kinds, tval, sval).ok_or(ParseError::InvalidItemNumber { tval, sval })?;
    ego.add_possible(kind);
    Ok(())
}

fn parse_combat(session: &mut EgoSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let ego = session.record_mut()?;
    ego.to_h = fields.rand("th")?;
    ego.to_d = fields.rand("td")?;
    ego.to_a = fields.rand("ta")?;
    Ok(())
}

fn parse_min_combat(session: &mut EgoSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let ego = session.record_mut()?;
    ego.min_to_h = fields.int("th")?;
    ego.min_to_d = fields.int("td")?;
    ego.min_to_a = fields.int("ta")?;
    Ok(())
}

fn parse_time(session: &mut EgoSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let time = fields.rand("time")?;
    session.record_mut()?.time = time;
    Ok(())
}

fn parse_flags(session: &mut EgoSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let text = fields.opt_str("flags")?;
    let ego = session.record_mut()?;
    if let Some(text) = text {
        FlagFields::all(&mut ego.flags, &mut ego.kind_flags, &mut ego.elements).parse(text)?;
    }
    Ok(())
}

fn parse_flags_off(session: &mut EgoSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let text = fields.opt_str("flags")?;
    let ego = session.record_mut()?;
    if let Some(text) = text {
        FlagFields::object(&mut ego.flags_off).parse(text)?;
    }
    Ok(())
}

fn parse_values(session: &mut EgoSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let text = fields.str("values")?;
    let ego = session.record_mut()?;
    ValueFields::with_resists(&mut ego.modifiers, &mut ego.elements).parse(text)?;
    Ok(())
}

fn parse_min_values(session: &mut EgoSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let text = fields.str("min_values")?;
    let ego = session.record_mut()?;
    ValueFields::modifiers(&mut ego.min_modifiers).parse(text)?;
    Ok(())
}

fn parse_desc(session: &mut EgoSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let text = fields.str("text")?;
    append_text(&mut session.record_mut()?.text, text);
    Ok(())
}

/// Registers the directives of `ego_item.txt`.
pub fn parser<'a>() -> ParseResult<DirectiveParser<EgoSession<'a>>> {
    let mut parser = DirectiveParser::new();
    parser.register_all(&[
        ("name int index str name", parse_name),
        ("info int cost int rating", parse_info),
        ("alloc int common str minmax", parse_alloc),
        ("type sym tval", parse_type),
        ("item sym tval sym sval", parse_item),
        ("combat rand th rand td rand ta", parse_combat),
        ("min-combat int th int td int ta", parse_min_combat),
        ("time rand time", parse_time),
        ("flags ?str flags", parse_flags),
        ("flags-off ?str flags", parse_flags_off),
        ("values str values", parse_values),
        ("min-values str min_values", parse_min_values),
        ("desc str text", parse_desc),
    ])?;
    register_effects(&mut parser)?;
    register_cross_references(&mut parser)?;
    Ok(parser)
}

/// The ego table, numbered by the data file.
pub fn finish(session: EgoSession<'_>) -> SparseTable<EgoItem> {
    SparseTable::from_records(session.into_records())
}
