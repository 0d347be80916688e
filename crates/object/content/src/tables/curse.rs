//! `curse.txt`.
//!
//! A curse describes a pseudo-object whose properties are added to the item
//! it is attached to. The pseudo-object's kind is only known once the kind
//! table is ready and is filled in by the registry afterwards.

use object_core::{Curse, TVal};

use crate::builder::TableSession;
use crate::directive::{DirectiveParser, Fields};
use crate::effects::register_effects;
use crate::error::{ParseError, ParseResult};
use crate::finalize::finalize_dense;
use crate::resolve::{FlagFields, ValueFields};

use super::append_text;

pub type CurseSession<'a> = TableSession<'a, Curse>;

fn parse_name(session: &mut CurseSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    session.builder.begin(Curse {
        name: fields.str("name")?.to_owned(),
        ..Curse::default()
    });
    Ok(())
}

fn parse_type(session: &mut CurseSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let name = fields.sym("tval")?;
    let curse = session.record_mut()?;
    let tval = TVal::find(name).ok_or_else(|| ParseError::UnrecognisedTval(name.to_owned()))?;
    curse.possible.insert(tval);
    Ok(())
}

fn parse_combat(session: &mut CurseSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let obj = &mut session.record_mut()?.obj;
    obj.to_h = fields.int("to-h")?;
    obj.to_d = fields.int("to-d")?;
    obj.to_a = fields.int("to-a")?;
    Ok(())
}

fn parse_msg(session: &mut CurseSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let text = fields.str("text")?;
    append_text(&mut session.record_mut()?.obj.effect_msg, text);
    Ok(())
}

fn parse_time(session: &mut CurseSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let time = fields.rand("time")?;
    session.record_mut()?.obj.time = time;
    Ok(())
}

fn parse_flags(session: &mut CurseSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let text = fields.str("flags")?;
    let obj = &mut session.record_mut()?.obj;
    FlagFields::with_elements(&mut obj.flags, &mut obj.elements).parse(text)?;
    Ok(())
}

fn parse_values(session: &mut CurseSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let text = fields.str("values")?;
    let obj = &mut session.record_mut()?.obj;
    ValueFields::with_resists(&mut obj.modifiers, &mut obj.elements).parse(text)?;
    Ok(())
}

fn parse_desc(session: &mut CurseSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let text = fields.str("desc")?;
    append_text(&mut session.record_mut()?.desc, text);
    Ok(())
}

/// Registers the directives of `curse.txt`.
pub fn parser<'a>() -> ParseResult<DirectiveParser<CurseSession<'a>>> {
    let mut parser = DirectiveParser::new();
    parser.register_all(&[
        ("name str name", parse_name),
        ("type sym tval", parse_type),
        ("combat int to-h int to-d int to-a", parse_combat),
        ("msg str text", parse_msg),
        ("time rand time", parse_time),
        ("flags str flags", parse_flags),
        ("values str values", parse_values),
        ("desc str desc", parse_desc),
    ])?;
    register_effects(&mut parser)?;
    Ok(parser)
}

/// The curse table, with the sentinel at index 0.
pub fn finish(session: CurseSession<'_>) -> Vec<Curse> {
    finalize_dense(session.into_records())
}
