//! `activation.txt`.

use object_core::{Activation, ActivationId, TableId};

use crate::builder::TableSession;
use crate::directive::{DirectiveParser, Fields};
use crate::effects::register_effects;
use crate::error::ParseResult;
use crate::finalize::finalize_dense;

use super::append_text;

pub type ActivationSession<'a> = TableSession<'a, Activation>;

fn parse_name(session: &mut ActivationSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    session.builder.begin(Activation {
        name: fields.str("name")?.to_owned(),
        ..Activation::default()
    });
    Ok(())
}

fn parse_aim(session: &mut ActivationSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let aim = fields.uint("aim")?;
    session.record_mut()?.aim = aim != 0;
    Ok(())
}

fn parse_power(session: &mut ActivationSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let power = fields.uint("power")?;
    session.record_mut()?.power = power;
    Ok(())
}

fn parse_msg(session: &mut ActivationSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let text = fields.str("msg")?;
    append_text(&mut session.record_mut()?.message, text);
    Ok(())
}

fn parse_desc(session: &mut ActivationSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let text = fields.str("desc")?;
    append_text(&mut session.record_mut()?.desc, text);
    Ok(())
}

/// Registers the directives of `activation.txt`.
pub fn parser<'a>() -> ParseResult<DirectiveParser<ActivationSession<'a>>> {
    let mut parser = DirectiveParser::new();
    parser.register_all(&[
        ("name str name", parse_name),
        ("aim uint aim", parse_aim),
        ("power uint power", parse_power),
        ("msg str msg", parse_msg),
        ("desc str desc", parse_desc),
    ])?;
    register_effects(&mut parser)?;
    Ok(parser)
}

/// The activation table, with the sentinel at index 0. Every activation
/// learns its own index.
pub fn finish(session: ActivationSession<'_>) -> Vec<Activation> {
    let mut table = finalize_dense(session.into_records());
    for (index, activation) in table.iter_mut().enumerate() {
        activation.index = ActivationId::from_index(index);
    }
    table
}
