//! `brand.txt`.

use object_core::Brand;

use crate::builder::TableSession;
use crate::directive::{DirectiveParser, Fields};
use crate::error::{ParseError, ParseResult};
use crate::finalize::finalize_dense;

pub type BrandSession<'a> = TableSession<'a, Brand>;

fn parse_code(session: &mut BrandSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    session.builder.begin(Brand {
        code: fields.str("code")?.to_owned(),
        ..Brand::default()
    });
    Ok(())
}

fn parse_name(session: &mut BrandSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let name = fields.str("name")?;
    session.record_mut()?.name = name.to_owned();
    Ok(())
}

fn parse_verb(session: &mut BrandSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let verb = fields.str("verb")?;
    session.record_mut()?.verb = verb.to_owned();
    Ok(())
}

fn parse_multiplier(session: &mut BrandSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let multiplier = fields.uint("multiplier")?;
    session.record_mut()?.multiplier = multiplier;
    Ok(())
}

fn parse_power(session: &mut BrandSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let power = fields.uint("power")?;
    session.record_mut()?.power = power;
    Ok(())
}

/// Monsters with this race flag take no extra damage.
fn parse_resist_flag(session: &mut BrandSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let flag = fields.sym("flag")?;
    let (brand, refs) = session.record_and_refs()?;
    if !refs.monsters.is_race_flag(flag) {
        return Err(ParseError::InvalidFlag(flag.to_owned()));
    }
    brand.resist_flag = Some(flag.to_owned());
    Ok(())
}

/// Registers the directives of `brand.txt`.
pub fn parser<'a>() -> ParseResult<DirectiveParser<BrandSession<'a>>> {
    let mut parser = DirectiveParser::new();
    parser.register_all(&[
        ("code str code", parse_code),
        ("name str name", parse_name),
        ("verb str verb", parse_verb),
        ("multiplier uint multiplier", parse_multiplier),
        ("power uint power", parse_power),
        ("resist-flag sym flag", parse_resist_flag),
    ])?;
    Ok(parser)
}

/// The brand table, with the sentinel at index 0.
pub fn finish(session: BrandSession<'_>) -> Vec<Brand> {
    finalize_dense(session.into_records())
}
