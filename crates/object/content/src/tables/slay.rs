//! `slay.txt`.

use object_core::Slay;

use crate::builder::TableSession;
use crate::directive::{DirectiveParser, Fields};
use crate::error::{ParseError, ParseResult};
use crate::finalize::finalize_dense;

pub type SlaySession<'a> = TableSession<'a, Slay>;

fn parse_code(session: &mut SlaySession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    session.builder.begin(Slay {
        code: fields.str("code")?.to_owned(),
        ..Slay::default()
    });
    Ok(())
}

fn parse_name(session: &mut SlaySession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let name = fields.str("name")?;
    session.record_mut()?.name = name.to_owned();
    Ok(())
}

fn parse_race_flag(session: &mut SlaySession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let flag = fields.sym("flag")?;
    let (slay, refs) = session.record_and_refs()?;
    if !refs.monsters.is_race_flag(flag) {
        return Err(ParseError::InvalidFlag(flag.to_owned()));
    }
    if slay.base.is_some() {
        return Err(ParseError::InvalidSlay);
    }
    slay.race_flag = Some(flag.to_owned());
    Ok(())
}

fn parse_base(session: &mut SlaySession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let base = fields.sym("base")?;
    let (slay, refs) = session.record_and_refs()?;
    if !refs.monsters.is_monster_base(base) {
        return Err(ParseError::InvalidMonsterBase(base.to_owned()));
    }
    if slay.race_flag.is_some() {
        return Err(ParseError::InvalidSlay);
    }
    slay.base = Some(base.to_owned());
    Ok(())
}

fn parse_multiplier(session: &mut SlaySession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let multiplier = fields.uint("multiplier")?;
    session.record_mut()?.multiplier = multiplier;
    Ok(())
}

fn parse_power(session: &mut SlaySession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let power = fields.uint("power")?;
    session.record_mut()?.power = power;
    Ok(())
}

fn parse_melee_verb(session: &mut SlaySession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let verb = fields.str("verb")?;
    session.record_mut()?.melee_verb = verb.to_owned();
    Ok(())
}

fn parse_range_verb(session: &mut SlaySession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let verb = fields.str("verb")?;
    session.record_mut()?.range_verb = verb.to_owned();
    Ok(())
}

/// Registers the directives of `slay.txt`.
pub fn parser<'a>() -> ParseResult<DirectiveParser<SlaySession<'a>>> {
    let mut parser = DirectiveParser::new();
    parser.register_all(&[
        ("code str code", parse_code),
        ("name str name", parse_name),
        ("race-flag sym flag", parse_race_flag),
        ("base sym base", parse_base),
        ("multiplier uint multiplier", parse_multiplier),
        ("power uint power", parse_power),
        ("melee-verb str verb", parse_melee_verb),
        ("range-verb str verb", parse_range_verb),
    ])?;
    Ok(parser)
}

/// The slay table, with the sentinel at index 0.
pub fn finish(session: SlaySession<'_>) -> Vec<Slay> {
    finalize_dense(session.into_records())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::LineError;
    use crate::xref::CrossRefs;

    fn compile(text: &str) -> Result<Vec<Slay>, LineError> {
        let mut session = SlaySession::new(CrossRefs::empty());
        parser().unwrap().parse_str(&mut session, text)?;
        Ok(finish(session))
    }

    #[test]
    fn test_slays() {
        let text = "\
code EVIL_2
name evil creatures
race-flag EVIL
multiplier 2
power 200
melee-verb smite
range-verb pierces

code DRAGON_3
base dragon
multiplier 3
";
        let slays = compile(text).unwrap();
        assert_eq!(slays.len(), 3);
        assert_eq!(slays[0], Slay::default());
        assert_eq!(slays[1].code, "EVIL_2");
        assert_eq!(slays[1].race_flag.as_deref(), Some("EVIL"));
        assert_eq!(slays[1].melee_verb, "smite");
        assert_eq!(slays[1].power, 200);
        assert_eq!(slays[2].base.as_deref(), Some("dragon"));
        assert_eq!(slays[2].multiplier, 3);
    }

    #[test]
    fn test_slay_targets() {
        let err = compile("code X\nrace-flag SHINY").unwrap_err();
        assert_eq!(err.error, ParseError::InvalidFlag("SHINY".into()));

        let err = compile("code X\nbase teapot").unwrap_err();
        assert_eq!(err.error, ParseError::InvalidMonsterBase("teapot".into()));

        let err = compile("code X\nrace-flag ORC\nbase orc").unwrap_err();
        assert_eq!((err.line, err.error), (3, ParseError::InvalidSlay));

        let err = compile("code X\nbase orc\nrace-flag ORC").unwrap_err();
        assert_eq!(err.error, ParseError::InvalidSlay);

        let err = compile("name orphan").unwrap_err();
        assert_eq!(err.error, ParseError::MissingRecordHeader);
    }
}
