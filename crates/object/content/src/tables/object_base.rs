//! `object_base.txt`: per-tval defaults.
//!
//! ```text
//! default break-chance 10
//!
//! name sword Sword~
//! graphics white
//! flags SHOW_DICE | HATES_ACID
//! ```
//!
//! `default` lines accumulate and are copied into every base declared after
//! them.

use object_core::{Color, ObjectBase, TVal};

use crate::builder::TableSession;
use crate::directive::{DirectiveParser, Fields};
use crate::error::{ParseError, ParseResult};
use crate::finalize::finalize_bases;
use crate::resolve::FlagFields;

/// Parse state: the bases so far plus the accumulated defaults.
pub type BaseSession<'a> = TableSession<'a, ObjectBase, ObjectBase>;

fn parse_default(session: &mut BaseSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let label = fields.sym("label")?;
    let value = fields.int("value")?;
    match label {
        "break-chance" => session.extra.break_perc = value,
        _ => return Err(ParseError::UndefinedDirective(label.to_owned())),
    }
    Ok(())
}

fn parse_name(session: &mut BaseSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let tval_name = fields.sym("tval")?;
    let tval = TVal::find(tval_name)
        .ok_or_else(|| ParseError::UnrecognisedTval(tval_name.to_owned()))?;

    let mut base = session.extra.clone();
    base.tval = tval;
    base.name = fields.opt_str("name")?.map(str::to_owned);
    session.builder.begin(base);
    Ok(())
}

fn parse_graphics(session: &mut BaseSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let symbol = fields.sym("color")?;
    let base = session.record_mut()?;
    base.attr =
        Color::lookup(symbol).ok_or_else(|| ParseError::UnrecognisedColor(symbol.to_owned()))?;
    Ok(())
}

fn parse_break(session: &mut BaseSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let breakage = fields.int("breakage")?;
    session.record_mut()?.break_perc = breakage;
    Ok(())
}

fn parse_flags(session: &mut BaseSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let text = fields.str("flags")?;
    let base = session.record_mut()?;
    FlagFields::all(&mut base.flags, &mut base.kind_flags, &mut base.elements).parse(text)?;
    Ok(())
}

/// Registers the directives of `object_base.txt`.
pub fn parser<'a>() -> ParseResult<DirectiveParser<BaseSession<'a>>> {
    let mut parser = DirectiveParser::new();
    parser.register_all(&[
        ("default sym label int value", parse_default),
        ("name sym tval ?str name", parse_name),
        ("graphics sym color", parse_graphics),
        ("break int breakage", parse_break),
        ("flags str flags", parse_flags),
    ])?;
    Ok(parser)
}

/// The tval-keyed base table.
pub fn finish(session: BaseSession<'_>) -> Vec<ObjectBase> {
    finalize_bases(session.into_records())
}

#[cfg(test)]
mod tests {
    use object_core::{Element, ElementFlags, KindFlags, ObjectFlags};

    use super::*;
    use crate::directive::LineError;
    use crate::xref::CrossRefs;

    fn compile(text: &str) -> Result<Vec<ObjectBase>, LineError> {
        let mut session = BaseSession::with_extra(CrossRefs::empty(), ObjectBase::default());
        parser().unwrap().parse_str(&mut session, text)?;
        Ok(finish(session))
    }

    #[test]
    fn test_defaults_apply_to_later_bases() {
        let text = "\
name chest Chest~
default break-chance 10
name sword Sword~
graphics w
name shot Shot~
break 40
flags SHOW_DICE | HATES_ACID THROWING
";
        let bases = compile(text).unwrap();
        assert_eq!(bases.len(), TVal::COUNT);

        let chest = &bases[TVal::Chest.as_index()];
        assert_eq!(chest.break_perc, 0);

        let sword = &bases[TVal::Sword.as_index()];
        assert_eq!(sword.name.as_deref(), Some("Sword~"));
        assert_eq!(sword.break_perc, 10);
        assert_eq!(sword.attr, Color::White);

        let shot = &bases[TVal::Shot.as_index()];
        assert_eq!(shot.break_perc, 40);
        assert!(shot.kind_flags.contains(KindFlags::SHOW_DICE));
        assert!(shot.flags.contains(ObjectFlags::THROWING));
        assert!(shot.elements.has(Element::Acid, ElementFlags::HATES));
    }

    #[test]
    fn test_base_errors() {
        let err = compile("default weight 3").unwrap_err();
        assert_eq!(err.error, ParseError::UndefinedDirective("weight".into()));

        let err = compile("name spaceship Ship").unwrap_err();
        assert_eq!(err.error, ParseError::UnrecognisedTval("spaceship".into()));

        let err = compile("break 10").unwrap_err();
        assert_eq!(err.error, ParseError::MissingRecordHeader);

        let err = compile("name ring Ring~\ngraphics mauve").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.error, ParseError::UnrecognisedColor("mauve".into()));
    }
}
