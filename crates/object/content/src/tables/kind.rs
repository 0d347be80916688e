//! `object.txt`: object kinds.
//!
//! ```text
//! name 32 & Dagger~
//! graphics | w
//! type sword
//! properties 0 12 10
//! alloc 40 0 to 40
//! combat 0 1d4 0 0 0
//! ```
//!
//! Kinds are numbered by the data file. The sub-type number (sval) is
//! assigned in declaration order within each tval, starting at 1.

use object_core::{
    Allocation, Color, KindId, ObjectBase, ObjectKind, TVal, TableId, strip_name_markers,
};

use crate::builder::TableSession;
use crate::directive::{DirectiveParser, Fields};
use crate::effects::register_effects;
use crate::error::{ParseError, ParseResult};
use crate::finalize::{MAX_RECORD_INDEX, SparseTable};
use crate::resolve::{FlagFields, ValueFields, parse_range};
use crate::xref::register_cross_references;

use super::append_text;

pub type KindSession<'a> = TableSession<'a, ObjectKind>;

/// Reads a record index.
///
/// Slot 0 is the sentinel, so indices start at 1. Indices above
/// [`MAX_RECORD_INDEX`] would need an unreasonably large table.
pub(crate) fn record_index<I: TableId>(fields: &Fields<'_>) -> ParseResult<I> {
    let index = fields.int("index")?;
    let index = usize::try_from(index)
        .ok()
        .filter(|&index| index > 0)
        .ok_or_else(|| ParseError::InvalidField {
            field: "index".into(),
            value: index.to_string(),
        })?;
    if index > MAX_RECORD_INDEX {
        return Err(ParseError::AllocationFailure(index));
    }
    Ok(I::from_index(index))
}

/// Reads an allocation line: `alloc <prob> <min> to <max>`.
pub(crate) fn allocation(fields: &Fields<'_>) -> ParseResult<Allocation> {
    let prob = fields.int("common")?;
    let (min, max) = parse_range(fields.str("minmax")?)?;
    Ok(Allocation { prob, min, max })
}

/// Resolves a `graphics` line.
pub(crate) fn graphics(fields: &Fields<'_>) -> ParseResult<(char, Color)> {
    let glyph = fields.char("glyph")?;
    let symbol = fields.sym("color")?;
    let color =
        Color::lookup(symbol).ok_or_else(|| ParseError::UnrecognisedColor(symbol.to_owned()))?;
    Ok((glyph, color))
}

fn parse_name(session: &mut KindSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let kidx: KindId = record_index(fields)?;
    let name = fields.str("name")?;
    session.builder.begin(ObjectKind::new(kidx, name));
    Ok(())
}

fn parse_graphics(session: &mut KindSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let (glyph, color) = graphics(fields)?;
    let kind = session.record_mut()?;
    kind.glyph = glyph;
    kind.attr = color;
    Ok(())
}

fn parse_type(session: &mut KindSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let name = fields.sym("tval")?;
    let tval = TVal::find(name).ok_or_else(|| ParseError::UnrecognisedTval(name.to_owned()))?;

    let records = session.builder.records();
    let Some((_, earlier)) = records.split_last() else {
        return Err(ParseError::MissingRecordHeader);
    };
    let sval = earlier.iter().filter(|kind| kind.tval == tval).count() as u32 + 1;

    let kind = session.record_mut()?;
    kind.tval = tval;
    kind.sval = sval;
    Ok(())
}

fn parse_properties(session: &mut KindSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let kind = session.record_mut()?;
    kind.level = fields.int("level")?;
    kind.weight = fields.int("weight")?;
    kind.cost = fields.int("cost")?;
    Ok(())
}

fn parse_alloc(session: &mut KindSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let alloc = allocation(fields)?;
    session.record_mut()?.alloc = alloc;
    Ok(())
}

fn parse_combat(session: &mut KindSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let kind = session.record_mut()?;
    let hd = fields.rand("hd")?;
    kind.ac = fields.int("ac")?;
    kind.dd = hd.dice;
    kind.ds = hd.sides;
    kind.to_h = fields.rand("to-h")?;
    kind.to_d = fields.rand("to-d")?;
    kind.to_a = fields.rand("to-a")?;
    Ok(())
}

fn parse_charges(session: &mut KindSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let charges = fields.rand("charges")?;
    session.record_mut()?.charge = charges;
    Ok(())
}

fn parse_pile(session: &mut KindSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let kind = session.record_mut()?;
    kind.gen_mult_prob = fields.int("prob")?;
    kind.stack_size = fields.rand("stack")?;
    Ok(())
}

fn parse_flags(session: &mut KindSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let text = fields.str("flags")?;
    let kind = session.record_mut()?;
    FlagFields::all(&mut kind.flags, &mut kind.kind_flags, &mut kind.elements).parse(text)?;
    Ok(())
}

fn parse_power(session: &mut KindSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let power = fields.int("power")?;
    session.record_mut()?.power = power;
    Ok(())
}

fn parse_msg(session: &mut KindSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let text = fields.str("text")?;
    append_text(&mut session.record_mut()?.effect_msg, text);
    Ok(())
}

fn parse_time(session: &mut KindSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let time = fields.rand("time")?;
    session.record_mut()?.time = time;
    Ok(())
}

fn parse_pval(session: &mut KindSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let pval = fields.rand("pval")?;
    session.record_mut()?.pval = pval;
    Ok(())
}

fn parse_values(session: &mut KindSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let text = fields.str("values")?;
    let kind = session.record_mut()?;
    ValueFields::with_resists(&mut kind.modifiers, &mut kind.elements).parse(text)?;
    Ok(())
}

fn parse_desc(session: &mut KindSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let text = fields.str("text")?;
    append_text(&mut session.record_mut()?.text, text);
    Ok(())
}

/// Registers the directives of `object.txt`.
pub fn parser<'a>() -> ParseResult<DirectiveParser<KindSession<'a>>> {
    let mut parser = DirectiveParser::new();
    parser.register_all(&[
        ("name int index str name", parse_name),
        ("graphics char glyph sym color", parse_graphics),
        ("type sym tval", parse_type),
        ("properties int level int weight int cost", parse_properties),
        ("alloc int common str minmax", parse_alloc),
        ("combat int ac rand hd rand to-h rand to-d rand to-a", parse_combat),
        ("charges rand charges", parse_charges),
        ("pile int prob rand stack", parse_pile),
        ("flags str flags", parse_flags),
        ("power int power", parse_power),
        ("msg str text", parse_msg),
        ("time rand time", parse_time),
        ("pval rand pval", parse_pval),
        ("values str values", parse_values),
        ("desc str text", parse_desc),
    ])?;
    register_effects(&mut parser)?;
    register_cross_references(&mut parser)?;
    Ok(parser)
}

/// The kind table. Every kind picks up the kind flags of its object base.
pub fn finish(session: KindSession<'_>) -> SparseTable<ObjectKind> {
    let bases = session.refs.bases;
    let mut records = session.into_records();
    for kind in &mut records {
        if let Some(base) = bases.get(kind.tval.as_index()) {
            kind.kind_flags |= base.kind_flags;
        }
    }
    SparseTable::from_records(records)
}

/// Returns true if `name` (a data-file symbol) names `kind`.
///
/// Case is ignored, the article and plural markers are dropped from the
/// kind name, and `_` in the symbol stands for a space.
fn names_kind(kind: &ObjectKind, name: &str) -> bool {
    let wanted = strip_name_markers(&name.replace('_', " "));
    kind.base_name().eq_ignore_ascii_case(&wanted)
}

fn declared(kinds: &[ObjectKind], tval: TVal) -> impl Iterator<Item = &ObjectKind> {
    kinds
        .iter()
        .filter(move |kind| kind.tval == tval && !kind.name.is_empty())
}

/// The sval of the kind of type `tval` called `name`.
pub fn lookup_sval(kinds: &[ObjectKind], tval: TVal, name: &str) -> Option<u32> {
    declared(kinds, tval)
        .find(|kind| names_kind(kind, name))
        .map(|kind| kind.sval)
}

/// The kind with type `tval` and sub-type `sval`.
pub fn lookup_kind(kinds: &[ObjectKind], tval: TVal, sval: u32) -> Option<KindId> {
    declared(kinds, tval)
        .find(|kind| kind.sval == sval)
        .map(|kind| kind.kidx)
}

/// The highest sval in use for `tval`, 0 if there are no kinds of that type.
pub fn num_svals(kinds: &[ObjectKind], tval: TVal) -> u32 {
    declared(kinds, tval)
        .map(|kind| kind.sval)
        .max()
        .unwrap_or(0)
}

/// The base of `tval`, if one was declared.
pub fn declared_base(bases: &[ObjectBase], tval: TVal) -> Option<&ObjectBase> {
    bases
        .get(tval.as_index())
        .filter(|base| base.is_declared())
}

#[cfg(test)]
mod tests {
    use object_core::{Element, ElementFlags, KindFlags, Modifier, RandomValue, Slay, SlayId};

    use super::*;
    use crate::directive::LineError;
    use crate::finalize::finalize_bases;
    use crate::xref::CrossRefs;

    const DAGGERS: &str = "\
name 3 & Dagger~
graphics | w
type sword
properties 0 12 10
alloc 40 0 to 40
combat 0 1d4 0 0 0
flags THROWING | IGNORE_FIRE
values STEALTH[1] RES_COLD[1]
desc A short blade.
desc Sharp.

name 1 & Main Gauche~
graphics | w
type sword
combat 0 1d5 d3 0 0
slay EVIL_2

name 7 Potion~ of Cure Light Wounds
type potion
pile 40 2d3
effect HEAL_HP
dice 20
effect TIMED_DEC BLIND
param 20
";

    fn compile(text: &str, refs: CrossRefs<'_>) -> Result<SparseTable<ObjectKind>, LineError> {
        let mut session = KindSession::new(refs);
        parser().unwrap().parse_str(&mut session, text)?;
        Ok(finish(session))
    }

    fn slays() -> Vec<Slay> {
        vec![
            Slay::default(),
            Slay {
                code: "EVIL_2".into(),
                ..Slay::default()
            },
        ]
    }

    #[test]
    fn test_kinds() {
        let slays = slays();
        let mut sword = ObjectBase::new(TVal::Sword);
        sword.kind_flags = KindFlags::SHOW_DICE;
        let bases = finalize_bases(vec![sword]);
        let refs = CrossRefs {
            bases: &bases,
            slays: &slays,
            ..CrossRefs::empty()
        };

        let table = compile(DAGGERS, refs).unwrap();
        assert_eq!(table.len(), 8);
        let order: Vec<_> = table.iter_declared().map(|k| k.kidx).collect();
        assert_eq!(order, vec![KindId(3), KindId(1), KindId(7)]);

        let dagger = table.get(KindId(3)).unwrap();
        assert_eq!((dagger.tval, dagger.sval), (TVal::Sword, 1));
        assert_eq!(dagger.glyph, '|');
        assert_eq!(dagger.attr, Color::White);
        assert_eq!((dagger.dd, dagger.ds), (1, 4));
        assert_eq!(dagger.alloc, Allocation { prob: 40, min: 0, max: 40 });
        assert!(dagger.kind_flags.contains(KindFlags::SHOW_DICE));
        assert!(dagger.elements.has(Element::Fire, ElementFlags::IGNORE));
        assert_eq!(dagger.elements[Element::Cold].res_level, 1);
        assert_eq!(dagger.modifiers[Modifier::Stealth], RandomValue::fixed(1));
        assert_eq!(dagger.text, "A short blade. Sharp.");
        assert!(dagger.slays.is_none());

        let gauche = table.get(KindId(1)).unwrap();
        assert_eq!(gauche.sval, 2);
        assert_eq!(gauche.to_h, RandomValue::parse("d3").unwrap());
        assert!(gauche.slays.as_ref().unwrap().contains(SlayId(1)));

        let potion = table.get(KindId(7)).unwrap();
        assert_eq!((potion.tval, potion.sval), (TVal::Potion, 1));
        assert!(!potion.kind_flags.contains(KindFlags::SHOW_DICE));
        assert_eq!(potion.gen_mult_prob, 40);
        assert_eq!(potion.effects.len(), 2);
        assert_eq!(potion.effects.last().unwrap().params[1], 20);
    }

    #[test]
    fn test_kind_lookups() {
        let slays = slays();
        let refs = CrossRefs {
            slays: &slays,
            ..CrossRefs::empty()
        };
        let table = compile(DAGGERS, refs).unwrap();
        let kinds = table.as_slice();

        assert_eq!(lookup_sval(kinds, TVal::Sword, "Dagger"), Some(1));
        assert_eq!(lookup_sval(kinds, TVal::Sword, "main_gauche"), Some(2));
        assert_eq!(lookup_sval(kinds, TVal::Sword, "MAIN GAUCHE"), Some(2));
        assert_eq!(lookup_sval(kinds, TVal::Potion, "Cure_Light_Wounds"), None);
        assert_eq!(
            lookup_sval(kinds, TVal::Potion, "Potion_of_Cure_Light_Wounds"),
            Some(1)
        );
        assert_eq!(lookup_sval(kinds, TVal::Hafted, "Dagger"), None);

        assert_eq!(lookup_kind(kinds, TVal::Sword, 2), Some(KindId(1)));
        assert_eq!(lookup_kind(kinds, TVal::Sword, 3), None);
        assert_eq!(lookup_kind(kinds, TVal::None, 0), None);

        assert_eq!(num_svals(kinds, TVal::Sword), 2);
        assert_eq!(num_svals(kinds, TVal::Bow), 0);
    }

    #[test]
    fn test_duplicate_index_keeps_first_kind() {
        let text = "name 3 & First~\ntype sword\nname 3 & Second~\ntype sword\n";
        let table = compile(text, CrossRefs::empty()).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(KindId(3)).unwrap().name, "& First~");
        assert_eq!(table.iter_declared().count(), 1);
        assert_eq!(lookup_sval(table.as_slice(), TVal::Sword, "Second"), None);
    }

    #[test]
    fn test_kind_errors() {
        let cases: &[(&str, ParseError)] = &[
            (
                "name -1 Broken",
                ParseError::InvalidField {
                    field: "index".into(),
                    value: "-1".into(),
                },
            ),
            (
                "name 0 & Zero~",
                ParseError::InvalidField {
                    field: "index".into(),
                    value: "0".into(),
                },
            ),
            ("name 2000000000 & Huge~", ParseError::AllocationFailure(2_000_000_000)),
            ("name 1 X\ntype gizmo", ParseError::UnrecognisedTval("gizmo".into())),
            ("name 1 X\nalloc 10 1 to 300", ParseError::OutOfBounds("1 to 300".into())),
            ("name 1 X\nalloc 10 1-30", ParseError::InvalidAllocation("1-30".into())),
            ("name 1 X\nslay EVIL_2", ParseError::UnrecognisedSlay("EVIL_2".into())),
            (
                "name 1 X\ncurse teleportation 10",
                ParseError::UnrecognisedCurse("teleportation".into()),
            ),
            (
                "name 1 X\ngraphics ! chartreuse",
                ParseError::UnrecognisedColor("chartreuse".into()),
            ),
            ("type sword", ParseError::MissingRecordHeader),
        ];
        for (text, expected) in cases {
            let err = compile(text, CrossRefs::empty()).unwrap_err();
            assert_eq!(&err.error, expected, "{text}");
        }
    }
}
