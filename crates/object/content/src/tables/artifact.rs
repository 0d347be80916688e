//! `artifact.txt`.
//!
//! Artifacts are built on a kind. When `base-object` names a kind that does
//! not exist, a placeholder kind is appended to the kind table so that the
//! artifact has something to be an instance of; `graphics` then sets its
//! glyph and colour. Only such instant-artifact kinds may be recoloured.

use object_core::{Artifact, ArtifactId, Color, KindFlags, KindId, ObjectKind, TVal, TableId};
use tracing::debug;

use crate::builder::TableSession;
use crate::directive::{DirectiveParser, Fields};
use crate::error::{ParseError, ParseResult};
use crate::finalize::SparseTable;
use crate::resolve::{FlagFields, ValueFields};
use crate::xref::{find_activation, register_cross_references};

use super::append_text;
use super::kind::{
    allocation, declared_base, graphics, lookup_kind, lookup_sval, num_svals, record_index,
};

/// Parse state: the artifacts so far plus the kind table, which may grow.
pub type ArtifactSession<'a> = TableSession<'a, Artifact, &'a mut SparseTable<ObjectKind>>;

/// Appends a placeholder kind for an artifact whose base object is not a
/// declared kind, and returns its sval.
pub fn synthesize_kind(kinds: &mut SparseTable<ObjectKind>, tval: TVal, sval_name: &str) -> u32 {
    let kidx = KindId::from_index(kinds.len());
    let sval = num_svals(kinds.as_slice(), tval) + 1;

    let mut kind = ObjectKind::new(kidx, format!("& {sval_name}~"));
    kind.tval = tval;
    kind.sval = sval;
    kind.glyph = '*';
    kind.attr = Color::Red;
    kind.kind_flags = KindFlags::INSTA_ART;
    kinds.append(kind);

    debug!(%tval, sval, kidx = %kidx, name = sval_name, "synthesized artifact kind");
    sval
}

fn parse_name(session: &mut ArtifactSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let aidx: ArtifactId = record_index(fields)?;
    let name = fields.str("name")?;
    session.builder.begin(Artifact::new(aidx, name));
    Ok(())
}

fn parse_base_object(session: &mut ArtifactSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let tval_name = fields.sym("tval")?;
    let sval_name = fields.sym("sval")?;
    let (artifact, refs, kinds) = session.record_and_extra()?;

    let tval = TVal::find(tval_name)
        .ok_or_else(|| ParseError::UnrecognisedTval(tval_name.to_owned()))?;
    artifact.tval = tval;

    artifact.sval = match lookup_sval(kinds.as_slice(), tval, sval_name) {
        Some(sval) => sval,
        None => {
            if declared_base(refs.bases, tval).is_none() {
                let message = format!("no object base for type '{tval}'");
                return Err(ParseError::Internal(message));
            }
            synthesize_kind(kinds, tval, sval_name)
        }
    };
    Ok(())
}

/// Sets the glyph and colour of the artifact's own kind.
fn parse_graphics(session: &mut ArtifactSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let (glyph, color) = graphics(fields)?;
    let (artifact, _, kinds) = session.record_and_extra()?;

    let (tval, sval) = (artifact.tval, artifact.sval);
    let kidx = lookup_kind(kinds.as_slice(), tval, sval)
        .ok_or(ParseError::InvalidItemNumber { tval, sval })?;
    let kind = kinds
        .get_mut(kidx)
        .ok_or(ParseError::InvalidItemNumber { tval, sval })?;

    if !kind.is_insta_art() {
        return Err(ParseError::NotSpecialArtifact(kind.name.clone()));
    }
    kind.glyph = glyph;
    kind.attr = color;
    Ok(())
}

fn parse_info(session: &mut ArtifactSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let artifact = session.record_mut()?;
    artifact.level = fields.int("level")?;
    artifact.weight = fields.int("weight")?;
    artifact.cost = fields.int("cost")?;
    Ok(())
}

fn parse_alloc(session: &mut ArtifactSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let alloc = allocation(fields)?;
    session.record_mut()?.alloc = alloc;
    Ok(())
}

fn parse_power(session: &mut ArtifactSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let artifact = session.record_mut()?;
    let hd = fields.rand("hd")?;
    artifact.ac = fields.int("ac")?;
    artifact.dd = hd.dice;
    artifact.ds = hd.sides;
    artifact.to_h = fields.int("to-h")?;
    artifact.to_d = fields.int("to-d")?;
    artifact.to_a = fields.int("to-a")?;
    Ok(())
}

fn parse_flags(session: &mut ArtifactSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let text = fields.opt_str("flags")?;
    let artifact = session.record_mut()?;
    if let Some(text) = text {
        FlagFields::with_elements(&mut artifact.flags, &mut artifact.elements).parse(text)?;
    }
    Ok(())
}

fn parse_act(session: &mut ArtifactSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let name = fields.str("name")?;
    let (artifact, refs) = session.record_and_refs()?;
    let activation = find_activation(refs.activations, name)
        .ok_or_else(|| ParseError::UnrecognisedActivation(name.to_owned()))?;
    artifact.activation = Some(activation);
    Ok(())
}

fn parse_time(session: &mut ArtifactSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let time = fields.rand("time")?;
    session.record_mut()?.time = time;
    Ok(())
}

fn parse_msg(session: &mut ArtifactSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let text = fields.str("text")?;
    append_text(&mut session.record_mut()?.alt_msg, text);
    Ok(())
}

fn parse_values(session: &mut ArtifactSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let text = fields.str("values")?;
    let artifact = session.record_mut()?;
    ValueFields::with_resists(&mut artifact.modifiers, &mut artifact.elements).parse(text)?;
    Ok(())
}

fn parse_desc(session: &mut ArtifactSession<'_>, fields: &Fields<'_>) -> ParseResult<()> {
    let text = fields.str("text")?;
    append_text(&mut session.record_mut()?.text, text);
    Ok(())
}

/// Registers the directives of `artifact.txt`.
pub fn parser<'a>() -> ParseResult<DirectiveParser<ArtifactSession<'a>>> {
    let mut parser = DirectiveParser::new();
    parser.register_all(&[
        ("name int index str name", parse_name),
        ("base-object sym tval sym sval", parse_base_object),
        ("graphics char glyph sym color", parse_graphics),
        ("info int level int weight int cost", parse_info),
        ("alloc int common str minmax", parse_alloc),
        ("power int ac rand hd int to-h int to-d int to-a", parse_power),
        ("flags ?str flags", parse_flags),
        ("act str name", parse_act),
        ("time rand time", parse_time),
        ("msg str text", parse_msg),
        ("values str values", parse_values),
        ("desc str text", parse_desc),
    ])?;
    register_cross_references(&mut parser)?;
    Ok(parser)
}

/// The artifact table, numbered by the data file.
pub fn finish(session: ArtifactSession<'_>) -> SparseTable<Artifact> {
    SparseTable::from_records(session.into_records())
}

#[cfg(test)]
mod tests {
    use object_core::{Activation, ActivationId, Element, ElementFlags, Modifier, ObjectBase};

    use super::*;
    use crate::directive::LineError;
    use crate::finalize::finalize_bases;
    use crate::xref::CrossRefs;

    fn kinds() -> SparseTable<ObjectKind> {
        let mut dagger = ObjectKind::new(KindId(1), "& Dagger~");
        dagger.tval = TVal::Sword;
        dagger.sval = 1;
        let mut phial = ObjectKind::new(KindId(2), "& Phial~");
        phial.tval = TVal::Light;
        phial.sval = 1;
        phial.kind_flags = KindFlags::INSTA_ART;
        SparseTable::from_records(vec![dagger, phial])
    }

    fn compile(
        text: &str,
        kinds: &mut SparseTable<ObjectKind>,
    ) -> Result<SparseTable<Artifact>, LineError> {
        let bases = finalize_bases(vec![
            ObjectBase::new(TVal::Sword),
            ObjectBase::new(TVal::Light),
        ]);
        let activations = vec![
            Activation::default(),
            Activation {
                index: ActivationId(1),
                name: "ILLUMINATION".into(),
                ..Activation::default()
            },
        ];
        let refs = CrossRefs {
            bases: &bases,
            activations: &activations,
            ..CrossRefs::empty()
        };
        let mut session = ArtifactSession::with_extra(refs, kinds);
        parser().unwrap().parse_str(&mut session, text)?;
        Ok(finish(session))
    }

    #[test]
    fn test_existing_base_object() {
        let mut kinds = kinds();
        let text = "\
name 1 of Galadriel
base-object light Phial
graphics ! y
info 5 10 10000
power 0 1d1 0 0 0
flags SEE_INVIS | IGNORE_POIS
values LIGHT[3] RES_DARK[1]
act ILLUMINATION
time 10+d10
msg It glows.
desc A small crystal phial.
";
        let artifacts = compile(text, &mut kinds).unwrap();
        let phial = artifacts.get(ArtifactId(1)).unwrap();
        assert_eq!((phial.tval, phial.sval), (TVal::Light, 1));
        assert_eq!(phial.activation, Some(ActivationId(1)));
        assert_eq!(phial.modifiers[Modifier::Light], 3);
        assert_eq!(phial.elements[Element::Dark].res_level, 1);
        assert!(phial.elements.has(Element::Acid, ElementFlags::IGNORE));
        assert!(phial.elements.has(Element::Pois, ElementFlags::IGNORE));
        assert_eq!(phial.alt_msg, "It glows.");

        assert_eq!(kinds.len(), 3);
        let kind = kinds.get(KindId(2)).unwrap();
        assert_eq!((kind.glyph, kind.attr), ('!', Color::Yellow));
    }

    #[test]
    fn test_dummy_kind_synthesis() {
        let mut kinds = kinds();
        let text = "\
name 3 of Narthanc
base-object sword Narthanc
graphics | R
";
        let artifacts = compile(text, &mut kinds).unwrap();
        let artifact = artifacts.get(ArtifactId(3)).unwrap();
        assert_eq!(artifact.sval, 2);

        assert_eq!(kinds.len(), 4);
        let dummy = kinds.get(KindId(3)).unwrap();
        assert_eq!(dummy.name, "& Narthanc~");
        assert_eq!((dummy.tval, dummy.sval), (TVal::Sword, 2));
        assert!(dummy.is_insta_art());
        assert_eq!((dummy.glyph, dummy.attr), ('|', Color::LightRed));
        assert_eq!(
            kinds.iter_declared().map(|k| k.kidx).collect::<Vec<_>>(),
            vec![KindId(1), KindId(2), KindId(3)]
        );
        assert_eq!(lookup_kind(kinds.as_slice(), TVal::Sword, 2), Some(KindId(3)));
    }

    #[test]
    fn test_artifact_errors() {
        let mut kinds = kinds();
        let text = "name 1 x\nbase-object sword Dagger\ngraphics | w";
        let err = compile(text, &mut kinds).unwrap_err();
        assert_eq!(err.error, ParseError::NotSpecialArtifact("& Dagger~".into()));

        let err = compile("name 1 x\nact BLINDNESS", &mut kinds).unwrap_err();
        assert_eq!(err.error, ParseError::UnrecognisedActivation("BLINDNESS".into()));

        let err = compile("name 1 x\ngraphics | w", &mut kinds).unwrap_err();
        assert_eq!(
            err.error,
            ParseError::InvalidItemNumber {
                tval: TVal::None,
                sval: 0
            }
        );

        let err = compile("name 1 x\nbase-object ring Nenya", &mut kinds).unwrap_err();
        assert!(matches!(err.error, ParseError::Internal(_)));
        assert_eq!(kinds.len(), 3);

        let err = compile("name 1 x\nflags IGNORE_ACID INSTA_ART", &mut kinds).unwrap_err();
        assert_eq!(err.error, ParseError::InvalidFlag("INSTA_ART".into()));

        let err = compile("name 0 of Nobody", &mut kinds).unwrap_err();
        assert_eq!(
            err.error,
            ParseError::InvalidField {
                field: "index".into(),
                value: "0".into()
            }
        );

        let err = compile("name 100000 of Everybody", &mut kinds).unwrap_err();
        assert_eq!(err.error, ParseError::AllocationFailure(100_000));
    }
}
