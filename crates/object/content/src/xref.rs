//! Cross-references into tables that are already finalized.
//!
//! Slays and brands are found by code, curses and activations by name. The
//! lookup is exact and case-sensitive and starts at index 1, so the
//! sentinel in slot 0 never matches. A record's membership set is allocated
//! on its first successful reference, sized to the target table.

use object_core::{
    Activation, ActivationId, Artifact, Brand, BrandId, Curse, CurseId, EgoItem, MembershipSet,
    ObjectBase, ObjectKind, PowerMap, Slay, SlayId, TableId,
};

use crate::builder::TableSession;
use crate::directive::{DirectiveParser, Fields};
use crate::error::{ParseError, ParseResult};
use crate::monster::{MONSTER_BASES, MonsterVocabulary, RACE_FLAGS, StaticMonsters};

static DEFAULT_MONSTERS: StaticMonsters = StaticMonsters::new(RACE_FLAGS, MONSTER_BASES);

/// Read-only views of the tables a load may refer to.
#[derive(Clone, Copy)]
pub struct CrossRefs<'a> {
    pub bases: &'a [ObjectBase],
    pub slays: &'a [Slay],
    pub brands: &'a [Brand],
    pub curses: &'a [Curse],
    pub activations: &'a [Activation],
    pub kinds: &'a [ObjectKind],
    pub monsters: &'a dyn MonsterVocabulary,
}

impl CrossRefs<'static> {
    /// No tables, default monster vocabulary.
    pub fn empty() -> Self {
        Self {
            bases: &[],
            slays: &[],
            brands: &[],
            curses: &[],
            activations: &[],
            kinds: &[],
            monsters: &DEFAULT_MONSTERS,
        }
    }
}

fn find_by<T, I: TableId>(table: &[T], wanted: &str, key: impl Fn(&T) -> &str) -> Option<I> {
    (1..table.len())
        .find(|&index| key(&table[index]) == wanted)
        .map(I::from_index)
}

/// Finds a slay by exact code.
pub fn find_slay(slays: &[Slay], code: &str) -> Option<SlayId> {
    find_by(slays, code, |slay| slay.code.as_str())
}

/// Finds a brand by exact code.
pub fn find_brand(brands: &[Brand], code: &str) -> Option<BrandId> {
    find_by(brands, code, |brand| brand.code.as_str())
}

/// Finds a curse by exact name.
pub fn find_curse(curses: &[Curse], name: &str) -> Option<CurseId> {
    find_by(curses, name, |curse| curse.name.as_str())
}

/// Finds an activation by exact name.
pub fn find_activation(activations: &[Activation], name: &str) -> Option<ActivationId> {
    find_by(activations, name, |act| act.name.as_str())
}

/// Records that can reference slays, brands and curses.
pub trait CrossLinked {
    fn slays_mut(&mut self) -> &mut Option<MembershipSet<SlayId>>;
    fn brands_mut(&mut self) -> &mut Option<MembershipSet<BrandId>>;
    fn curses_mut(&mut self) -> &mut Option<PowerMap<CurseId>>;
}

macro_rules! impl_cross_linked {
    ($($record:ty),*) => {
        $(
            impl CrossLinked for $record {
                fn slays_mut(&mut self) -> &mut Option<MembershipSet<SlayId>> {
                    &mut self.slays
                }

                fn brands_mut(&mut self) -> &mut Option<MembershipSet<BrandId>> {
                    &mut self.brands
                }

                fn curses_mut(&mut self) -> &mut Option<PowerMap<CurseId>> {
                    &mut self.curses
                }
            }
        )*
    };
}

impl_cross_linked!(ObjectKind, EgoItem, Artifact);

/// Marks the slay with `code` in `set`, allocating the set if needed.
pub fn link_slay(
    set: &mut Option<MembershipSet<SlayId>>,
    slays: &[Slay],
    code: &str,
) -> ParseResult<SlayId> {
    let id = find_slay(slays, code).ok_or_else(|| ParseError::UnrecognisedSlay(code.to_owned()))?;
    set.get_or_insert_with(|| MembershipSet::with_len(slays.len()))
        .insert(id);
    Ok(id)
}

/// Marks the brand with `code` in `set`, allocating the set if needed.
pub fn link_brand(
    set: &mut Option<MembershipSet<BrandId>>,
    brands: &[Brand],
    code: &str,
) -> ParseResult<BrandId> {
    let id =
        find_brand(brands, code).ok_or_else(|| ParseError::UnrecognisedBrand(code.to_owned()))?;
    set.get_or_insert_with(|| MembershipSet::with_len(brands.len()))
        .insert(id);
    Ok(id)
}

/// Records `power` for the curse called `name`, allocating the map if needed.
pub fn link_curse(
    map: &mut Option<PowerMap<CurseId>>,
    curses: &[Curse],
    name: &str,
    power: i32,
) -> ParseResult<CurseId> {
    let id =
        find_curse(curses, name).ok_or_else(|| ParseError::UnrecognisedCurse(name.to_owned()))?;
    map.get_or_insert_with(|| PowerMap::with_len(curses.len()))
        .set(id, power);
    Ok(id)
}

fn parse_slay<R: CrossLinked, X>(
    session: &mut TableSession<'_, R, X>,
    fields: &Fields<'_>,
) -> ParseResult<()> {
    let code = fields.str("code")?;
    let (record, refs) = session.record_and_refs()?;
    link_slay(record.slays_mut(), refs.slays, code)?;
    Ok(())
}

fn parse_brand<R: CrossLinked, X>(
    session: &mut TableSession<'_, R, X>,
    fields: &Fields<'_>,
) -> ParseResult<()> {
    let code = fields.str("code")?;
    let (record, refs) = session.record_and_refs()?;
    link_brand(record.brands_mut(), refs.brands, code)?;
    Ok(())
}

fn parse_curse<R: CrossLinked, X>(
    session: &mut TableSession<'_, R, X>,
    fields: &Fields<'_>,
) -> ParseResult<()> {
    let name = fields.sym("name")?;
    let power = fields.int("power")?;
    let (record, refs) = session.record_and_refs()?;
    link_curse(record.curses_mut(), refs.curses, name, power)?;
    Ok(())
}

/// Registers `slay`, `brand` and `curse`.
pub fn register_cross_references<'a, R: CrossLinked, X>(
    parser: &mut DirectiveParser<TableSession<'a, R, X>>,
) -> ParseResult<()> {
    parser.register("slay str code", parse_slay::<R, X>)?;
    parser.register("brand str code", parse_brand::<R, X>)?;
    parser.register("curse sym name int power", parse_curse::<R, X>)?;
    Ok(())
}
