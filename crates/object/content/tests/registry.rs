use std::path::PathBuf;

use object_content::{
    ContentRegistry, DataDir, LifecycleError, LoadError, MemorySource, ParseError, TableKind,
    TableState,
};
use object_core::{
    ActivationId, ArtifactId, BrandId, CurseId, EffectKind, EgoId, KindFlags, KindId, Modifier,
    ObjectFlags, SlayId, TVal, TableId,
};

fn sample_data() -> DataDir {
    DataDir::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"))
}

fn loaded() -> ContentRegistry {
    let mut registry = ContentRegistry::new();
    registry
        .load_all(&sample_data(), |_| false)
        .expect("sample data should compile");
    registry
}

/// Loads the bundled data set and checks every table end to end.
#[test]
fn test_sample_data_compiles() {
    let registry = loaded();
    for table in TableKind::ORDER {
        assert_eq!(registry.state(table), TableState::Ready, "{table}");
    }

    // ================================================================
    // Dense tables keep their sentinel at slot 0
    // ================================================================
    assert_eq!(registry.slays().unwrap().len(), 6);
    assert_eq!(registry.brands().unwrap().len(), 5);
    assert_eq!(registry.curses().unwrap().len(), 4);
    assert_eq!(registry.activations().unwrap().len(), 4);
    assert_eq!(registry.slays().unwrap()[0].code, "");
    assert_eq!(registry.slays().unwrap()[3].base.as_deref(), Some("orc"));

    let bases = registry.object_bases().unwrap();
    assert_eq!(bases.len(), TVal::COUNT);
    let potion = registry.object_base(TVal::Potion).unwrap().unwrap();
    assert_eq!(potion.break_perc, 100);
    let sword = registry.object_base(TVal::Sword).unwrap().unwrap();
    assert_eq!(sword.break_perc, 10);
    assert!(registry.object_base(TVal::Wand).unwrap().is_none());

    // ================================================================
    // Object kinds
    // ================================================================
    assert_eq!(registry.lookup_sval(TVal::Sword, "main_gauche").unwrap(), Some(2));
    assert_eq!(registry.lookup_sval(TVal::Sword, "Long Sword").unwrap(), Some(3));
    assert_eq!(registry.num_svals(TVal::Sword).unwrap(), 3);

    let kinds = registry.kinds().unwrap();
    let dagger = kinds.get(KindId(10)).unwrap();
    assert_eq!((dagger.tval, dagger.sval), (TVal::Sword, 1));
    assert_eq!((dagger.dd, dagger.ds), (1, 4));
    assert!(dagger.flags.contains(ObjectFlags::THROWING));
    assert!(dagger.kind_flags.contains(KindFlags::SHOW_DICE));
    assert_eq!(dagger.text, "A short, two-edged blade.");

    let cure = kinds.get(KindId(50)).unwrap();
    let effects = cure.effects.as_slice();
    assert_eq!(effects.len(), 2);
    assert_eq!(effects[0].kind, EffectKind::HealHp);
    assert_eq!(effects[1].kind, EffectKind::TimedDec);
    assert_eq!(effects[1].params[1], 20);
    assert_eq!(cure.effect_msg, "You feel a little better.");

    // Unused indices stay empty between declared kinds.
    assert!(kinds.get(KindId(5)).unwrap().name.is_empty());
    assert_eq!(kinds.head(), Some(KindId(1)));

    // ================================================================
    // Ego items
    // ================================================================
    let egos = registry.egos().unwrap();
    let burning = egos.iter_declared().next().unwrap();
    assert_eq!(burning.name, "of Burning");
    assert_eq!(burning.possible, vec![KindId(10), KindId(11), KindId(12)]);
    assert!(burning.brands.as_ref().unwrap().contains(BrandId(2)));

    let slay_evil = egos.get(EgoId(2)).unwrap();
    assert_eq!(slay_evil.possible.len(), 4);
    assert!(slay_evil.slays.as_ref().unwrap().contains(SlayId(1)));

    let power = egos.get(EgoId(3)).unwrap();
    assert_eq!(power.possible, vec![KindId(21)]);
    assert_eq!(power.min_modifiers[Modifier::Might], 1);

    let brightness = egos.get(EgoId(4)).unwrap();
    assert!(brightness.flags_off.contains(ObjectFlags::BURNS_OUT));
}

/// An artifact whose base object names no kind gets a synthesized one.
#[test]
fn test_artifact_synthesizes_kind() {
    let registry = loaded();
    let kinds = registry.kinds().unwrap();
    let artifacts = registry.artifacts().unwrap();

    let phial = artifacts.get(ArtifactId(1)).unwrap();
    assert_eq!((phial.tval, phial.sval), (TVal::Light, 2));
    assert_eq!(phial.activation, Some(ActivationId(1)));

    let dummy = kinds.get(KindId(61)).expect("dummy kind appended");
    assert_eq!(dummy.name, "& Phial~");
    assert_eq!(dummy.sval, 2);
    assert_eq!(dummy.glyph, '~');
    assert!(dummy.kind_flags.contains(KindFlags::INSTA_ART));
    assert_eq!(registry.num_svals(TVal::Light).unwrap(), 2);
    assert_eq!(registry.lookup_kind(TVal::Light, 2).unwrap(), Some(KindId(61)));

    let narthanc = artifacts.get(ArtifactId(2)).unwrap();
    assert_eq!((narthanc.tval, narthanc.sval), (TVal::Sword, 1));
    assert_eq!((narthanc.dd, narthanc.ds, narthanc.to_h), (2, 5, 10));
    assert_eq!(narthanc.activation, Some(ActivationId(2)));
    assert!(narthanc.brands.as_ref().unwrap().contains(BrandId(2)));

    let belthronding = artifacts.get(ArtifactId(3)).unwrap();
    assert_eq!(belthronding.curses.as_ref().unwrap().power(CurseId(1)), 20);
    assert_eq!(belthronding.modifiers[Modifier::Shots], 10);
}

/// Singleton kinds resolve after artifacts load and curses pick up the
/// curse object.
#[test]
fn test_singletons_and_curse_objects() {
    let registry = loaded();
    let singletons = registry.singletons().unwrap();
    assert_eq!(singletons.pile, Some(KindId(1)));
    assert_eq!(singletons.unknown_item, Some(KindId(2)));
    assert_eq!(singletons.unknown_treasure, Some(KindId(3)));
    assert_eq!(singletons.curse_object, Some(KindId(4)));

    let curses = registry.curses().unwrap();
    assert_eq!(curses[0].obj.kind, None);
    for curse in &curses[1..] {
        assert_eq!(curse.obj.kind, Some(KindId(4)));
        assert_eq!(curse.obj.sval, 4);
        assert_eq!(curse.obj.known.map(|known| known.kind), Some(Some(KindId(4))));
    }

    let siphoning = &curses[3];
    assert_eq!(siphoning.desc, "drains your experience and blinds you");
    let dice = siphoning.obj.effects.last().unwrap().dice.as_ref().unwrap();
    assert!(dice.bindings()[0].expression.is_some());
}

/// Tables refuse to load before their dependencies.
#[test]
fn test_load_order_is_enforced() {
    let source = MemorySource::new()
        .with(TableKind::ObjectBase, "name sword Sword~\n")
        .with(TableKind::Object, "name 1 & Dagger~\ntype sword\n");

    let mut registry = ContentRegistry::new();
    let err = registry.load_table(TableKind::Object, &source, false).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Lifecycle(LifecycleError::DependencyNotReady {
            table: TableKind::Object,
            dependency: TableKind::ObjectBase,
        })
    ));
    assert_eq!(registry.state(TableKind::Object), TableState::Uninitialized);

    registry.load_table(TableKind::ObjectBase, &source, false).unwrap();
    let err = registry.load_table(TableKind::ObjectBase, &source, false).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Lifecycle(LifecycleError::AlreadyLoaded { .. })
    ));
}

/// Optional tables may be absent; required ones may not.
#[test]
fn test_optional_tables() {
    let source = MemorySource::new()
        .with(TableKind::ObjectBase, "name none\nname sword Sword~\n")
        .with(TableKind::Slay, "")
        .with(TableKind::Brand, "")
        .with(TableKind::Curse, "")
        .with(TableKind::Activation, "")
        .with(TableKind::Object, "name 1 <curse object>\ntype none\n");

    let mut registry = ContentRegistry::new();
    let err = registry.load_all(&source, |_| false).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(registry.state(TableKind::EgoItem), TableState::Uninitialized);

    let mut registry = ContentRegistry::new();
    registry
        .load_all(&source, |table| {
            matches!(table, TableKind::EgoItem | TableKind::Artifact)
        })
        .unwrap();
    assert_eq!(registry.egos().unwrap().len(), 1);
    assert_eq!(registry.artifacts().unwrap().len(), 1);

    let singletons = registry.singletons().unwrap();
    assert_eq!(singletons.curse_object, Some(KindId(1)));
    assert_eq!(singletons.pile, None);
}

/// A parse error names the table and line, and leaves the table loadable.
#[test]
fn test_parse_error_reports_line() {
    let text = "\
# slays
code ORC_3
name orcs
base teapot
";
    let mut registry = ContentRegistry::new();
    let err = registry.load_str(TableKind::Slay, text).unwrap_err();
    match &err {
        LoadError::Parse { table, line, .. } => {
            assert_eq!(*table, TableKind::Slay);
            assert_eq!(*line, 4);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        err.parse_error(),
        Some(&ParseError::InvalidMonsterBase("teapot".into()))
    );
    assert_eq!(registry.state(TableKind::Slay), TableState::Uninitialized);

    let records = registry
        .load_str(TableKind::Slay, "code ORC_3\nbase orc\n")
        .unwrap();
    assert_eq!(records, 1);
    assert_eq!(registry.slays().unwrap()[SlayId(1).index()].code, "ORC_3");
}

/// An oversized record index is reported instead of allocating the table.
#[test]
fn test_huge_record_index_is_rejected() {
    let mut registry = ContentRegistry::new();
    for table in TableKind::Object.dependencies() {
        registry.load_str(*table, "").unwrap();
    }

    let err = registry
        .load_str(TableKind::Object, "name 2000000000 & Huge~\ntype sword\n")
        .unwrap_err();
    assert!(matches!(
        err,
        LoadError::Parse {
            table: TableKind::Object,
            line: 1,
            source: ParseError::AllocationFailure(2_000_000_000),
        }
    ));
    assert_eq!(registry.state(TableKind::Object), TableState::Uninitialized);
}

/// Released tables cannot be read or reloaded.
#[test]
fn test_release() {
    let mut registry = loaded();
    registry.release().unwrap();
    assert!(registry.is_released());
    assert!(matches!(registry.kinds(), Err(LifecycleError::Released)));
    assert!(matches!(
        registry.load_str(TableKind::Slay, ""),
        Err(LoadError::Lifecycle(LifecycleError::Released))
    ));
    assert_eq!(registry.release(), Err(LifecycleError::Released));
}
