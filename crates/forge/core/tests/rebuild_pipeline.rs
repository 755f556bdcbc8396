mod common;

use common::*;
use forge_core::artifact::{RebuildFailure, rebuild, summarize_materials};
use forge_core::data::{DataStore, DataView, ModData};
use forge_core::hooks::{
    CAN_HARVEST, DamageKind, DamageSource, HarvestTarget, INTERACT, Interaction,
    InteractionFlags, InteractionResult, PREVENT_DURABILITY_LOSS, PROTECTION, TOOLTIP,
    TooltipContext,
};
use forge_core::stats::key::{ATTACK_SPEED, DURABILITY, HARVEST_TIER};
use forge_core::{
    Artifact, ArtifactData, MaterialId, ModuleEntry, ModuleId, ModuleList, ModuleListBuilder,
    RebuildPhase,
};

fn upgrades(entries: &[(ModuleId, u32)]) -> ModuleList {
    ModuleList::merged(
        entries
            .iter()
            .map(|(id, level)| ModuleEntry::new(id.clone(), *level)),
    )
}

fn hit() -> DamageSource {
    DamageSource {
        kind: DamageKind::Generic,
        amount: 4.0,
    }
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn builder_orders_by_priority_and_removal_saturates() {
    let fixture = Fixture::new();

    let list = ModuleListBuilder::new()
        .add(ModuleEntry::new(LIGHTWEIGHT, 1))
        .add(ModuleEntry::new(REINFORCED, 2))
        .build(&fixture.registry, &fixture.config)
        .expect("known modules");

    let ids: Vec<_> = list.iter().map(|e| e.id().clone()).collect();
    assert_eq!(ids, vec![REINFORCED, LIGHTWEIGHT]);

    let trimmed = list.without_level(&REINFORCED, 3);
    let ids: Vec<_> = trimmed.iter().map(|e| e.id().clone()).collect();
    assert_eq!(ids, vec![LIGHTWEIGHT]);
}

#[test]
fn hook_map_follows_entry_list_order() {
    let fixture = Fixture::new();
    let data = ArtifactData::new(vec![IRON]).with_upgrades(upgrades(&[
        (LIGHTWEIGHT, 1),
        (FLAKY, 1),
        (TOGGLEABLE, 1),
    ]));

    let built = rebuild(&data, &fixture.env()).expect("rebuild succeeds");
    let order: Vec<_> = built
        .hooks
        .implementors(TOOLTIP.id())
        .map(|(entry, _)| entry.id().clone())
        .collect();
    assert_eq!(order, vec![FLAKY, TOGGLEABLE, LIGHTWEIGHT]);
}

// ============================================================================
// Stats
// ============================================================================

#[test]
fn material_and_module_stats_combine() {
    let fixture = Fixture::new();
    let data = ArtifactData::new(vec![IRON])
        .with_upgrades(upgrades(&[(DURABLE, 1), (REINFORCED, 2)]));

    let mut artifact = Artifact::new(data);
    let view = artifact.view(&fixture.env()).expect("rebuild succeeds");
    let stats = view.stats();

    // iron 100 + reinforced 2 × 50
    assert_eq!(stats.base_value(&DURABILITY), 200.0);
    assert_eq!(stats.multiplier(&DURABILITY), 1.5);
    assert_eq!(stats.get(&DURABILITY), 300.0);
    assert_eq!(stats.tier(&HARVEST_TIER), 2);
    assert_eq!(stats.multipliers().len(), 1);
}

#[test]
fn durability_multiplier_scenario() {
    let fixture = Fixture::new();
    let mut artifact =
        Artifact::new(ArtifactData::new(vec![IRON]).with_upgrades(upgrades(&[(DURABLE, 1)])));

    let view = artifact.view(&fixture.env()).expect("rebuild succeeds");
    assert_eq!(view.stats().base_value(&DURABILITY), 100.0);
    assert_eq!(view.stats().get(&DURABILITY), 150.0);

    artifact
        .update_upgrades(|list| Ok(list.without_level(&DURABLE, 1)))
        .expect("removal never fails");
    let view = artifact.view(&fixture.env()).expect("rebuild succeeds");
    assert!(view.stats().multipliers().is_empty());
    assert_eq!(view.stats().get(&DURABILITY), 100.0);
}

#[test]
fn material_traits_merge_with_upgrades() {
    let fixture = Fixture::new();
    let data = ArtifactData::new(vec![FEATHERWOOD])
        .with_upgrades(upgrades(&[(LIGHTWEIGHT, 2)]));

    let mut artifact = Artifact::new(data);
    let view = artifact.view(&fixture.env()).expect("rebuild succeeds");

    assert_eq!(view.level(&LIGHTWEIGHT), 3);
    let speed = view.stats().get(&ATTACK_SPEED);
    assert!((speed - ATTACK_SPEED.default_value() * 1.3).abs() < 1e-6);
}

#[test]
fn material_summary_matches_material_part_of_rebuild() {
    let fixture = Fixture::new();
    let summary = summarize_materials(
        &[IRON, MaterialId::from_static("oldmod:unobtainium"), FEATHERWOOD],
        &fixture.env(),
    );

    assert_eq!(summary.base.float(&DURABILITY), 120.0);
    assert_eq!(summary.base.tier(&HARVEST_TIER), 2);
    assert_eq!(summary.traits.level(&LIGHTWEIGHT), 1);
    assert_eq!(summary.traits.len(), 1);
}

// ============================================================================
// Data stores
// ============================================================================

#[test]
fn volatile_data_is_recomputed_and_persisted_data_kept() {
    let fixture = Fixture::new();
    let mut persistent = ModData::new();
    persistent.put_text(forge_core::DataKey::from_static("forge:name"), "Old Faithful");
    let data = ArtifactData::new(vec![IRON])
        .with_upgrades(upgrades(&[(REINFORCED, 1)]))
        .with_persistent(persistent);

    let mut artifact = Artifact::new(data);
    let view = artifact.view(&fixture.env()).expect("rebuild succeeds");
    assert_eq!(view.volatile_data().get_int(&REINFORCED_BONUS), 1);

    artifact
        .update_upgrades(|list| list.with_level(&REINFORCED, 2))
        .expect("positive delta");
    artifact
        .update_upgrades(|list| Ok(list.without_level(&REINFORCED, 3)))
        .expect("removal never fails");

    let view = artifact.view(&fixture.env()).expect("rebuild succeeds");
    assert!(view.volatile_data().is_empty());
    assert_eq!(
        view.persistent_data()
            .get_text(&forge_core::DataKey::from_static("forge:name")),
        "Old Faithful"
    );
}

#[test]
fn restricted_editing_hides_protected_keys() {
    let fixture = Fixture::new();
    let mut artifact = Artifact::new(
        ArtifactData::new(vec![IRON]).with_upgrades(upgrades(&[(TOGGLEABLE, 1)])),
    );
    let env = fixture.env();

    artifact
        .edit_persistent(&env, |data| {
            data.put_int(OWNER, 7);
            data.put_int(USES, 99);
            data.put_bool(ACTIVE, true);
            assert_eq!(data.get_int(&OWNER), 0);
        })
        .expect("rebuild succeeds");

    let view = artifact.view(&env).expect("rebuild succeeds");
    let persistent = view.persistent_data();
    assert_eq!(persistent.get(&OWNER), None);
    assert_eq!(persistent.get(&USES), None);
    assert!(persistent.get_bool(&ACTIVE));
}

// ============================================================================
// Hooks
// ============================================================================

#[test]
fn interaction_patches_persisted_data_and_rebuilds() {
    let fixture = Fixture::new();
    let env = fixture.env();
    let mut artifact = Artifact::new(
        ArtifactData::new(vec![IRON]).with_upgrades(upgrades(&[(TOGGLEABLE, 1), (PLATED, 2)])),
    );

    let view = artifact.view(&env).expect("rebuild succeeds");
    assert_eq!(view.hook(&PROTECTION).invoke(&hit()), 0.0);

    let plain = artifact
        .interact(&env, &Interaction::default())
        .expect("rebuild succeeds");
    assert!(plain.is_pass());
    assert!(!artifact.is_dirty());

    let sneaking = Interaction::new(InteractionFlags::SNEAKING);
    let result = artifact.interact(&env, &sneaking).expect("rebuild succeeds");
    assert!(matches!(result, InteractionResult::Success(_)));
    assert!(artifact.is_dirty());

    let view = artifact.view(&env).expect("rebuild succeeds");
    assert!(view.persistent_data().get_bool(&ACTIVE));
    assert_eq!(view.persistent_data().get_int(&USES), 1);
    assert_eq!(view.hook(&PROTECTION).invoke(&hit()), 4.0);
    assert_eq!(
        view.hook(&TOOLTIP).invoke(&TooltipContext::default()),
        vec!["Toggle: on".to_owned()]
    );
}

#[test]
fn failing_handlers_are_skipped() {
    let fixture = Fixture::new();
    let mut artifact = Artifact::new(
        ArtifactData::new(vec![IRON]).with_upgrades(upgrades(&[(FLAKY, 1), (LIGHTWEIGHT, 2)])),
    );

    let view = artifact.view(&fixture.env()).expect("rebuild succeeds");
    assert_eq!(
        view.hook(&TOOLTIP).invoke(&TooltipContext::default()),
        vec!["Lightweight 2".to_owned()]
    );
    assert_eq!(view.hook(&PROTECTION).invoke(&hit()), 0.0);
}

#[test]
fn failing_handler_does_not_block_first_accepted() {
    let fixture = Fixture::new();
    let mut artifact = Artifact::new(
        ArtifactData::new(vec![IRON]).with_upgrades(upgrades(&[(FLAKY, 1), (TOGGLEABLE, 1)])),
    );

    let view = artifact.view(&fixture.env()).expect("rebuild succeeds");
    assert!(matches!(
        view.hook(&INTERACT)
            .invoke(&Interaction::new(InteractionFlags::SNEAKING)),
        InteractionResult::Success(_)
    ));
    assert!(
        view.hook(&INTERACT)
            .invoke(&Interaction::new(InteractionFlags::empty()))
            .is_pass()
    );
}

#[test]
fn failing_handler_does_not_block_any_true() {
    let fixture = Fixture::new();
    let mut artifact = Artifact::new(
        ArtifactData::new(vec![IRON]).with_upgrades(upgrades(&[(FLAKY, 1), (DURABLE, 2)])),
    );

    let view = artifact.view(&fixture.env()).expect("rebuild succeeds");
    assert!(view.hook(&PREVENT_DURABILITY_LOSS).invoke(&1));
    assert!(view.hook(&CAN_HARVEST).invoke(&HarvestTarget { required_tier: 2 }));
    assert!(!view.hook(&CAN_HARVEST).invoke(&HarvestTarget { required_tier: 3 }));

    let mut flaky_only =
        Artifact::new(ArtifactData::new(vec![IRON]).with_upgrades(upgrades(&[(FLAKY, 1)])));
    let view = flaky_only.view(&fixture.env()).expect("rebuild succeeds");
    assert!(!view.hook(&PREVENT_DURABILITY_LOSS).invoke(&1));
    assert!(!view.hook(&CAN_HARVEST).invoke(&HarvestTarget { required_tier: 0 }));
}

// ============================================================================
// Failure handling
// ============================================================================

#[test]
fn unknown_modules_and_materials_are_dropped() {
    let fixture = Fixture::new();
    let ghost = ModuleId::from_static("oldmod:ghost");
    let data = ArtifactData::new(vec![IRON, MaterialId::from_static("oldmod:unobtainium")])
        .with_upgrades(upgrades(&[(ghost.clone(), 3), (REINFORCED, 1)]));

    let built = rebuild(&data, &fixture.env()).expect("rebuild tolerates stale ids");
    assert!(!built.modules.contains(&ghost));
    assert_eq!(built.modules.level(&REINFORCED), 1);
    assert_eq!(built.stats.base_value(&DURABILITY), 150.0);
}

#[test]
fn strict_config_rejects_unknown_modules_at_parse() {
    let mut fixture = Fixture::new();
    fixture.config.tolerate_unknown_modules = false;
    let data = ArtifactData::new(vec![IRON])
        .with_upgrades(upgrades(&[(ModuleId::from_static("oldmod:ghost"), 1)]));

    let error = rebuild(&data, &fixture.env()).expect_err("strict config");
    assert_eq!(error.phase, RebuildPhase::Parsed);
}

#[test]
fn failed_contribution_keeps_last_ready_state() {
    let fixture = Fixture::with_broken(true);
    let env = fixture.env();
    let mut artifact = Artifact::new(
        ArtifactData::new(vec![IRON]).with_upgrades(upgrades(&[(REINFORCED, 1)])),
    );
    artifact.view(&env).expect("first rebuild succeeds");

    artifact
        .update_upgrades(|list| list.with_level(&BROKEN, 1))
        .expect("positive delta");
    let error = artifact.view(&env).err().expect("broken module fails rebuild");
    assert_eq!(error.phase, RebuildPhase::Contributed);
    assert!(matches!(
        error.failure,
        RebuildFailure::Contribution { ref module, .. } if *module == BROKEN
    ));

    let last = artifact.last_view().expect("previous state kept");
    assert_eq!(last.stats().base_value(&DURABILITY), 150.0);
    assert!(!last.modules().contains(&BROKEN));
    assert!(artifact.is_dirty());
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn rebuilds_are_deterministic() {
    let fixture = Fixture::new();
    let data = ArtifactData::new(vec![FEATHERWOOD, IRON]).with_upgrades(upgrades(&[
        (REINFORCED, 3),
        (DURABLE, 1),
        (LIGHTWEIGHT, 1),
        (TOGGLEABLE, 1),
    ]));

    let first = rebuild(&data, &fixture.env()).expect("rebuild succeeds");
    let second = rebuild(&data, &fixture.env()).expect("rebuild succeeds");

    assert_eq!(first.modules, second.modules);
    assert_eq!(first.volatile, second.volatile);
    assert_eq!(first.persistent, second.persistent);
    assert_eq!(first.stats, second.stats);
    for (id, value) in first.stats.base().floats() {
        let other = second
            .stats
            .base()
            .floats()
            .find(|(other_id, _)| *other_id == id)
            .map(|(_, value)| value)
            .expect("same stats");
        assert_eq!(value.to_bits(), other.to_bits());
    }
}
