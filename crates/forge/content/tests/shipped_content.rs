use std::path::{Path, PathBuf};

use forge_content::{ArtifactLoader, ContentFactory};
use forge_core::data::DataView;
use forge_core::hooks::{
    DamageKind, DamageSource, Interaction, InteractionFlags, PROTECTION, TOOLTIP, TooltipContext,
};
use forge_core::stats::key::{ATTACK_SPEED, DURABILITY, HARVEST_TIER};
use forge_core::{Artifact, DataKey, EngineConfig, ModuleId, StatId};
use tempfile::TempDir;

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn hit() -> DamageSource {
    DamageSource {
        kind: DamageKind::Generic,
        amount: 5.0,
    }
}

#[test]
fn shipped_content_loads_cleanly() {
    let content = ContentFactory::new(data_dir()).load().unwrap();

    assert!(content.issues().is_empty(), "{:?}", content.issues());
    assert_eq!(content.registry.len(), 10);
    assert_eq!(content.materials.len(), 3);
    assert!(content.stats.float(&StatId::from_static("forge:reach")).is_some());
    assert_eq!(content.config.max_level, 50);
}

#[test]
fn sample_pickaxe_rebuilds() {
    let content = ContentFactory::new(data_dir()).load().unwrap();
    let env = content.env();
    let data = ArtifactLoader::load(&data_dir().join("artifacts/iron_pickaxe.ron")).unwrap();
    let mut artifact = Artifact::new(data);

    let view = artifact.view(&env).unwrap();
    let ids: Vec<_> = view
        .modules()
        .iter()
        .map(|entry| entry.id().as_str().to_owned())
        .collect();
    assert_eq!(
        ids,
        vec![
            "forge:reinforced",
            "forge:durable",
            "forge:toggleable",
            "forge:lightweight",
            "forge:plated",
            "forge:tally",
        ]
    );

    // iron 100 + featherwood 20 + reinforced 2 × 50, then × 1.5
    assert_eq!(view.stats().base_value(&DURABILITY), 220.0);
    assert_eq!(view.stats().get(&DURABILITY), 330.0);
    assert!((view.stats().get(&ATTACK_SPEED) - 1.1).abs() < 1e-6);
    assert_eq!(view.stats().tier(&HARVEST_TIER), 2);

    assert!(view.volatile_data().get_bool(&DataKey::from_static("forge:reinforced")));
    assert!(
        view.persistent_data()
            .get(&DataKey::from_static("forge:kills"))
            .is_some()
    );
    assert_eq!(
        view.hook(&TOOLTIP).invoke(&TooltipContext::default()),
        vec!["Reinforced 2", "active: on", "Lightweight 1"]
    );
    assert!(view.hook(&PROTECTION).invoke(&hit()) > 0.0);

    artifact
        .interact(&env, &Interaction::new(InteractionFlags::SNEAKING))
        .unwrap();
    let view = artifact.view(&env).unwrap();
    assert!(!view.persistent_data().get_bool(&DataKey::from_static("forge:active")));
    assert_eq!(view.hook(&PROTECTION).invoke(&hit()), 0.0);
}

#[test]
fn protected_keys_come_from_config_and_modules() {
    let content = ContentFactory::new(data_dir()).load().unwrap();
    let env = content.env();
    let data = ArtifactLoader::load(&data_dir().join("artifacts/iron_pickaxe.ron")).unwrap();
    let mut artifact = Artifact::new(data);

    let visible = artifact
        .edit_persistent(&env, |data| {
            ["forge:owner", "forge:kills", "forge:active"]
                .into_iter()
                .filter(|key| data.get(&DataKey::from_static(*key)).is_some())
                .count()
        })
        .unwrap();
    assert_eq!(visible, 0);
}

#[test]
fn optional_files_fall_back_to_defaults() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("modules.ron"),
        r#"(modules: [(id: "forge:plain")])"#,
    )
    .unwrap();
    std::fs::write(temp.path().join("materials.ron"), "(materials: [])").unwrap();

    let content = ContentFactory::new(temp.path()).load().unwrap();
    assert_eq!(content.config, EngineConfig::default());
    assert_eq!(content.stats.len(), forge_core::stats::key::builtin().len());
    assert!(content.registry.contains(&ModuleId::from_static("forge:plain")));
}

#[test]
fn missing_modules_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let error = ContentFactory::new(temp.path()).load().unwrap_err();
    assert!(error.to_string().contains("modules.ron"));
}

#[test]
fn duplicate_modules_fail_registry_build() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("modules.ron"),
        r#"(modules: [(id: "forge:twin"), (id: "twin")])"#,
    )
    .unwrap();
    std::fs::write(temp.path().join("materials.ron"), "(materials: [])").unwrap();

    assert!(ContentFactory::new(temp.path()).load().is_err());
}
