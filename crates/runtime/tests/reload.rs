use std::path::Path;
use std::thread;

use forge_content::ContentFactory;
use forge_core::stats::key::DURABILITY;
use forge_core::{Artifact, ArtifactData, MaterialId, ModuleEntry, ModuleId, ModuleList};
use forge_runtime::{ContentHandle, HostedArtifact, RuntimeConfig, RuntimeError};
use tempfile::TempDir;

const IRON: MaterialId = MaterialId::from_static("forge:iron");
const REINFORCED: ModuleId = ModuleId::from_static("forge:reinforced");

fn write_content(dir: &Path, per_level: f32) {
    std::fs::write(
        dir.join("modules.ron"),
        format!(
            r#"(modules: [(
                id: "forge:reinforced",
                behaviors: [StatBonus(stat: "forge:durability", value: (each_level: {per_level:.1}))],
            )])"#
        ),
    )
    .unwrap();
    std::fs::write(
        dir.join("materials.ron"),
        r#"(materials: [(id: "forge:iron", stats: [(stat: "forge:durability", bonus: Flat(100.0))])])"#,
    )
    .unwrap();
}

fn pickaxe() -> Artifact {
    Artifact::new(
        ArtifactData::new(vec![IRON])
            .with_upgrades(ModuleList::merged([ModuleEntry::new(REINFORCED, 2)])),
    )
}

fn setup(per_level: f32) -> (TempDir, ContentHandle) {
    let temp = TempDir::new().unwrap();
    write_content(temp.path(), per_level);
    let handle = ContentHandle::load(&RuntimeConfig::new(temp.path())).unwrap();
    (temp, handle)
}

#[test]
fn reload_publishes_a_new_generation() {
    let (temp, handle) = setup(10.0);
    let before = handle.snapshot();
    assert_eq!(before.generation(), 0);

    write_content(temp.path(), 50.0);
    assert_eq!(handle.reload().unwrap(), 1);

    let after = handle.snapshot();
    assert_eq!(after.generation(), 1);
    assert_eq!(handle.generation(), 1);

    // old snapshots still see the old content
    let mut old = pickaxe();
    assert_eq!(old.view(&before.env()).unwrap().stats().get(&DURABILITY), 120.0);
    let mut new = pickaxe();
    assert_eq!(new.view(&after.env()).unwrap().stats().get(&DURABILITY), 200.0);
}

#[test]
fn hosted_artifacts_rebuild_after_reload() {
    let (temp, handle) = setup(10.0);
    let mut hosted = HostedArtifact::new(pickaxe());

    let snapshot = handle.snapshot();
    assert_eq!(hosted.view(&snapshot).unwrap().stats().get(&DURABILITY), 120.0);
    assert_eq!(hosted.generation(), Some(0));

    write_content(temp.path(), 25.0);
    handle.reload().unwrap();
    let snapshot = handle.snapshot();
    assert_eq!(hosted.view(&snapshot).unwrap().stats().get(&DURABILITY), 150.0);
    assert_eq!(hosted.generation(), Some(1));
}

#[test]
fn failed_reload_keeps_current_content() {
    let (temp, handle) = setup(10.0);
    std::fs::write(temp.path().join("modules.ron"), "(modules: [").unwrap();

    let error = handle.reload().unwrap_err();
    assert!(matches!(error, RuntimeError::Load { .. }));
    assert_eq!(handle.generation(), 0);
    assert_eq!(handle.snapshot().content().registry.len(), 1);
}

#[test]
fn handles_without_a_directory_cannot_reload() {
    let temp = TempDir::new().unwrap();
    write_content(temp.path(), 10.0);
    let content = ContentFactory::new(temp.path()).load().unwrap();
    let handle = ContentHandle::new(content, false);

    assert!(matches!(handle.reload(), Err(RuntimeError::NoContentDir)));
    assert!(handle.cache().is_none());
}

#[test]
fn material_summaries_are_cached_and_invalidated() {
    let (temp, handle) = setup(10.0);
    let snapshot = handle.snapshot();

    let first = handle.material_summary(&snapshot, &[IRON]);
    let second = handle.material_summary(&snapshot, &[IRON]);
    assert_eq!(first, second);
    let stats = handle.cache().unwrap().stats();
    assert_eq!((stats.hits, stats.misses), (1, 1));

    write_content(temp.path(), 10.0);
    handle.reload().unwrap();
    assert!(handle.cache().unwrap().is_empty());
}

#[test]
fn concurrent_readers_see_whole_snapshots() {
    let (temp, handle) = setup(10.0);

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..50 {
                    let snapshot = handle.snapshot();
                    let mut artifact = HostedArtifact::new(pickaxe());
                    let durability = artifact
                        .view(&snapshot)
                        .unwrap()
                        .stats()
                        .get(&DURABILITY);
                    // generation 0 has 10 per level, later ones 50
                    let expected = if snapshot.generation() == 0 { 120.0 } else { 200.0 };
                    assert_eq!(durability, expected);

                    let summary = handle.material_summary(&snapshot, &[IRON]);
                    assert_eq!(summary.base.float(&DURABILITY), 100.0);
                }
            });
        }

        scope.spawn(|| {
            write_content(temp.path(), 50.0);
            for _ in 0..5 {
                handle.reload().unwrap();
            }
        });
    });

    assert_eq!(handle.generation(), 5);
}
