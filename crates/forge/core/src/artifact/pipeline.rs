//! The rebuild pipeline.
//!
//! ```text
//! Parsed → DataReset → Contributed → HooksBuilt → StatsFinalized → Ready
//! ```
//!
//! A rebuild is a pure function of the artifact's serialized data and the
//! environment. It either produces a complete [`Built`] state or an error; the
//! caller keeps its previous state on failure.

use tracing::{debug, error, warn};

use super::context::RebuildContext;
use super::data::ArtifactData;
use super::view::ArtifactView;
use crate::data::{DataView, ModData};
use crate::env::{ForgeEnv, MaterialDefinition};
use crate::error::{ErrorSeverity, ForgeError};
use crate::hooks::{HookError, HookMap, STAT_MULTIPLIER};
use crate::keys::{MaterialId, ModuleId};
use crate::module::{EntryError, ModuleList, ModuleListBuilder};
use crate::stats::{BaseStats, MultiplierBuilder, StatsBuilder, StatsSnapshot};

/// Stage of the rebuild pipeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RebuildPhase {
    /// Module entries and materials resolved from the serialized form.
    Parsed,
    /// Volatile data cleared; persisted data copied.
    DataReset,
    /// Every module contributed data and base stats.
    Contributed,
    /// Hook map built from the final entry list.
    HooksBuilt,
    /// Multiplier layer computed.
    StatsFinalized,
    /// Queryable.
    Ready,
}

/// What went wrong inside a phase.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RebuildFailure {
    #[error(transparent)]
    Entries(#[from] EntryError),

    #[error("module {module} failed to contribute: {source}")]
    Contribution {
        module: ModuleId,
        #[source]
        source: HookError,
    },
}

/// A failed rebuild, tagged with the phase that failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("rebuild {phase} failed: {failure}")]
pub struct RebuildError {
    pub phase: RebuildPhase,
    #[source]
    pub failure: RebuildFailure,
}

impl RebuildError {
    pub fn new(phase: RebuildPhase, failure: impl Into<RebuildFailure>) -> Self {
        Self {
            phase,
            failure: failure.into(),
        }
    }
}

impl ForgeError for RebuildError {
    fn severity(&self) -> ErrorSeverity {
        match &self.failure {
            RebuildFailure::Entries(error) => error.severity(),
            RebuildFailure::Contribution { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match &self.failure {
            RebuildFailure::Entries(error) => error.error_code(),
            RebuildFailure::Contribution { .. } => "REBUILD_CONTRIBUTION_FAILED",
        }
    }
}

/// Everything derived by a successful rebuild.
#[derive(Clone, Debug)]
pub struct Built {
    pub modules: ModuleList,
    pub hooks: HookMap,
    pub stats: StatsSnapshot,
    pub persistent: ModData,
    pub volatile: ModData,
}

impl Built {
    pub fn view(&self) -> ArtifactView<'_> {
        ArtifactView::new(
            &self.modules,
            &self.hooks,
            &self.stats,
            &self.persistent,
            &self.volatile,
        )
    }
}

/// Runs the full pipeline for `data`.
///
/// Identical inputs always produce identical volatile data and stats.
pub fn rebuild(data: &ArtifactData, env: &ForgeEnv<'_>) -> Result<Built, RebuildError> {
    // Parsed
    let materials = resolve_materials(&data.materials, env);
    let mut entries = ModuleListBuilder::new();
    for material in &materials {
        entries.extend(&material.traits);
    }
    entries.extend(&data.upgrades);
    let modules = entries
        .build(env.modules(), env.config())
        .map_err(|error| RebuildError::new(RebuildPhase::Parsed, error))?;
    debug!(
        target: "forge::rebuild",
        phase = %RebuildPhase::Parsed,
        materials = materials.len(),
        modules = modules.len(),
        "resolved module entries"
    );

    // DataReset
    let mut persistent = data.persistent.clone();
    let mut volatile = ModData::new();
    debug!(
        target: "forge::rebuild",
        phase = %RebuildPhase::DataReset,
        persistent = persistent.len(),
        "data stores reset"
    );

    // Contributed
    let mut stats = StatsBuilder::new();
    add_material_stats(&materials, env, &mut stats);
    {
        let mut context = RebuildContext::new(
            &modules,
            &mut persistent,
            &mut volatile,
            &mut stats,
            env.stats(),
        );
        for entry in &modules {
            let Some(module) = env.modules().get(entry.id()) else {
                continue;
            };
            if !module.condition().test(&context.condition_context(), entry) {
                continue;
            }
            module.contribute(&mut context, entry).map_err(|source| {
                error!(
                    target: "forge::rebuild",
                    module = %entry.id(),
                    error = %source,
                    "module contribution failed, aborting rebuild"
                );
                RebuildError::new(
                    RebuildPhase::Contributed,
                    RebuildFailure::Contribution {
                        module: entry.id().clone(),
                        source,
                    },
                )
            })?;
        }
    }
    debug!(
        target: "forge::rebuild",
        phase = %RebuildPhase::Contributed,
        volatile = volatile.len(),
        "contributions applied"
    );

    // HooksBuilt
    let hooks = HookMap::build(&modules, env.modules());
    debug!(
        target: "forge::rebuild",
        phase = %RebuildPhase::HooksBuilt,
        tokens = hooks.tokens().count(),
        "hook map built"
    );

    // StatsFinalized
    let base = stats.build(env.stats());
    let interim = StatsSnapshot::base_only(base.clone());
    let mut multipliers = MultiplierBuilder::new();
    {
        let view = ArtifactView::new(&modules, &hooks, &interim, &persistent, &volatile);
        let dispatch = view.hook(&STAT_MULTIPLIER);
        if !dispatch.is_empty() {
            for stat in env.stats().floats() {
                multipliers.set(stat, dispatch.invoke(stat));
            }
        }
    }
    let stats = StatsSnapshot::new(base, multipliers.build());
    debug!(
        target: "forge::rebuild",
        phase = %RebuildPhase::StatsFinalized,
        multipliers = stats.multipliers().len(),
        "stats finalized"
    );

    Ok(Built {
        modules,
        hooks,
        stats,
        persistent,
        volatile,
    })
}

/// Base stats and granted traits of a material list alone, before any module
/// contributes.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialSummary {
    pub base: BaseStats,
    pub traits: ModuleList,
}

/// Computes the material-only part of a rebuild. Unknown materials and
/// stats are skipped exactly as [`rebuild`] skips them.
pub fn summarize_materials(materials: &[MaterialId], env: &ForgeEnv<'_>) -> MaterialSummary {
    let materials = resolve_materials(materials, env);
    let mut stats = StatsBuilder::new();
    add_material_stats(&materials, env, &mut stats);
    MaterialSummary {
        base: stats.build(env.stats()),
        traits: ModuleList::merged(
            materials
                .iter()
                .flat_map(|material| material.traits.iter().cloned()),
        ),
    }
}

fn resolve_materials<'e>(ids: &[MaterialId], env: &ForgeEnv<'e>) -> Vec<&'e MaterialDefinition> {
    ids.iter()
        .filter_map(|id| {
            let material = env.materials().material(id);
            if material.is_none() {
                warn!(
                    target: "forge::rebuild",
                    material = %id,
                    "dropping unknown material"
                );
            }
            material
        })
        .collect()
}

fn add_material_stats(
    materials: &[&MaterialDefinition],
    env: &ForgeEnv<'_>,
    stats: &mut StatsBuilder,
) {
    for material in materials {
        for contribution in &material.stats {
            match env.stats().float(&contribution.stat) {
                Some(stat) => {
                    stats.add(stat, contribution.bonus);
                }
                None => warn!(
                    target: "forge::rebuild",
                    material = %material.id,
                    stat = %contribution.stat,
                    "ignoring contribution to unknown float stat"
                ),
            }
        }
        for (id, tier) in &material.tiers {
            match env.stats().tier(id) {
                Some(stat) => {
                    stats.raise_tier(stat, *tier);
                }
                None => warn!(
                    target: "forge::rebuild",
                    material = %material.id,
                    stat = %id,
                    "ignoring contribution to unknown tier stat"
                ),
            }
        }
    }
}
