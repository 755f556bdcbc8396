//! Artifacts: serialized inputs, the rebuild pipeline, and read access.
//!
//! An [`Artifact`] owns its [`ArtifactData`] and the state derived from it by
//! the last successful rebuild. Any change to the inputs marks the artifact
//! dirty; the next read re-enters the pipeline from the start.

mod context;
mod data;
mod pipeline;
mod view;

pub use context::RebuildContext;
pub use data::ArtifactData;
pub use pipeline::{
    Built, MaterialSummary, RebuildError, RebuildFailure, RebuildPhase, rebuild,
    summarize_materials,
};
pub use view::ArtifactView;

use tracing::{debug, warn};

use crate::data::RestrictedData;
use crate::env::ForgeEnv;
use crate::error::{ErrorSeverity, ForgeError};
use crate::hooks::{INTERACT, Interaction, InteractionResult};
use crate::keys::MaterialId;
use crate::module::{EntryError, ModuleList};

/// Errors surfaced by [`Artifact`] operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArtifactError {
    #[error(transparent)]
    Rebuild(#[from] RebuildError),

    #[error(transparent)]
    Entry(#[from] EntryError),
}

impl ForgeError for ArtifactError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Rebuild(error) => error.severity(),
            Self::Entry(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Rebuild(error) => error.error_code(),
            Self::Entry(error) => error.error_code(),
        }
    }
}

/// A stateful artifact: serialized data plus its last built state.
///
/// Artifacts are not shared between threads; the thread that owns one does
/// every rebuild and dispatch for it.
#[derive(Clone, Debug)]
pub struct Artifact {
    data: ArtifactData,
    built: Option<Built>,
    dirty: bool,
}

impl Artifact {
    pub fn new(data: ArtifactData) -> Self {
        Self {
            data,
            built: None,
            dirty: true,
        }
    }

    pub fn data(&self) -> &ArtifactData {
        &self.data
    }

    pub fn into_data(self) -> ArtifactData {
        self.data
    }

    /// True if the inputs changed since the last successful rebuild.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// View of the last successful rebuild, without rebuilding.
    pub fn last_view(&self) -> Option<ArtifactView<'_>> {
        self.built.as_ref().map(Built::view)
    }

    /// Rebuilds if needed and returns a view.
    ///
    /// On failure the previous built state (if any) is kept and stays
    /// reachable through [`Artifact::last_view`].
    pub fn view(&mut self, env: &ForgeEnv<'_>) -> Result<ArtifactView<'_>, RebuildError> {
        self.ensure_built(env).map(Built::view)
    }

    /// Forces a rebuild.
    pub fn rebuild(&mut self, env: &ForgeEnv<'_>) -> Result<(), RebuildError> {
        self.dirty = true;
        self.ensure_built(env).map(|_| ())
    }

    pub fn set_materials(&mut self, materials: Vec<MaterialId>) {
        self.data.materials = materials;
        self.dirty = true;
    }

    /// Replaces the upgrade list with the result of `update`.
    pub fn update_upgrades(
        &mut self,
        update: impl FnOnce(&ModuleList) -> Result<ModuleList, EntryError>,
    ) -> Result<(), ArtifactError> {
        self.data.upgrades = update(&self.data.upgrades)?;
        self.dirty = true;
        Ok(())
    }

    /// Dispatches a player interaction.
    ///
    /// A successful result's data patch is applied to the persisted store and
    /// the artifact is marked for a full rebuild on next read.
    pub fn interact(
        &mut self,
        env: &ForgeEnv<'_>,
        interaction: &Interaction,
    ) -> Result<InteractionResult, ArtifactError> {
        let result = self.view(env)?.hook(&INTERACT).invoke(interaction);
        if let InteractionResult::Success(patch) = &result {
            if !patch.is_empty() {
                patch.apply(&mut self.data.persistent);
                self.dirty = true;
                debug!(
                    target: "forge::artifact",
                    edits = patch.edits().len(),
                    "interaction patched persisted data"
                );
            }
        }
        Ok(result)
    }

    /// Edits the persisted store through a [`RestrictedData`] that hides the
    /// configured protected keys and those declared by installed modules.
    pub fn edit_persistent<R>(
        &mut self,
        env: &ForgeEnv<'_>,
        edit: impl FnOnce(&mut RestrictedData<'_>) -> R,
    ) -> Result<R, ArtifactError> {
        let mut protected = env.config().protected_keys.clone();
        for entry in &self.ensure_built(env)?.modules {
            match env.modules().get(entry.id()) {
                Some(module) => protected.extend(module.protected_keys().iter().cloned()),
                None => warn!(
                    target: "forge::artifact",
                    module = %entry.id(),
                    "module vanished from registry while editing"
                ),
            }
        }

        let result = edit(&mut RestrictedData::new(
            &mut self.data.persistent,
            &protected,
        ));
        self.dirty = true;
        Ok(result)
    }

    fn ensure_built(&mut self, env: &ForgeEnv<'_>) -> Result<&Built, RebuildError> {
        match self.built.take() {
            Some(built) if !self.dirty => Ok(self.built.insert(built)),
            previous => match rebuild(&self.data, env) {
                Ok(built) => {
                    self.data.persistent = built.persistent.clone();
                    self.dirty = false;
                    Ok(self.built.insert(built))
                }
                Err(error) => {
                    self.built = previous;
                    Err(error)
                }
            },
        }
    }
}
