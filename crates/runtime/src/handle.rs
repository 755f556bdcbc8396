//! The shared content handle.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use forge_content::{Content, ContentFactory};
use forge_core::artifact::MaterialSummary;
use forge_core::{Artifact, ArtifactView, ForgeEnv, MaterialId};
use tracing::{debug, info};

use crate::cache::StatCache;
use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};

/// A content bundle pinned to the generation it was published under.
///
/// Holding a snapshot keeps that content alive even after a reload; the
/// snapshot never observes a partially replaced bundle.
#[derive(Clone, Debug)]
pub struct Snapshot {
    content: Arc<Content>,
    generation: u64,
}

impl Snapshot {
    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn env(&self) -> ForgeEnv<'_> {
        self.content.env()
    }
}

/// Owner of the current content snapshot.
///
/// Reads take a short read lock to clone the `Arc`; reloads build the new
/// bundle outside the lock and swap it in one write.
#[derive(Debug)]
pub struct ContentHandle {
    current: RwLock<Snapshot>,
    generation: AtomicU64,
    cache: Option<StatCache>,
    content_dir: Option<PathBuf>,
}

impl ContentHandle {
    /// Wraps already loaded content. Such a handle cannot [`reload`](Self::reload).
    pub fn new(content: Content, cache: bool) -> Self {
        Self {
            current: RwLock::new(Snapshot {
                content: Arc::new(content),
                generation: 0,
            }),
            generation: AtomicU64::new(0),
            cache: cache.then(StatCache::new),
            content_dir: None,
        }
    }

    /// Loads content from the configured directory.
    pub fn load(config: &RuntimeConfig) -> Result<Self> {
        let content = load_content(&config.content_dir)?;
        let mut handle = Self::new(content, config.cache);
        handle.content_dir = Some(config.content_dir.clone());
        Ok(handle)
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn cache(&self) -> Option<&StatCache> {
        self.cache.as_ref()
    }

    /// Publishes new content and returns its generation. Cached results for
    /// older generations are dropped.
    pub fn replace(&self, content: Content) -> u64 {
        let content = Arc::new(content);
        let generation = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
            *current = Snapshot {
                content,
                generation,
            };
            generation
        };

        if let Some(cache) = &self.cache {
            cache.retain_generation(generation);
        }
        info!(target: "forge::runtime", generation, "content replaced");
        generation
    }

    /// Reloads from the directory this handle was loaded from.
    ///
    /// On failure the current snapshot stays published.
    pub fn reload(&self) -> Result<u64> {
        let dir = self.content_dir.as_ref().ok_or(RuntimeError::NoContentDir)?;
        let content = load_content(dir)?;
        Ok(self.replace(content))
    }

    /// Material summary against `snapshot`, memoized when caching is on.
    pub fn material_summary(
        &self,
        snapshot: &Snapshot,
        materials: &[MaterialId],
    ) -> Arc<MaterialSummary> {
        let env = snapshot.env();
        match &self.cache {
            Some(cache) => cache.summary(snapshot.generation, materials, &env),
            None => Arc::new(forge_core::artifact::summarize_materials(materials, &env)),
        }
    }
}

/// An artifact paired with the content generation it was last built against.
///
/// Artifacts outlive reloads; this wrapper forces one full rebuild the first
/// time it is read against a newer snapshot.
#[derive(Clone, Debug)]
pub struct HostedArtifact {
    artifact: Artifact,
    generation: Option<u64>,
}

impl HostedArtifact {
    pub fn new(artifact: Artifact) -> Self {
        Self {
            artifact,
            generation: None,
        }
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    /// Mutable access for edits; the artifact tracks its own dirtiness.
    pub fn artifact_mut(&mut self) -> &mut Artifact {
        &mut self.artifact
    }

    pub fn into_inner(self) -> Artifact {
        self.artifact
    }

    /// Generation of the last successful rebuild through this wrapper.
    pub fn generation(&self) -> Option<u64> {
        self.generation
    }

    /// Rebuilds as needed against `snapshot` and returns a view.
    pub fn view(&mut self, snapshot: &Snapshot) -> Result<ArtifactView<'_>> {
        let env = snapshot.env();
        if self.generation != Some(snapshot.generation()) {
            self.artifact.rebuild(&env)?;
            self.generation = Some(snapshot.generation());
        }
        Ok(self.artifact.view(&env)?)
    }
}

fn load_content(dir: &std::path::Path) -> Result<Content> {
    debug!(target: "forge::runtime", dir = %dir.display(), "loading content");
    ContentFactory::new(dir)
        .load()
        .map_err(|source| RuntimeError::Load {
            dir: dir.to_path_buf(),
            source,
        })
}
