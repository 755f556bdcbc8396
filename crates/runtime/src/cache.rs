//! Memoized material summaries.
//!
//! Summarizing a material list resolves every material, folds its stat
//! contributions through the catalog, and merges its traits. Hosts that
//! rebuild many artifacts from the same few material combinations ask for the
//! same summaries repeatedly, so they are cached per content generation.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use forge_core::artifact::{MaterialSummary, summarize_materials};
use forge_core::{ForgeEnv, MaterialId};
use tracing::trace;

/// Hit/miss counters since the last clear.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Concurrent cache keyed by `(generation, material list)`.
///
/// The generation in the key keeps a reader that still holds an old
/// snapshot from publishing its result under the new content. Results for
/// generations older than the last retained one are computed but not stored.
#[derive(Debug, Default)]
pub struct StatCache {
    entries: DashMap<(u64, Vec<MaterialId>), Arc<MaterialSummary>>,
    current: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl StatCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached summary or computes and stores it.
    pub fn summary(
        &self,
        generation: u64,
        materials: &[MaterialId],
        env: &ForgeEnv<'_>,
    ) -> Arc<MaterialSummary> {
        let key = (generation, materials.to_vec());
        if let Some(summary) = self.entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(summary.value());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!(
            target: "forge::runtime::cache",
            generation,
            materials = materials.len(),
            "computing material summary"
        );
        let summary = Arc::new(summarize_materials(materials, env));
        if generation < self.current.load(Ordering::Acquire) {
            return summary;
        }
        let summary = Arc::clone(self.entries.entry(key.clone()).or_insert(summary).value());
        // a reload may have retained past this generation while we computed
        if generation < self.current.load(Ordering::Acquire) {
            self.entries.remove(&key);
        }
        summary
    }

    /// Drops every entry whose generation is older than `current` and stops
    /// storing results for those generations.
    pub fn retain_generation(&self, current: u64) {
        self.current.fetch_max(current, Ordering::AcqRel);
        self.entries.retain(|(generation, _), _| *generation >= current);
    }

    pub fn clear(&self) {
        self.entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_core::stats::Bonus;
    use forge_core::stats::key::DURABILITY;
    use forge_core::{
        EngineConfig, MaterialCatalog, MaterialDefinition, ModuleRegistry, StatCatalog,
    };

    const IRON: MaterialId = MaterialId::from_static("forge:iron");

    #[test]
    fn caches_per_generation() {
        let registry = ModuleRegistry::default();
        let materials: MaterialCatalog =
            [MaterialDefinition::new(IRON).with_stat(DURABILITY.id().clone(), Bonus::Flat(80.0))]
                .into_iter()
                .collect();
        let stats = StatCatalog::builtin();
        let config = EngineConfig::default();
        let env = ForgeEnv::new(&registry, &materials, &stats, &config);
        let cache = StatCache::new();

        let first = cache.summary(1, &[IRON], &env);
        let second = cache.summary(1, &[IRON], &env);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.base.float(&DURABILITY), 80.0);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );

        cache.summary(2, &[IRON], &env);
        assert_eq!(cache.len(), 2);
        cache.retain_generation(2);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn stale_generations_are_not_stored() {
        let registry = ModuleRegistry::default();
        let materials: MaterialCatalog =
            [MaterialDefinition::new(IRON).with_stat(DURABILITY.id().clone(), Bonus::Flat(80.0))]
                .into_iter()
                .collect();
        let stats = StatCatalog::builtin();
        let config = EngineConfig::default();
        let env = ForgeEnv::new(&registry, &materials, &stats, &config);
        let cache = StatCache::new();

        cache.retain_generation(3);
        let stale = cache.summary(2, &[IRON], &env);
        assert_eq!(stale.base.float(&DURABILITY), 80.0);
        assert!(cache.is_empty());

        cache.summary(3, &[IRON], &env);
        assert_eq!(cache.len(), 1);
    }
}
