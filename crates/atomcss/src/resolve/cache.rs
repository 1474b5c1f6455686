//! Resolution caching across builds.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::emit::{ResolvedRule, RuleOrigin};

/// Cache key for a resolved definition.
///
/// The key combines the definition's name with the version of the context
/// it was resolved against, so a rebuilt context never sees stale entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolutionCacheKey {
    name: String,
    origin: RuleOrigin,
    context_version: u64,
}

impl ResolutionCacheKey {
    /// Create a new cache key.
    pub fn new(name: impl Into<String>, origin: RuleOrigin, context_version: u64) -> Self {
        Self {
            name: name.into(),
            origin,
            context_version,
        }
    }
}

/// Thread-safe cache of successfully resolved definitions.
///
/// Failed resolutions are not cached; they are cheap to repeat and must be
/// reported on every build.
pub struct ResolutionCache {
    /// Cached rules.
    cache: RwLock<HashMap<ResolutionCacheKey, Arc<ResolvedRule>>>,
    /// Maximum cache entries.
    max_size: usize,
}

impl ResolutionCache {
    /// Create a new resolution cache.
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Create a cache with specific capacity.
    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            cache: RwLock::new(HashMap::with_capacity(max_size.min(1024))),
            max_size: max_size.max(1),
        }
    }

    /// Get a cached rule.
    pub fn get(&self, key: &ResolutionCacheKey) -> Option<Arc<ResolvedRule>> {
        self.cache.read().get(key).cloned()
    }

    /// Insert a resolved rule into the cache.
    pub fn insert(&self, key: ResolutionCacheKey, rule: Arc<ResolvedRule>) {
        let mut cache = self.cache.write();
        // Simple eviction: clear half when full
        if cache.len() >= self.max_size {
            evict_half(&mut cache);
        }
        cache.insert(key, rule);
    }

    /// Drop every entry resolved against a context other than `version`.
    pub fn retain_version(&self, version: u64) {
        self.cache.write().retain(|k, _| k.context_version == version);
    }

    /// Invalidate all cached rules.
    pub fn invalidate_all(&self) {
        self.cache.write().clear();
    }

    /// Get the number of cached entries.
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}

/// Evict half the entries (simple LRU approximation).
fn evict_half(cache: &mut HashMap<ResolutionCacheKey, Arc<ResolvedRule>>) {
    let target = cache.len() / 2;
    let keys: Vec<_> = cache.keys().take(target).cloned().collect();
    for key in keys {
        cache.remove(&key);
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResolutionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionCache")
            .field("len", &self.len())
            .field("max_size", &self.max_size)
            .finish()
    }
}
