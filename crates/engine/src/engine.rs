//! Projection engine: memoized `project(class, version)`
//!
//! Projections are memoized in an explicit map keyed by `(class, version)`.
//! "Not yet computed" is therefore a checkable state: [`cached`] returns
//! `None`, and the inclusion resolver turns that into an ordering fault.
//!
//! ## Identity
//!
//! `project` returns the same `Arc` for the same key every time. Computing
//! and publishing a projection happens under one lock acquisition, so no
//! caller can observe a key half-way through being filled.
//!
//! [`cached`]: ProjectionEngine::cached

use crate::projection::Projection;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;
use typeproj_core::{Result, TypeGraph, TypeId};

/// Computes and caches projections over a graph
///
/// # Memory Ordering
///
/// The metric counters use Relaxed ordering: they are observational only and
/// synchronize nothing.
pub struct ProjectionEngine<'g> {
    graph: &'g TypeGraph,
    cache: Mutex<FxHashMap<(TypeId, u32), Arc<Projection>>>,
    computed: AtomicU64,
    hits: AtomicU64,
}

impl<'g> ProjectionEngine<'g> {
    /// Create an engine with an empty cache
    pub fn new(graph: &'g TypeGraph) -> Self {
        ProjectionEngine {
            graph,
            cache: Mutex::new(FxHashMap::default()),
            computed: AtomicU64::new(0),
            hits: AtomicU64::new(0),
        }
    }

    /// The graph being projected
    #[inline]
    pub fn graph(&self) -> &'g TypeGraph {
        self.graph
    }

    /// Projection of `class` at `version`, computed once and then shared
    ///
    /// # Errors
    ///
    /// Returns `UnknownVersion` naming the class and version if the class
    /// does not declare `version`. Nothing is cached on failure.
    pub fn project(&self, class: TypeId, version: u32) -> Result<Arc<Projection>> {
        let mut cache = self.cache.lock();
        if let Some(existing) = cache.get(&(class, version)) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(existing));
        }

        let projection = Arc::new(Projection::build(self.graph, class, version)?);
        cache.insert((class, version), Arc::clone(&projection));
        self.computed.fetch_add(1, Ordering::Relaxed);

        debug!(
            target: "typeproj::projection",
            class = self.graph.type_name(class),
            version,
            members = projection.members().len(),
            "Projection computed"
        );
        Ok(projection)
    }

    /// Project every declared version of `class`, ascending
    pub fn project_all(&self, class: TypeId) -> Result<Vec<Arc<Projection>>> {
        self.graph
            .class(class)?
            .versions()
            .iter()
            .map(|v| self.project(class, v.number()))
            .collect()
    }

    /// Already-computed projection, without computing it
    pub fn cached(&self, class: TypeId, version: u32) -> Option<Arc<Projection>> {
        self.cache.lock().get(&(class, version)).cloned()
    }

    /// Number of cached projections
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Check if nothing has been projected yet
    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    /// Snapshot of the engine's counters
    pub fn metrics(&self) -> EngineMetrics {
        EngineMetrics {
            computed: self.computed.load(Ordering::Relaxed),
            cache_hits: self.hits.load(Ordering::Relaxed),
        }
    }
}

/// Engine counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineMetrics {
    /// Projections built
    pub computed: u64,
    /// `project` calls answered from the cache
    pub cache_hits: u64,
}

impl EngineMetrics {
    /// Total `project` calls that succeeded
    pub fn total_requests(&self) -> u64 {
        self.computed + self.cache_hits
    }
}
