// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Fixed-function state deduplication and redundant-bind elision.
//!
//! Pipelines that agree on every rasterizer toggle share one
//! [`CachedStateObject`]; the cache keys them with a strict weak ordering over
//! a fixed field sequence so ordered storage gives O(log n) interning. Binding
//! an already-bound object issues zero native calls - that elision is the
//! primary performance contract of this module.
//!
//! Lifetime: interned objects are shared via [`std::sync::Arc`]; the cache holds
//! only [`std::sync::Weak`] entries, so an object dies with the last pipeline
//! referencing it and dead entries are pruned lazily at interning time.

use crate::backend::NativeDriver;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, Weak};

/// How polygons are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FillMode {
    /// Filled polygons.
    Solid,
    /// Edges only.
    Wireframe,
    /// Vertices only.
    Points,
}

/// Which faces are discarded by culling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CullMode {
    /// No culling.
    None,
    /// Cull front faces.
    Front,
    /// Cull back faces.
    Back,
}

/// Depth-bias terms. All three together decide whether biasing is enabled:
/// the clamp alone is meaningless, so only slope and constant factors count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthBias {
    /// Slope-scaled factor.
    pub slope_factor: f32,
    /// Constant factor.
    pub constant_factor: f32,
    /// Bias clamp.
    pub clamp: f32,
}

impl DepthBias {
    /// Whether these terms enable biasing at all.
    pub fn enabled(&self) -> bool {
        self.slope_factor != 0.0 || self.constant_factor != 0.0
    }
}

/// Canonical tuple of every rasterizer-family fixed-function toggle.
///
/// Two keys compare equal iff every field matches. The ordering is a strict
/// weak ordering, lexicographic over a fixed field sequence, with float fields
/// compared by [`f32::total_cmp`].
#[derive(Debug, Clone)]
pub struct RasterizerStateKey {
    /// Polygon fill mode.
    pub fill_mode: FillMode,
    /// Face culling mode.
    pub cull_mode: CullMode,
    /// Counter-clockwise front faces.
    pub front_ccw: bool,
    /// Discard all rasterizer output.
    pub discard: bool,
    /// Scissor test toggle.
    pub scissor_test: bool,
    /// Depth clamping toggle.
    pub depth_clamp: bool,
    /// Multisampling toggle.
    pub multisample: bool,
    /// Multisample coverage mask.
    pub sample_mask: u32,
    /// Anti-aliased line toggle.
    pub line_smooth: bool,
    /// Rasterized line width.
    pub line_width: f32,
    /// Depth-bias terms.
    pub depth_bias: DepthBias,
}

impl Default for RasterizerStateKey {
    fn default() -> Self {
        RasterizerStateKey {
            fill_mode: FillMode::Solid,
            cull_mode: CullMode::None,
            front_ccw: true,
            discard: false,
            scissor_test: false,
            depth_clamp: false,
            multisample: false,
            sample_mask: u32::MAX,
            line_smooth: false,
            line_width: 1.0,
            depth_bias: DepthBias {
                slope_factor: 0.0,
                constant_factor: 0.0,
                clamp: 0.0,
            },
        }
    }
}

impl Ord for RasterizerStateKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // Fixed field sequence; equality must mean identical Bind behavior.
        self.fill_mode
            .cmp(&other.fill_mode)
            .then(self.cull_mode.cmp(&other.cull_mode))
            .then(self.front_ccw.cmp(&other.front_ccw))
            .then(self.discard.cmp(&other.discard))
            .then(self.scissor_test.cmp(&other.scissor_test))
            .then(self.depth_clamp.cmp(&other.depth_clamp))
            .then(self.multisample.cmp(&other.multisample))
            .then(self.sample_mask.cmp(&other.sample_mask))
            .then(self.line_smooth.cmp(&other.line_smooth))
            .then(self.line_width.total_cmp(&other.line_width))
            .then(
                self.depth_bias
                    .slope_factor
                    .total_cmp(&other.depth_bias.slope_factor),
            )
            .then(
                self.depth_bias
                    .constant_factor
                    .total_cmp(&other.depth_bias.constant_factor),
            )
            .then(self.depth_bias.clamp.total_cmp(&other.depth_bias.clamp))
    }
}

impl PartialOrd for RasterizerStateKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RasterizerStateKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RasterizerStateKey {}

/// One interned fixed-function state configuration.
///
/// Shared by every pipeline whose key compares equal; dies with the last of
/// them.
#[derive(Debug)]
pub struct CachedStateObject {
    key: RasterizerStateKey,
}

impl CachedStateObject {
    /// The key this object was interned under.
    pub fn key(&self) -> &RasterizerStateKey {
        &self.key
    }
}

/// Interning cache plus currently-bound tracking for the rasterizer family.
///
/// Interning takes the cache's lock, so pipelines may be created from several
/// threads. Interned objects are read-only and safe to read concurrently.
#[derive(Debug, Default)]
pub struct StateObjectCache {
    entries: Mutex<BTreeMap<RasterizerStateKey, Weak<CachedStateObject>>>,
    bound: Mutex<Option<Arc<CachedStateObject>>>,
}

impl StateObjectCache {
    /// An empty cache with nothing bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared object for `key`, constructing one on first sight.
    ///
    /// Equal keys always return the same object for as long as any pipeline
    /// still references it.
    pub fn intern(&self, key: RasterizerStateKey) -> Arc<CachedStateObject> {
        let mut entries = self.entries.lock().expect("state cache poisoned");
        if let Some(existing) = entries.get(&key).and_then(Weak::upgrade) {
            return existing;
        }
        // Miss: prune entries whose last pipeline is gone, then intern.
        entries.retain(|_, weak| weak.strong_count() > 0);
        logwise::trace_sync!(
            "interning new rasterizer state, cache holds {count} live entries",
            count = logwise::privacy::LogIt(entries.len())
        );
        let object = Arc::new(CachedStateObject { key: key.clone() });
        entries.insert(key, Arc::downgrade(&object));
        object
    }

    /// Makes `object` the bound state for its family.
    ///
    /// Short-circuits with zero native calls if `object` is already bound.
    pub fn bind(&self, object: &Arc<CachedStateObject>, driver: &mut dyn NativeDriver) {
        let mut bound = self.bound.lock().expect("state cache poisoned");
        if let Some(current) = bound.as_ref()
            && Arc::ptr_eq(current, object)
        {
            return;
        }
        driver.apply_rasterizer_state(&object.key);
        *bound = Some(object.clone());
    }

    /// Forgets what is bound, forcing the next [`bind`](Self::bind) to reapply.
    ///
    /// For use after something outside the cache has clobbered driver state,
    /// such as a context reset.
    pub fn invalidate_bound(&self) {
        *self.bound.lock().expect("state cache poisoned") = None;
    }

    /// Number of interned objects still referenced by some pipeline.
    pub fn live_objects(&self) -> usize {
        self.entries
            .lock()
            .expect("state cache poisoned")
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}
