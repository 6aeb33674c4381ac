// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Interning and redundant-bind elision through the native-driver seam.

use slots_and_signatures::backend::CountingDriver;
use slots_and_signatures::state_cache::{
    CullMode, FillMode, RasterizerStateKey, StateObjectCache,
};
use std::sync::Arc;

fn wireframe_key() -> RasterizerStateKey {
    RasterizerStateKey {
        fill_mode: FillMode::Wireframe,
        cull_mode: CullMode::Back,
        ..RasterizerStateKey::default()
    }
}

#[test]
fn equal_keys_intern_to_the_same_object() {
    let cache = StateObjectCache::new();
    let a = cache.intern(wireframe_key());
    let b = cache.intern(wireframe_key());
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.live_objects(), 1);
}

#[test]
fn rebinding_the_bound_object_issues_no_native_call() {
    let cache = StateObjectCache::new();
    let state = cache.intern(wireframe_key());
    let mut driver = CountingDriver::new();

    cache.bind(&state, &mut driver);
    assert_eq!(driver.state_applies(), 1);

    // Same object again: the driver must not hear about it.
    cache.bind(&state, &mut driver);
    cache.bind(&state, &mut driver);
    assert_eq!(driver.state_applies(), 1);
}

#[test]
fn binding_a_different_object_reaches_the_driver() {
    let cache = StateObjectCache::new();
    let wireframe = cache.intern(wireframe_key());
    let solid = cache.intern(RasterizerStateKey::default());
    let mut driver = CountingDriver::new();

    cache.bind(&wireframe, &mut driver);
    cache.bind(&solid, &mut driver);
    cache.bind(&wireframe, &mut driver);
    assert_eq!(driver.state_applies(), 3);
}

#[test]
fn invalidation_forces_the_next_bind_through() {
    let cache = StateObjectCache::new();
    let state = cache.intern(wireframe_key());
    let mut driver = CountingDriver::new();

    cache.bind(&state, &mut driver);
    cache.invalidate_bound();
    cache.bind(&state, &mut driver);
    assert_eq!(driver.state_applies(), 2);
}

#[test]
fn dropped_objects_are_pruned_and_reinterned_fresh() {
    let cache = StateObjectCache::new();
    let first = cache.intern(wireframe_key());
    drop(first);
    // The weak entry is dead; a later intern must build a new object rather
    // than resurrect it.
    let second = cache.intern(wireframe_key());
    assert_eq!(second.key(), &wireframe_key());
    assert_eq!(cache.live_objects(), 1);
}

#[test]
fn float_fields_participate_in_identity() {
    let cache = StateObjectCache::new();
    let thin = cache.intern(RasterizerStateKey {
        line_width: 1.0,
        ..RasterizerStateKey::default()
    });
    let thick = cache.intern(RasterizerStateKey {
        line_width: 2.0,
        ..RasterizerStateKey::default()
    });
    assert!(!Arc::ptr_eq(&thin, &thick));

    let mut driver = CountingDriver::new();
    cache.bind(&thin, &mut driver);
    cache.bind(&thick, &mut driver);
    assert_eq!(driver.state_applies(), 2);
}
