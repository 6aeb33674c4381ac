// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Device capability set consulted at layout-translation time.
//!
//! The device/instance bootstrap collaborator supplies a validated
//! [`Capabilities`] value once, at device initialization. Translators consult
//! it before doing any real work so an unsupported layout fails fast with a
//! [`CapabilityError`](crate::backend::CapabilityError) instead of a deeper
//! native-driver error.

/// What the selected native device can do, as far as binding is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Maximum number of addressable binding slot declarations per layout.
    pub max_binding_slots: u32,
    /// Maximum number of distinct shader stages one layout may reference.
    pub max_stages_per_layout: u32,
    /// Whether the compute stage exists at all.
    pub supports_compute_stage: bool,
    /// Whether storage (read-write) buffers and textures are available.
    pub supports_storage_buffers: bool,
    /// Whether separate sampler objects are available.
    pub supports_samplers: bool,
}

impl Capabilities {
    /// A capability set that allows everything. Useful in tests and on
    /// backends with no practical limits.
    pub fn unrestricted() -> Self {
        Capabilities {
            max_binding_slots: u32::MAX,
            max_stages_per_layout: 6,
            supports_compute_stage: true,
            supports_storage_buffers: true,
            supports_samplers: true,
        }
    }
}
