// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Concrete resources matched positionally to a pipeline layout.
//!
//! A [`ResourceBindingSet`] pairs one [`PipelineLayout`] with one concrete
//! resource per declared slot, in declaration order. Shape and kind are
//! checked at construction; by the time a set reaches command encoding it is
//! known to match its layout, so execution never revalidates it.
//!
//! The handles here are non-owning: the caller owns the native resources and
//! must keep them alive while any submitted-but-unfenced command sequence
//! references them. Fence waits (see [`crate::queue`]) are the mechanism for
//! proving a resource is safe to destroy.

use crate::bindings::layout::{ConstructionError, PipelineLayout};
use crate::bindings::visible_to::ResourceKind;
use std::sync::Arc;

/// Non-owning handle to a native buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u64);

/// Non-owning handle to a native texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Non-owning handle to a native sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplerHandle(pub u64);

/// One concrete resource, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceHandle {
    /// A buffer instance.
    Buffer(BufferHandle),
    /// A texture instance.
    Texture(TextureHandle),
    /// A sampler instance.
    Sampler(SamplerHandle),
}

impl ResourceHandle {
    /// The kind this handle carries, for shape checking against a slot.
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceHandle::Buffer(_) => ResourceKind::Buffer,
            ResourceHandle::Texture(_) => ResourceKind::Texture,
            ResourceHandle::Sampler(_) => ResourceKind::Sampler,
        }
    }
}

/// An ordered sequence of concrete resources matched 1:1 to a layout's slots.
///
/// Sometimes called a resource heap. The set holds its layout's `Arc`, so the
/// layout outlives it automatically.
#[derive(Debug, Clone)]
pub struct ResourceBindingSet {
    layout: Arc<PipelineLayout>,
    resources: Vec<ResourceHandle>,
}

impl ResourceBindingSet {
    /// Constructs a binding set, checking shape and per-element kind.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::ShapeMismatch`] if the element count differs from
    /// the layout's slot count; [`ConstructionError::KindMismatch`] if an
    /// element's kind differs from its slot's declared kind.
    pub fn new(
        layout: Arc<PipelineLayout>,
        resources: Vec<ResourceHandle>,
    ) -> Result<Self, ConstructionError> {
        if resources.len() != layout.slots().len() {
            return Err(ConstructionError::ShapeMismatch {
                expected: layout.slots().len(),
                actual: resources.len(),
            });
        }
        for (index, (slot, resource)) in layout.slots().iter().zip(&resources).enumerate() {
            if slot.kind != resource.kind() {
                return Err(ConstructionError::KindMismatch {
                    index,
                    expected: slot.kind,
                    actual: resource.kind(),
                });
            }
        }
        Ok(ResourceBindingSet { layout, resources })
    }

    /// The layout this set was validated against.
    pub fn layout(&self) -> &Arc<PipelineLayout> {
        &self.layout
    }

    /// Resources in layout declaration order.
    pub fn resources(&self) -> &[ResourceHandle] {
        &self.resources
    }
}
