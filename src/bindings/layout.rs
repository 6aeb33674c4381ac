// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Defines the way resources are declared for a pipeline.
//!
//! A [`PipelineLayout`] is the backend-agnostic description of every resource
//! a pipeline's shaders consume: an ordered, immutable sequence of
//! [`BindingSlot`]s. The layout is pure data - constructing one touches no
//! native resources and has no side effects. Translators consume it at
//! pipeline-creation time and realize it into a backend-specific binding plan.
//!
//! # Key Concepts
//!
//! - **Binding slots**: one declared point where shader stages consume one
//!   resource, numbered within the (kind, usage) domain of the layout
//! - **Declaration order**: the slot sequence is ordered; translators and
//!   [resource binding sets](crate::bindings::resource_set::ResourceBindingSet)
//!   both match against it positionally
//! - **Exclusive ownership**: a layout is shared via [`std::sync::Arc`] and must
//!   outlive every pipeline and translated plan derived from it; holding the
//!   `Arc` in those objects makes that automatic
//!
//! # Example
//!
//! ```
//! use slots_and_signatures::bindings::layout::{BindingSlot, PipelineLayout};
//! use slots_and_signatures::bindings::visible_to::{ResourceKind, ResourceUsage, Stages};
//!
//! let layout = PipelineLayout::new(vec![
//!     BindingSlot::new(ResourceKind::Buffer, ResourceUsage::ConstantRead, Stages::VERTEX, 0)?,
//!     BindingSlot::new(ResourceKind::Texture, ResourceUsage::ShaderRead, Stages::FRAGMENT, 0)?,
//! ])?;
//! assert_eq!(layout.slots().len(), 2);
//! # Ok::<(), slots_and_signatures::bindings::layout::ConstructionError>(())
//! ```

use crate::bindings::visible_to::{ResourceKind, ResourceUsage, Stages};
use std::collections::HashSet;

/// Errors raised while constructing descriptor-model value types.
///
/// All of these are fatal to the call that raised them; none is recovered
/// silently.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
    /// Two slots share a (kind, usage, slot index) triple.
    #[error("duplicate binding: slot {slot} already declared for {kind:?}/{usage}")]
    DuplicateBinding {
        /// Resource kind of the colliding slots.
        kind: ResourceKind,
        /// Usage class of the colliding slots.
        usage: ResourceUsage,
        /// The colliding slot index.
        slot: u32,
    },
    /// A slot declared an empty visible-stage set.
    #[error("binding slot {slot} has an empty visible-stage set")]
    EmptyStageSet {
        /// The offending slot index.
        slot: u32,
    },
    /// A slot declared an array length of zero.
    #[error("binding slot {slot} has an array length of zero")]
    ZeroArrayLength {
        /// The offending slot index.
        slot: u32,
    },
    /// A resource binding set's element count differs from its layout's slot count.
    #[error("binding set shape mismatch: layout declares {expected} slots but {actual} resources were supplied")]
    ShapeMismatch {
        /// Slot count the layout declares.
        expected: usize,
        /// Resource count actually supplied.
        actual: usize,
    },
    /// A resource binding set element's kind differs from its slot's kind.
    #[error("binding set element {index} is a {actual:?} but the layout declares a {expected:?}")]
    KindMismatch {
        /// Position of the offending element.
        index: usize,
        /// Kind the layout declares at that position.
        expected: ResourceKind,
        /// Kind actually supplied.
        actual: ResourceKind,
    },
}

/// One declared point where shader stages consume one resource.
///
/// The slot index is numbered within the (kind, usage) domain of its owning
/// layout - the backend decides what the numbers ultimately mean. Arrayed
/// bindings declare `array_len > 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingSlot {
    /// The kind of resource this slot consumes.
    pub kind: ResourceKind,
    /// The access class for the resource.
    pub usage: ResourceUsage,
    /// The stages that may see the resource. Never empty.
    pub visible_stages: Stages,
    /// Slot index within the (kind, usage) numbering domain.
    pub slot: u32,
    /// Number of array elements. At least 1.
    pub array_len: u32,
}

impl BindingSlot {
    /// Creates a slot with an array length of 1.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::EmptyStageSet`] if `visible_stages` is empty.
    pub fn new(
        kind: ResourceKind,
        usage: ResourceUsage,
        visible_stages: Stages,
        slot: u32,
    ) -> Result<Self, ConstructionError> {
        Self::with_array_len(kind, usage, visible_stages, slot, 1)
    }

    /// Creates a slot with an explicit array length.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::EmptyStageSet`] if `visible_stages` is empty;
    /// [`ConstructionError::ZeroArrayLength`] if `array_len` is zero.
    pub fn with_array_len(
        kind: ResourceKind,
        usage: ResourceUsage,
        visible_stages: Stages,
        slot: u32,
        array_len: u32,
    ) -> Result<Self, ConstructionError> {
        if visible_stages.is_empty() {
            return Err(ConstructionError::EmptyStageSet { slot });
        }
        if array_len == 0 {
            return Err(ConstructionError::ZeroArrayLength { slot });
        }
        Ok(BindingSlot {
            kind,
            usage,
            visible_stages,
            slot,
            array_len,
        })
    }
}

/// The ordered, immutable set of binding slots for one pipeline.
///
/// Equality and hashing are over the slot sequence, so two layouts that
/// declare the same slots in the same order compare equal - translators
/// guarantee behaviorally equivalent plans for equal layouts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PipelineLayout {
    slots: Vec<BindingSlot>,
}

impl PipelineLayout {
    /// Constructs a layout from slots in declaration order.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::DuplicateBinding`] if two slots share a
    /// (kind, usage, slot index) triple.
    pub fn new(slots: Vec<BindingSlot>) -> Result<Self, ConstructionError> {
        let mut seen = HashSet::with_capacity(slots.len());
        for binding in &slots {
            if !seen.insert((binding.kind, binding.usage, binding.slot)) {
                return Err(ConstructionError::DuplicateBinding {
                    kind: binding.kind,
                    usage: binding.usage,
                    slot: binding.slot,
                });
            }
        }
        Ok(PipelineLayout { slots })
    }

    /// The slots in declaration order.
    pub fn slots(&self) -> &[BindingSlot] {
        &self.slots
    }

    /// The union of every slot's visible stages.
    ///
    /// Stages absent from this union are candidates for the stage-denial
    /// optimization.
    pub fn stage_union(&self) -> Stages {
        self.slots
            .iter()
            .fold(Stages::empty(), |acc, s| acc | s.visible_stages)
    }

    /// Total slot count, counting array elements once per slot declaration.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}
