// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Per-backend binding translators and the native-driver seam.
//!
//! Each native driver paradigm gets one translator. The set is closed: a
//! [`Translator`] variant is selected once at device-initialization time and
//! every pipeline layout created afterwards is realized through it. Plans are
//! computed once per layout, cached by whoever owns the pipeline, and are
//! immutable and cheap to re-apply every frame.

use crate::bindings::layout::PipelineLayout;
use crate::bindings::resource_set::ResourceHandle;
use crate::bindings::visible_to::{ResourceKind, ResourceUsage, Stages};
use crate::capabilities::Capabilities;
use crate::state_cache::RasterizerStateKey;
use std::sync::Arc;

pub mod counting;
pub mod grouped;
pub mod slotted;

pub use counting::{CountingDriver, DriverCall};
pub use grouped::{BindingGroup, GroupRange, GroupedPlan, GroupedTranslator};
pub use slotted::{SlotBind, SlotUnbind, SlottedPlan, SlottedTranslator};

/// A requested feature is absent or a backend limit was exceeded.
///
/// Fatal to pipeline creation; surfaced to the caller and never retried
/// automatically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CapabilityError {
    /// The layout declares more slots than the backend can address.
    #[error("layout declares {declared} binding slots but the backend addresses at most {max}")]
    BindingCountExceeded {
        /// Slots the layout declares.
        declared: usize,
        /// The backend's maximum.
        max: u32,
    },
    /// The layout references more distinct stages than the backend supports.
    #[error("layout references {declared} stages but the backend supports at most {max} per layout")]
    StageCountExceeded {
        /// Distinct stages the layout references.
        declared: u32,
        /// The backend's maximum.
        max: u32,
    },
    /// A slot is visible to the compute stage on a backend without one.
    #[error("layout requires the compute stage but the backend has none")]
    ComputeUnsupported,
    /// A slot uses read-write storage on a backend without storage support.
    #[error("layout requires storage (read-write) bindings but the backend does not support them")]
    StorageUnsupported,
    /// A slot consumes a sampler on a backend without sampler objects.
    #[error("layout requires sampler bindings but the backend does not support them")]
    SamplersUnsupported,
}

/// Issues the actual native calls.
///
/// Everything above this trait is backend-agnostic; everything below it is
/// driver glue. The [`CountingDriver`] implementation records calls instead of
/// issuing them, which is how the redundant-call-elision contracts are tested.
pub trait NativeDriver {
    /// Binds one contiguous descriptor group from a grouped plan.
    fn bind_group_table(
        &mut self,
        group_index: usize,
        group: &BindingGroup,
        resources: &[ResourceHandle],
    );
    /// Binds one explicit slot from a slotted plan.
    fn bind_slot(&mut self, bind: &SlotBind, resource: ResourceHandle);
    /// Explicitly clears a run of slots for the given kind/usage/stages.
    fn unbind_slots(
        &mut self,
        kind: ResourceKind,
        usage: ResourceUsage,
        first_slot: u32,
        count: u32,
        stages: Stages,
    );
    /// Applies a full fixed-function rasterizer configuration.
    fn apply_rasterizer_state(&mut self, key: &RasterizerStateKey);
    /// Issues a draw.
    fn draw(&mut self, vertex_count: u32);
    /// Issues a compute dispatch.
    fn dispatch(&mut self, groups: [u32; 3]);
}

/// The closed set of binding translators, one per native paradigm.
///
/// Selected once at device initialization; there is no other dispatch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Translator {
    /// Table-based grouping paradigm (root-signature style).
    Grouped(GroupedTranslator),
    /// Explicit global-slot paradigm with bind/unbind symmetry.
    Slotted(SlottedTranslator),
}

impl Translator {
    /// Realizes a layout into a backend-specific binding plan.
    ///
    /// Deterministic and idempotent: layouts that compare equal produce plans
    /// with identical grouping and identical stage-denial sets.
    ///
    /// # Errors
    ///
    /// A [`CapabilityError`] if the layout exceeds the backend's limits or
    /// requires an absent feature. Checked before any translation work.
    pub fn translate(
        &self,
        layout: &Arc<PipelineLayout>,
        capabilities: &Capabilities,
    ) -> Result<NativeBindingPlan, CapabilityError> {
        validate_capabilities(layout, capabilities)?;
        let detail = match self {
            Translator::Grouped(t) => PlanDetail::Grouped(t.translate(layout)),
            Translator::Slotted(t) => PlanDetail::Slotted(t.translate(layout)),
        };
        Ok(NativeBindingPlan {
            layout: layout.clone(),
            detail,
        })
    }
}

/// Backend-specific realization of one pipeline layout.
///
/// Computed once at translation time, immutable thereafter. Holds the layout's
/// `Arc`, so the layout outlives the plan automatically. Consumed only by the
/// command-encoding routines in [`crate::queue`].
#[derive(Debug, Clone, PartialEq)]
pub struct NativeBindingPlan {
    layout: Arc<PipelineLayout>,
    detail: PlanDetail,
}

/// The paradigm-specific body of a plan.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanDetail {
    /// Output of the grouping translator.
    Grouped(GroupedPlan),
    /// Output of the explicit-slot translator.
    Slotted(SlottedPlan),
}

impl NativeBindingPlan {
    /// The layout this plan was derived from.
    pub fn layout(&self) -> &Arc<PipelineLayout> {
        &self.layout
    }

    /// The paradigm-specific plan body.
    pub fn detail(&self) -> &PlanDetail {
        &self.detail
    }

    /// Stages fully denied resource access by this plan.
    pub fn denied_stages(&self) -> Stages {
        match &self.detail {
            PlanDetail::Grouped(plan) => plan.denied_stages,
            PlanDetail::Slotted(plan) => plan.denied_stages,
        }
    }
}

fn validate_capabilities(
    layout: &PipelineLayout,
    capabilities: &Capabilities,
) -> Result<(), CapabilityError> {
    let declared = layout.slot_count();
    if declared > capabilities.max_binding_slots as usize {
        return Err(CapabilityError::BindingCountExceeded {
            declared,
            max: capabilities.max_binding_slots,
        });
    }
    let stage_union = layout.stage_union();
    let distinct_stages = stage_union.bits().count_ones();
    if distinct_stages > capabilities.max_stages_per_layout {
        return Err(CapabilityError::StageCountExceeded {
            declared: distinct_stages,
            max: capabilities.max_stages_per_layout,
        });
    }
    if stage_union.contains(Stages::COMPUTE) && !capabilities.supports_compute_stage {
        return Err(CapabilityError::ComputeUnsupported);
    }
    for slot in layout.slots() {
        if slot.usage == ResourceUsage::ShaderReadWrite && !capabilities.supports_storage_buffers {
            return Err(CapabilityError::StorageUnsupported);
        }
        if slot.kind == ResourceKind::Sampler && !capabilities.supports_samplers {
            return Err(CapabilityError::SamplersUnsupported);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::layout::BindingSlot;

    fn layout_of(slots: Vec<BindingSlot>) -> Arc<PipelineLayout> {
        Arc::new(PipelineLayout::new(slots).unwrap())
    }

    #[test]
    fn binding_count_limit_enforced() {
        let layout = layout_of(vec![
            BindingSlot::new(
                ResourceKind::Buffer,
                ResourceUsage::ConstantRead,
                Stages::VERTEX,
                0,
            )
            .unwrap(),
            BindingSlot::new(
                ResourceKind::Buffer,
                ResourceUsage::ConstantRead,
                Stages::VERTEX,
                1,
            )
            .unwrap(),
        ]);
        let mut caps = Capabilities::unrestricted();
        caps.max_binding_slots = 1;
        let err = Translator::Grouped(GroupedTranslator)
            .translate(&layout, &caps)
            .unwrap_err();
        assert_eq!(
            err,
            CapabilityError::BindingCountExceeded {
                declared: 2,
                max: 1
            }
        );
    }

    #[test]
    fn compute_requires_capability() {
        let layout = layout_of(vec![
            BindingSlot::new(
                ResourceKind::Buffer,
                ResourceUsage::ShaderRead,
                Stages::COMPUTE,
                0,
            )
            .unwrap(),
        ]);
        let mut caps = Capabilities::unrestricted();
        caps.supports_compute_stage = false;
        let err = Translator::Slotted(SlottedTranslator)
            .translate(&layout, &caps)
            .unwrap_err();
        assert_eq!(err, CapabilityError::ComputeUnsupported);
    }

    #[test]
    fn storage_requires_capability() {
        let layout = layout_of(vec![
            BindingSlot::new(
                ResourceKind::Texture,
                ResourceUsage::ShaderReadWrite,
                Stages::FRAGMENT,
                0,
            )
            .unwrap(),
        ]);
        let mut caps = Capabilities::unrestricted();
        caps.supports_storage_buffers = false;
        let err = Translator::Grouped(GroupedTranslator)
            .translate(&layout, &caps)
            .unwrap_err();
        assert_eq!(err, CapabilityError::StorageUnsupported);
    }

    #[test]
    fn samplers_require_capability() {
        let layout = layout_of(vec![
            BindingSlot::new(
                ResourceKind::Sampler,
                ResourceUsage::ShaderRead,
                Stages::FRAGMENT,
                0,
            )
            .unwrap(),
        ]);
        let mut caps = Capabilities::unrestricted();
        caps.supports_samplers = false;
        let err = Translator::Grouped(GroupedTranslator)
            .translate(&layout, &caps)
            .unwrap_err();
        assert_eq!(err, CapabilityError::SamplersUnsupported);
    }
}
