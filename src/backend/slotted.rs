// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Explicit global-slot translator.
//!
//! This paradigm has numbered slots with implicit driver-wide state and no
//! automatic lifetime scoping of bindings: a resource left bound can be read
//! by a later draw that should never see it. So the plan carries both halves -
//! a `bind` instruction per slot and a matching, explicitly ordered `unbind`
//! list that the encoder replays when a pass is done with its resources.
//! Layout construction already guarantees per-(kind, usage) slot uniqueness,
//! so translation is a pass-through plus the unbind bookkeeping.

use crate::bindings::layout::PipelineLayout;
use crate::bindings::visible_to::{ResourceKind, ResourceUsage, Stages};

/// The explicit-slot translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlottedTranslator;

/// One explicit bind instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotBind {
    /// Position of the slot in the layout's declaration order.
    pub layout_index: usize,
    /// Resource kind.
    pub kind: ResourceKind,
    /// Usage class.
    pub usage: ResourceUsage,
    /// Slot index within the (kind, usage) numbering domain.
    pub slot: u32,
    /// Array length of the slot.
    pub array_len: u32,
    /// Stages that must be explicitly rebound.
    pub stages: Stages,
}

/// One explicit unbind instruction, the "unset" half of a [`SlotBind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotUnbind {
    /// Resource kind.
    pub kind: ResourceKind,
    /// Usage class the resource was bound through.
    pub usage: ResourceUsage,
    /// First slot of the run to clear.
    pub slot: u32,
    /// Number of consecutive slots to clear.
    pub count: u32,
    /// Stages to clear the run for.
    pub stages: Stages,
}

/// Output of [`SlottedTranslator::translate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlottedPlan {
    /// Bind instructions in layout declaration order.
    pub binds: Vec<SlotBind>,
    /// Unbind instructions; teardown runs in reverse declaration order.
    pub unbinds: Vec<SlotUnbind>,
    /// Stages absent from every slot's visible set.
    pub denied_stages: Stages,
}

impl SlottedTranslator {
    /// Passes slots through with bind/unbind annotations.
    pub fn translate(&self, layout: &PipelineLayout) -> SlottedPlan {
        let mut binds = Vec::with_capacity(layout.slot_count());
        for (layout_index, slot) in layout.slots().iter().enumerate() {
            binds.push(SlotBind {
                layout_index,
                kind: slot.kind,
                usage: slot.usage,
                slot: slot.slot,
                array_len: slot.array_len,
                stages: slot.visible_stages,
            });
        }
        let unbinds = binds
            .iter()
            .rev()
            .map(|b| SlotUnbind {
                kind: b.kind,
                usage: b.usage,
                slot: b.slot,
                count: b.array_len,
                stages: b.stages,
            })
            .collect();
        let denied_stages = Stages::all().difference(layout.stage_union());
        SlottedPlan {
            binds,
            unbinds,
            denied_stages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::layout::BindingSlot;

    #[test]
    fn bind_unbind_symmetry() {
        let layout = PipelineLayout::new(vec![
            BindingSlot::new(
                ResourceKind::Buffer,
                ResourceUsage::ConstantRead,
                Stages::VERTEX,
                0,
            )
            .unwrap(),
            BindingSlot::with_array_len(
                ResourceKind::Texture,
                ResourceUsage::ShaderReadWrite,
                Stages::COMPUTE,
                2,
                4,
            )
            .unwrap(),
        ])
        .unwrap();
        let plan = SlottedTranslator.translate(&layout);
        assert_eq!(plan.binds.len(), 2);
        assert_eq!(plan.unbinds.len(), 2);
        // Teardown is reverse declaration order.
        assert_eq!(plan.unbinds[0].kind, ResourceKind::Texture);
        assert_eq!(plan.unbinds[0].slot, 2);
        assert_eq!(plan.unbinds[0].count, 4);
        assert_eq!(plan.unbinds[1].kind, ResourceKind::Buffer);
        assert_eq!(plan.unbinds[1].count, 1);
    }

    #[test]
    fn declaration_order_preserved() {
        let layout = PipelineLayout::new(vec![
            BindingSlot::new(
                ResourceKind::Sampler,
                ResourceUsage::ShaderRead,
                Stages::FRAGMENT,
                1,
            )
            .unwrap(),
            BindingSlot::new(
                ResourceKind::Buffer,
                ResourceUsage::ConstantRead,
                Stages::VERTEX,
                0,
            )
            .unwrap(),
        ])
        .unwrap();
        let plan = SlottedTranslator.translate(&layout);
        // No regrouping in this paradigm: declaration order survives.
        assert_eq!(plan.binds[0].kind, ResourceKind::Sampler);
        assert_eq!(plan.binds[0].layout_index, 0);
        assert_eq!(plan.binds[1].kind, ResourceKind::Buffer);
        assert_eq!(plan.binds[1].layout_index, 1);
    }
}
