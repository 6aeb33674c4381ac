// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Table-based grouping translator (root-signature style).
//!
//! Slots are partitioned by (kind, usage) and the partitions are processed in
//! a fixed priority order: constant-buffer reads, then buffer shader-reads,
//! then texture shader-reads, then buffer read-writes, then texture
//! read-writes, with samplers last. The order is a design choice, not an
//! accident of iteration: the most frequently rebound classes land in
//! predictable table positions, which keeps diffing cheap for partial-rebind
//! optimizations later.

use crate::bindings::layout::PipelineLayout;
use crate::bindings::visible_to::{ResourceKind, ResourceUsage, Stages};

/// Partition priority order. Samplers match any usage.
const PARTITION_ORDER: [(ResourceKind, Option<ResourceUsage>); 6] = [
    (ResourceKind::Buffer, Some(ResourceUsage::ConstantRead)),
    (ResourceKind::Buffer, Some(ResourceUsage::ShaderRead)),
    (ResourceKind::Texture, Some(ResourceUsage::ShaderRead)),
    (ResourceKind::Buffer, Some(ResourceUsage::ShaderReadWrite)),
    (ResourceKind::Texture, Some(ResourceUsage::ShaderReadWrite)),
    (ResourceKind::Sampler, None),
];

/// The grouping translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupedTranslator;

/// One slot's range within a group: its index in the backend numbering domain,
/// its array length, and its position in the layout's declaration order (used
/// at bind time to pick the matching resource out of a binding set).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRange {
    /// Slot index within the (kind, usage) numbering domain.
    pub slot: u32,
    /// Array length of the slot.
    pub array_len: u32,
    /// Position of the slot in the layout's declaration order.
    pub layout_index: usize,
}

/// A contiguous run of descriptor ranges sharing one (kind, usage) partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingGroup {
    /// Resource kind of every member.
    pub kind: ResourceKind,
    /// Usage class of every member; `None` for the sampler wildcard partition.
    pub usage: Option<ResourceUsage>,
    /// Member ranges in declaration order.
    pub ranges: Vec<GroupRange>,
    /// Union of the member slots' visible stages.
    pub visible_stages: Stages,
}

/// Output of [`GroupedTranslator::translate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedPlan {
    /// Groups in partition priority order; empty partitions are omitted.
    pub groups: Vec<BindingGroup>,
    /// Stages absent from every slot's visible set, fully denied access.
    pub denied_stages: Stages,
    binding_usages: Vec<ResourceUsage>,
}

impl GroupedPlan {
    /// Usage classes in group build order, one entry per grouped slot.
    ///
    /// Command encoding maps a flat build index back to a usage class with
    /// this, without walking the group structure.
    pub fn binding_usages(&self) -> &[ResourceUsage] {
        &self.binding_usages
    }
}

impl GroupedTranslator {
    /// Groups the layout's slots into tables and computes the stage-denial set.
    ///
    /// Pure and deterministic; capability checks happen in
    /// [`Translator::translate`](crate::backend::Translator::translate) before
    /// this runs.
    pub fn translate(&self, layout: &PipelineLayout) -> GroupedPlan {
        let mut groups: Vec<BindingGroup> = Vec::new();
        let mut binding_usages = Vec::with_capacity(layout.slot_count());

        for (kind, usage) in PARTITION_ORDER {
            let mut open: Option<BindingGroup> = None;
            for (layout_index, slot) in layout.slots().iter().enumerate() {
                let matches = slot.kind == kind && usage.is_none_or(|u| slot.usage == u);
                if !matches {
                    continue;
                }
                let range = GroupRange {
                    slot: slot.slot,
                    array_len: slot.array_len,
                    layout_index,
                };
                match &mut open {
                    Some(group) => {
                        // Append to the most recently opened group for this partition.
                        group.ranges.push(range);
                        group.visible_stages |= slot.visible_stages;
                    }
                    None => {
                        open = Some(BindingGroup {
                            kind,
                            usage,
                            ranges: vec![range],
                            visible_stages: slot.visible_stages,
                        });
                    }
                }
                binding_usages.push(slot.usage);
            }
            if let Some(group) = open {
                groups.push(group);
            }
        }

        let denied_stages = Stages::all().difference(layout.stage_union());
        logwise::debuginternal_sync!(
            "grouped translation produced {groups} groups, denied {denied}",
            groups = logwise::privacy::LogIt(groups.len()),
            denied = logwise::privacy::LogIt(denied_stages)
        );
        GroupedPlan {
            groups,
            denied_stages,
            binding_usages,
        }
    }
}
