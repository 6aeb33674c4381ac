// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Call-counting stub driver.
//!
//! Records every native call instead of issuing one. This is the observation
//! point for the crate's redundant-call-elision contracts: a test binds state
//! twice and asserts the second bind produced zero calls here.

use crate::backend::grouped::BindingGroup;
use crate::backend::slotted::SlotBind;
use crate::backend::NativeDriver;
use crate::bindings::resource_set::ResourceHandle;
use crate::bindings::visible_to::{ResourceKind, ResourceUsage, Stages};
use crate::state_cache::RasterizerStateKey;

/// One recorded native call.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverCall {
    /// A grouped-table bind.
    BindGroupTable {
        /// Index of the group within its plan.
        group_index: usize,
        /// Resources handed to the table.
        resources: Vec<ResourceHandle>,
    },
    /// An explicit slot bind.
    BindSlot {
        /// Kind of the bound resource.
        kind: ResourceKind,
        /// Usage class the resource is bound through.
        usage: ResourceUsage,
        /// The slot index.
        slot: u32,
        /// The bound resource.
        resource: ResourceHandle,
    },
    /// An explicit slot-range unbind.
    UnbindSlots {
        /// Kind of the cleared slots.
        kind: ResourceKind,
        /// Usage class cleared.
        usage: ResourceUsage,
        /// First slot of the cleared run.
        first_slot: u32,
        /// Run length.
        count: u32,
        /// Stages cleared.
        stages: Stages,
    },
    /// A full rasterizer-state application.
    ApplyRasterizerState(RasterizerStateKey),
    /// A draw.
    Draw {
        /// Vertices drawn.
        vertex_count: u32,
    },
    /// A compute dispatch.
    Dispatch {
        /// Workgroup counts.
        groups: [u32; 3],
    },
}

/// A [`NativeDriver`] that records calls instead of issuing them.
#[derive(Debug, Default)]
pub struct CountingDriver {
    calls: Vec<DriverCall>,
}

impl CountingDriver {
    /// A fresh driver with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded call, in issue order.
    pub fn calls(&self) -> &[DriverCall] {
        &self.calls
    }

    /// Total number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    /// Number of rasterizer-state applications recorded.
    pub fn state_applies(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DriverCall::ApplyRasterizerState(_)))
            .count()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl NativeDriver for CountingDriver {
    fn bind_group_table(
        &mut self,
        group_index: usize,
        _group: &BindingGroup,
        resources: &[ResourceHandle],
    ) {
        self.calls.push(DriverCall::BindGroupTable {
            group_index,
            resources: resources.to_vec(),
        });
    }

    fn bind_slot(&mut self, bind: &SlotBind, resource: ResourceHandle) {
        self.calls.push(DriverCall::BindSlot {
            kind: bind.kind,
            usage: bind.usage,
            slot: bind.slot,
            resource,
        });
    }

    fn unbind_slots(
        &mut self,
        kind: ResourceKind,
        usage: ResourceUsage,
        first_slot: u32,
        count: u32,
        stages: Stages,
    ) {
        self.calls.push(DriverCall::UnbindSlots {
            kind,
            usage,
            first_slot,
            count,
            stages,
        });
    }

    fn apply_rasterizer_state(&mut self, key: &RasterizerStateKey) {
        self.calls
            .push(DriverCall::ApplyRasterizerState(key.clone()));
    }

    fn draw(&mut self, vertex_count: u32) {
        self.calls.push(DriverCall::Draw { vertex_count });
    }

    fn dispatch(&mut self, groups: [u32; 3]) {
        self.calls.push(DriverCall::Dispatch { groups });
    }
}
