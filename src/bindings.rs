// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Defines the backend-agnostic binding descriptor model */

pub mod layout;
pub mod resource_set;
pub mod visible_to;

pub use layout::{BindingSlot, ConstructionError, PipelineLayout};
pub use resource_set::{
    BufferHandle, ResourceBindingSet, ResourceHandle, SamplerHandle, TextureHandle,
};
pub use visible_to::{ResourceKind, ResourceUsage, Stage, Stages};
