// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Stage-visibility and usage declarations for binding slots.
//!
//! This module provides the vocabulary that describes *who* may see a bound
//! resource and *how* it will be accessed. These declarations are consumed by
//! the per-backend translators, which use them to group bindings, compute
//! stage-denial optimizations, and fail fast on capability mismatches.
//!
//! # Overview
//!
//! - [`Stages`] - The set of shader stages a binding is visible to
//! - [`Stage`] - A single shader stage, used where exactly one is meant
//! - [`ResourceKind`] - Whether a slot consumes a buffer, texture, or sampler
//! - [`ResourceUsage`] - The access class (constant read, shader read, read-write)
//!
//! # Examples
//!
//! ```
//! use slots_and_signatures::bindings::visible_to::{Stages, ResourceKind, ResourceUsage};
//!
//! // A uniform buffer visible to the vertex stage only
//! let stages = Stages::VERTEX;
//! let kind = ResourceKind::Buffer;
//! let usage = ResourceUsage::ConstantRead;
//!
//! // A storage texture written by compute
//! let stages = Stages::COMPUTE;
//! let usage = ResourceUsage::ShaderReadWrite;
//! assert!(!stages.is_empty());
//! ```

use std::fmt;

bitflags::bitflags! {
    /// The set of shader stages a binding slot is visible to.
    ///
    /// Translators union these across a layout to decide which stages can be
    /// denied resource access entirely (the stage-denial optimization) and
    /// which stages an explicit-slot backend must rebind per draw.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Stages: u8 {
        /// Vertex shader stage.
        const VERTEX = 1 << 0;
        /// Tessellation-control (hull) stage.
        const TESS_CONTROL = 1 << 1;
        /// Tessellation-evaluation (domain) stage.
        const TESS_EVAL = 1 << 2;
        /// Geometry shader stage.
        const GEOMETRY = 1 << 3;
        /// Fragment (pixel) shader stage.
        const FRAGMENT = 1 << 4;
        /// Compute stage.
        const COMPUTE = 1 << 5;
    }
}

impl Stages {
    /// Every graphics stage, excluding compute.
    pub const ALL_GRAPHICS: Stages = Stages::VERTEX
        .union(Stages::TESS_CONTROL)
        .union(Stages::TESS_EVAL)
        .union(Stages::GEOMETRY)
        .union(Stages::FRAGMENT);
}

/// A single shader stage.
///
/// Used where exactly one stage is meant, such as the attachment point of a
/// compiled shader in a program, as opposed to [`Stages`] which is a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Stage {
    /// Vertex shader.
    Vertex,
    /// Tessellation-control (hull) shader.
    TessControl,
    /// Tessellation-evaluation (domain) shader.
    TessEval,
    /// Geometry shader.
    Geometry,
    /// Fragment (pixel) shader.
    Fragment,
    /// Compute shader.
    Compute,
}

impl Stage {
    /// The single-bit [`Stages`] value for this stage.
    pub const fn flag(self) -> Stages {
        match self {
            Stage::Vertex => Stages::VERTEX,
            Stage::TessControl => Stages::TESS_CONTROL,
            Stage::TessEval => Stages::TESS_EVAL,
            Stage::Geometry => Stages::GEOMETRY,
            Stage::Fragment => Stages::FRAGMENT,
            Stage::Compute => Stages::COMPUTE,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Vertex => "vertex",
            Stage::TessControl => "tess-control",
            Stage::TessEval => "tess-eval",
            Stage::Geometry => "geometry",
            Stage::Fragment => "fragment",
            Stage::Compute => "compute",
        };
        f.write_str(name)
    }
}

/// The kind of native resource a binding slot consumes.
///
/// Together with [`ResourceUsage`] this forms the numbering domain for slot
/// indices: two slots may share an index as long as their (kind, usage) pair
/// differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    /// A buffer resource (uniform, storage, or similar).
    Buffer,
    /// A texture resource.
    Texture,
    /// A sampler object.
    ///
    /// Samplers have no meaningful usage class; translators treat their usage
    /// as a wildcard and always partition them last.
    Sampler,
}

/// The access class through which a shader stage reads a bound resource.
///
/// The distinction matters to translators: constant reads group into the
/// most-frequently-rebound tables, plain shader reads come next, and
/// read-write (storage) access groups last among non-samplers. An explicit
/// unbind is required before the same physical resource is read through a
/// *different* usage class in a later pass; see
/// [`CommandSequence::unbind_resource_slots`](crate::queue::CommandSequence::unbind_resource_slots).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceUsage {
    /// Constant-buffer style read: small, frequently rebound, uniform access.
    ConstantRead,
    /// Sampled/shader read: the resource is read but never written.
    ShaderRead,
    /// Storage read-write: the shader may both read and write the resource.
    ShaderReadWrite,
}

impl fmt::Display for ResourceUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceUsage::ConstantRead => "constant-read",
            ResourceUsage::ShaderRead => "shader-read",
            ResourceUsage::ShaderReadWrite => "shader-read-write",
        };
        f.write_str(name)
    }
}
