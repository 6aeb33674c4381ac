// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Compiled-shader handles supplied by the shader-compilation collaborator.
//!
//! Shader source compilation and reflection are external to this crate; what
//! arrives here is a per-stage handle carrying the compile state, the
//! compiler's report text, and the reflected input attributes. The
//! debug layer (see [`crate::debug`]) is the main consumer.

use crate::bindings::visible_to::Stage;

/// A built-in system value an input attribute may be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SystemValue {
    /// The built-in vertex index.
    VertexIndex,
    /// The built-in instance index.
    InstanceIndex,
}

/// One reflected shader input attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputAttribute {
    /// Attribute name as reflected from the compiled shader.
    pub name: String,
    /// The system value this attribute is bound to, if any.
    pub system_value: Option<SystemValue>,
}

/// A per-stage compiled shader handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledShader {
    stage: Stage,
    compiled: bool,
    report: String,
    input_attributes: Vec<InputAttribute>,
}

impl CompiledShader {
    /// Wraps a compilation result.
    pub fn new(stage: Stage, compiled: bool, report: impl Into<String>) -> Self {
        CompiledShader {
            stage,
            compiled,
            report: report.into(),
            input_attributes: Vec::new(),
        }
    }

    /// Attaches reflected input attributes, in reflection order.
    pub fn with_input_attributes(mut self, attributes: Vec<InputAttribute>) -> Self {
        self.input_attributes = attributes;
        self
    }

    /// The stage this shader was compiled for.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Whether compilation succeeded.
    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    /// The compiler's report text (warnings and errors).
    pub fn report(&self) -> &str {
        &self.report
    }

    /// Reflected input attributes, in reflection order.
    pub fn input_attributes(&self) -> &[InputAttribute] {
        &self.input_attributes
    }
}
