// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Shader-program assembly, with and without validation.
//!
//! [`ProgramBuilder`] is the non-debug path: it assembles stage handles into a
//! [`ShaderProgram`] without checking anything. [`DebugProgramBuilder`] is a
//! decorator holding the real builder and a diagnostic sink; it forwards
//! every non-validated call unchanged and adds checks only around attachment
//! and composition. Violations are reported, never thrown - the program is
//! still constructed but flagged invalid, so callers check
//! [`ShaderProgram::is_valid`] before use.

use crate::bindings::visible_to::{Stage, Stages};
use crate::debug::sink::{DiagnosticSink, Severity};
use crate::shaders::{CompiledShader, SystemValue};
use std::sync::Arc;

/// Shader-composition violations, delivered through the diagnostic sink.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompositionError {
    /// The stage-presence mask is not one of the legal compositions.
    #[error("invalid shader composition")]
    InvalidComposition {
        /// The illegal mask.
        mask: Stages,
    },
    /// An uncompiled shader was attached.
    #[error("attempt to attach uncompiled shader to shader program")]
    UncompiledShader {
        /// The attachment point.
        point: Stage,
    },
    /// A shader's compiled stage differs from its attachment point.
    #[error("mismatch between shader stage ({actual}) and shader program attachment ({point})")]
    StageMismatch {
        /// The attachment point.
        point: Stage,
        /// The stage the shader was actually compiled for.
        actual: Stage,
    },
}

const V: Stages = Stages::VERTEX;
const H: Stages = Stages::TESS_CONTROL;
const D: Stages = Stages::TESS_EVAL;
const G: Stages = Stages::GEOMETRY;
const F: Stages = Stages::FRAGMENT;
const C: Stages = Stages::COMPUTE;

/// The only stage-presence masks a program may legally compose.
const LEGAL_COMPOSITIONS: [Stages; 9] = [
    V,
    V.union(G),
    V.union(H).union(D),
    V.union(H).union(D).union(G),
    V.union(F),
    V.union(G).union(F),
    V.union(H).union(D).union(F),
    V.union(H).union(D).union(G).union(F),
    C,
];

/// An assembled set of per-stage shaders.
///
/// Destroying the program drops its attached stage handles with it.
#[derive(Debug)]
pub struct ShaderProgram {
    attached: Vec<(Stage, CompiledShader)>,
    mask: Stages,
    valid: bool,
    vertex_id: Option<String>,
    instance_id: Option<String>,
}

impl ShaderProgram {
    /// The stage-presence mask of every attached shader.
    pub fn stage_mask(&self) -> Stages {
        self.mask
    }

    /// Whether composition validated (or was never validated - the non-debug
    /// path constructs programs as valid).
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether a fragment shader is attached.
    pub fn has_fragment_shader(&self) -> bool {
        self.mask.contains(Stages::FRAGMENT)
    }

    /// Concatenated per-stage compiler reports.
    pub fn report(&self) -> String {
        let mut out = String::new();
        for (_, shader) in &self.attached {
            if !shader.report().is_empty() {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(shader.report());
            }
        }
        out
    }

    /// Name of the input attribute bound to the vertex-index system value,
    /// if the debug layer found one.
    pub fn vertex_id_name(&self) -> Option<&str> {
        self.vertex_id.as_deref()
    }

    /// Name of the input attribute bound to the instance-index system value,
    /// if the debug layer found one.
    pub fn instance_id_name(&self) -> Option<&str> {
        self.instance_id.as_deref()
    }

    /// The attached shaders, in attachment order.
    pub fn attached(&self) -> &[(Stage, CompiledShader)] {
        &self.attached
    }
}

/// Non-debug program assembly. Trusts its inputs; checks nothing.
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    attached: Vec<(Stage, CompiledShader)>,
}

impl ProgramBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a shader at the given point.
    pub fn attach(&mut self, point: Stage, shader: CompiledShader) {
        self.attached.push((point, shader));
    }

    /// Assembles the program.
    pub fn finish(self) -> ShaderProgram {
        let mask = self
            .attached
            .iter()
            .fold(Stages::empty(), |acc, (point, _)| acc | point.flag());
        ShaderProgram {
            attached: self.attached,
            mask,
            valid: true,
            vertex_id: None,
            instance_id: None,
        }
    }
}

/// Validating decorator around [`ProgramBuilder`].
///
/// Holds the real builder and forwards attachment to it; adds the per-stage
/// checks on attach and the composition-mask check on finish. Nothing in the
/// core assembly path branches on whether validation is active.
pub struct DebugProgramBuilder {
    inner: ProgramBuilder,
    sink: Arc<dyn DiagnosticSink>,
}

impl DebugProgramBuilder {
    /// Wraps a fresh builder with the given sink.
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        DebugProgramBuilder {
            inner: ProgramBuilder::new(),
            sink,
        }
    }

    /// Attaches a shader at the given point, validating first.
    ///
    /// An uncompiled shader is reported and *not* attached. A stage/point
    /// mismatch is reported but the shader is still attached, matching the
    /// non-debug path's behavior.
    pub fn attach(&mut self, point: Stage, shader: CompiledShader) {
        if !shader.is_compiled() {
            let err = CompositionError::UncompiledShader { point };
            self.sink
                .report(Severity::Error, &err.to_string(), &point.to_string());
            return;
        }
        if shader.stage() != point {
            let err = CompositionError::StageMismatch {
                point,
                actual: shader.stage(),
            };
            self.sink
                .report(Severity::Error, &err.to_string(), &point.to_string());
        }
        self.inner.attach(point, shader);
    }

    /// Assembles the program, validating composition and scanning reflection.
    pub fn finish(self) -> ShaderProgram {
        let mut program = self.inner.finish();
        let mask = program.stage_mask();
        if !LEGAL_COMPOSITIONS.contains(&mask) {
            let err = CompositionError::InvalidComposition { mask };
            self.sink
                .report(Severity::Error, &err.to_string(), &format!("{mask:?}"));
            program.valid = false;
            return program;
        }
        Self::query_instance_and_vertex_ids(&mut program);
        program
    }

    /// Best-effort scan of the vertex stage's reflected inputs for the
    /// vertex-index and instance-index system values. Stops once both are
    /// found; absence of either is not an error.
    fn query_instance_and_vertex_ids(program: &mut ShaderProgram) {
        let Some((_, vertex_shader)) = program
            .attached
            .iter()
            .find(|(point, _)| *point == Stage::Vertex)
        else {
            return;
        };
        let mut vertex_id = None;
        let mut instance_id = None;
        for attr in vertex_shader.input_attributes() {
            if vertex_id.is_none() && attr.system_value == Some(SystemValue::VertexIndex) {
                vertex_id = Some(attr.name.clone());
            }
            if instance_id.is_none() && attr.system_value == Some(SystemValue::InstanceIndex) {
                instance_id = Some(attr.name.clone());
            }
            if vertex_id.is_some() && instance_id.is_some() {
                break;
            }
        }
        program.vertex_id = vertex_id;
        program.instance_id = instance_id;
    }
}
