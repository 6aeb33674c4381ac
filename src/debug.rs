// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Optional validation layer around program assembly and resource binding.

Everything here is a decorator over the non-debug path: the real objects are
held inside and all non-validated calls are forwarded unchanged. Violations
are reported through a pluggable [`DiagnosticSink`], never thrown; with no
sink installed, the checks do not run at all.
*/

pub mod program;
pub mod sink;

pub use program::{CompositionError, DebugProgramBuilder, ProgramBuilder, ShaderProgram};
pub use sink::{CollectingSink, Diagnostic, DiagnosticSink, Severity};
