// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! The full legal/illegal composition table, driven through the debug builder.

use slots_and_signatures::bindings::Stage;
use slots_and_signatures::debug::{CollectingSink, DebugProgramBuilder};
use slots_and_signatures::shaders::CompiledShader;
use std::sync::Arc;

fn compose(points: &[Stage]) -> (bool, usize) {
    let sink = Arc::new(CollectingSink::new());
    let mut builder = DebugProgramBuilder::new(sink.clone());
    for &point in points {
        builder.attach(point, CompiledShader::new(point, true, ""));
    }
    let program = builder.finish();
    (program.is_valid(), sink.error_count())
}

#[test]
fn every_legal_composition_validates() {
    use Stage::*;
    let legal: &[&[Stage]] = &[
        &[Vertex],
        &[Vertex, Geometry],
        &[Vertex, TessControl, TessEval],
        &[Vertex, TessControl, TessEval, Geometry],
        &[Vertex, Fragment],
        &[Vertex, Geometry, Fragment],
        &[Vertex, TessControl, TessEval, Fragment],
        &[Vertex, TessControl, TessEval, Geometry, Fragment],
        &[Compute],
    ];
    for points in legal {
        let (valid, errors) = compose(points);
        assert!(valid, "expected {points:?} to compose");
        assert_eq!(errors, 0, "expected no diagnostics for {points:?}");
    }
}

#[test]
fn every_illegal_composition_is_flagged() {
    use Stage::*;
    let illegal: &[&[Stage]] = &[
        &[Fragment],
        &[Geometry],
        &[Vertex, TessControl],
        &[Vertex, TessEval],
        &[TessControl, TessEval],
        &[Compute, Vertex],
        &[Compute, Fragment],
    ];
    for points in illegal {
        let (valid, errors) = compose(points);
        assert!(!valid, "expected {points:?} to be rejected");
        assert_eq!(errors, 1, "expected one diagnostic for {points:?}");
    }
}

#[test]
fn attachment_order_does_not_matter() {
    use Stage::*;
    let (forward, _) = compose(&[Vertex, Geometry, Fragment]);
    let (backward, _) = compose(&[Fragment, Geometry, Vertex]);
    assert!(forward);
    assert!(backward);
}

#[test]
fn invalid_program_still_carries_its_reports() {
    let sink = Arc::new(CollectingSink::new());
    let mut builder = DebugProgramBuilder::new(sink);
    builder.attach(
        Stage::Fragment,
        CompiledShader::new(Stage::Fragment, true, "warning: unused varying"),
    );
    let program = builder.finish();
    assert!(!program.is_valid());
    assert_eq!(program.report(), "warning: unused varying");
}
