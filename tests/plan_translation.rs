// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! End-to-end translation behavior across both binding paradigms.

use slots_and_signatures::backend::{
    GroupedTranslator, PlanDetail, SlottedTranslator, Translator,
};
use slots_and_signatures::bindings::{
    BindingSlot, PipelineLayout, ResourceKind, ResourceUsage, Stages,
};
use slots_and_signatures::capabilities::Capabilities;
use std::sync::Arc;

fn slot(
    kind: ResourceKind,
    usage: ResourceUsage,
    stages: Stages,
    index: u32,
) -> BindingSlot {
    BindingSlot::new(kind, usage, stages, index).expect("valid slot")
}

/// A layout exercising every partition the grouping translator knows about.
fn kitchen_sink_layout() -> Arc<PipelineLayout> {
    Arc::new(
        PipelineLayout::new(vec![
            slot(
                ResourceKind::Sampler,
                ResourceUsage::ShaderRead,
                Stages::FRAGMENT,
                0,
            ),
            slot(
                ResourceKind::Texture,
                ResourceUsage::ShaderReadWrite,
                Stages::FRAGMENT,
                0,
            ),
            slot(
                ResourceKind::Buffer,
                ResourceUsage::ConstantRead,
                Stages::VERTEX | Stages::FRAGMENT,
                0,
            ),
            slot(
                ResourceKind::Texture,
                ResourceUsage::ShaderRead,
                Stages::FRAGMENT,
                1,
            ),
            slot(
                ResourceKind::Buffer,
                ResourceUsage::ShaderRead,
                Stages::VERTEX,
                2,
            ),
            slot(
                ResourceKind::Buffer,
                ResourceUsage::ShaderReadWrite,
                Stages::FRAGMENT,
                3,
            ),
        ])
        .expect("valid layout"),
    )
}

#[test]
fn grouped_translation_is_idempotent() {
    let layout = kitchen_sink_layout();
    let translator = Translator::Grouped(GroupedTranslator);
    let caps = Capabilities::unrestricted();
    let first = translator.translate(&layout, &caps).unwrap();
    let second = translator.translate(&layout, &caps).unwrap();
    assert_eq!(first, second);
}

#[test]
fn equal_layouts_produce_equal_plans() {
    let a = kitchen_sink_layout();
    let b = kitchen_sink_layout();
    assert_eq!(a, b);
    assert!(!Arc::ptr_eq(&a, &b));
    let translator = Translator::Slotted(SlottedTranslator);
    let caps = Capabilities::unrestricted();
    let plan_a = translator.translate(&a, &caps).unwrap();
    let plan_b = translator.translate(&b, &caps).unwrap();
    assert_eq!(plan_a.detail(), plan_b.detail());
}

#[test]
fn grouping_follows_the_fixed_partition_order() {
    let layout = kitchen_sink_layout();
    let plan = Translator::Grouped(GroupedTranslator)
        .translate(&layout, &Capabilities::unrestricted())
        .unwrap();
    let PlanDetail::Grouped(grouped) = plan.detail() else {
        panic!("grouped translator produced a non-grouped plan");
    };
    let order: Vec<(ResourceKind, Option<ResourceUsage>)> = grouped
        .groups
        .iter()
        .map(|g| (g.kind, g.usage))
        .collect();
    assert_eq!(
        order,
        vec![
            (ResourceKind::Buffer, Some(ResourceUsage::ConstantRead)),
            (ResourceKind::Buffer, Some(ResourceUsage::ShaderRead)),
            (ResourceKind::Texture, Some(ResourceUsage::ShaderRead)),
            (ResourceKind::Buffer, Some(ResourceUsage::ShaderReadWrite)),
            (ResourceKind::Texture, Some(ResourceUsage::ShaderReadWrite)),
            (ResourceKind::Sampler, None),
        ]
    );
}

#[test]
fn graphics_only_layout_denies_compute() {
    let layout = kitchen_sink_layout();
    for translator in [
        Translator::Grouped(GroupedTranslator),
        Translator::Slotted(SlottedTranslator),
    ] {
        let plan = translator
            .translate(&layout, &Capabilities::unrestricted())
            .unwrap();
        let denied = plan.denied_stages();
        assert!(denied.contains(Stages::COMPUTE));
        assert!(denied.contains(Stages::GEOMETRY));
        assert!(!denied.contains(Stages::VERTEX));
        assert!(!denied.contains(Stages::FRAGMENT));
    }
}

#[test]
fn slotted_plan_preserves_declaration_order_and_mirrors_unbinds() {
    let layout = kitchen_sink_layout();
    let plan = Translator::Slotted(SlottedTranslator)
        .translate(&layout, &Capabilities::unrestricted())
        .unwrap();
    let PlanDetail::Slotted(slotted) = plan.detail() else {
        panic!("slotted translator produced a non-slotted plan");
    };
    assert_eq!(slotted.binds.len(), layout.slot_count());
    assert_eq!(slotted.unbinds.len(), layout.slot_count());
    let declared: Vec<usize> = (0..layout.slot_count()).collect();
    let bound: Vec<usize> = slotted.binds.iter().map(|b| b.layout_index).collect();
    assert_eq!(bound, declared);
    // Every bind has an unbind for the same (kind, usage, slot) run.
    for bind in &slotted.binds {
        assert!(slotted.unbinds.iter().any(|u| {
            u.kind == bind.kind
                && u.usage == bind.usage
                && u.slot == bind.slot
                && u.count == bind.array_len
        }));
    }
}

#[test]
fn rederived_layout_round_trips_to_the_same_plan() {
    let build = || {
        Arc::new(
            PipelineLayout::new(vec![
                slot(
                    ResourceKind::Buffer,
                    ResourceUsage::ConstantRead,
                    Stages::VERTEX,
                    0,
                ),
                slot(
                    ResourceKind::Texture,
                    ResourceUsage::ShaderRead,
                    Stages::FRAGMENT,
                    0,
                ),
            ])
            .expect("valid layout"),
        )
    };
    let translator = Translator::Grouped(GroupedTranslator);
    let caps = Capabilities::unrestricted();
    let original = translator.translate(&build(), &caps).unwrap();
    let rederived = translator.translate(&build(), &caps).unwrap();
    assert_eq!(original.detail(), rederived.detail());
    assert_eq!(original.denied_stages(), rederived.denied_stages());
    assert!(original.denied_stages().contains(Stages::COMPUTE));
    assert!(!original.denied_stages().contains(Stages::VERTEX));
    assert!(!original.denied_stages().contains(Stages::FRAGMENT));
}

#[test]
fn capability_limits_reject_before_translation() {
    let layout = kitchen_sink_layout();
    let mut caps = Capabilities::unrestricted();
    caps.max_binding_slots = 2;
    let result = Translator::Grouped(GroupedTranslator).translate(&layout, &caps);
    assert!(result.is_err());

    let mut caps = Capabilities::unrestricted();
    caps.supports_samplers = false;
    let result = Translator::Slotted(SlottedTranslator).translate(&layout, &caps);
    assert!(result.is_err());
}

#[test]
fn compute_layout_translates_when_compute_is_supported() {
    let layout = Arc::new(
        PipelineLayout::new(vec![slot(
            ResourceKind::Buffer,
            ResourceUsage::ShaderReadWrite,
            Stages::COMPUTE,
            0,
        )])
        .expect("valid layout"),
    );
    let plan = Translator::Grouped(GroupedTranslator)
        .translate(&layout, &Capabilities::unrestricted())
        .unwrap();
    assert!(!plan.denied_stages().contains(Stages::COMPUTE));
    assert!(plan.denied_stages().contains(Stages::VERTEX));

    let mut caps = Capabilities::unrestricted();
    caps.supports_compute_stage = false;
    assert!(Translator::Grouped(GroupedTranslator)
        .translate(&layout, &caps)
        .is_err());
}
