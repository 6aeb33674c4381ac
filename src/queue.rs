// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Command sequencing, submission, and fence-based synchronization.
//!
//! A [`CommandSequence`] records bind/draw/dispatch commands without touching
//! the driver; encoding never blocks. A [`CommandQueue`] executes sequences in
//! submission order relative to itself (no ordering is guaranteed against
//! other queues) and signals its [`Fence`] with a monotonically increasing
//! value per submission. Once submitted, a sequence cannot be withdrawn.
//!
//! The only blocking operations in this crate live here: [`Fence::wait`] and
//! [`CommandQueue::wait_idle`]. Both are explicit, caller-requested blocking
//! points - nothing inside binding or translation ever waits. `wait_idle`
//! belongs at teardown or resize boundaries only; per-frame use forfeits
//! pipelining.
//!
//! Each sequence object is owned by whichever thread encodes into it; the
//! `&mut` recording API means two threads cannot share one without external
//! mutual exclusion, which is exactly the intended contract.

use crate::backend::{NativeBindingPlan, NativeDriver, PlanDetail};
use crate::bindings::resource_set::{ResourceBindingSet, ResourceHandle};
use crate::bindings::visible_to::{ResourceKind, ResourceUsage, Stages};
use crate::debug::sink::{DiagnosticSink, Severity};
use crate::state_cache::{CachedStateObject, StateObjectCache};
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub(crate) enum Command {
    BindPlan(Arc<NativeBindingPlan>),
    BindResources(ResourceBindingSet),
    BindState(Arc<CachedStateObject>),
    UnbindResourceSlots {
        kind: ResourceKind,
        usage: ResourceUsage,
        first_slot: u32,
        count: u32,
        stages: Stages,
    },
    Draw {
        vertex_count: u32,
    },
    Dispatch {
        groups: [u32; 3],
    },
}

/// A fully-encoded, not-yet-submitted run of commands.
#[derive(Debug)]
pub struct CommandSequence {
    debug_name: String,
    commands: Vec<Command>,
}

impl CommandSequence {
    /// An empty sequence. The name shows up in logs only.
    pub fn new(debug_name: &str) -> Self {
        CommandSequence {
            debug_name: debug_name.to_string(),
            commands: Vec::new(),
        }
    }

    /// Makes `plan` current for subsequent resource binds in this sequence.
    pub fn bind_plan(&mut self, plan: Arc<NativeBindingPlan>) {
        self.commands.push(Command::BindPlan(plan));
    }

    /// Binds a resource set against the current plan.
    ///
    /// The set must have been built from the same layout the plan was
    /// translated from; a mismatch is reported at execution when validation
    /// is active, and the bind is skipped.
    pub fn bind_resources(&mut self, resources: ResourceBindingSet) {
        self.commands.push(Command::BindResources(resources));
    }

    /// Binds a cached fixed-function state object.
    ///
    /// Redundant binds are elided by the queue's state cache at execution.
    pub fn bind_state(&mut self, state: Arc<CachedStateObject>) {
        self.commands.push(Command::BindState(state));
    }

    /// Explicitly clears a run of binding slots.
    ///
    /// Required before a later pass reads the same physical resource through
    /// a *different* usage class - a storage-written texture must be unbound
    /// from its storage slot before being sampled. The unbind executes on the
    /// non-debug path too; validation merely flags the omission.
    pub fn unbind_resource_slots(
        &mut self,
        kind: ResourceKind,
        usage: ResourceUsage,
        first_slot: u32,
        count: u32,
        stages: Stages,
    ) {
        self.commands.push(Command::UnbindResourceSlots {
            kind,
            usage,
            first_slot,
            count,
            stages,
        });
    }

    /// Records a draw.
    pub fn draw(&mut self, vertex_count: u32) {
        self.commands.push(Command::Draw { vertex_count });
    }

    /// Records a compute dispatch.
    pub fn dispatch(&mut self, groups: [u32; 3]) {
        self.commands.push(Command::Dispatch { groups });
    }

    /// The name given at construction.
    pub fn debug_name(&self) -> &str {
        &self.debug_name
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// A monotonically increasing completion counter.
///
/// Signaled by the queue as submitted work completes; waited on by whichever
/// threads need to know a submission has drained before reusing or releasing
/// the resources it referenced.
#[derive(Debug, Default)]
pub struct Fence {
    state: Mutex<u64>,
    cond: Condvar,
}

impl Fence {
    /// A fence at value zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The highest value signaled so far.
    pub fn completed_value(&self) -> u64 {
        *self.state.lock().expect("fence poisoned")
    }

    /// Blocks until the fence reaches at least `value` or `timeout` elapses.
    ///
    /// Returns `true` if the value was reached - immediately, without
    /// blocking, if it already had been. Returns `false` on timeout; that is
    /// a status, not an error, and the caller may simply wait again.
    pub fn wait(&self, value: u64, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut current = self.state.lock().expect("fence poisoned");
        while *current < value {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (next, result) = self
                .cond
                .wait_timeout(current, deadline - now)
                .expect("fence poisoned");
            current = next;
            if result.timed_out() && *current < value {
                return false;
            }
        }
        true
    }

    fn wait_unbounded(&self, value: u64) {
        let mut current = self.state.lock().expect("fence poisoned");
        while *current < value {
            current = self.cond.wait(current).expect("fence poisoned");
        }
    }

    pub(crate) fn signal(&self, value: u64) {
        let mut current = self.state.lock().expect("fence poisoned");
        if value > *current {
            *current = value;
            self.cond.notify_all();
        }
    }
}

/// Hazard-tracking record of one live explicit binding.
#[derive(Debug, Clone, Copy)]
struct LiveBinding {
    resource: ResourceHandle,
    kind: ResourceKind,
    usage: ResourceUsage,
    slot: u32,
    stages: Stages,
}

/// Executes command sequences in submission order and fences completion.
pub struct CommandQueue {
    fence: Arc<Fence>,
    state_cache: Arc<StateObjectCache>,
    sink: Option<Arc<dyn DiagnosticSink>>,
    last_submitted: u64,
    live_bindings: Vec<LiveBinding>,
}

impl CommandQueue {
    /// A queue sharing the given state cache.
    pub fn new(state_cache: Arc<StateObjectCache>) -> Self {
        CommandQueue {
            fence: Arc::new(Fence::new()),
            state_cache,
            sink: None,
            last_submitted: 0,
            live_bindings: Vec::new(),
        }
    }

    /// Installs a diagnostic sink, enabling execution-time hazard tracking.
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// The queue's fence, shareable with waiting threads.
    pub fn fence(&self) -> Arc<Fence> {
        self.fence.clone()
    }

    /// The fence value of the most recent submission.
    pub fn last_submitted(&self) -> u64 {
        self.last_submitted
    }

    /// Executes `sequence` against `driver` and signals the fence.
    ///
    /// Returns the fence value that proves this submission's completion.
    /// Sequences submitted to this queue execute in submission order; nothing
    /// is promised relative to other queues.
    pub fn submit(&mut self, sequence: CommandSequence, driver: &mut dyn NativeDriver) -> u64 {
        logwise::debuginternal_sync!(
            "submitting {name} with {count} commands",
            name = logwise::privacy::LogIt(sequence.debug_name()),
            count = logwise::privacy::LogIt(sequence.len())
        );
        let mut current_plan: Option<Arc<NativeBindingPlan>> = None;
        for command in sequence.commands {
            match command {
                Command::BindPlan(plan) => current_plan = Some(plan),
                Command::BindState(state) => self.state_cache.bind(&state, driver),
                Command::BindResources(set) => {
                    self.execute_bind_resources(&current_plan, &set, driver);
                }
                Command::UnbindResourceSlots {
                    kind,
                    usage,
                    first_slot,
                    count,
                    stages,
                } => {
                    driver.unbind_slots(kind, usage, first_slot, count, stages);
                    if self.sink.is_some() {
                        self.live_bindings.retain(|live| {
                            !(live.kind == kind
                                && live.usage == usage
                                && live.slot >= first_slot
                                && live.slot < first_slot + count
                                && live.stages.intersects(stages))
                        });
                    }
                }
                Command::Draw { vertex_count } => driver.draw(vertex_count),
                Command::Dispatch { groups } => driver.dispatch(groups),
            }
        }
        self.last_submitted += 1;
        self.fence.signal(self.last_submitted);
        self.last_submitted
    }

    /// Signals the fence with a caller-chosen value.
    ///
    /// Values at or below the current one are ignored; the counter never
    /// moves backwards.
    pub fn signal_fence(&mut self, value: u64) {
        if value > self.last_submitted {
            self.last_submitted = value;
        }
        self.fence.signal(value);
    }

    /// Blocks until everything submitted so far has completed.
    ///
    /// Teardown and resize boundaries only - never per frame.
    pub fn wait_idle(&self) {
        self.fence.wait_unbounded(self.last_submitted);
    }

    fn execute_bind_resources(
        &mut self,
        current_plan: &Option<Arc<NativeBindingPlan>>,
        set: &ResourceBindingSet,
        driver: &mut dyn NativeDriver,
    ) {
        let Some(plan) = current_plan else {
            self.report(
                Severity::Error,
                "resource binding recorded with no plan bound",
                "",
            );
            return;
        };
        if set.layout() != plan.layout() {
            self.report(
                Severity::Error,
                "resource binding set does not match the bound plan's layout",
                "",
            );
            return;
        }
        match plan.detail() {
            PlanDetail::Grouped(grouped) => {
                for (group_index, group) in grouped.groups.iter().enumerate() {
                    let resources: Vec<ResourceHandle> = group
                        .ranges
                        .iter()
                        .map(|range| set.resources()[range.layout_index])
                        .collect();
                    if self.sink.is_some() {
                        for range in &group.ranges {
                            let slot = set.layout().slots()[range.layout_index];
                            self.track_bind(
                                set.resources()[range.layout_index],
                                slot.kind,
                                slot.usage,
                                slot.slot,
                                slot.visible_stages,
                            );
                        }
                    }
                    driver.bind_group_table(group_index, group, &resources);
                }
            }
            PlanDetail::Slotted(slotted) => {
                for bind in &slotted.binds {
                    let resource = set.resources()[bind.layout_index];
                    if self.sink.is_some() {
                        self.track_bind(resource, bind.kind, bind.usage, bind.slot, bind.stages);
                    }
                    driver.bind_slot(bind, resource);
                }
            }
        }
    }

    /// Remembers a live binding and flags usage-class reuse hazards.
    fn track_bind(
        &mut self,
        resource: ResourceHandle,
        kind: ResourceKind,
        usage: ResourceUsage,
        slot: u32,
        stages: Stages,
    ) {
        for live in &self.live_bindings {
            if live.resource == resource && live.usage != usage {
                self.report(
                    Severity::Warning,
                    &format!(
                        "resource rebound as {usage} while still bound as {} - missing explicit unbind",
                        live.usage
                    ),
                    &format!("{resource:?}"),
                );
                break;
            }
        }
        if let Some(existing) = self
            .live_bindings
            .iter_mut()
            .find(|live| live.kind == kind && live.usage == usage && live.slot == slot)
        {
            existing.resource = resource;
            existing.stages = stages;
        } else {
            self.live_bindings.push(LiveBinding {
                resource,
                kind,
                usage,
                slot,
                stages,
            });
        }
    }

    fn report(&self, severity: Severity, message: &str, offending: &str) {
        if let Some(sink) = &self.sink {
            sink.report(severity, message, offending);
        }
    }
}
