// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
slots_and_signatures translates backend-agnostic resource-binding declarations
into native binding plans and keeps redundant fixed-function state changes off
the driver.

GPU APIs disagree about how shader resources reach the pipeline. One family
wants bindings gathered into contiguous tables addressed through a signature
(root-signature style); the other wants each binding poked into a numbered
slot of global state (slot-machine style). Engines should not care. This
crate lets them declare *what* is bound - kind, usage, stage visibility, slot
index - exactly once, and turns that declaration into whichever shape the
active backend needs.

# Architecture

The crate is organized around a few load-bearing ideas:

* **Declare once, translate per backend.** A [`bindings::PipelineLayout`] is
  validated at construction and then immutable. A
  [`backend::Translator`] - chosen once when the backend comes up - turns it
  into a [`backend::NativeBindingPlan`]. Translation is pure: same layout,
  same plan, every time.
* **Validation at the boundary, not in the loop.** Layouts and binding sets
  reject malformed input when they are built. The per-frame path
  ([`queue::CommandQueue::submit`]) assumes its inputs are well-formed and
  does not re-check them, except when a diagnostic sink is installed.
* **The driver never sees a no-op.** The [`state_cache::StateObjectCache`]
  interns fixed-function state by value and elides rebinds of the
  already-bound object, so calls that reach the [`backend::NativeDriver`]
  seam are real work.
* **Debugging is a decorator.** [`debug::DebugProgramBuilder`] wraps the
  plain [`debug::ProgramBuilder`] and reports through a caller-supplied
  [`debug::DiagnosticSink`]; release builds simply don't construct it.

# Quick example

```
use slots_and_signatures::bindings::{
    BindingSlot, PipelineLayout, ResourceKind, ResourceUsage, Stages,
};
use slots_and_signatures::backend::{GroupedTranslator, Translator};
use slots_and_signatures::capabilities::Capabilities;
use std::sync::Arc;

let layout = Arc::new(PipelineLayout::new(vec![
    BindingSlot::new(
        ResourceKind::Buffer,
        ResourceUsage::ConstantRead,
        Stages::VERTEX | Stages::FRAGMENT,
        0,
    )?,
    BindingSlot::new(
        ResourceKind::Texture,
        ResourceUsage::ShaderRead,
        Stages::FRAGMENT,
        0,
    )?,
])?);

let translator = Translator::Grouped(GroupedTranslator);
let plan = translator.translate(&layout, &Capabilities::unrestricted())?;
assert!(plan.denied_stages().contains(Stages::COMPUTE));
# Ok::<(), Box<dyn std::error::Error>>(())
```

# Blocking

Nothing in binding, translation, or caching ever blocks. The only blocking
calls in the crate are [`queue::Fence::wait`] and
[`queue::CommandQueue::wait_idle`], and both are explicit.

# Status

The translators cover the two binding paradigms this crate targets; the set
is closed on purpose, so a new backend paradigm means a new variant here
rather than an external plugin.
*/

logwise::declare_logging_domain!();

pub mod backend;
pub mod bindings;
pub mod capabilities;
pub mod debug;
pub mod queue;
pub mod shaders;
pub mod state_cache;
