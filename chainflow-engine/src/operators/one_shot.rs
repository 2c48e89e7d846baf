// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! One-shot elements: the base recipe the rest of the operator library is
//! built from. A one-shot's `process` function never looks at the event it
//! was given - the whole point of the element is to run a side effect once,
//! from `init`, the first time it becomes active.

use chainflow_domain::support::{null_continue, null_disable};
use chainflow_domain::Element;

use crate::handle::EngineHandle;

/// An element that runs `effect` once, on its first activation, then
/// disables itself. `process` is [`null_disable`](chainflow_domain::support::null_disable) -
/// every call returns `CF_DISABLE`, but since `init` always runs before the
/// first `process` call, the element never actually reaches `process` with
/// work left to do: disabling after init's single run is what takes it out
/// of the chain's dispatch for good.
pub fn one_shot_halt<F>(name: impl Into<String>, effect: F) -> Element
where
    F: FnMut() + 'static,
{
    let mut effect = effect;
    Element::new(name, (), null_disable).with_init(move |_data| effect())
}

/// An element that runs `on_init` once, on its first activation, and
/// `on_terminate` once, when it (or its chain) is disabled - and otherwise
/// just keeps running (`CF_CONTINUE`) in between. Useful for bracketing the
/// lifetime of some side effect (typically enabling/disabling auxiliary
/// chains) with the lifetime of the element's own chain.
pub fn one_shot_continue<I, T>(name: impl Into<String>, on_init: I, on_terminate: T) -> Element
where
    I: FnMut() + 'static,
    T: FnMut() + 'static,
{
    let mut on_init = on_init;
    let mut on_terminate = on_terminate;
    Element::new(name, (), null_continue)
        .with_init(move |_data| on_init())
        .with_terminate(move |_data| on_terminate())
}

/// A one-shot that logs `message` at `init` time, through `tracing`, then
/// disables itself. The specialization `log message` names in the
/// operator library's description.
pub fn log_message(name: impl Into<String>, message: impl Into<String>) -> Element {
    let message = message.into();
    one_shot_halt(name, move || tracing::info!(target: "chainflow::op", "{message}"))
}

/// A one-shot whose `init` sends `event` on the shared system queue through
/// `handle`, then disables itself.
pub fn send_system_event(name: impl Into<String>, handle: EngineHandle, event: chainflow_domain::Event) -> Element {
    one_shot_halt(name, move || handle.send_system_event(event.clone()))
}

/// A one-shot whose `init` sends `event` on `chain_name`'s own queue through
/// `handle`, then disables itself.
pub fn send_named_event(
    name: impl Into<String>,
    handle: EngineHandle,
    chain_name: impl Into<String>,
    event: chainflow_domain::Event,
) -> Element {
    let chain_name = chain_name.into();
    one_shot_halt(name, move || handle.send_named_event(chain_name.clone(), event.clone()))
}
