// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Fixed-return-code elements and the event-filter logger, both found in
//! `basic_opcodes.py` (`asm_halt`/`asm_reset`/`asm_terminate`/`asm_continue`/
//! `asm_event_filter`) but dropped from the distilled specification. Kept
//! here because they're simple, self-contained recipes with no interaction
//! with any of the spec's Non-goals - an element whose `process` always
//! returns one fixed code, or one that logs on a watched event id without
//! otherwise altering control flow.

use std::any::Any;

use chainflow_domain::{Element, Event, ReturnCode};

/// An element whose `process` always returns `CF_HALT`, regardless of the
/// event delivered. Useful as an explicit no-op placeholder in a chain.
pub fn halt(name: impl Into<String>) -> Element {
    Element::new(name, (), |_data: &mut dyn Any, _event: &Event| ReturnCode::Halt)
}

/// An element whose `process` always returns `CF_CONTINUE`.
pub fn pass_through(name: impl Into<String>) -> Element {
    Element::new(name, (), |_data: &mut dyn Any, _event: &Event| ReturnCode::Continue)
}

/// An element whose `process` always returns `CF_RESET`, unconditionally
/// resetting its chain the first time it runs.
pub fn reset(name: impl Into<String>) -> Element {
    Element::new(name, (), |_data: &mut dyn Any, _event: &Event| ReturnCode::Reset)
}

/// An element whose `process` always returns `CF_TERMINATE`, unconditionally
/// disabling its chain the first time it runs.
pub fn terminate(name: impl Into<String>) -> Element {
    Element::new(name, (), |_data: &mut dyn Any, _event: &Event| ReturnCode::Terminate)
}

/// An element that logs, at `tracing` `debug` level, every delivered event
/// whose id appears in `event_ids`, then always returns `CF_CONTINUE`
/// (matching `exec_event_filter_fn`'s unconditional pass-through). Unlike the
/// `asm_*` one-shots, this one inspects every event delivered to it for the
/// lifetime of the chain rather than running once at `init`.
pub fn event_filter(name: impl Into<String>, event_ids: impl IntoIterator<Item = impl Into<String>>) -> Element {
    let watched: Vec<String> = event_ids.into_iter().map(Into::into).collect();
    let element_name = name.into();
    Element::new(element_name.clone(), (), move |_data: &mut dyn Any, event: &Event| {
        if watched.iter().any(|id| id == event.id()) {
            tracing::debug!(target: "chainflow::op", element = %element_name, event_id = %event.id(), "watched event received");
        }
        ReturnCode::Continue
    })
}
