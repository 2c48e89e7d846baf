// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Timed and event-counting waits.

use chainflow_domain::events::CF_TIMER_EVENT;
use chainflow_domain::{Element, Event, ReturnCode};

/// Read the `time_stamp` field `CF_TIMER_EVENT`'s payload carries, if
/// `event` is one. Every wait/watchdog operator that reasons about elapsed
/// wall-clock time reads it from here rather than from a clock reference of
/// its own - an element's callbacks only ever see `(data, event)`, never the
/// engine's clock, so the timer event's own payload is the only source of
/// "now" available to them.
fn timer_timestamp(event: &Event) -> Option<f64> {
    if !event.is(CF_TIMER_EVENT) {
        return None;
    }
    event.data().get("time_stamp").and_then(serde_json::Value::as_f64)
}

struct WaitTimeState {
    start: Option<f64>,
    delay_seconds: f64,
}

/// An element that halts on every `CF_TIMER_EVENT` until `delay_seconds`
/// have elapsed since the first one it saw, then disables itself.
/// Ignores every other event id.
///
/// The "first `CF_TIMER_EVENT` it saw" is this element's own stand-in for
/// "the wall-clock time it was enabled": an element's `init` callback has no
/// event to read a timestamp from, so the deadline is seeded from the first
/// tick delivered to `process` instead of from `init`.
pub fn wait_time(name: impl Into<String>, delay_seconds: f64) -> Element {
    Element::new(
        name,
        WaitTimeState {
            start: None,
            delay_seconds,
        },
        |data, event| {
            let state = data.downcast_mut::<WaitTimeState>().expect("wait_time state");
            let Some(now) = timer_timestamp(event) else {
                return ReturnCode::Halt;
            };
            let start = *state.start.get_or_insert(now);
            if now - start >= state.delay_seconds {
                ReturnCode::Disable
            } else {
                ReturnCode::Halt
            }
        },
    )
    .with_init(|data| {
        data.downcast_mut::<WaitTimeState>().expect("wait_time state").start = None;
    })
}

struct WaitForEventState {
    seen: u64,
    timeouts_seen: u64,
}

/// Builder for the "wait for N occurrences of an event, with an optional
/// timeout" operator.
///
/// Counts occurrences of `target_event`; once it has seen `target_count` of
/// them, the element disables itself (`CF_DISABLE`). If a timeout is
/// configured via [`WaitForEvent::timeout`], the element also counts
/// occurrences of a (possibly different) timeout event id, and if that
/// count is reached before the target count is, it invokes the optional
/// failure callback and returns `CF_RESET` (if
/// [`WaitForEvent::reset_on_timeout`] was set) or `CF_TERMINATE` otherwise.
pub struct WaitForEvent {
    target_event: String,
    target_count: u64,
    timeout_event: String,
    timeout_count: Option<u64>,
    reset_on_timeout: bool,
    on_timeout: Option<Box<dyn FnMut()>>,
}

impl WaitForEvent {
    /// Wait for `target_count` occurrences of `target_event` (counts below
    /// one are treated as one).
    pub fn new(target_event: impl Into<String>, target_count: u64) -> Self {
        Self {
            target_event: target_event.into(),
            target_count: target_count.max(1),
            timeout_event: CF_TIMER_EVENT.to_string(),
            timeout_count: None,
            reset_on_timeout: false,
            on_timeout: None,
        }
    }

    /// Fail if `timeout_event` occurs `count` times before the target count
    /// is reached.
    pub fn timeout(mut self, timeout_event: impl Into<String>, count: u64) -> Self {
        self.timeout_event = timeout_event.into();
        self.timeout_count = Some(count.max(1));
        self
    }

    /// On timeout, return `CF_RESET` instead of `CF_TERMINATE`.
    pub fn reset_on_timeout(mut self, reset: bool) -> Self {
        self.reset_on_timeout = reset;
        self
    }

    /// Invoke `on_timeout` once, before returning the timeout's return code.
    pub fn on_timeout<F: FnMut() + 'static>(mut self, on_timeout: F) -> Self {
        self.on_timeout = Some(Box::new(on_timeout));
        self
    }

    /// Build the element.
    pub fn build(self, name: impl Into<String>) -> Element {
        let WaitForEvent {
            target_event,
            target_count,
            timeout_event,
            timeout_count,
            reset_on_timeout,
            mut on_timeout,
        } = self;

        Element::new(
            name,
            WaitForEventState {
                seen: 0,
                timeouts_seen: 0,
            },
            move |data, event| {
                let state = data.downcast_mut::<WaitForEventState>().expect("wait_for_event state");

                if event.is(&target_event) {
                    state.seen += 1;
                    return if state.seen >= target_count {
                        ReturnCode::Disable
                    } else {
                        ReturnCode::Halt
                    };
                }

                if let Some(limit) = timeout_count {
                    if event.is(&timeout_event) {
                        state.timeouts_seen += 1;
                        if state.timeouts_seen >= limit {
                            if let Some(callback) = on_timeout.as_mut() {
                                callback();
                            }
                            return if reset_on_timeout {
                                ReturnCode::Reset
                            } else {
                                ReturnCode::Terminate
                            };
                        }
                    }
                }

                ReturnCode::Halt
            },
        )
        .with_init(|data| {
            let state = data.downcast_mut::<WaitForEventState>().expect("wait_for_event state");
            state.seen = 0;
            state.timeouts_seen = 0;
        })
    }
}
