// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! A predicate verified against every delivered event, with an optional
//! event-count timeout.

use chainflow_domain::events::CF_TIMER_EVENT;
use chainflow_domain::{Element, Event, ReturnCode};

struct VerifyState<P> {
    predicate: P,
    timeouts_seen: u64,
}

/// Builder for the "assert a predicate holds on every event" operator.
///
/// On every delivered event, `predicate` is evaluated. While it holds, the
/// element returns `CF_CONTINUE`, letting the rest of its chain run for this
/// event - verification is an ongoing assertion, not a one-time wait. The
/// first time `predicate` returns `false`, the element runs the optional
/// failure callback and returns `CF_RESET` (if [`Verify::reset_on_failure`])
/// or `CF_TERMINATE`. If a timeout is configured via [`Verify::timeout`] and
/// the timeout event reaches its count, the element takes the same failure
/// path regardless of what `predicate` last returned.
pub struct Verify<P> {
    predicate: P,
    timeout_event: String,
    timeout_count: Option<u64>,
    reset_on_failure: bool,
    on_failure: Option<Box<dyn FnMut()>>,
}

impl<P> Verify<P>
where
    P: FnMut(&Event) -> bool + 'static,
{
    /// Verify with `predicate`, which is given the opportunity to inspect
    /// every event delivered to this element.
    pub fn new(predicate: P) -> Self {
        Self {
            predicate,
            timeout_event: CF_TIMER_EVENT.to_string(),
            timeout_count: None,
            reset_on_failure: false,
            on_failure: None,
        }
    }

    /// Fail if `timeout_event` occurs `count` times, independent of what
    /// `predicate` returns.
    pub fn timeout(mut self, timeout_event: impl Into<String>, count: u64) -> Self {
        self.timeout_event = timeout_event.into();
        self.timeout_count = Some(count.max(1));
        self
    }

    /// On failure, return `CF_RESET` instead of `CF_TERMINATE`.
    pub fn reset_on_failure(mut self, reset: bool) -> Self {
        self.reset_on_failure = reset;
        self
    }

    /// Invoke `on_failure` once, before returning the failure's return code.
    pub fn on_failure<F: FnMut() + 'static>(mut self, on_failure: F) -> Self {
        self.on_failure = Some(Box::new(on_failure));
        self
    }

    /// Build the element.
    pub fn build(self, name: impl Into<String>) -> Element {
        let Verify {
            predicate,
            timeout_event,
            timeout_count,
            reset_on_failure,
            mut on_failure,
        } = self;

        Element::new(
            name,
            VerifyState {
                predicate,
                timeouts_seen: 0,
            },
            move |data, event| {
                let state = data.downcast_mut::<VerifyState<P>>().expect("verify state");

                let fail = |on_failure: &mut Option<Box<dyn FnMut()>>| {
                    if let Some(callback) = on_failure.as_mut() {
                        callback();
                    }
                };

                if !(state.predicate)(event) {
                    fail(&mut on_failure);
                    return if reset_on_failure {
                        ReturnCode::Reset
                    } else {
                        ReturnCode::Terminate
                    };
                }

                if let Some(limit) = timeout_count {
                    if event.is(&timeout_event) {
                        state.timeouts_seen += 1;
                        if state.timeouts_seen >= limit {
                            fail(&mut on_failure);
                            return if reset_on_failure {
                                ReturnCode::Reset
                            } else {
                                ReturnCode::Terminate
                            };
                        }
                    }
                }

                ReturnCode::Continue
            },
        )
        .with_init(|data| {
            data.downcast_mut::<VerifyState<P>>().expect("verify state").timeouts_seen = 0;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_continues_while_predicate_holds() {
        let mut element = Verify::new(|event: &Event| !event.is("CF_DOOR_JAMMED")).build("v");
        let ok = Event::unit("CF_DOOR_CLOSED").unwrap();
        assert_eq!(element.process(&ok), ReturnCode::Continue);
        assert_eq!(element.process(&ok), ReturnCode::Continue);
    }

    #[test]
    fn verify_fails_the_moment_predicate_goes_false() {
        let mut element = Verify::new(|event: &Event| !event.is("CF_DOOR_JAMMED")).build("v");
        let ok = Event::unit("CF_DOOR_CLOSED").unwrap();
        let bad = Event::unit("CF_DOOR_JAMMED").unwrap();
        assert_eq!(element.process(&ok), ReturnCode::Continue);
        assert_eq!(element.process(&bad), ReturnCode::Terminate);
    }

    #[test]
    fn verify_times_out_even_while_predicate_still_holds() {
        let mut element = Verify::new(|_event: &Event| true).timeout(CF_TIMER_EVENT, 2).build("v");
        let timer = Event::unit(CF_TIMER_EVENT).unwrap();
        assert_eq!(element.process(&timer), ReturnCode::Continue);
        assert_eq!(element.process(&timer), ReturnCode::Terminate);
    }

    #[test]
    fn verify_timeout_count_resets_on_reactivation() {
        let mut element = Verify::new(|_event: &Event| true).timeout(CF_TIMER_EVENT, 2).build("v");
        let timer = Event::unit(CF_TIMER_EVENT).unwrap();
        assert_eq!(element.process(&timer), ReturnCode::Continue);

        element.disable();
        element.enable();

        assert_eq!(element.process(&timer), ReturnCode::Continue);
        assert_eq!(element.process(&timer), ReturnCode::Terminate);
    }

    #[test]
    fn verify_reset_on_failure_runs_callback() {
        let fired = std::rc::Rc::new(std::cell::RefCell::new(false));
        let fired_clone = fired.clone();
        let mut element = Verify::new(|_event: &Event| false)
            .reset_on_failure(true)
            .on_failure(move || *fired_clone.borrow_mut() = true)
            .build("v");
        let event = Event::unit("anything").unwrap();
        assert_eq!(element.process(&event), ReturnCode::Reset);
        assert!(*fired.borrow());
    }
}
