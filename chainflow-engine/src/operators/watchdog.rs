// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! A two-state (`ON`/`OFF`) pat/cancel/start timeout monitor.

use chainflow_domain::events::CF_SECOND_EVENT;
use chainflow_domain::{Element, Event, ReturnCode};

#[derive(Clone, Copy, PartialEq, Eq)]
enum WatchdogMode {
    On,
    Off,
}

struct WatchdogState {
    mode: WatchdogMode,
    pat_count: u64,
}

/// Builder for the watchdog operator: a finite state machine with two
/// states, `ON` (the element's initial state) and `OFF`.
///
/// While `ON`: a `pat_event` resets the elapsed `time_event` count back to
/// zero and halts (the classic "pet the dog before it bites" pattern); a
/// `cancel_event` moves to `OFF` and halts; every `time_event` (typically
/// `CF_SECOND_EVENT`) increments the count, and once it reaches
/// `pat_time_out`, the element invokes the failure callback and returns
/// `CF_RESET` (if `reset_flag`) or `CF_TERMINATE` - otherwise `CF_CONTINUE`,
/// so the rest of the chain still runs.
///
/// While `OFF`: a `start_event` moves back to `ON` and resets the count,
/// halting; every other event is `CF_CONTINUE`.
pub struct Watchdog {
    pat_event: String,
    start_event: String,
    cancel_event: String,
    time_event: String,
    pat_time_out: u64,
    reset_flag: bool,
    on_failure: Option<Box<dyn FnMut()>>,
}

impl Watchdog {
    /// `pat_event` re-arms the watchdog while `ON`; `start_event` moves it
    /// from `OFF` back to `ON`; `cancel_event` moves it from `ON` to `OFF`;
    /// `pat_time_out` is how many `time_event`s (default `CF_SECOND_EVENT`,
    /// see [`Watchdog::time_event`]) may elapse unpatted before it bites.
    pub fn new(
        pat_event: impl Into<String>,
        start_event: impl Into<String>,
        cancel_event: impl Into<String>,
        pat_time_out: u64,
    ) -> Self {
        Self {
            pat_event: pat_event.into(),
            start_event: start_event.into(),
            cancel_event: cancel_event.into(),
            time_event: CF_SECOND_EVENT.to_string(),
            pat_time_out: pat_time_out.max(1),
            reset_flag: false,
            on_failure: None,
        }
    }

    /// Count `time_event` occurrences instead of the default
    /// `CF_SECOND_EVENT`.
    pub fn time_event(mut self, time_event: impl Into<String>) -> Self {
        self.time_event = time_event.into();
        self
    }

    /// On timeout, return `CF_RESET` (disable the chain, then re-enable it)
    /// instead of `CF_TERMINATE`.
    pub fn reset_on_timeout(mut self, reset_flag: bool) -> Self {
        self.reset_flag = reset_flag;
        self
    }

    /// Run `on_failure` once, before returning the timeout's return code.
    pub fn on_failure<F: FnMut() + 'static>(mut self, on_failure: F) -> Self {
        self.on_failure = Some(Box::new(on_failure));
        self
    }

    /// Build the element. Starts in state `ON` with `pat_count = 0`.
    pub fn build(self, name: impl Into<String>) -> Element {
        let Watchdog {
            pat_event,
            start_event,
            cancel_event,
            time_event,
            pat_time_out,
            reset_flag,
            mut on_failure,
        } = self;

        Element::new(
            name,
            WatchdogState {
                mode: WatchdogMode::On,
                pat_count: 0,
            },
            move |data, event| {
                let state = data.downcast_mut::<WatchdogState>().expect("watchdog state");

                match state.mode {
                    WatchdogMode::On => {
                        if event.is(&pat_event) {
                            state.pat_count = 0;
                            return ReturnCode::Halt;
                        }
                        if event.is(&cancel_event) {
                            state.mode = WatchdogMode::Off;
                            return ReturnCode::Halt;
                        }
                        if event.is(&time_event) {
                            state.pat_count += 1;
                            if state.pat_count >= pat_time_out {
                                if let Some(callback) = on_failure.as_mut() {
                                    callback();
                                }
                                return if reset_flag {
                                    ReturnCode::Reset
                                } else {
                                    ReturnCode::Terminate
                                };
                            }
                        }
                        ReturnCode::Continue
                    }
                    WatchdogMode::Off => {
                        if event.is(&start_event) {
                            state.mode = WatchdogMode::On;
                            state.pat_count = 0;
                            return ReturnCode::Halt;
                        }
                        ReturnCode::Continue
                    }
                }
            },
        )
        .with_init(|data| {
            let state = data.downcast_mut::<WatchdogState>().expect("watchdog state");
            state.mode = WatchdogMode::On;
            state.pat_count = 0;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn second_event() -> Event {
        Event::unit(CF_SECOND_EVENT).unwrap()
    }

    #[test]
    fn watchdog_bites_after_pat_time_out_seconds_without_a_pat() {
        let bitten = std::rc::Rc::new(std::cell::RefCell::new(false));
        let bitten_clone = bitten.clone();
        let mut element = Watchdog::new("WD_PAT", "WD_START", "WD_CANCEL", 5)
            .on_failure(move || *bitten_clone.borrow_mut() = true)
            .build("wd");

        for _ in 0..4 {
            assert_eq!(element.process(&second_event()), ReturnCode::Continue);
        }
        assert_eq!(element.process(&second_event()), ReturnCode::Terminate);
        assert!(*bitten.borrow());
    }

    #[test]
    fn watchdog_pat_resets_the_count() {
        let mut element = Watchdog::new("WD_PAT", "WD_START", "WD_CANCEL", 5).build("wd");
        for _ in 0..4 {
            assert_eq!(element.process(&second_event()), ReturnCode::Continue);
        }
        assert_eq!(element.process(&Event::unit("WD_PAT").unwrap()), ReturnCode::Halt);
        for _ in 0..4 {
            assert_eq!(element.process(&second_event()), ReturnCode::Continue);
        }
        assert_eq!(element.process(&second_event()), ReturnCode::Terminate);
    }

    #[test]
    fn watchdog_cancel_then_start_transitions() {
        let mut element = Watchdog::new("WD_PAT", "WD_START", "WD_CANCEL", 5).build("wd");

        assert_eq!(element.process(&Event::unit("WD_PAT").unwrap()), ReturnCode::Halt);
        assert_eq!(element.process(&Event::unit("WD_CANCEL").unwrap()), ReturnCode::Halt);

        // While OFF, timer events pass straight through and don't count.
        for _ in 0..10 {
            assert_eq!(element.process(&second_event()), ReturnCode::Continue);
        }

        assert_eq!(element.process(&Event::unit("WD_START").unwrap()), ReturnCode::Halt);
        for _ in 0..4 {
            assert_eq!(element.process(&second_event()), ReturnCode::Continue);
        }
        assert_eq!(element.process(&second_event()), ReturnCode::Terminate);
    }

    #[test]
    fn watchdog_returns_reset_when_configured() {
        let mut element = Watchdog::new("WD_PAT", "WD_START", "WD_CANCEL", 1)
            .reset_on_timeout(true)
            .build("wd");
        assert_eq!(element.process(&second_event()), ReturnCode::Reset);
    }

    #[test]
    fn watchdog_reactivation_re_inits_to_on_with_a_fresh_count() {
        let mut element = Watchdog::new("WD_PAT", "WD_START", "WD_CANCEL", 5).build("wd");
        assert_eq!(element.process(&Event::unit("WD_CANCEL").unwrap()), ReturnCode::Halt);
        assert_eq!(element.process(&second_event()), ReturnCode::Continue);

        element.disable();
        element.enable();

        for _ in 0..4 {
            assert_eq!(element.process(&second_event()), ReturnCode::Continue);
        }
        assert_eq!(element.process(&second_event()), ReturnCode::Terminate);
    }
}
