// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! A watched-event-id counter that disables a configured list of chains
//! once tripped, with an optional immediate-failure predicate.

use chainflow_domain::{Element, Event, ReturnCode};

use crate::handle::EngineHandle;

struct ExceptionState {
    seen: u64,
}

/// Builder for the exception-handler operator: watch for `trip_count` total
/// occurrences of any id in `watched_events`, then disable every chain in
/// `disable_chains`, invoke the failure callback, optionally re-enable those
/// chains again (if [`ExceptionHandler::reset_on_trip`]), and disable
/// itself. A [`ExceptionHandler::predicate`] can also be supplied: if it
/// returns `false` for a delivered event, that is treated as an immediate
/// trip regardless of the count.
///
/// Grounded on the same "count occurrences, act once a threshold is
/// reached" shape as [`super::wait::WaitForEvent`], specialized to "a fault
/// happened somewhere in the flow, shut the affected chains down" the way a
/// dedicated exception handler does.
pub struct ExceptionHandler {
    watched_events: Vec<String>,
    trip_count: u64,
    disable_chains: Vec<String>,
    reset_on_trip: bool,
    predicate: Option<Box<dyn FnMut(&Event) -> bool>>,
    on_trip: Option<Box<dyn FnMut()>>,
}

impl ExceptionHandler {
    /// Trip after `trip_count` total occurrences of any event id in
    /// `watched_events` (counts below one are treated as one).
    pub fn new(watched_events: Vec<String>, trip_count: u64) -> Self {
        Self {
            watched_events,
            trip_count: trip_count.max(1),
            disable_chains: Vec::new(),
            reset_on_trip: false,
            predicate: None,
            on_trip: None,
        }
    }

    /// Disable `chain_name` when this handler trips. May be called more
    /// than once to disable several chains.
    pub fn disable_chain(mut self, chain_name: impl Into<String>) -> Self {
        self.disable_chains.push(chain_name.into());
        self
    }

    /// Re-enable the configured chains again after disabling them, once
    /// this handler has tripped.
    pub fn reset_on_trip(mut self, reset: bool) -> Self {
        self.reset_on_trip = reset;
        self
    }

    /// Check `predicate` on every delivered event; a `false` result is an
    /// immediate trip, independent of the watched-event count.
    pub fn predicate<F: FnMut(&Event) -> bool + 'static>(mut self, predicate: F) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Run `on_trip` once, before disabling the configured chains.
    pub fn on_trip<F: FnMut() + 'static>(mut self, on_trip: F) -> Self {
        self.on_trip = Some(Box::new(on_trip));
        self
    }

    /// Build the element, using `handle` to disable (and, if configured,
    /// re-enable) the watched chains once tripped.
    pub fn build(self, name: impl Into<String>, handle: EngineHandle) -> Element {
        let ExceptionHandler {
            watched_events,
            trip_count,
            disable_chains,
            reset_on_trip,
            mut predicate,
            mut on_trip,
        } = self;

        Element::new(name, ExceptionState { seen: 0 }, move |data, event| {
            let state = data.downcast_mut::<ExceptionState>().expect("exception handler state");

            let predicate_failed = predicate.as_mut().is_some_and(|predicate| !predicate(event));

            if !predicate_failed {
                if !watched_events.iter().any(|watched| event.is(watched)) {
                    return ReturnCode::Halt;
                }
                state.seen += 1;
                if state.seen < trip_count {
                    return ReturnCode::Halt;
                }
            }

            for chain_name in &disable_chains {
                handle.disable_chain(chain_name.clone());
            }
            if let Some(callback) = on_trip.as_mut() {
                callback();
            }
            if reset_on_trip {
                for chain_name in &disable_chains {
                    handle.enable_chain(chain_name.clone());
                }
            }
            ReturnCode::Disable
        })
        .with_init(|data| {
            data.downcast_mut::<ExceptionState>().expect("exception handler state").seen = 0;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashSet, VecDeque};
    use std::rc::Rc;

    fn handle() -> (EngineHandle, Rc<RefCell<VecDeque<crate::handle::EngineCommand>>>) {
        let commands = Rc::new(RefCell::new(VecDeque::new()));
        let active_chains = Rc::new(RefCell::new(HashSet::new()));
        (EngineHandle::new(commands.clone(), active_chains), commands)
    }

    #[test]
    fn exception_handler_trips_after_threshold_and_disables_chains() {
        let (handle, commands) = handle();
        let mut element = ExceptionHandler::new(vec!["CF_FAULT".into()], 2)
            .disable_chain("producer")
            .disable_chain("consumer")
            .build("fault_handler", handle);

        let fault = Event::unit("CF_FAULT").unwrap();
        assert_eq!(element.process(&fault), ReturnCode::Halt);
        assert_eq!(element.process(&fault), ReturnCode::Disable);
        assert_eq!(commands.borrow().len(), 2);
    }

    #[test]
    fn exception_handler_watches_multiple_event_ids() {
        let (handle, _commands) = handle();
        let mut element =
            ExceptionHandler::new(vec!["CF_FAULT_A".into(), "CF_FAULT_B".into()], 2).build("fh", handle);
        assert_eq!(element.process(&Event::unit("CF_FAULT_A").unwrap()), ReturnCode::Halt);
        assert_eq!(element.process(&Event::unit("CF_FAULT_B").unwrap()), ReturnCode::Disable);
    }

    #[test]
    fn exception_handler_ignores_unrelated_events() {
        let (handle, commands) = handle();
        let mut element = ExceptionHandler::new(vec!["CF_FAULT".into()], 1)
            .disable_chain("producer")
            .build("fault_handler", handle);
        let other = Event::unit("CF_OTHER").unwrap();
        assert_eq!(element.process(&other), ReturnCode::Halt);
        assert!(commands.borrow().is_empty());
    }

    #[test]
    fn exception_handler_runs_on_trip_callback() {
        let (handle, _commands) = handle();
        let fired = Rc::new(RefCell::new(false));
        let fired_clone = fired.clone();
        let mut element = ExceptionHandler::new(vec!["CF_FAULT".into()], 1)
            .on_trip(move || *fired_clone.borrow_mut() = true)
            .build("fh", handle);
        element.process(&Event::unit("CF_FAULT").unwrap());
        assert!(*fired.borrow());
    }

    #[test]
    fn exception_handler_predicate_trips_immediately_regardless_of_count() {
        let (handle, commands) = handle();
        let mut element = ExceptionHandler::new(vec!["CF_FAULT".into()], 5)
            .disable_chain("producer")
            .predicate(|event: &Event| !event.is("CF_POISON"))
            .build("fh", handle);
        assert_eq!(element.process(&Event::unit("CF_OTHER").unwrap()), ReturnCode::Halt);
        assert_eq!(element.process(&Event::unit("CF_POISON").unwrap()), ReturnCode::Disable);
        assert_eq!(commands.borrow().len(), 1);
    }

    #[test]
    fn exception_handler_count_resets_on_reactivation() {
        let (handle, _commands) = handle();
        let mut element = ExceptionHandler::new(vec!["CF_FAULT".into()], 3).build("fh", handle);
        let fault = Event::unit("CF_FAULT").unwrap();
        assert_eq!(element.process(&fault), ReturnCode::Halt);
        assert_eq!(element.process(&fault), ReturnCode::Halt);

        element.disable();
        element.enable();

        assert_eq!(element.process(&fault), ReturnCode::Halt);
        assert_eq!(element.process(&fault), ReturnCode::Halt);
        assert_eq!(element.process(&fault), ReturnCode::Disable);
    }

    #[test]
    fn exception_handler_reset_on_trip_re_enables_chains() {
        let (handle, commands) = handle();
        let mut element = ExceptionHandler::new(vec!["CF_FAULT".into()], 1)
            .disable_chain("producer")
            .reset_on_trip(true)
            .build("fh", handle);
        element.process(&Event::unit("CF_FAULT").unwrap());
        assert_eq!(commands.borrow().len(), 2);
    }
}
