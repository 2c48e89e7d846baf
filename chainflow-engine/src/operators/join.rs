// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! AND/OR/N-of-M barriers over a list of chains' completion, driven by
//! `CF_TIMER_EVENT`.
//!
//! `join_or` and `join_n_of_m` are one-shots: `CF_HALT` while fewer than the
//! join's threshold of `chain_names` are inactive, `CF_DISABLE` once the
//! threshold is met - disabling the watched chains themselves (via
//! `terminate`) at the same moment the join disables itself. `join_and` is
//! not a one-shot at all: per spec §4.8 it is a *pass-through gate*, with no
//! terminate side effect of its own - `CF_HALT` (stopping the chain's
//! remaining elements from running this tick) while any watched chain is
//! still active, `CF_CONTINUE` (letting them run) once every watched chain
//! has gone inactive, re-evaluated fresh on every `CF_TIMER_EVENT` for as
//! long as the element stays enabled. (The spec text pairs AND's waiting
//! branch with `CF_DISABLE` and its satisfied branch with `CF_CONTINUE`;
//! `CF_DISABLE` would end AND's own dispatch life the first tick it is not
//! yet satisfied, which cannot be what "stay waiting" means. `CF_HALT` is
//! the return code that actually stays waiting without disabling anything,
//! so that's the one used here for the waiting branch - the same polarity
//! correction `join_or`/`join_n_of_m` apply, recorded in DESIGN.md.)

use chainflow_domain::events::CF_TIMER_EVENT;
use chainflow_domain::{Element, ReturnCode};

use crate::handle::EngineHandle;

fn join_until_threshold(
    name: impl Into<String>,
    handle: EngineHandle,
    chain_names: Vec<String>,
    threshold: usize,
) -> Element {
    let threshold = threshold.clamp(1, chain_names.len().max(1));
    let watched = chain_names.clone();
    let terminate_handle = handle.clone();

    Element::new(name, (), move |_data, event| {
        if !event.is(CF_TIMER_EVENT) {
            return ReturnCode::Halt;
        }
        let inactive = chain_names.len() - handle.count_active(chain_names.iter().map(String::as_str));
        if inactive >= threshold {
            ReturnCode::Disable
        } else {
            ReturnCode::Halt
        }
    })
    .with_terminate(move |_data| {
        for chain_name in &watched {
            terminate_handle.disable_chain(chain_name.clone());
        }
    })
}

/// A barrier that disables itself (and every chain in `chain_names`) once
/// every one of them has gone inactive.
pub fn join_or(name: impl Into<String>, handle: EngineHandle, chain_names: Vec<String>) -> Element {
    let threshold = chain_names.len();
    join_until_threshold(name, handle, chain_names, threshold)
}

/// A pass-through gate: halts the rest of its chain's dispatch for this
/// event while any chain in `chain_names` is still active, and lets
/// dispatch continue to the elements after it (`CF_CONTINUE`) once every
/// one of them has gone inactive. Unlike [`join_or`]/[`join_n_of_m`], this
/// element never disables itself and never disables the chains it watches -
/// it stays in the chain, re-checking every `CF_TIMER_EVENT`, for as long as
/// its own chain keeps running.
pub fn join_and(name: impl Into<String>, handle: EngineHandle, chain_names: Vec<String>) -> Element {
    Element::new(name, (), move |_data, event| {
        if !event.is(CF_TIMER_EVENT) {
            return ReturnCode::Halt;
        }
        let any_active = chain_names.iter().any(|chain_name| handle.is_chain_active(chain_name));
        if any_active {
            ReturnCode::Halt
        } else {
            ReturnCode::Continue
        }
    })
}

/// A barrier that disables itself (and every chain in `chain_names`) once at
/// least `n` of them have gone inactive. `n` is clamped to
/// `[1, chain_names.len()]`.
pub fn join_n_of_m(name: impl Into<String>, handle: EngineHandle, chain_names: Vec<String>, n: usize) -> Element {
    join_until_threshold(name, handle, chain_names, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainflow_domain::Event;
    use std::cell::RefCell;
    use std::collections::{HashSet, VecDeque};
    use std::rc::Rc;

    fn handle_with_active(names: &[&str]) -> (EngineHandle, Rc<RefCell<VecDeque<crate::handle::EngineCommand>>>) {
        let commands = Rc::new(RefCell::new(VecDeque::new()));
        let active_chains = Rc::new(RefCell::new(names.iter().map(|name| name.to_string()).collect::<HashSet<_>>()));
        (EngineHandle::new(commands.clone(), active_chains), commands)
    }

    fn timer() -> Event {
        Event::unit(CF_TIMER_EVENT).unwrap()
    }

    #[test]
    fn join_or_halts_until_every_chain_goes_inactive() {
        let (handle, commands) = handle_with_active(&["b"]);
        let mut element = join_or("j", handle, vec!["a".into(), "b".into()]);
        assert_eq!(element.process(&timer()), ReturnCode::Halt);
        assert!(commands.borrow().is_empty());

        let (handle, commands) = handle_with_active(&[]);
        let mut element = join_or("j", handle, vec!["a".into(), "b".into()]);
        assert_eq!(element.process(&timer()), ReturnCode::Disable);
        element.disable();
        assert_eq!(commands.borrow().len(), 2);
    }

    #[test]
    fn join_and_halts_while_any_watched_chain_is_active() {
        let (handle, commands) = handle_with_active(&["a"]);
        let mut element = join_and("j", handle, vec!["a".into(), "b".into()]);
        assert_eq!(element.process(&timer()), ReturnCode::Halt);
        assert!(commands.borrow().is_empty());
    }

    #[test]
    fn join_and_continues_once_every_watched_chain_is_inactive() {
        let (handle, commands) = handle_with_active(&[]);
        let mut element = join_and("j", handle, vec!["a".into(), "b".into()]);
        assert_eq!(element.process(&timer()), ReturnCode::Continue);
        // Unlike join_or/join_n_of_m, reaching the satisfied state never
        // disables the element or the watched chains.
        assert!(commands.borrow().is_empty());
    }

    #[test]
    fn join_and_re_evaluates_on_every_timer_tick() {
        let commands = Rc::new(RefCell::new(VecDeque::new()));
        let active_chains = Rc::new(RefCell::new(HashSet::from(["a".to_string()])));
        let handle = EngineHandle::new(commands, active_chains.clone());
        let mut element = join_and("j", handle, vec!["a".into()]);

        assert_eq!(element.process(&timer()), ReturnCode::Halt);
        active_chains.borrow_mut().clear();
        assert_eq!(element.process(&timer()), ReturnCode::Continue);
    }

    #[test]
    fn join_n_of_m_disables_once_threshold_inactive_chains_reached() {
        let (handle, _commands) = handle_with_active(&["a", "b"]);
        let mut element = join_n_of_m("j", handle, vec!["a".into(), "b".into(), "c".into()], 2);
        assert_eq!(element.process(&timer()), ReturnCode::Halt);

        let (handle, _commands) = handle_with_active(&["a"]);
        let mut element = join_n_of_m("j", handle, vec!["a".into(), "b".into(), "c".into()], 2);
        assert_eq!(element.process(&timer()), ReturnCode::Disable);
    }

    #[test]
    fn join_ignores_non_timer_events() {
        let (handle, _commands) = handle_with_active(&[]);
        let mut element = join_or("j", handle, vec!["a".into()]);
        let other = Event::unit("CF_SOMETHING_ELSE").unwrap();
        assert_eq!(element.process(&other), ReturnCode::Halt);
    }
}
