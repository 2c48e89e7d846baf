// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The narrow interface element callbacks use to affect the engine.
//!
//! The system this engine is modeled on lets any element callback reach back
//! into the engine object directly (`self.cf.enable_chain(...)`), because
//! Python callbacks close over `self` by reference. A Rust [`Element`]'s
//! callbacks can't hold a live `&mut ChainFlow` - the engine owns the
//! element, so that would require a mutable borrow of `self` from inside a
//! call already borrowing `self` mutably. [`EngineHandle`] is the idiomatic
//! substitute: a cheaply cloneable, interior-mutable handle that exposes
//! exactly the handful of operations the operator library's callbacks need
//! (enable/disable a chain, send an event, read whether a chain is active)
//! without exposing the rest of `ChainFlow`'s builder API to element code.
//!
//! Mutating calls are deferred: they push an [`EngineCommand`] onto a shared
//! queue that [`crate::engine::ChainFlow`] drains immediately after running
//! the element that queued them, applying each command through the same
//! `enable_chain`/`disable_chain`/`send_*` methods any other caller would
//! use. `is_chain_active` is immediate, backed by a activity snapshot the
//! engine keeps in sync on every state change.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use chainflow_domain::events::{CF_SYSTEM_RESET, CF_SYSTEM_STOP};
use chainflow_domain::Event;

/// A deferred request to mutate the engine, queued by an element callback
/// and applied by the engine once that callback returns.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    EnableChain(String),
    DisableChain(String),
    SendSystemEvent(Event),
    SendNamedEvent(String, Event),
}

pub(crate) type CommandQueue = Rc<RefCell<VecDeque<EngineCommand>>>;
pub(crate) type ActiveChainSet = Rc<RefCell<HashSet<String>>>;

/// A handle to the engine, safe for an element's `process`/`init`/
/// `terminate` callback to capture and call from inside a `'static`
/// closure.
#[derive(Clone)]
pub struct EngineHandle {
    commands: CommandQueue,
    active_chains: ActiveChainSet,
}

impl EngineHandle {
    pub(crate) fn new(commands: CommandQueue, active_chains: ActiveChainSet) -> Self {
        Self { commands, active_chains }
    }

    /// Queue a request to activate `chain_name`.
    pub fn enable_chain(&self, chain_name: impl Into<String>) {
        self.commands.borrow_mut().push_back(EngineCommand::EnableChain(chain_name.into()));
    }

    /// Queue a request to deactivate `chain_name`.
    pub fn disable_chain(&self, chain_name: impl Into<String>) {
        self.commands.borrow_mut().push_back(EngineCommand::DisableChain(chain_name.into()));
    }

    /// Queue `event` for the shared system queue.
    pub fn send_system_event(&self, event: Event) {
        self.commands.borrow_mut().push_back(EngineCommand::SendSystemEvent(event));
    }

    /// Queue `event` for `chain_name`'s own queue.
    pub fn send_named_event(&self, chain_name: impl Into<String>, event: Event) {
        self.commands
            .borrow_mut()
            .push_back(EngineCommand::SendNamedEvent(chain_name.into(), event));
    }

    /// Convenience for queuing `CF_SYSTEM_RESET` on the system queue.
    pub fn reset_system(&self) {
        self.send_system_event(Event::unit(CF_SYSTEM_RESET).expect("CF_SYSTEM_RESET is a valid event id"));
    }

    /// Convenience for queuing `CF_SYSTEM_STOP` on the system queue.
    pub fn stop_system(&self) {
        self.send_system_event(Event::unit(CF_SYSTEM_STOP).expect("CF_SYSTEM_STOP is a valid event id"));
    }

    /// Whether `chain_name` was active as of the most recent state change
    /// the engine applied. Never reflects a command still sitting
    /// unapplied in this same handle's queue.
    pub fn is_chain_active(&self, chain_name: &str) -> bool {
        self.active_chains.borrow().contains(chain_name)
    }

    /// Whether every chain in `chain_names` is currently active.
    pub fn all_chains_active<'a>(&self, chain_names: impl IntoIterator<Item = &'a str>) -> bool {
        chain_names.into_iter().all(|name| self.is_chain_active(name))
    }

    /// How many of `chain_names` are currently active.
    pub fn count_active<'a>(&self, chain_names: impl IntoIterator<Item = &'a str>) -> usize {
        chain_names.into_iter().filter(|name| self.is_chain_active(name)).count()
    }
}
