// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The `ChainFlow` builder and dispatch loop.
//!
//! A `ChainFlow` has two phases. During the define phase, chains and their
//! elements are declared with [`ChainFlow::define_chain`],
//! [`ChainFlow::add_element`], and [`ChainFlow::end_chain`]; calling
//! [`ChainFlow::finalize`] locks the graph's shape and builds the queue
//! system. After that, [`ChainFlow::run`] drives the tick loop until either a
//! `Terminate` return code disables the last active chain or a tick's event
//! dispatch produces no activity at all.

use std::any::Any;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use chainflow_domain::events::{
    CF_DAY_EVENT, CF_HOUR_EVENT, CF_MINUTE_EVENT, CF_RESET_SYSTEM, CF_SECOND_EVENT,
    CF_SYSTEM_RESET, CF_SYSTEM_STOP, CF_TERMINATE_SYSTEM, CF_TIMER_EVENT,
};
use chainflow_domain::{Chain, ChainFlowError, DualEventQueueSystem, Element, Event, EventRegistry, ReturnCode};

use crate::clock::Clock;
use crate::handle::EngineHandle;

/// The event-driven scheduling engine.
///
/// Generic over its [`Clock`] so production code can drive it from real wall
/// time while tests drive it from a [`crate::clock::TestClock`] advanced by
/// hand.
pub struct ChainFlow<C: Clock> {
    clock: C,
    registry: EventRegistry,
    chain_order: Vec<String>,
    chains: HashMap<String, Chain>,
    reserved_chain_names: HashSet<String>,
    current_chain: Option<String>,
    finalized: bool,
    queues: Option<DualEventQueueSystem>,
    system_capacity: Option<usize>,
    chain_capacity: Option<usize>,
    system_active: bool,
    ref_second: i64,
    ref_minute: i64,
    ref_hour: i64,
    ref_day: i64,
    last_tick_time: Option<f64>,
    handle: EngineHandle,
    commands: Rc<RefCell<VecDeque<crate::handle::EngineCommand>>>,
    active_chains: Rc<RefCell<HashSet<String>>>,
}

impl<C: Clock> ChainFlow<C> {
    /// Start building a new chain flow graph, driven by `clock`.
    pub fn new(clock: C) -> Self {
        let commands = Rc::new(RefCell::new(VecDeque::new()));
        let active_chains = Rc::new(RefCell::new(HashSet::new()));
        let handle = EngineHandle::new(commands.clone(), active_chains.clone());
        Self {
            clock,
            registry: EventRegistry::with_builtins(),
            chain_order: Vec::new(),
            chains: HashMap::new(),
            reserved_chain_names: HashSet::new(),
            current_chain: None,
            finalized: false,
            queues: None,
            system_capacity: None,
            chain_capacity: None,
            system_active: true,
            ref_second: -1,
            ref_minute: -1,
            ref_hour: -1,
            ref_day: -1,
            last_tick_time: None,
            handle,
            commands,
            active_chains,
        }
    }

    /// A cloneable handle that element callbacks can capture to enable or
    /// disable chains, send events, and read chain activity without holding
    /// a reference to the engine itself. See [`crate::handle`] for why this
    /// indirection exists.
    pub fn handle(&self) -> EngineHandle {
        self.handle.clone()
    }

    /// Bound the system queue and every per-chain queue built at
    /// [`ChainFlow::finalize`]. `None` leaves a queue unbounded. Must be
    /// called before `finalize`.
    pub fn with_queue_capacities(mut self, system_capacity: Option<usize>, chain_capacity: Option<usize>) -> Self {
        self.system_capacity = system_capacity;
        self.chain_capacity = chain_capacity;
        self
    }

    // ---- define phase -----------------------------------------------------

    /// Reserve a chain name so [`ChainFlow::define_chain`] rejects it. Useful
    /// for keeping application code from accidentally shadowing a
    /// well-known coordination chain name.
    pub fn reserve_chain_name(&mut self, name: impl Into<String>) {
        self.reserved_chain_names.insert(name.into());
    }

    /// Register an application event id with a human-readable description,
    /// so it shows up in introspection (`chainflow-demo list-events`) and so
    /// sending an unregistered id is caught rather than silently dropped.
    pub fn register_event(&mut self, id: impl Into<String>, description: impl Into<String>) -> Result<(), ChainFlowError> {
        self.registry.register(id, description)
    }

    /// The engine's event registry, for introspection.
    pub fn event_registry(&self) -> &EventRegistry {
        &self.registry
    }

    /// Open a new chain for definition. `auto_flag` controls whether the
    /// chain starts active when the engine runs, without needing another
    /// chain's operator to enable it first.
    ///
    /// # Errors
    ///
    /// [`ChainFlowError::AlreadyFinalized`] after `finalize`,
    /// [`ChainFlowError::ChainAlreadyOpen`] if a chain is already open,
    /// [`ChainFlowError::ReservedChainName`] or
    /// [`ChainFlowError::DuplicateChainName`] for a bad name.
    pub fn define_chain(&mut self, name: impl Into<String>, auto_flag: bool) -> Result<(), ChainFlowError> {
        if self.finalized {
            return Err(ChainFlowError::already_finalized("define_chain"));
        }
        if let Some(open) = &self.current_chain {
            return Err(ChainFlowError::ChainAlreadyOpen(open.clone()));
        }
        let name = name.into();
        if self.reserved_chain_names.contains(&name) {
            return Err(ChainFlowError::ReservedChainName(name));
        }
        if self.chains.contains_key(&name) {
            return Err(ChainFlowError::DuplicateChainName(name));
        }
        self.chains.insert(name.clone(), Chain::new(name.clone(), auto_flag));
        self.chain_order.push(name.clone());
        self.current_chain = Some(name);
        Ok(())
    }

    /// Append an element to the currently open chain.
    ///
    /// # Errors
    ///
    /// [`ChainFlowError::NoChainOpen`] if no chain is open,
    /// [`ChainFlowError::DuplicateElementName`] if an element with the same
    /// name is already in the chain.
    pub fn add_element(&mut self, element: Element) -> Result<(), ChainFlowError> {
        let chain_name = self.current_chain.clone().ok_or(ChainFlowError::NoChainOpen)?;
        let chain = self
            .chains
            .get_mut(&chain_name)
            .expect("current_chain always names a chain this graph owns");
        if chain.elements().iter().any(|existing| existing.name() == element.name()) {
            return Err(ChainFlowError::DuplicateElementName(element.name().to_string()));
        }
        chain.add_element(element)
    }

    /// Close the currently open chain.
    ///
    /// # Errors
    ///
    /// [`ChainFlowError::NoChainOpen`] if no chain is open.
    pub fn end_chain(&mut self) -> Result<(), ChainFlowError> {
        if self.current_chain.take().is_none() {
            return Err(ChainFlowError::NoChainOpen);
        }
        Ok(())
    }

    /// Attach opaque, chain-wide data shared by every element in
    /// `chain_name`.
    pub fn set_chain_data<D: Any>(&mut self, chain_name: &str, data: D) -> Result<(), ChainFlowError> {
        let chain = self
            .chains
            .get_mut(chain_name)
            .ok_or_else(|| ChainFlowError::UnknownChain(chain_name.to_string()))?;
        chain.set_chain_data(data);
        Ok(())
    }

    /// Read `chain_name`'s opaque chain-wide data.
    pub fn chain_data(&self, chain_name: &str) -> Result<Option<&dyn Any>, ChainFlowError> {
        self.chains
            .get(chain_name)
            .map(Chain::chain_data)
            .ok_or_else(|| ChainFlowError::UnknownChain(chain_name.to_string()))
    }

    /// Mutably access `chain_name`'s opaque chain-wide data.
    pub fn chain_data_mut(&mut self, chain_name: &str) -> Result<Option<&mut dyn Any>, ChainFlowError> {
        self.chains
            .get_mut(chain_name)
            .map(Chain::chain_data_mut)
            .ok_or_else(|| ChainFlowError::UnknownChain(chain_name.to_string()))
    }

    /// Lock the graph's shape and build the queue system. Idempotent calls
    /// after the first return [`ChainFlowError::AlreadyFinalized`].
    ///
    /// # Errors
    ///
    /// [`ChainFlowError::ChainAlreadyOpen`] if a chain was never closed with
    /// [`ChainFlow::end_chain`].
    pub fn finalize(&mut self) -> Result<(), ChainFlowError> {
        if self.finalized {
            return Err(ChainFlowError::already_finalized("finalize"));
        }
        if let Some(open) = &self.current_chain {
            return Err(ChainFlowError::ChainAlreadyOpen(open.clone()));
        }
        for name in &self.chain_order {
            self.chains
                .get_mut(name)
                .expect("chain_order only ever names chains this graph owns")
                .finalize();
        }
        self.queues = Some(DualEventQueueSystem::new(
            self.chain_order.clone(),
            self.system_capacity,
            self.chain_capacity,
        ));
        self.finalized = true;
        Ok(())
    }

    /// True once [`ChainFlow::finalize`] has run.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Tear the graph back down to a freshly constructed, unfinalized state:
    /// every defined chain, reserved name, registered event id beyond the
    /// builtins, and queued command is discarded, as if [`ChainFlow::new`]
    /// had just been called with the same clock. Matches the source
    /// system's `reset_cf`, which exists there so one long-lived test
    /// process can rebuild a graph between scenarios; idiomatic Rust tests
    /// would normally just construct a new `ChainFlow`, but the method is
    /// kept for parity with the builder surface and for callers that already
    /// hold a live [`EngineHandle`] they want to keep pointing at the same
    /// engine identity.
    pub fn reset(&mut self, clock: C) {
        let commands = Rc::new(RefCell::new(VecDeque::new()));
        let active_chains = Rc::new(RefCell::new(HashSet::new()));
        let handle = EngineHandle::new(commands.clone(), active_chains.clone());
        *self = Self {
            clock,
            registry: EventRegistry::with_builtins(),
            chain_order: Vec::new(),
            chains: HashMap::new(),
            reserved_chain_names: HashSet::new(),
            current_chain: None,
            finalized: false,
            queues: None,
            system_capacity: None,
            chain_capacity: None,
            system_active: true,
            ref_second: -1,
            ref_minute: -1,
            ref_hour: -1,
            ref_day: -1,
            last_tick_time: None,
            handle,
            commands,
            active_chains,
        };
    }

    fn queues(&self) -> &DualEventQueueSystem {
        self.queues.as_ref().expect("finalize must run before dispatch")
    }

    // ---- chain control ------------------------------------------------------

    /// Whether `chain_name` currently participates in event dispatch.
    pub fn is_chain_active(&self, chain_name: &str) -> Result<bool, ChainFlowError> {
        self.chains
            .get(chain_name)
            .map(Chain::is_active)
            .ok_or_else(|| ChainFlowError::UnknownChain(chain_name.to_string()))
    }

    /// Activate `chain_name`, resetting every element in it to its freshly
    /// constructed state and discarding anything queued on its per-chain
    /// queue. Not idempotent: calling this on an already-active chain still
    /// resets its elements, matching the reset-on-(re)enable contract every
    /// operator in the library relies on.
    ///
    /// # Errors
    ///
    /// [`ChainFlowError::UnknownChain`] if `chain_name` was never defined.
    pub fn enable_chain(&mut self, chain_name: &str) -> Result<(), ChainFlowError> {
        let chain = self
            .chains
            .get_mut(chain_name)
            .ok_or_else(|| ChainFlowError::UnknownChain(chain_name.to_string()))?;
        for element in chain.elements_mut() {
            element.reset();
        }
        chain.activate();
        if let Ok(queue) = self.queues().chain_queue(chain_name) {
            queue.clear();
        }
        self.sync_active_chains();
        Ok(())
    }

    /// Deactivate `chain_name`. Every still-enabled element has its
    /// terminate callback run (if it was ever initialized), in reverse
    /// definition order, and its per-chain queue is discarded. A no-op if
    /// the chain is already inactive.
    ///
    /// # Errors
    ///
    /// [`ChainFlowError::UnknownChain`] if `chain_name` was never defined.
    pub fn disable_chain(&mut self, chain_name: &str) -> Result<(), ChainFlowError> {
        let chain = self
            .chains
            .get_mut(chain_name)
            .ok_or_else(|| ChainFlowError::UnknownChain(chain_name.to_string()))?;
        if !chain.is_active() {
            return Ok(());
        }
        for element in chain.elements_mut().iter_mut().rev() {
            if element.is_enabled() {
                element.disable();
            }
        }
        chain.deactivate();
        if let Ok(queue) = self.queues().chain_queue(chain_name) {
            queue.clear();
        }
        self.sync_active_chains();
        self.drain_commands();
        Ok(())
    }

    /// Deactivate every defined chain, in definition order.
    pub fn disable_all_chains(&mut self) {
        let names = self.chain_order.clone();
        for name in names {
            let _ = self.disable_chain(&name);
        }
    }

    /// Restore every chain to the activity state implied by its `auto_flag`,
    /// and every element within it to a freshly-constructed state. Called
    /// once before the run loop starts and again whenever `CF_RESET_SYSTEM`
    /// is dispatched - the second call matters: `CF_RESET_SYSTEM` reaches
    /// here only after [`ChainFlow::disable_all_chains`] has already run
    /// every element's `terminate` and left it disabled, so without
    /// resetting elements here too, a reactivated auto chain would come back
    /// active with every element still disabled and never process anything
    /// again.
    pub fn initialize_chains(&mut self) {
        for name in self.chain_order.clone() {
            let Some(chain) = self.chains.get_mut(&name) else { continue };
            chain.reset();
        }
        self.sync_active_chains();
    }

    /// Rebuild the activity snapshot [`EngineHandle::is_chain_active`] reads,
    /// from the chains' own `active` flags. Every call site that can change
    /// a chain's activity calls this before returning, so a handle captured
    /// by an element callback never sees a stale snapshot on its next read.
    fn sync_active_chains(&mut self) {
        let mut active = self.active_chains.borrow_mut();
        active.clear();
        for (name, chain) in &self.chains {
            if chain.is_active() {
                active.insert(name.clone());
            }
        }
    }

    /// Apply every [`crate::handle::EngineCommand`] an element callback
    /// queued on [`EngineHandle`] while it ran. Applying a command can
    /// itself queue more (e.g. disabling a chain runs its elements'
    /// terminate callbacks, which may enable another chain), so this drains
    /// until the queue is empty rather than taking one pass.
    fn drain_commands(&mut self) {
        loop {
            let command = self.commands.borrow_mut().pop_front();
            match command {
                Some(crate::handle::EngineCommand::EnableChain(name)) => {
                    let _ = self.enable_chain(&name);
                }
                Some(crate::handle::EngineCommand::DisableChain(name)) => {
                    let _ = self.disable_chain(&name);
                }
                Some(crate::handle::EngineCommand::SendSystemEvent(event)) => {
                    let _ = self.send_system_event(event);
                }
                Some(crate::handle::EngineCommand::SendNamedEvent(name, event)) => {
                    let _ = self.send_named_queue_event(&name, event);
                }
                None => break,
            }
        }
    }

    // ---- sending events ----------------------------------------------------

    /// Queue `event` on the shared system queue.
    ///
    /// # Errors
    ///
    /// [`ChainFlowError::UnregisteredEventId`] if `event`'s id was never
    /// registered. [`ChainFlowError::NotFinalized`] if the graph hasn't been
    /// finalized yet. A dropped event due to a full queue is logged, not
    /// raised as an error - see the design ledger's note on queue overflow.
    pub fn send_system_event(&mut self, event: Event) -> Result<(), ChainFlowError> {
        if !self.registry.contains(event.id()) {
            return Err(ChainFlowError::UnregisteredEventId(event.id().to_string()));
        }
        if !self.finalized {
            return Err(ChainFlowError::not_finalized("send_system_event"));
        }
        if !self.queues().send_system_event(event) {
            tracing::warn!("system queue overflow, event dropped");
        }
        Ok(())
    }

    /// Queue `event` on `chain_name`'s own queue.
    ///
    /// # Errors
    ///
    /// [`ChainFlowError::UnregisteredEventId`] if `event`'s id was never
    /// registered, [`ChainFlowError::UnknownChain`] if `chain_name` was
    /// never defined, [`ChainFlowError::ChainNotActive`] if the chain is
    /// known but currently inactive - sending to an inactive chain is a
    /// caller mistake, not a silent no-op.
    pub fn send_named_queue_event(&mut self, chain_name: &str, event: Event) -> Result<(), ChainFlowError> {
        if !self.registry.contains(event.id()) {
            return Err(ChainFlowError::UnregisteredEventId(event.id().to_string()));
        }
        if !self.is_chain_active(chain_name)? {
            return Err(ChainFlowError::ChainNotActive(chain_name.to_string()));
        }
        if !self.finalized {
            return Err(ChainFlowError::not_finalized("send_named_queue_event"));
        }
        if !self.queues().send_named_event(chain_name, event)? {
            tracing::warn!(chain = chain_name, "per-chain queue overflow, event dropped");
        }
        Ok(())
    }

    /// Convenience for sending `CF_SYSTEM_RESET` on the system queue.
    ///
    /// # Errors
    ///
    /// Same as [`ChainFlow::send_system_event`].
    pub fn reset_system(&mut self) -> Result<(), ChainFlowError> {
        self.send_system_event(Event::unit(CF_SYSTEM_RESET)?)
    }

    /// Convenience for sending `CF_SYSTEM_STOP` on the system queue.
    ///
    /// # Errors
    ///
    /// Same as [`ChainFlow::send_system_event`].
    pub fn stop_system(&mut self) -> Result<(), ChainFlowError> {
        self.send_system_event(Event::unit(CF_SYSTEM_STOP)?)
    }

    fn enqueue_builtin_event(&self, event: Event) {
        let id = event.id().to_string();
        if !self.queues().send_system_event(event) {
            tracing::warn!(event = %id, "system queue overflow, built-in event dropped");
        }
    }

    // ---- the run loop -------------------------------------------------------

    /// Run until a full event dispatch produces no activity at all, i.e.
    /// nothing any enabled element did in response to the last event caused
    /// any enabled element to process anything. This is the engine's own
    /// termination condition: a graph with no active chains left self-exits
    /// rather than spinning forever on an idle tick.
    ///
    /// # Errors
    ///
    /// [`ChainFlowError::NotFinalized`] if called before
    /// [`ChainFlow::finalize`].
    pub fn run(&mut self) -> Result<(), ChainFlowError> {
        if !self.finalized {
            return Err(ChainFlowError::not_finalized("run"));
        }

        self.initialize_chains();
        let start = self.clock.now();
        self.last_tick_time = Some(start);
        let (second, minute, hour, day) = wall_clock_components(start);
        self.ref_second = second;
        self.ref_minute = minute;
        self.ref_hour = hour;
        self.ref_day = day;

        loop {
            self.clock.time_tick();
            let now = self.clock.now();
            let delta_time = now - self.last_tick_time.unwrap_or(now);
            self.last_tick_time = Some(now);

            self.enqueue_builtin_event(Event::new(
                CF_TIMER_EVENT,
                serde_json::json!({ "delta_time": delta_time, "time_stamp": now }),
            )?);

            let (second, minute, hour, day) = wall_clock_components(now);
            if second != self.ref_second {
                self.ref_second = second;
                self.enqueue_builtin_event(Event::unit(CF_SECOND_EVENT)?);
            }
            if minute != self.ref_minute {
                self.ref_minute = minute;
                self.enqueue_builtin_event(Event::unit(CF_MINUTE_EVENT)?);
            }
            if hour != self.ref_hour {
                self.ref_hour = hour;
                self.enqueue_builtin_event(Event::unit(CF_HOUR_EVENT)?);
            }
            if day != self.ref_day {
                self.ref_day = day;
                self.enqueue_builtin_event(Event::unit(CF_DAY_EVENT)?);
            }

            self.system_active = true;
            self.execute_system_event_loop();
            if !self.system_active {
                return Ok(());
            }
        }
    }

    fn execute_system_event_loop(&mut self) {
        loop {
            if !self.system_active {
                break;
            }
            if !self.execute_system_event() {
                break;
            }
            if self.queues().normal_queue().is_empty() {
                break;
            }
        }
    }

    /// Dequeue and dispatch one event from the system queue. Returns `false`
    /// if the queue was empty.
    fn execute_system_event(&mut self) -> bool {
        let Some(event) = self.queues().normal_queue().dequeue() else {
            return false;
        };

        // Reset every dispatch: an event that reaches no active chain (or
        // reaches only chains with nothing enabled left to run) leaves
        // `system_active` false, which is how the run loop notices the
        // graph has gone fully idle.
        self.system_active = false;

        if event.is(CF_TERMINATE_SYSTEM) {
            self.disable_all_chains();
        } else if event.is(CF_RESET_SYSTEM) {
            self.disable_all_chains();
            self.initialize_chains();
        }

        for chain_name in self.chain_order.clone() {
            let active = self.chains.get(&chain_name).map(Chain::is_active).unwrap_or(false);
            if active {
                self.execute_chain_event(&chain_name, &event);
            }
        }

        true
    }

    /// Dispatch `event` to `chain_name`: drain whatever is already queued on
    /// its own per-chain queue, run the event itself, then drain the
    /// per-chain queue again, so any event an element sent to its own chain
    /// while reacting to `event` is handled before the next system event.
    fn execute_chain_event(&mut self, chain_name: &str, event: &Event) {
        self.drain_chain_queue(chain_name);
        self.execute_chain_element(chain_name, event);
        self.drain_chain_queue(chain_name);
    }

    fn drain_chain_queue(&mut self, chain_name: &str) {
        loop {
            let queued = self
                .queues()
                .chain_queue(chain_name)
                .ok()
                .and_then(|queue| queue.dequeue());
            match queued {
                Some(queued_event) => self.execute_chain_element(chain_name, &queued_event),
                None => break,
            }
        }
    }

    /// Run `event` through every element in `chain_name`, in definition
    /// order, skipping disabled elements, stopping early if an element's
    /// return code says to.
    fn execute_chain_element(&mut self, chain_name: &str, event: &Event) {
        let element_count = match self.chains.get(chain_name) {
            Some(chain) => chain.elements().len(),
            None => return,
        };

        for index in 0..element_count {
            let enabled = match self.chains.get(chain_name) {
                Some(chain) => chain.elements()[index].is_enabled(),
                None => return,
            };
            if !enabled {
                continue;
            }

            self.system_active = true;
            let return_code = {
                let chain = self
                    .chains
                    .get_mut(chain_name)
                    .expect("chain_name was just looked up successfully");
                chain.elements_mut()[index].process(event)
            };
            self.drain_commands();

            let keep_going = self.analyze_return_code(chain_name, index, return_code);
            self.drain_commands();
            if !keep_going {
                break;
            }
        }
    }

    /// Apply a single element's return code, returning whether dispatch
    /// should continue to the next element in the chain for this event.
    fn analyze_return_code(&mut self, chain_name: &str, index: usize, return_code: ReturnCode) -> bool {
        match return_code {
            ReturnCode::Halt => false,
            ReturnCode::Continue => true,
            ReturnCode::Disable => {
                if let Some(chain) = self.chains.get_mut(chain_name) {
                    chain.elements_mut()[index].disable();
                }
                self.drain_commands();
                true
            }
            ReturnCode::Reset => {
                let _ = self.disable_chain(chain_name);
                let _ = self.enable_chain(chain_name);
                false
            }
            ReturnCode::Terminate => {
                let _ = self.disable_chain(chain_name);
                false
            }
        }
    }
}

/// Second-of-minute, minute-of-hour, hour-of-day, and day count, derived
/// directly from a Unix timestamp rather than from each other - corrects an
/// original implementation that computed minute/hour/day from the
/// already-mod-60 second value, which meant minute, hour, and day rollover
/// events could never fire.
fn wall_clock_components(unix_seconds: f64) -> (i64, i64, i64, i64) {
    let whole = unix_seconds.floor() as i64;
    let second = whole.rem_euclid(60);
    let minute = whole.div_euclid(60).rem_euclid(60);
    let hour = whole.div_euclid(3600).rem_euclid(24);
    let day = whole.div_euclid(86400);
    (second, minute, hour, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TestClock;
    use chainflow_domain::support::{null_continue, null_disable};

    fn engine() -> ChainFlow<TestClock> {
        ChainFlow::new(TestClock::new(1_700_000_000.0))
    }

    #[test]
    fn define_chain_rejects_duplicates_and_reserved_names() {
        let mut cf = engine();
        cf.reserve_chain_name("system");
        assert!(matches!(
            cf.define_chain("system", true).unwrap_err(),
            ChainFlowError::ReservedChainName(_)
        ));
        cf.define_chain("door", true).unwrap();
        cf.end_chain().unwrap();
        assert!(matches!(
            cf.define_chain("door", false).unwrap_err(),
            ChainFlowError::DuplicateChainName(_)
        ));
    }

    #[test]
    fn add_element_requires_an_open_chain() {
        let mut cf = engine();
        let err = cf
            .add_element(Element::new("e1", (), |_d, _e| ReturnCode::Halt))
            .unwrap_err();
        assert!(matches!(err, ChainFlowError::NoChainOpen));
    }

    #[test]
    fn finalize_locks_the_graph_and_rejects_open_chains() {
        let mut cf = engine();
        cf.define_chain("door", true).unwrap();
        let err = cf.finalize().unwrap_err();
        assert!(matches!(err, ChainFlowError::ChainAlreadyOpen(_)));
        cf.end_chain().unwrap();
        cf.finalize().unwrap();
        assert!(cf.is_finalized());
        assert!(matches!(
            cf.finalize().unwrap_err(),
            ChainFlowError::AlreadyFinalized(_)
        ));
    }

    #[test]
    fn one_shot_element_runs_once_then_disables() {
        let mut cf = engine();
        cf.define_chain("door", true).unwrap();
        cf.add_element(Element::new("opener", (), |_d, _e| ReturnCode::Disable))
            .unwrap();
        cf.end_chain().unwrap();
        cf.finalize().unwrap();

        // Run long enough to dispatch CF_TIMER_EVENT once and then go idle.
        cf.run().unwrap();
        assert!(!cf.chains.get("door").unwrap().elements()[0].is_enabled());
    }

    #[test]
    fn chain_not_active_error_on_send_to_inactive_chain() {
        let mut cf = engine();
        cf.define_chain("door", false).unwrap();
        cf.add_element(Element::new("e", (), |_d, _e| ReturnCode::Halt))
            .unwrap();
        cf.end_chain().unwrap();
        cf.finalize().unwrap();

        let event = Event::unit(CF_TIMER_EVENT).unwrap();
        let err = cf.send_named_queue_event("door", event).unwrap_err();
        assert!(matches!(err, ChainFlowError::ChainNotActive(_)));
    }

    #[test]
    fn send_named_queue_event_rejects_unregistered_event_ids() {
        let mut cf = engine();
        cf.define_chain("door", true).unwrap();
        cf.add_element(Element::new("e", (), |_d, _e| ReturnCode::Halt))
            .unwrap();
        cf.end_chain().unwrap();
        cf.finalize().unwrap();

        let event = Event::unit("never_registered").unwrap();
        let err = cf.send_named_queue_event("door", event).unwrap_err();
        assert!(matches!(err, ChainFlowError::UnregisteredEventId(_)));
    }

    #[test]
    fn disable_chain_runs_terminate_in_reverse_order_once_initialized() {
        let order = std::rc::Rc::new(std::cell::RefCell::new(Vec::<&'static str>::new()));

        let order_a = order.clone();
        let order_b = order.clone();
        let mut cf = engine();
        cf.define_chain("door", true).unwrap();
        cf.add_element(
            Element::new("a", (), null_continue).with_terminate(move |_d| order_a.borrow_mut().push("a")),
        )
        .unwrap();
        cf.add_element(
            Element::new("b", (), null_continue).with_terminate(move |_d| order_b.borrow_mut().push("b")),
        )
        .unwrap();
        cf.end_chain().unwrap();
        cf.finalize().unwrap();

        // Force both elements to initialize before disabling the chain.
        let event = Event::unit(CF_TIMER_EVENT).unwrap();
        cf.execute_chain_element("door", &event);
        cf.disable_chain("door").unwrap();

        assert_eq!(&*order.borrow(), &["b", "a"]);
    }

    #[test]
    fn reset_return_code_reactivates_the_chain_with_fresh_elements() {
        let mut cf = engine();
        cf.define_chain("door", true).unwrap();
        cf.add_element(Element::new("e", (), |_d, _e| ReturnCode::Reset)).unwrap();
        cf.end_chain().unwrap();
        cf.finalize().unwrap();

        let event = Event::unit(CF_TIMER_EVENT).unwrap();
        cf.execute_chain_element("door", &event);
        assert!(cf.is_chain_active("door").unwrap());
        assert!(cf.chains.get("door").unwrap().elements()[0].is_enabled());
    }

    #[test]
    fn wall_clock_components_do_not_collapse_to_zero() {
        // One day, one hour, one minute, and one second past the epoch.
        let ts = 86_400.0 + 3_600.0 + 60.0 + 1.0;
        let (second, minute, hour, day) = wall_clock_components(ts);
        assert_eq!((second, minute, hour, day), (1, 1, 1, 1));
    }

    #[test]
    fn reset_tears_the_graph_back_to_an_empty_unfinalized_state() {
        let mut cf = engine();
        cf.define_chain("door", true).unwrap();
        cf.add_element(Element::new("e", (), null_continue)).unwrap();
        cf.end_chain().unwrap();
        cf.finalize().unwrap();
        assert!(cf.is_finalized());

        cf.reset(TestClock::new(1_700_000_000.0));
        assert!(!cf.is_finalized());
        assert!(cf.is_chain_active("door").is_err());
        cf.define_chain("door", true).unwrap();
        cf.end_chain().unwrap();
        cf.finalize().unwrap();
    }

    #[test]
    fn null_disable_element_is_a_valid_recipe() {
        let mut cf = engine();
        cf.define_chain("door", true).unwrap();
        cf.add_element(Element::new("e", (), null_disable)).unwrap();
        cf.end_chain().unwrap();
        cf.finalize().unwrap();
        cf.run().unwrap();
    }
}
