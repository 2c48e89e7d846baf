// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use std::collections::HashMap;

use crate::error::ChainFlowError;
use crate::events::Event;

use super::EventQueue;

/// The name of the shared system queue inside a [`DualEventQueueSystem`].
pub const NORMAL_EVENTS_QUEUE: &str = "normal_events";

/// One system-wide [`EventQueue`] plus one queue per chain.
///
/// Built once, from the final chain list, when the engine is finalized.
/// Sending an event to a chain name the engine never defined is a
/// configuration mistake, not a runtime condition to paper over, so it
/// returns [`ChainFlowError::UnknownChain`] rather than silently dropping
/// the event.
#[derive(Debug)]
pub struct DualEventQueueSystem {
    normal_queue: EventQueue,
    chain_queues: HashMap<String, EventQueue>,
}

impl DualEventQueueSystem {
    /// Build the dual-queue system for `chain_names`, using `system_capacity`
    /// for the shared queue and `chain_capacity` for each per-chain queue.
    /// A capacity of `None` means unbounded.
    pub fn new<I, S>(chain_names: I, system_capacity: Option<usize>, chain_capacity: Option<usize>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let normal_queue = match system_capacity {
            Some(capacity) => EventQueue::bounded(NORMAL_EVENTS_QUEUE, capacity),
            None => EventQueue::unbounded(NORMAL_EVENTS_QUEUE),
        };

        let chain_queues = chain_names
            .into_iter()
            .map(|name| {
                let name = name.into();
                let queue = match chain_capacity {
                    Some(capacity) => EventQueue::bounded(name.clone(), capacity),
                    None => EventQueue::unbounded(name.clone()),
                };
                (name, queue)
            })
            .collect();

        Self {
            normal_queue,
            chain_queues,
        }
    }

    /// The shared system queue.
    pub fn normal_queue(&self) -> &EventQueue {
        &self.normal_queue
    }

    /// The queue belonging to `chain_name`.
    pub fn chain_queue(&self, chain_name: &str) -> Result<&EventQueue, ChainFlowError> {
        self.chain_queues
            .get(chain_name)
            .ok_or_else(|| ChainFlowError::UnknownChain(chain_name.to_string()))
    }

    /// Enqueue `event` onto the shared system queue.
    pub fn send_system_event(&self, event: Event) -> bool {
        self.normal_queue.enqueue(event)
    }

    /// Enqueue `event` onto `chain_name`'s queue.
    ///
    /// # Errors
    ///
    /// Returns [`ChainFlowError::UnknownChain`] if `chain_name` was not part
    /// of the chain list the system was built from.
    pub fn send_named_event(&self, chain_name: &str, event: Event) -> Result<bool, ChainFlowError> {
        Ok(self.chain_queue(chain_name)?.enqueue(event))
    }

    /// The chain names this system has queues for.
    pub fn chain_names(&self) -> impl Iterator<Item = &str> {
        self.chain_queues.keys().map(String::as_str)
    }

    /// Flush `chain_name`'s own queue, returning how many events were
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ChainFlowError::UnknownChain`] if `chain_name` was not part
    /// of the chain list the system was built from.
    pub fn clear_callback_events(&self, chain_name: &str) -> Result<usize, ChainFlowError> {
        Ok(self.chain_queue(chain_name)?.clear())
    }

    /// Flush the system queue and every per-chain queue, returning the
    /// number of events discarded from each per-chain queue, keyed by
    /// name, plus the count discarded from the system queue under
    /// [`NORMAL_EVENTS_QUEUE`].
    pub fn clear_all_queues(&self) -> HashMap<String, usize> {
        let mut cleared = HashMap::with_capacity(self.chain_queues.len() + 1);
        cleared.insert(NORMAL_EVENTS_QUEUE.to_string(), self.normal_queue.clear());
        for (name, queue) in &self.chain_queues {
            cleared.insert(name.clone(), queue.clear());
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn sending_to_unknown_chain_is_an_error() {
        let system = DualEventQueueSystem::new(["door", "alarm"], None, None);
        let event = Event::unit("CF_TIMER_EVENT").unwrap();
        let err = system.send_named_event("nonexistent", event).unwrap_err();
        assert!(matches!(err, ChainFlowError::UnknownChain(name) if name == "nonexistent"));
    }

    #[test]
    fn each_chain_gets_its_own_queue() {
        let system = DualEventQueueSystem::new(["door", "alarm"], None, None);
        let event = Event::new("opened", Value::Null).unwrap();
        system.send_named_event("door", event).unwrap();
        assert_eq!(system.chain_queue("door").unwrap().len(), 1);
        assert_eq!(system.chain_queue("alarm").unwrap().len(), 0);
    }

    #[test]
    fn system_queue_is_independent_of_chain_queues() {
        let system = DualEventQueueSystem::new(["door"], None, None);
        system.send_system_event(Event::unit("CF_RESET_SYSTEM").unwrap());
        assert_eq!(system.normal_queue().len(), 1);
        assert_eq!(system.chain_queue("door").unwrap().len(), 0);
    }

    #[test]
    fn clear_callback_events_flushes_only_the_named_chain() {
        let system = DualEventQueueSystem::new(["door", "alarm"], None, None);
        system.send_named_event("door", Event::unit("opened").unwrap()).unwrap();
        system.send_named_event("alarm", Event::unit("ringing").unwrap()).unwrap();
        assert_eq!(system.clear_callback_events("door").unwrap(), 1);
        assert_eq!(system.chain_queue("door").unwrap().len(), 0);
        assert_eq!(system.chain_queue("alarm").unwrap().len(), 1);
    }

    #[test]
    fn clear_all_queues_reports_counts_per_queue() {
        let system = DualEventQueueSystem::new(["door", "alarm"], None, None);
        system.send_system_event(Event::unit("CF_TIMER_EVENT").unwrap());
        system.send_named_event("door", Event::unit("opened").unwrap()).unwrap();
        let cleared = system.clear_all_queues();
        assert_eq!(cleared.get(NORMAL_EVENTS_QUEUE), Some(&1));
        assert_eq!(cleared.get("door"), Some(&1));
        assert_eq!(cleared.get("alarm"), Some(&0));
        assert!(system.normal_queue().is_empty());
        assert!(system.chain_queue("door").unwrap().is_empty());
    }
}
