// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::events::Event;

/// Point-in-time statistics about an [`EventQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueStats {
    /// Events currently waiting in the queue.
    pub len: usize,
    /// The queue's capacity, if bounded.
    pub capacity: Option<usize>,
    /// Total events ever successfully enqueued.
    pub total_enqueued: u64,
    /// Total events dropped because the queue was full.
    pub total_dropped: u64,
}

/// A bounded, thread-safe FIFO of [`Event`]s.
///
/// Enqueue never blocks: when the queue is at capacity, `enqueue` returns
/// `false` and the event is dropped rather than waiting for room. This
/// matches the cooperative, single-threaded dispatch model the queue feeds
/// into - a producer (another element, or the engine itself) must never
/// stall waiting on a consumer that is itself driven by the same dispatch
/// loop.
#[derive(Debug)]
pub struct EventQueue {
    name: String,
    capacity: Option<usize>,
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    events: VecDeque<Event>,
    total_enqueued: u64,
    total_dropped: u64,
}

impl EventQueue {
    /// A queue with no capacity limit.
    pub fn unbounded(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capacity: None,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// A queue that drops new events once `capacity` events are waiting.
    pub fn bounded(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            capacity: Some(capacity),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// The queue's name, used in log messages and error reporting.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append `event` to the back of the queue.
    ///
    /// Returns `false`, without blocking, if the queue is at capacity.
    pub fn enqueue(&self, event: Event) -> bool {
        let mut inner = self.inner.lock();
        if let Some(capacity) = self.capacity {
            if inner.events.len() >= capacity {
                inner.total_dropped += 1;
                return false;
            }
        }
        inner.events.push_back(event);
        inner.total_enqueued += 1;
        true
    }

    /// Remove and return the event at the front of the queue, if any.
    pub fn dequeue(&self) -> Option<Event> {
        self.inner.lock().events.pop_front()
    }

    /// Look at the event at the front of the queue without removing it.
    pub fn peek(&self) -> Option<Event> {
        self.inner.lock().events.front().cloned()
    }

    /// True if the queue currently holds no events.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().events.is_empty()
    }

    /// True if the queue is bounded and currently at capacity.
    pub fn is_full(&self) -> bool {
        let inner = self.inner.lock();
        matches!(self.capacity, Some(capacity) if inner.events.len() >= capacity)
    }

    /// The number of events currently waiting.
    pub fn len(&self) -> usize {
        self.inner.lock().events.len()
    }

    /// Remove all waiting events, returning how many were discarded.
    pub fn clear(&self) -> usize {
        let mut inner = self.inner.lock();
        let count = inner.events.len();
        inner.events.clear();
        count
    }

    /// A point-in-time snapshot of every event currently waiting, oldest
    /// first. This is a clone, never a live view: mutating the queue after
    /// calling this has no effect on the returned `Vec`.
    pub fn snapshot(&self) -> Vec<Event> {
        self.inner.lock().events.iter().cloned().collect()
    }

    /// Point-in-time statistics about this queue.
    pub fn stats(&self) -> QueueStats {
        let inner = self.inner.lock();
        QueueStats {
            len: inner.events.len(),
            capacity: self.capacity,
            total_enqueued: inner.total_enqueued,
            total_dropped: inner.total_dropped,
        }
    }
}
