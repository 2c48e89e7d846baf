// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ChainFlowError;

/// An event: an identifier plus an opaque payload.
///
/// `Event` is the only thing that flows through queues, chains, and
/// elements. Its payload is intentionally untyped (`serde_json::Value`) so
/// that elements defined far apart in a chain flow graph can exchange data
/// without the domain layer knowing the shape of any particular payload.
///
/// Two events are equal, and hash equally, if their ids match and their
/// payloads serialize to the same string. This mirrors comparing events by
/// `(event_id, str(data))` rather than by object identity: two separately
/// constructed events carrying the same id and the same data are
/// interchangeable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    id: String,
    data: Value,
}

impl Event {
    /// Construct a new event. `id` must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ChainFlowError::InvalidEventId`] if `id` is empty or
    /// consists only of whitespace.
    pub fn new(id: impl Into<String>, data: Value) -> Result<Self, ChainFlowError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ChainFlowError::InvalidEventId(id));
        }
        Ok(Self { id, data })
    }

    /// Construct an event with a `Value::Null` payload.
    pub fn unit(id: impl Into<String>) -> Result<Self, ChainFlowError> {
        Self::new(id, Value::Null)
    }

    /// The event's identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The event's payload.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Consume the event, returning its payload.
    pub fn into_data(self) -> Value {
        self.data
    }

    /// True if this event's id matches `id`.
    pub fn is(&self, id: &str) -> bool {
        self.id == id
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.data.to_string() == other.data.to_string()
    }
}

impl Eq for Event {}

impl Hash for Event {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.data.to_string().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_id() {
        assert!(Event::new("", Value::Null).is_err());
        assert!(Event::new("   ", Value::Null).is_err());
    }

    #[test]
    fn equality_is_by_id_and_payload() {
        let a = Event::new("CF_TIMER_EVENT", Value::Null).unwrap();
        let b = Event::new("CF_TIMER_EVENT", Value::Null).unwrap();
        assert_eq!(a, b);

        let c = Event::new("CF_TIMER_EVENT", serde_json::json!(1)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn is_matches_id() {
        let e = Event::unit("door_opened").unwrap();
        assert!(e.is("door_opened"));
        assert!(!e.is("door_closed"));
    }
}
