// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use std::collections::HashMap;

use crate::error::ChainFlowError;

use super::BUILTIN_EVENT_IDS;

/// A catalog mapping event identifiers to human-readable descriptions.
///
/// The registry exists so that a chain flow graph can be introspected and
/// documented (`chainflow-demo list-events`) and so that sending an event
/// the graph never declared an interest in is caught at registration time
/// rather than silently ignored at dispatch time.
#[derive(Debug, Clone, Default)]
pub struct EventRegistry {
    descriptions: HashMap<String, String>,
}

impl EventRegistry {
    /// An empty registry with no event ids defined.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the engine's built-in event ids
    /// (`CF_TIMER_EVENT`, `CF_RESET_SYSTEM`, and friends).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for id in BUILTIN_EVENT_IDS {
            registry
                .descriptions
                .insert((*id).to_string(), "built-in engine event".to_string());
        }
        registry
    }

    /// Register a new event id with a description.
    ///
    /// # Errors
    ///
    /// Returns [`ChainFlowError::DuplicateEventId`] if `id` is already
    /// registered.
    pub fn register(&mut self, id: impl Into<String>, description: impl Into<String>) -> Result<(), ChainFlowError> {
        let id = id.into();
        if self.descriptions.contains_key(&id) {
            return Err(ChainFlowError::DuplicateEventId(id));
        }
        self.descriptions.insert(id, description.into());
        Ok(())
    }

    /// True if `id` has been registered.
    pub fn contains(&self, id: &str) -> bool {
        self.descriptions.contains_key(id)
    }

    /// The description registered for `id`, if any.
    pub fn description(&self, id: &str) -> Option<&str> {
        self.descriptions.get(id).map(String::as_str)
    }

    /// All registered event ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.descriptions.keys().map(String::as_str)
    }

    /// The number of registered event ids.
    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    /// True if no event ids are registered.
    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}
