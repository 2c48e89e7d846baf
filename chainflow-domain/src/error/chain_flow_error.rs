// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use thiserror::Error;

/// Domain-specific errors for the chain flow engine.
///
/// Each variant carries a descriptive message and is designed to make clear
/// both what went wrong and, via [`ChainFlowError::category`], which part of
/// the system it belongs to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainFlowError {
    #[error("invalid event id: {0:?}")]
    InvalidEventId(String),

    #[error("duplicate event id: {0}")]
    DuplicateEventId(String),

    #[error("duplicate chain name: {0}")]
    DuplicateChainName(String),

    #[error("duplicate element name: {0}")]
    DuplicateElementName(String),

    #[error("reserved chain name used: {0}")]
    ReservedChainName(String),

    #[error("a chain is already open: {0}")]
    ChainAlreadyOpen(String),

    #[error("no chain is currently open")]
    NoChainOpen,

    #[error("builder mutated after finalize: {0}")]
    AlreadyFinalized(String),

    #[error("engine used before finalize: {0}")]
    NotFinalized(String),

    #[error("unknown chain: {0}")]
    UnknownChain(String),

    #[error("chain {0} is not active")]
    ChainNotActive(String),

    #[error("unregistered event id: {0}")]
    UnregisteredEventId(String),

    #[error("queue overflow on {queue}: capacity {capacity} exceeded")]
    QueueOverflow { queue: String, capacity: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl ChainFlowError {
    /// Creates a new "already finalized" lifecycle error.
    pub fn already_finalized(msg: impl Into<String>) -> Self {
        Self::AlreadyFinalized(msg.into())
    }

    /// Creates a new "not finalized" lifecycle error.
    pub fn not_finalized(msg: impl Into<String>) -> Self {
        Self::NotFinalized(msg.into())
    }

    /// Creates a new invalid-configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Creates a new internal error. Reserved for invariant violations the
    /// engine itself should never trigger.
    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    /// True if retrying the same operation after some external condition
    /// changes (e.g. a chain becoming finalized) could succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ChainFlowError::QueueOverflow { .. })
    }

    /// The error's category, for structured logging and metrics.
    pub fn category(&self) -> &'static str {
        match self {
            ChainFlowError::InvalidEventId(_)
            | ChainFlowError::DuplicateEventId(_)
            | ChainFlowError::DuplicateChainName(_)
            | ChainFlowError::DuplicateElementName(_)
            | ChainFlowError::ReservedChainName(_)
            | ChainFlowError::ChainAlreadyOpen(_)
            | ChainFlowError::NoChainOpen
            | ChainFlowError::InvalidConfiguration(_) => "configuration",
            ChainFlowError::AlreadyFinalized(_) | ChainFlowError::NotFinalized(_) => "lifecycle",
            ChainFlowError::UnknownChain(_)
            | ChainFlowError::UnregisteredEventId(_)
            | ChainFlowError::ChainNotActive(_) => "runtime",
            ChainFlowError::QueueOverflow { .. } => "queue",
            ChainFlowError::InternalError(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_overflow_is_recoverable() {
        let err = ChainFlowError::QueueOverflow {
            queue: "normal_events".to_string(),
            capacity: 16,
        };
        assert!(err.is_recoverable());
        assert_eq!(err.category(), "queue");
    }

    #[test]
    fn configuration_errors_are_not_recoverable() {
        let err = ChainFlowError::DuplicateChainName("door".to_string());
        assert!(!err.is_recoverable());
        assert_eq!(err.category(), "configuration");
    }
}
