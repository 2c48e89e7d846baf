// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Engine Configuration
//!
//! Bootstrap-phase configuration for a running [`chainflow_engine::ChainFlow`].
//!
//! ## Design Philosophy
//!
//! `ChainFlowConfig` holds **validated** configuration after:
//! 1. Loading an optional TOML file
//! 2. Applying `CHAINFLOW_`-prefixed environment overrides
//! 3. Applying default values
//!
//! All configuration is immutable after creation.
//!
//! ## Usage
//!
//! ```rust
//! use chainflow_bootstrap::config::{ChainFlowConfig, LogLevel};
//!
//! let config = ChainFlowConfig::builder()
//!     .system_queue_capacity(256)
//!     .log_level(LogLevel::Debug)
//!     .build();
//!
//! println!("tick interval: {:?}", config.tick_interval());
//! ```

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl LogLevel {
    /// Convert to a `tracing` level.
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Whether `send_system_event`/`send_named_event` calls that name an
/// unregistered event id are a hard error or a logged-and-dropped no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownEventPolicy {
    /// Return `ChainFlowError::UnregisteredEventId` (the engine's default).
    Reject,
    /// Log a warning and drop the event.
    Drop,
}

impl Default for UnknownEventPolicy {
    fn default() -> Self {
        UnknownEventPolicy::Reject
    }
}

/// Raw, pre-validated configuration shape used by the `config` crate's
/// deserializer. Kept separate from [`ChainFlowConfig`] so every field can
/// be optional at load time and defaulted afterward.
#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    system_queue_capacity: Option<usize>,
    chain_queue_capacity: Option<usize>,
    unknown_event_policy: Option<UnknownEventPolicy>,
    tick_interval_ms: Option<u64>,
    log_level: Option<LogLevel>,
}

/// Validated engine configuration.
///
/// Immutable once built; covers the dual-queue system's capacities, the
/// demo clock's tick interval, and logging verbosity.
#[derive(Debug, Clone)]
pub struct ChainFlowConfig {
    system_queue_capacity: Option<usize>,
    chain_queue_capacity: Option<usize>,
    unknown_event_policy: UnknownEventPolicy,
    tick_interval: Duration,
    log_level: LogLevel,
}

impl ChainFlowConfig {
    /// Start a new configuration builder.
    pub fn builder() -> ChainFlowConfigBuilder {
        ChainFlowConfigBuilder::default()
    }

    /// Load configuration from an optional TOML file plus `CHAINFLOW__`
    /// environment variable overrides (e.g. `CHAINFLOW__LOG_LEVEL=debug`).
    /// The double underscore separates the prefix from a flat field name
    /// that may itself contain underscores (`config` crate convention).
    ///
    /// Missing file and missing fields both fall back to defaults; a
    /// present-but-unparsable file is an error.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(false));
        }
        let raw: RawConfig = builder
            .add_source(Environment::with_prefix("CHAINFLOW").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            system_queue_capacity: raw.system_queue_capacity,
            chain_queue_capacity: raw.chain_queue_capacity,
            unknown_event_policy: raw.unknown_event_policy.unwrap_or_default(),
            tick_interval: Duration::from_millis(raw.tick_interval_ms.unwrap_or(DEFAULT_TICK_INTERVAL_MS)),
            log_level: raw.log_level.unwrap_or_default(),
        })
    }

    /// Capacity of the shared system event queue. `None` is unbounded.
    pub fn system_queue_capacity(&self) -> Option<usize> {
        self.system_queue_capacity
    }

    /// Capacity of each per-chain event queue. `None` is unbounded.
    pub fn chain_queue_capacity(&self) -> Option<usize> {
        self.chain_queue_capacity
    }

    /// Policy for `send_*` calls naming an unregistered event id.
    pub fn unknown_event_policy(&self) -> UnknownEventPolicy {
        self.unknown_event_policy
    }

    /// Interval between ticks of the demo clock.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Configured log level.
    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }
}

impl Default for ChainFlowConfig {
    fn default() -> Self {
        ChainFlowConfigBuilder::default().build()
    }
}

/// Default tick interval for the demo clock: 100ms.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Builder for [`ChainFlowConfig`].
#[derive(Debug, Default)]
pub struct ChainFlowConfigBuilder {
    system_queue_capacity: Option<usize>,
    chain_queue_capacity: Option<usize>,
    unknown_event_policy: Option<UnknownEventPolicy>,
    tick_interval_ms: Option<u64>,
    log_level: Option<LogLevel>,
}

impl ChainFlowConfigBuilder {
    /// Set the shared system queue's capacity.
    pub fn system_queue_capacity(mut self, capacity: usize) -> Self {
        self.system_queue_capacity = Some(capacity);
        self
    }

    /// Set each per-chain queue's capacity.
    pub fn chain_queue_capacity(mut self, capacity: usize) -> Self {
        self.chain_queue_capacity = Some(capacity);
        self
    }

    /// Set the unknown-event-id policy.
    pub fn unknown_event_policy(mut self, policy: UnknownEventPolicy) -> Self {
        self.unknown_event_policy = Some(policy);
        self
    }

    /// Set the demo clock's tick interval, in milliseconds.
    pub fn tick_interval_ms(mut self, millis: u64) -> Self {
        self.tick_interval_ms = Some(millis);
        self
    }

    /// Set the log level.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Build the configuration, applying defaults for unset fields.
    pub fn build(self) -> ChainFlowConfig {
        ChainFlowConfig {
            system_queue_capacity: self.system_queue_capacity,
            chain_queue_capacity: self.chain_queue_capacity,
            unknown_event_policy: self.unknown_event_policy.unwrap_or_default(),
            tick_interval: Duration::from_millis(self.tick_interval_ms.unwrap_or(DEFAULT_TICK_INTERVAL_MS)),
            log_level: self.log_level.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChainFlowConfig::default();
        assert_eq!(config.system_queue_capacity(), None);
        assert_eq!(config.chain_queue_capacity(), None);
        assert_eq!(config.unknown_event_policy(), UnknownEventPolicy::Reject);
        assert_eq!(config.tick_interval(), Duration::from_millis(DEFAULT_TICK_INTERVAL_MS));
        assert_eq!(config.log_level(), LogLevel::Info);
    }

    #[test]
    fn test_builder_full() {
        let config = ChainFlowConfig::builder()
            .system_queue_capacity(256)
            .chain_queue_capacity(64)
            .unknown_event_policy(UnknownEventPolicy::Drop)
            .tick_interval_ms(50)
            .log_level(LogLevel::Debug)
            .build();

        assert_eq!(config.system_queue_capacity(), Some(256));
        assert_eq!(config.chain_queue_capacity(), Some(64));
        assert_eq!(config.unknown_event_policy(), UnknownEventPolicy::Drop);
        assert_eq!(config.tick_interval(), Duration::from_millis(50));
        assert_eq!(config.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = ChainFlowConfig::load(Some("/nonexistent/chainflow.toml")).expect("defaults should load");
        assert_eq!(config.log_level(), LogLevel::Info);
    }

    #[test]
    fn test_load_env_override() {
        std::env::set_var("CHAINFLOW__LOG_LEVEL", "debug");
        std::env::set_var("CHAINFLOW__TICK_INTERVAL_MS", "25");
        let config = ChainFlowConfig::load(None).expect("env override should load");
        assert_eq!(config.log_level(), LogLevel::Debug);
        assert_eq!(config.tick_interval(), Duration::from_millis(25));
        std::env::remove_var("CHAINFLOW__LOG_LEVEL");
        std::env::remove_var("CHAINFLOW__TICK_INTERVAL_MS");
    }

    #[test]
    fn test_log_level_to_tracing() {
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
        assert_eq!(LogLevel::Trace.to_tracing_level(), tracing::Level::TRACE);
    }
}
