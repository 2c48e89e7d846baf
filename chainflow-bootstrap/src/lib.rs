// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

// Production code safety enforced via CI and `make lint-strict`
// (lib/bins checked separately from tests - tests may use unwrap/expect)

//! # Chain Flow Bootstrap
//!
//! Entry-point concerns for the chain flow engine, kept separate from
//! `chainflow-engine`'s synchronous, single-threaded core so that core has
//! no dependency on `tokio`, `clap`, or the `config` crate.
//!
//! - **CLI** - argument parsing for the `chainflow-demo` binary
//! - **Configuration** - `ChainFlowConfig`, loaded from TOML plus
//!   `CHAINFLOW__`-prefixed environment overrides
//! - **Logging** - a lightweight bootstrap-phase logging trait, and
//!   `tracing-subscriber` initialization for the rest of the run
//! - **Platform abstraction** - OS-specific operations (POSIX vs Windows)
//! - **Signal handling** - graceful shutdown on SIGTERM, SIGINT, SIGHUP
//! - **Shutdown coordination** - cancellation tokens and grace-period
//!   timeout enforcement
//! - **Exit codes** - BSD `sysexits.h`-style process exit codes
//! - **Demos** - the scenarios the `chainflow-demo run` subcommand drives
//!
//! ## Usage Example
//!
//! ```rust
//! use chainflow_bootstrap::platform::create_platform;
//!
//! let platform = create_platform();
//! println!("Running on: {}", platform.platform_name());
//! ```
//!
//! ## Module Structure
//!
//! - `cli` - argument parsing (clap derive)
//! - `config` - `ChainFlowConfig` loading
//! - `demos` - built-in scenarios for `chainflow-demo run`
//! - `exit_code` - Unix exit code enumeration
//! - `logger` - bootstrap-phase logging abstraction
//! - `platform` - OS abstraction (Unix/Windows)
//! - `shutdown` - shutdown coordination
//! - `signals` - signal handling (SIGTERM, SIGINT, SIGHUP)

pub mod cli;
pub mod config;
pub mod demos;
pub mod exit_code;
pub mod logger;
pub mod platform;
pub mod shutdown;
pub mod signals;

pub use cli::{parse_cli, Cli, Commands};
pub use config::ChainFlowConfig;
pub use demos::Scenario;
pub use exit_code::{map_error_to_exit_code, result_to_exit_code, ExitCode};
