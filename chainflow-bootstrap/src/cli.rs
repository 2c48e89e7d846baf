// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Command-Line Interface
//!
//! `chainflow-demo`'s argument surface: a `run` subcommand that drives a
//! built-in scenario to completion, and a `list-events` subcommand that
//! dumps the built-in event registry. This is explicitly a demonstration
//! harness over the engine, not part of its core - no CLI is part of the
//! core chain flow engine itself.

use clap::{Parser, Subcommand};

use crate::demos::Scenario;

/// Chain flow engine demonstration CLI.
#[derive(Debug, Parser)]
#[command(name = "chainflow-demo", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to an optional TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a built-in scenario to completion.
    Run {
        /// Scenario name. See `--help` for the full list.
        #[arg(value_parser = parse_scenario)]
        scenario: Scenario,

        /// Tick interval for the demo clock, in milliseconds.
        #[arg(long, default_value_t = 100)]
        tick_ms: u64,
    },

    /// List every registered event id and its description.
    ListEvents,
}

fn parse_scenario(value: &str) -> Result<Scenario, String> {
    Scenario::parse(value).ok_or_else(|| format!("unknown scenario {value:?}, expected one of {:?}", Scenario::all()))
}

/// Parse `std::env::args`, exiting the process with clap's usage message on
/// a parse error (clap's own behavior via [`Parser::parse`]).
pub fn parse_cli() -> Cli {
    Cli::parse()
}
