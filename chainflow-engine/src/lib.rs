// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

// Production code safety enforced via CI and `make lint-strict`
// (lib/bins checked separately from tests - tests may use unwrap/expect)

//! # Chain Flow Engine
//!
//! A cooperative, event-driven scheduling engine. Chains of elements react to
//! events drawn from a shared system queue and per-chain queues; there is no
//! preemption and no background scheduling beyond the engine's own tick loop.
//!
//! ## Architecture Overview
//!
//! This crate builds the runtime on top of `chainflow-domain`'s pure types:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     chainflow-bootstrap                     │
//! │  (CLI, configuration, logging, signal handling)              │
//! └─────────────────────────────────────────────────────────────┘
//!                                │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      chainflow-engine                       │
//! │  (ChainFlow builder + dispatch loop, Clock, operator library) │
//! └─────────────────────────────────────────────────────────────┘
//!                                │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      chainflow-domain                       │
//! │  (Event, EventQueue, Element, Chain, ChainFlowError)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Core Concepts
//!
//! ### Chains and elements
//! A chain is an ordered list of elements. Elements react to events through a
//! `process` callback, optionally running `init` the first time they become
//! active and `terminate` the one time they are disabled after having been
//! initialized. A [`ReturnCode`](chainflow_domain::ReturnCode) decides what
//! happens next: keep going, stop dispatching to this chain for this event,
//! disable just this element, or reset/terminate the whole chain.
//!
//! ### The tick loop
//! [`engine::ChainFlow::run`] ticks a [`clock::Clock`], synthesizes a timer
//! event every tick plus second/minute/hour/day events on wall-clock
//! rollover, and drains the system queue and every active chain's queue in
//! response. The loop keeps going as long as some element actually reacted to
//! the last event dispatched; once a full dispatch produces no activity at
//! all, the run ends on its own.
//!
//! ### The operator library
//! [`operators`] collects the reusable element recipes every chain flow graph
//! is built from: one-shot handlers, timed waits, event waits, verification,
//! watchdogs, joins, chain enable/disable, and message logging. Each one
//! returns a plain [`chainflow_domain::Element`], so application code composes
//! them with `ChainFlow::add_element` exactly like a hand-written one.
//!
//! ## Concurrency model
//!
//! The engine is synchronous and single-threaded by design: `Clock::time_tick`
//! is the only suspension point, matching the cooperative model this engine
//! implements. `tokio` does not appear in this crate; it is only pulled in by
//! `chainflow-bootstrap`, to drive the otherwise-synchronous engine from an
//! async signal-handling shell.

pub mod clock;
pub mod engine;
pub mod handle;
pub mod operators;

pub use clock::{Clock, SystemClock, TestClock};
pub use engine::ChainFlow;
pub use handle::EngineHandle;
