// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The operator library: reusable [`chainflow_domain::Element`] recipes built
//! on top of the element interface (init/process/terminate callbacks, return
//! codes) rather than on any privileged access to the engine.
//!
//! Every operator in this module returns a plain `Element`, constructed with
//! [`chainflow_domain::Element::new`]/`with_init`/`with_terminate` exactly
//! like hand-written application code would, so application code composes
//! them with [`crate::engine::ChainFlow::add_element`] with no special
//! casing. Operators that need to enable/disable chains or send events take
//! an [`crate::handle::EngineHandle`] - see that module for why a handle,
//! rather than a direct engine reference, is what element callbacks capture.
//!
//! ## Families
//!
//! - [`one_shot`]: the base recipe every other operator in this module is
//!   built from - an element whose entire behavior lives in `init` (and
//!   optionally `terminate`), with `process` contributing nothing but a
//!   return code.
//! - [`enable_disable`]: one-shots over a list of chain names.
//! - [`wait`]: timed waits (`wait_time`) and event-counting waits
//!   (`wait_for_event`, with an optional timeout).
//! - [`verify`]: a predicate checked on every delivered event, with an
//!   optional timeout.
//! - [`watchdog`]: a two-state (`ON`/`OFF`) pat/cancel/start timeout monitor.
//! - [`join`]: AND/OR/N-of-M barriers over a list of chains' activity,
//!   driven by `CF_TIMER_EVENT`.
//! - [`exception`]: a watched-event-id counter that disables a configured
//!   list of chains once tripped.
//! - [`fixed`]: fixed-return-code placeholders (`halt`/`pass_through`/
//!   `reset`/`terminate`) and `event_filter`, a pass-through logger for a
//!   watched set of event ids.

pub mod enable_disable;
pub mod exception;
pub mod fixed;
pub mod join;
pub mod one_shot;
pub mod verify;
pub mod wait;
pub mod watchdog;

pub use enable_disable::{disable_chains, enable_chains, enable_disable_chains};
pub use exception::ExceptionHandler;
pub use fixed::{event_filter, halt, pass_through, reset, terminate};
pub use join::{join_and, join_n_of_m, join_or};
pub use one_shot::{log_message, one_shot_continue, one_shot_halt, send_named_event, send_system_event};
pub use verify::Verify;
pub use wait::{wait_time, WaitForEvent};
pub use watchdog::Watchdog;
