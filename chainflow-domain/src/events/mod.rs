// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Events: the only thing that moves through a chain flow system.
//!
//! An [`Event`] is an identifier plus an opaque payload. Equality and
//! hashing are defined over `(id, payload)`, not over any notion of
//! identity, so two events carrying the same id and the same data are
//! interchangeable from the engine's point of view.

mod event;
mod registry;

pub use event::Event;
pub use registry::EventRegistry;

/// Event id synthesized once per clock tick.
pub const CF_TIMER_EVENT: &str = "CF_TIMER_EVENT";
/// Event id synthesized on a wall-clock second rollover.
pub const CF_SECOND_EVENT: &str = "CF_SECOND_EVENT";
/// Event id synthesized on a wall-clock minute rollover.
pub const CF_MINUTE_EVENT: &str = "CF_MINUTE_EVENT";
/// Event id synthesized on a wall-clock hour rollover.
pub const CF_HOUR_EVENT: &str = "CF_HOUR_EVENT";
/// Event id synthesized on a wall-clock day rollover.
pub const CF_DAY_EVENT: &str = "CF_DAY_EVENT";
/// System event that resets the engine to its post-finalize state.
pub const CF_RESET_SYSTEM: &str = "CF_RESET_SYSTEM";
/// System event that terminates the engine's main loop.
pub const CF_TERMINATE_SYSTEM: &str = "CF_TERMINATE_SYSTEM";
/// Convenience system event, distinct from `CF_RESET_SYSTEM`; `reset_system()`
/// sends this.
pub const CF_SYSTEM_RESET: &str = "CF_SYSTEM_RESET";
/// Convenience system event; `stop_system()` sends this.
pub const CF_SYSTEM_STOP: &str = "CF_SYSTEM_STOP";
/// Reserved event id matching the `CF_HALT` return-code spelling; the Rust
/// rendition represents return codes with the typed [`crate::ReturnCode`]
/// enum rather than these strings, but the identifier is still part of the
/// engine's reserved namespace per spec §3/§6 and must never collide with an
/// application-registered event id.
pub const CF_HALT: &str = "CF_HALT";
/// Reserved event id matching the `CF_CONTINUE` return-code spelling.
pub const CF_CONTINUE: &str = "CF_CONTINUE";
/// Reserved event id matching the `CF_DISABLE` return-code spelling.
pub const CF_DISABLE: &str = "CF_DISABLE";
/// Reserved event id matching the `CF_RESET` return-code spelling.
pub const CF_RESET: &str = "CF_RESET";
/// Reserved event id matching the `CF_TERMINATE` return-code spelling.
pub const CF_TERMINATE: &str = "CF_TERMINATE";

/// All event ids the engine synthesizes itself or reserves as part of its
/// ABI, pre-registered by [`EventRegistry::with_builtins`] per spec §3/§6.
pub const BUILTIN_EVENT_IDS: &[&str] = &[
    CF_TIMER_EVENT,
    CF_SECOND_EVENT,
    CF_MINUTE_EVENT,
    CF_HOUR_EVENT,
    CF_DAY_EVENT,
    CF_SYSTEM_RESET,
    CF_SYSTEM_STOP,
    CF_HALT,
    CF_CONTINUE,
    CF_DISABLE,
    CF_RESET,
    CF_TERMINATE,
    CF_RESET_SYSTEM,
    CF_TERMINATE_SYSTEM,
];
