// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Thread-safe event queues.
//!
//! [`EventQueue`] is a bounded FIFO guarded by a `parking_lot::Mutex`, the
//! same synchronization primitive the rest of this codebase reaches for when
//! it needs a lock around runtime state. [`DualEventQueueSystem`] pairs one
//! system-wide queue with one queue per chain, wired up once at
//! `finalize()`.

mod dual_system;
mod event_queue;

pub use dual_system::DualEventQueueSystem;
pub use event_queue::{EventQueue, QueueStats};
