// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Error System
//!
//! A hierarchical error system for the chain flow domain, following the same
//! pattern the rest of this codebase uses for its error types: one
//! `thiserror` enum per layer, each variant carrying a descriptive message,
//! with `category()` and `is_recoverable()` helpers for systematic handling.
//!
//! ## Error Categories
//!
//! - **Configuration**: malformed or conflicting builder calls made before
//!   `finalize()` (duplicate ids, opening a chain while one is already open,
//!   reserved-name conflicts).
//! - **Lifecycle**: builder calls made at the wrong time relative to
//!   `finalize()` (mutating after finalize, enabling before finalize).
//! - **Runtime**: invariant violations discovered while the engine is
//!   running (sending to an unregistered event id or unknown chain).
//!
//! User callback panics are deliberately not represented here: per the
//! engine's contract they propagate out of the main loop and terminate the
//! current run rather than being caught and categorized.

mod chain_flow_error;

pub use chain_flow_error::ChainFlowError;
