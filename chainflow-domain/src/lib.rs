// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Chain Flow Domain
//!
//! The domain layer holds the pure, reusable state of the chain flow engine:
//! events, the queues that carry them, and the elements and chains that react
//! to them. It is completely independent of the engine's dispatch loop and of
//! any I/O, logging, or configuration concerns.
//!
//! ## Module Structure
//!
//! ### Events
//! - `Event`: an identifier plus an opaque payload, the only thing that moves
//!   through the system
//! - `EventRegistry`: the catalog of known event identifiers and their
//!   human-readable descriptions
//!
//! ### Queues
//! - `EventQueue`: a bounded, thread-safe FIFO of `Event`s
//! - `DualEventQueueSystem`: the system queue plus one queue per chain
//!
//! ### Elements and Chains
//! - `Element`: a named unit of behavior with init/process/terminate
//!   callbacks and a lifecycle (`enable`/`initialized`)
//! - `Chain`: an ordered, named list of elements, active or inactive
//!
//! ### Error Handling
//! - `ChainFlowError`: the taxonomy of configuration, lifecycle, and runtime
//!   errors the domain and engine layers can raise
//!
//! ## Business Rules and Invariants
//!
//! - An element's `initialized` flag can only be set while `enable` is set.
//! - A chain's element list is fixed once the engine is finalized.
//! - Event identifiers and chain names are validated once, at registration
//!   time; lookups after that are infallible by construction.

pub mod chains;
pub mod elements;
pub mod error;
pub mod events;
pub mod queues;
pub mod support;

pub use chains::Chain;
pub use elements::{Element, ReturnCode};
pub use error::ChainFlowError;
pub use events::{Event, EventRegistry};
pub use queues::{DualEventQueueSystem, EventQueue, QueueStats};
