// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! One-shots over a list of chain names: enable them, disable them, or
//! bracket the current element's own lifetime by enabling them at `init`
//! and disabling them at `terminate`.

use chainflow_domain::Element;

use super::one_shot::{one_shot_continue, one_shot_halt};
use crate::handle::EngineHandle;

/// A one-shot that enables every chain in `chain_names`, then disables
/// itself.
pub fn enable_chains(name: impl Into<String>, handle: EngineHandle, chain_names: Vec<String>) -> Element {
    one_shot_halt(name, move || {
        for chain_name in &chain_names {
            handle.enable_chain(chain_name.clone());
        }
    })
}

/// A one-shot that disables every chain in `chain_names`, then disables
/// itself.
pub fn disable_chains(name: impl Into<String>, handle: EngineHandle, chain_names: Vec<String>) -> Element {
    one_shot_halt(name, move || {
        for chain_name in &chain_names {
            handle.disable_chain(chain_name.clone());
        }
    })
}

/// An element that enables every chain in `chain_names` when it first
/// activates and disables all of them when it (or its own chain) is
/// disabled - useful for bracketing the execution of a set of auxiliary
/// chains with the lifetime of the current element.
pub fn enable_disable_chains(name: impl Into<String>, handle: EngineHandle, chain_names: Vec<String>) -> Element {
    let enable_handle = handle.clone();
    let enable_names = chain_names.clone();
    let disable_names = chain_names;
    one_shot_continue(
        name,
        move || {
            for chain_name in &enable_names {
                enable_handle.enable_chain(chain_name.clone());
            }
        },
        move || {
            for chain_name in &disable_names {
                handle.disable_chain(chain_name.clone());
            }
        },
    )
}
