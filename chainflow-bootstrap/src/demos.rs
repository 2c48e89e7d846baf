// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Demonstration Scenarios
//!
//! Small, self-contained [`ChainFlow`] graphs that exercise the operator
//! library end to end. These back the `chainflow-demo run` subcommand and
//! the standalone binaries under `demos/` at the workspace root; neither is
//! part of the engine's public contract, which is why this module lives in
//! the bootstrap crate rather than `chainflow-engine`.

use std::time::Duration;

use chainflow_domain::events::CF_TERMINATE_SYSTEM;
use chainflow_domain::{ChainFlowError, Element, Event, ReturnCode};
use chainflow_engine::operators::{join::join_and, one_shot, wait::wait_time};
use chainflow_engine::{ChainFlow, SystemClock};

/// A named, selectable demonstration scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// A single chain: announce opening, hold, announce closing, stop.
    Door,
    /// Two independently-timed chains joined by a coordinator that waits
    /// for both to finish before stopping.
    Crosswalk,
}

impl Scenario {
    /// Parse a scenario name as accepted on the command line.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "door" => Some(Scenario::Door),
            "crosswalk" => Some(Scenario::Crosswalk),
            _ => None,
        }
    }

    /// The scenario's command-line name.
    pub fn name(self) -> &'static str {
        match self {
            Scenario::Door => "door",
            Scenario::Crosswalk => "crosswalk",
        }
    }

    /// All scenario names, for CLI help text and validation errors.
    pub fn all() -> &'static [&'static str] {
        &["door", "crosswalk"]
    }

    /// Build the finalized, ready-to-run chain flow graph for this scenario.
    pub fn build(self, tick_interval: Duration) -> Result<ChainFlow<SystemClock>, ChainFlowError> {
        match self {
            Scenario::Door => build_door(tick_interval),
            Scenario::Crosswalk => build_crosswalk(tick_interval),
        }
    }
}

/// `door_opening` -> `hold_open` (2s) -> `door_closing` -> terminate.
///
/// Demonstrates [`one_shot::log_message`], [`wait_time`], and
/// [`one_shot::send_system_event`] composed into a single chain.
fn build_door(tick_interval: Duration) -> Result<ChainFlow<SystemClock>, ChainFlowError> {
    let mut cf = ChainFlow::new(SystemClock::new(tick_interval));
    let handle = cf.handle();

    cf.define_chain("door", true)?;
    cf.add_element(one_shot::log_message("announce_open", "door opening"))?;
    cf.add_element(wait_time("hold_open", 2.0))?;
    cf.add_element(one_shot::log_message("announce_close", "door closing"))?;
    cf.add_element(one_shot::send_system_event("finish", handle, Event::unit(CF_TERMINATE_SYSTEM)?))?;
    cf.end_chain()?;

    cf.finalize()?;
    Ok(cf)
}

/// Two pedestrian chains (`walk_west`, `walk_east`) cross for different
/// durations and self-terminate when done; a `coordinator` chain uses
/// [`join_and`] to wait for both before stopping the engine.
fn build_crosswalk(tick_interval: Duration) -> Result<ChainFlow<SystemClock>, ChainFlowError> {
    let mut cf = ChainFlow::new(SystemClock::new(tick_interval));
    let handle = cf.handle();

    cf.define_chain("walk_west", true)?;
    cf.add_element(wait_time("crossing", 1.5))?;
    cf.add_element(Element::new("arrived", (), |_data, _event| ReturnCode::Terminate))?;
    cf.end_chain()?;

    cf.define_chain("walk_east", true)?;
    cf.add_element(wait_time("crossing", 2.5))?;
    cf.add_element(Element::new("arrived", (), |_data, _event| ReturnCode::Terminate))?;
    cf.end_chain()?;

    cf.define_chain("coordinator", true)?;
    cf.add_element(join_and(
        "both_crossed",
        handle.clone(),
        vec!["walk_west".to_string(), "walk_east".to_string()],
    ))?;
    cf.add_element(one_shot::send_system_event("finish", handle, Event::unit(CF_TERMINATE_SYSTEM)?))?;
    cf.end_chain()?;

    cf.finalize()?;
    Ok(cf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_parse_round_trips_known_names() {
        for name in Scenario::all() {
            let scenario = Scenario::parse(name).expect("listed scenario name should parse");
            assert_eq!(scenario.name(), *name);
        }
    }

    #[test]
    fn scenario_parse_rejects_unknown_names() {
        assert!(Scenario::parse("not-a-scenario").is_none());
    }

    #[test]
    fn door_scenario_builds_and_finalizes() {
        let cf = Scenario::Door.build(Duration::from_millis(1)).unwrap();
        assert!(cf.is_finalized());
    }

    #[test]
    fn crosswalk_scenario_builds_and_finalizes() {
        let cf = Scenario::Crosswalk.build(Duration::from_millis(1)).unwrap();
        assert!(cf.is_finalized());
    }
}
