// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Standalone runnable version of the `door` scenario also reachable
//! through `chainflow-demo run door`. Useful for stepping through the
//! scenario with `cargo run --example door_chain` without going through
//! the CLI's argument parsing.

use std::time::Duration;

use chainflow_bootstrap::demos::Scenario;

fn main() {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let mut cf = Scenario::Door
        .build(Duration::from_millis(50))
        .expect("door scenario should build");

    cf.run().expect("door scenario should run to completion");
}
