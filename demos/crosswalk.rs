// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Standalone runnable version of the `crosswalk` scenario, which
//! demonstrates [`chainflow_engine::operators::join_and`] coordinating two
//! independently-timed chains. Also reachable through
//! `chainflow-demo run crosswalk`.

use std::time::Duration;

use chainflow_bootstrap::demos::Scenario;

fn main() {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let mut cf = Scenario::Crosswalk
        .build(Duration::from_millis(50))
        .expect("crosswalk scenario should build");

    cf.run().expect("crosswalk scenario should run to completion");
}
