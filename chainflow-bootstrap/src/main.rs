// /////////////////////////////////////////////////////////////////////////////
// Chain Flow Engine
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `chainflow-demo`: a small CLI that drives the built-in demonstration
//! scenarios to completion, or lists the engine's built-in event registry.
//!
//! The engine itself (`chainflow_engine::ChainFlow`) is synchronous and
//! single-threaded by design - see that crate's module docs. To still
//! honor SIGTERM/SIGINT/SIGHUP promptly, the engine runs on its own
//! thread and this binary's async main races its completion against a
//! shutdown signal.

use std::time::Duration;

use chainflow_bootstrap::config::ChainFlowConfig;
use chainflow_bootstrap::{cli, demos, exit_code, logger, shutdown, signals};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = cli::parse_cli();
    logger::init_logging(cli.verbose);

    let config = match ChainFlowConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load configuration: {err}");
            return std::process::ExitCode::from(exit_code::ExitCode::Config.as_i32() as u8);
        }
    };

    match cli.command {
        cli::Commands::ListEvents => {
            list_events();
            std::process::ExitCode::SUCCESS
        }
        cli::Commands::Run { scenario, tick_ms } => run_scenario(scenario, tick_ms, &config).await,
    }
}

fn list_events() {
    let registry = chainflow_domain::EventRegistry::with_builtins();
    let mut ids: Vec<&str> = registry.ids().collect();
    ids.sort_unstable();
    for id in ids {
        println!("{id}: {}", registry.description(id).unwrap_or(""));
    }
}

async fn run_scenario(scenario: demos::Scenario, tick_ms: u64, config: &ChainFlowConfig) -> std::process::ExitCode {
    let tick_interval = config.tick_interval().max(Duration::from_millis(tick_ms.max(1)));

    let coordinator = shutdown::ShutdownCoordinator::default();
    let signal_coordinator = coordinator.clone();
    let signal_handler = signals::create_signal_handler();
    tokio::spawn(async move {
        signal_handler
            .wait_for_signal(Box::new(move || signal_coordinator.initiate_shutdown()))
            .await;
    });

    let (result_tx, result_rx) = tokio::sync::oneshot::channel();
    let engine_thread = std::thread::spawn(move || {
        let outcome = scenario.build(tick_interval).and_then(|mut cf| cf.run());
        let _ = result_tx.send(outcome);
    });

    tokio::select! {
        _ = coordinator.token().cancelled() => {
            tracing::warn!("shutdown signal received; demo scenario {} will finish its current tick", scenario.name());
            let _ = engine_thread.join();
            std::process::ExitCode::from(exit_code::ExitCode::Interrupted.as_i32() as u8)
        }
        result = result_rx => {
            let _ = engine_thread.join();
            match result {
                Ok(Ok(())) => std::process::ExitCode::SUCCESS,
                Ok(Err(err)) => {
                    eprintln!("scenario {} failed: {err}", scenario.name());
                    std::process::ExitCode::from(exit_code::map_error_to_exit_code(&err).as_i32() as u8)
                }
                Err(_) => std::process::ExitCode::from(exit_code::ExitCode::Software.as_i32() as u8),
            }
        }
    }
}
