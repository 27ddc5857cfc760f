// src/commands/run.rs

use anyhow::Result;
use colored::*;
use std::path::PathBuf;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::RunnerConfig, discovery, execution,
        models::{ExecutionStatus, TestSummary},
    },
    infra,
    reporting::{self, console::Reporter},
};

/// Return code contributed by a package whose tooling failed outright
/// (spawn failure or timeout), kept distinct in the console from a test
/// failure but folded into the same aggregate.
const TOOL_FAILURE_CODE: i32 = 1;

/// Conventional SIGINT code contributed when the run is interrupted.
const INTERRUPTED_CODE: i32 = 130;

/// Discovers every package under `path` and runs them strictly sequentially,
/// emitting one report row per tested package as soon as it finishes. The
/// returned value is the sum of all per-package return codes, clamped to the
/// range a process exit status can carry.
///
/// The lcov counters and trace files live under a shared `build/` root, so
/// two packages' zero/capture/merge steps must never interleave; packages
/// therefore run one at a time.
pub async fn execute(path: PathBuf, config: RunnerConfig) -> Result<u8> {
    let source_root = infra::fs::absolute_path(&path)?;
    println!("Scanning source tree: {}", source_root.display());

    let mut packages = discovery::discover_packages(&source_root)?;
    println!("Found {} package(s)", packages.len());

    let reporter = Reporter::new(config.output.clone());
    reporter.write_header()?;

    let stop_token = setup_signal_handler();

    let mut aggregate: i64 = 0;
    for package in packages.iter_mut() {
        println!(
            "{}",
            format!("Running unit tests for package {}", package.name).blue()
        );

        // Race the package run against Ctrl-C; dropping the run future kills
        // the in-flight child via kill_on_drop.
        let outcome = tokio::select! {
            biased;
            _ = stop_token.cancelled() => None,
            result = execution::run_package(package, &config) => Some(result),
        };

        let Some(result) = outcome else {
            println!(
                "\n{}",
                "Interrupted; remaining packages were not run.".yellow()
            );
            aggregate += i64::from(INTERRUPTED_CODE);
            break;
        };

        let code = match result {
            Ok(code) => code,
            Err(e) => {
                eprintln!(
                    "{} {:#}",
                    format!("Tool failure while testing {}:", package.name).red(),
                    e
                );
                package.status = ExecutionStatus::Failed;
                // The run never got as far as a summary; unknown, not zero.
                package.summary = TestSummary::UNPARSED;
                TOOL_FAILURE_CODE
            }
        };

        if package.has_tests {
            reporter.write_row(package)?;
        }

        if code != 0 {
            println!(
                "{}",
                format!("Test returned a non-zero code ({})", code).red()
            );
            if !package.output.trim().is_empty() {
                println!("{}", package.output.trim_end());
            }
        }

        aggregate += i64::from(code);
    }

    reporting::console::print_failing_packages(&packages);

    if let Some(html_path) = &config.html {
        println!("\nGenerating HTML report at: {}", html_path.display());
        if let Err(e) = reporting::generate_html_report(&packages, html_path) {
            eprintln!("{} {:#}", "Failed to generate HTML report:".red(), e);
        }
    }
    if let Some(json_path) = &config.json {
        if let Err(e) = reporting::write_json_report(&packages, json_path) {
            eprintln!("{} {:#}", "Failed to generate JSON report:".red(), e);
        }
    }

    Ok(aggregate.clamp(0, 255) as u8)
}

fn setup_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!("\n{}", "Shutdown signal received, stopping...".yellow());
            token_clone.cancel();
        }
    });

    token
}
