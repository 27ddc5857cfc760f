// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

use crate::commands;
use crate::core::config::RunnerConfig;

fn build_cli() -> Command {
    Command::new("catkin-test-runner")
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Runs unit tests for every catkin package in a source tree and aggregates the results")
        .arg(
            Arg::new("path")
                .help("Source code path to scan for packages")
                .required(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("cov")
                .long("cov")
                .help("Run tests under lcov coverage instrumentation")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("build")
                .long("build")
                .help("Build each package with coverage flags before running its tests")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Append the summary table to this file")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("html")
                .long("html")
                .help("Write an HTML report to this file after the run")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Write a JSON report to this file after the run")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML configuration file (tool names, timeout, coverage options)")
                .value_name("CONFIG")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("timeout-secs")
                .long("timeout-secs")
                .help("Kill any external tool invocation that runs longer than this many seconds")
                .value_name("SECS")
                .value_parser(clap::value_parser!(u64))
                .action(ArgAction::Set),
        )
}

pub async fn run() -> Result<u8> {
    let matches = build_cli().get_matches();

    // Layer CLI flags over the optional config file.
    let config_path = matches.get_one::<PathBuf>("config").cloned();
    let mut config = RunnerConfig::load(config_path.as_deref())?;

    if matches.get_flag("cov") {
        config.coverage = true;
    }
    if matches.get_flag("build") {
        config.build_first = true;
    }
    if let Some(output) = matches.get_one::<PathBuf>("output") {
        config.output = Some(output.clone());
    }
    if let Some(html) = matches.get_one::<PathBuf>("html") {
        config.html = Some(html.clone());
    }
    if let Some(json) = matches.get_one::<PathBuf>("json") {
        config.json = Some(json.clone());
    }
    if let Some(secs) = matches.get_one::<u64>("timeout-secs") {
        config.timeout_secs = Some(*secs);
    }

    let raw_path = matches.get_one::<String>("path").unwrap(); // Required
    let source_path = PathBuf::from(shellexpand::tilde(raw_path).into_owned());

    commands::run::execute(source_path, config).await
}
