//! # Core Module / 核心模块
//!
//! This module contains the core functionality of the Catkin Test Runner,
//! including data models, configuration, package discovery, CMakeLists
//! classification and the test execution pipeline.
//!
//! 此模块包含 Catkin Test Runner 的核心功能，
//! 包括数据模型、配置、软件包发现、CMakeLists 分类和测试执行流水线。

pub mod models;
pub mod config;
pub mod cmake;
pub mod discovery;
pub mod execution;

// Re-exports
pub use models::{Package, TestSummary};
pub use config::RunnerConfig;
pub use discovery::discover_packages;
pub use execution::run_package;
