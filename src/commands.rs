//! # Commands Module / 命令模块
//!
//! Implementations of the commands exposed by the CLI.
//! CLI 暴露的命令的实现。

pub mod run;
