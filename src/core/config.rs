//! # Runner Configuration Module / 运行器配置模块
//!
//! The explicit configuration object handed to the execution pipeline and
//! the reporters. All knobs travel through this struct as parameters; nothing
//! reads process-global state.
//!
//! 传递给执行流水线和报告器的显式配置对象。所有开关都作为参数经由此结构体
//! 传递；没有任何代码读取进程级全局状态。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Names (or paths) of the external tools the pipeline drives. Overridable
/// from the config file, which is also how the integration tests substitute
/// stub executables.
///
/// 流水线驱动的外部工具的名称（或路径）。可通过配置文件覆盖，
/// 集成测试也正是通过这种方式替换桩可执行文件。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolPaths {
    /// The catkin build/test tool. / catkin 构建/测试工具。
    #[serde(default = "default_catkin")]
    pub catkin: String,
    /// The lcov coverage tool. / lcov 覆盖率工具。
    #[serde(default = "default_lcov")]
    pub lcov: String,
    /// The per-package result summarization tool.
    /// 按软件包汇总结果的工具。
    #[serde(default = "default_test_results")]
    pub test_results: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            catkin: default_catkin(),
            lcov: default_lcov(),
            test_results: default_test_results(),
        }
    }
}

fn default_catkin() -> String {
    "catkin".to_string()
}

fn default_lcov() -> String {
    "lcov".to_string()
}

fn default_test_results() -> String {
    "catkin_test_results".to_string()
}

/// Complete configuration for one run. Loaded from an optional TOML file and
/// then overridden by CLI flags.
///
/// 一次运行的完整配置。从可选的 TOML 文件加载，随后由命令行标志覆盖。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Run the coverage pipeline instead of the plain test pipeline.
    /// 运行覆盖率流水线而不是普通测试流水线。
    #[serde(default)]
    pub coverage: bool,
    /// Rebuild each package with instrumentation flags before the coverage run.
    /// 在覆盖率运行之前使用插桩标志重新构建每个软件包。
    #[serde(default)]
    pub build_first: bool,
    /// Enable lcov branch coverage collection.
    /// 启用 lcov 分支覆盖率收集。
    #[serde(default)]
    pub branch_coverage: bool,
    /// Bounded wait for each external tool invocation, in seconds. A tool
    /// exceeding this is killed and surfaced as a resource error. `None`
    /// waits indefinitely.
    /// 每次外部工具调用的有界等待时间（秒）。超时的工具会被杀死并作为
    /// 资源错误上报。`None` 表示无限等待。
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Mirror the console table into this file (appending).
    /// 将控制台表格镜像写入（追加到）此文件。
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Write an HTML report to this path after the run.
    /// 运行结束后将 HTML 报告写入此路径。
    #[serde(default)]
    pub html: Option<PathBuf>,
    /// Write a JSON report to this path after the run.
    /// 运行结束后将 JSON 报告写入此路径。
    #[serde(default)]
    pub json: Option<PathBuf>,
    /// External tool names. / 外部工具名称。
    #[serde(default)]
    pub tools: ToolPaths,
}

impl RunnerConfig {
    /// Loads the configuration from a TOML file, or returns the defaults when
    /// no file is given.
    ///
    /// 从 TOML 文件加载配置；未指定文件时返回默认值。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: RunnerConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }
}
