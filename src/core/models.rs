//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the test
//! runner. It includes the per-run test summary, the package descriptor and
//! the execution/coverage status enums.
//!
//! 此模块定义了整个测试运行器中使用的核心数据结构。
//! 它包括单次运行的测试摘要、软件包描述符以及执行/覆盖率状态枚举。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The counts reported by one test execution, parsed from the single
/// `"Summary: N tests, N errors, N failures, N skipped"` line emitted by
/// `catkin_test_results`.
///
/// The sentinel value `-1` in all four fields marks a line that could not be
/// parsed. The sentinel is atomic: a summary is either fully parsed or fully
/// unparsed, never a mix of real counts and placeholders.
///
/// 一次测试执行报告的计数，解析自 `catkin_test_results` 输出的单行
/// `"Summary: N tests, N errors, N failures, N skipped"`。
///
/// 四个字段全为 `-1` 的哨兵值表示该行无法解析。哨兵是原子的：
/// 摘要要么完全解析成功，要么完全未解析，绝不会出现真实计数与占位值混合。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSummary {
    /// Total number of tests executed / 执行的测试总数
    pub total: i32,
    /// Number of tests that errored / 出错的测试数
    pub errors: i32,
    /// Number of tests that failed / 失败的测试数
    pub failures: i32,
    /// Number of tests that were skipped / 被跳过的测试数
    pub skipped: i32,
}

impl TestSummary {
    /// The atomic parse-failure sentinel. Callers must treat these fields as
    /// "unknown", not "zero".
    ///
    /// 原子的解析失败哨兵。调用者必须将这些字段视为“未知”，而不是“零”。
    pub const UNPARSED: TestSummary = TestSummary {
        total: -1,
        errors: -1,
        failures: -1,
        skipped: -1,
    };

    pub fn new(total: i32, errors: i32, failures: i32, skipped: i32) -> Self {
        Self {
            total,
            errors,
            failures,
            skipped,
        }
    }

    /// Parses a summary line of the fixed shape
    /// `"Summary: 6 tests, 1 errors, 2 failures, 3 skipped"`.
    ///
    /// The line is split on commas into exactly four segments; the first
    /// whitespace-delimited token of each segment is taken as the numeric
    /// value and the surrounding label text is ignored. Leading/trailing
    /// whitespace and a leading literal `Summary:` prefix are tolerated.
    /// Any deviation (wrong segment count, non-numeric token) yields the
    /// [`TestSummary::UNPARSED`] sentinel: malformed tool output is an
    /// expected, recoverable condition here.
    ///
    /// 解析固定格式的摘要行
    /// `"Summary: 6 tests, 1 errors, 2 failures, 3 skipped"`。
    ///
    /// 该行按逗号切分为恰好四段；每段取第一个以空白分隔的词元作为数值，
    /// 忽略其余标签文本。容忍首尾空白以及行首的字面 `Summary:` 前缀。
    /// 任何偏差（段数不对、词元非数字）都会得到 [`TestSummary::UNPARSED`]
    /// 哨兵：工具输出格式异常在这里是预期内的可恢复情况。
    pub fn from_line(line: &str) -> Self {
        Self::parse(line).unwrap_or(Self::UNPARSED)
    }

    fn parse(line: &str) -> Option<Self> {
        let rest = line.trim();
        let rest = rest.strip_prefix("Summary:").unwrap_or(rest);

        let segments: Vec<&str> = rest.split(',').collect();
        if segments.len() != 4 {
            return None;
        }

        let mut counts = [0i32; 4];
        for (count, segment) in counts.iter_mut().zip(&segments) {
            *count = segment.split_whitespace().next()?.parse().ok()?;
        }

        Some(Self::new(counts[0], counts[1], counts[2], counts[3]))
    }

    /// Returns `true` if this summary is the parse-failure sentinel.
    /// 如果此摘要是解析失败哨兵，则返回 `true`。
    pub fn is_unparsed(&self) -> bool {
        *self == Self::UNPARSED
    }
}

impl Default for TestSummary {
    fn default() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

/// The outcome of a package's most recent execution attempt.
/// 软件包最近一次执行尝试的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// No external tool has been invoked for this package.
    /// 尚未为此软件包调用任何外部工具。
    #[default]
    NotRun,
    /// The test run finished with return code 0.
    /// 测试运行以返回码 0 结束。
    Executed,
    /// The test run finished with a nonzero return code.
    /// 测试运行以非零返回码结束。
    Failed,
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExecutionStatus::NotRun => "",
            ExecutionStatus::Executed => "executed",
            ExecutionStatus::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// The state of coverage collection for one package. Coverage is best-effort:
/// this status never feeds back into the pipeline's return code.
///
/// 单个软件包覆盖率收集的状态。覆盖率是尽力而为的：
/// 此状态绝不会反馈到流水线的返回码中。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoverageStatus {
    /// Coverage mode was not requested for this run.
    /// 本次运行未请求覆盖率模式。
    #[default]
    NotRequested,
    /// The full capture/merge/filter chain completed and a trace was produced.
    /// 完整的采集/合并/过滤链已完成并生成了跟踪文件。
    Collected,
    /// The test run failed before extraction, or an lcov stage failed, or the
    /// tool output carried no coverage figure.
    /// 测试运行在提取前失败，或某个 lcov 阶段失败，或工具输出中没有覆盖率数字。
    Incomplete,
}

/// One discoverable, independently testable unit within the source tree.
///
/// Identity comes from the `package.xml` manifest, classification from a
/// static scan of `CMakeLists.txt`. Both are computed once during discovery
/// and never recomputed. The result fields are mutated exactly once, by the
/// execution pipeline, and read-only afterwards for reporting.
///
/// 源码树中一个可发现的、可独立测试的单元。
///
/// 标识来自 `package.xml` 清单，分类来自对 `CMakeLists.txt` 的静态扫描。
/// 两者都在发现阶段计算一次，之后不再重新计算。结果字段只被执行流水线
/// 修改一次，之后对报告层只读。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    /// The declared package name, unique within a discovery run.
    /// 声明的软件包名称，在一次发现过程中唯一。
    pub name: String,
    /// The directory containing the package manifest.
    /// 包含软件包清单的目录。
    pub path: PathBuf,
    /// `true` if `CMakeLists.txt` declares a catkin metapackage.
    /// Metapackages aggregate others and are never executed.
    /// 如果 `CMakeLists.txt` 声明了 catkin 元软件包则为 `true`。
    /// 元软件包聚合其他软件包，绝不会被执行。
    pub is_metapackage: bool,
    /// `true` if `CMakeLists.txt` declares at least one gtest/rostest target.
    /// 如果 `CMakeLists.txt` 至少声明了一个 gtest/rostest 目标则为 `true`。
    pub has_tests: bool,
    /// Outcome of the most recent execution attempt.
    /// 最近一次执行尝试的结果。
    pub status: ExecutionStatus,
    /// Parsed counts from the most recent test run; fresh per attempt.
    /// 最近一次测试运行解析出的计数；每次尝试重新构造。
    pub summary: TestSummary,
    /// Aggregate line coverage in percent, `>= 0`.
    /// 聚合行覆盖率（百分比），`>= 0`。
    pub coverage: f64,
    /// State of coverage collection for this package.
    /// 此软件包覆盖率收集的状态。
    pub coverage_status: CoverageStatus,
    /// Combined captured stdout/stderr of the test run, or a fixed note for
    /// packages that are gated out of execution.
    /// 测试运行捕获的 stdout/stderr 合并文本，或对被跳过执行的软件包的固定说明。
    pub output: String,
}

impl Package {
    /// Creates a descriptor with a precomputed classification. Discovery is
    /// the only production caller; tests construct these directly.
    ///
    /// 使用预先计算的分类创建描述符。生产代码中只有发现阶段调用它；
    /// 测试代码会直接构造。
    pub fn new(name: String, path: PathBuf, is_metapackage: bool, has_tests: bool) -> Self {
        Self {
            name,
            path,
            is_metapackage,
            has_tests,
            status: ExecutionStatus::NotRun,
            summary: TestSummary::default(),
            coverage: 0.0,
            coverage_status: CoverageStatus::NotRequested,
            output: String::new(),
        }
    }

    /// Sets the execution status from an external tool's return code:
    /// 0 maps to `Executed`, anything else to `Failed`.
    ///
    /// 根据外部工具的返回码设置执行状态：
    /// 0 映射为 `Executed`，其他任何值映射为 `Failed`。
    pub fn set_execution_status(&mut self, return_code: i32) {
        self.status = if return_code == 0 {
            ExecutionStatus::Executed
        } else {
            ExecutionStatus::Failed
        };
    }
}
