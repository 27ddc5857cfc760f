//! # Test Execution Pipeline Module / 测试执行流水线模块
//!
//! Runs one package through either the plain test path or the coverage path,
//! invoking the external catkin/lcov tools in a fixed sequence and populating
//! the descriptor's result fields. Metapackages and packages without tests
//! are gated out before any tool is invoked.
//!
//! 将一个软件包送入普通测试路径或覆盖率路径，按固定顺序调用外部的
//! catkin/lcov 工具，并填充描述符的结果字段。元软件包和没有测试的软件包
//! 在调用任何工具之前就被拦截。

use anyhow::{Context, Result};
use colored::*;
use std::time::Duration;
use tokio::process::Command;

use crate::core::config::RunnerConfig;
use crate::core::models::{CoverageStatus, Package, TestSummary};
use crate::infra::command::{command_with_params, run_and_capture};

/// Fixed note recorded for metapackages. / 为元软件包记录的固定说明。
pub const METAPACKAGE_NOTE: &str = "This is a metapackage";

/// Fixed note recorded for packages without tests.
/// 为没有测试的软件包记录的固定说明。
pub const NO_TESTS_NOTE: &str = "No tests defined on CMakeLists.txt";

/// Compiler/linker flags that instrument a build for gcov counters.
/// 为 gcov 计数器插桩构建所用的编译器/链接器标志。
const COVERAGE_CMAKE_ARGS: &str = "--cmake-args \
    -DCMAKE_CXX_FLAGS=\"-g -O0 -Wall -fprofile-arcs -ftest-coverage\" \
    -DCMAKE_EXE_LINKER_FLAGS=\"-fprofile-arcs -ftest-coverage\"";

/// Build-tool parameters for the plain "run tests for this unit" variant.
/// 构建工具在普通“运行该单元的测试”变体下的参数。
const PLAIN_TEST_ARGS: &str = "--no-deps --make-args -s -- --catkin-make-args run_tests --make-args tests";

/// Label preceding the aggregate line-coverage figure in lcov output.
/// lcov 输出中聚合行覆盖率数字之前的标签。
const LINES_LABEL: &str = "lines......: ";

/// Runs a package through the appropriate pipeline and returns the external
/// tool's return code. The two gate checks never invoke any tool: a
/// metapackage and a package without tests both report success with a fixed
/// note.
///
/// An `Err` means the build/test tool could not be driven at all (spawn
/// failure, timeout) and is distinct from a tool that ran and failed.
///
/// 将软件包送入相应的流水线并返回外部工具的返回码。两个拦截检查绝不调用
/// 任何工具：元软件包和没有测试的软件包都以固定说明报告成功。
///
/// `Err` 表示构建/测试工具根本无法被驱动（派生失败、超时），
/// 与工具正常运行但失败的情况不同。
pub async fn run_package(package: &mut Package, config: &RunnerConfig) -> Result<i32> {
    if package.is_metapackage {
        package.output = METAPACKAGE_NOTE.to_string();
        return Ok(0);
    }

    if !package.has_tests {
        package.output = NO_TESTS_NOTE.to_string();
        return Ok(0);
    }

    if config.coverage {
        run_with_coverage(package, config).await
    } else {
        run_plain(package, config).await
    }
}

/// Plain mode: run the unit's tests, fetch and parse the result summary, set
/// the execution status from the build tool's return code.
///
/// 普通模式：运行该单元的测试，获取并解析结果摘要，根据构建工具的返回码
/// 设置执行状态。
async fn run_plain(package: &mut Package, config: &RunnerConfig) -> Result<i32> {
    let cmd = command_with_params(
        &config.tools.catkin,
        &["build", &package.name],
        PLAIN_TEST_ARGS,
    )?;
    let (code, output) = run_and_capture(cmd, timeout(config))
        .await
        .with_context(|| format!("Test run did not complete for package {}", package.name))?;

    package.output = output;
    apply_summary(package, config).await;
    package.set_execution_status(code);

    Ok(code)
}

/// Coverage mode: baseline capture, instrumented test run, post-run capture,
/// merge, filter, percentage extraction. The returned code is the test run's
/// code; lcov stage failures after a green test run only downgrade the
/// coverage status.
///
/// 覆盖率模式：基线采集、插桩测试运行、运行后采集、合并、过滤、百分比提取。
/// 返回码是测试运行的返回码；测试运行成功后的 lcov 阶段失败只会降级覆盖率
/// 状态。
async fn run_with_coverage(package: &mut Package, config: &RunnerConfig) -> Result<i32> {
    if config.build_first {
        instrumented_build(package, config).await;
    }

    package.coverage_status = CoverageStatus::Incomplete;
    let rc = lcov_rc_flag(config);

    // Zero previous counters and capture the pre-run baseline.
    // 清零旧计数器并采集运行前基线。
    lcov_stage(
        package,
        config,
        &format!("{} --directory build --zerocounters", rc),
        "zerocounters",
    )
    .await;
    lcov_stage(
        package,
        config,
        &format!(
            "{} --capture --initial --directory build/{} --output-file build/lcov.base",
            rc, package.name
        ),
        "baseline capture",
    )
    .await;

    // Run tests against the instrumented build.
    // 针对插桩后的构建运行测试。
    let params = format!("--no-deps {}", COVERAGE_CMAKE_ARGS);
    let cmd = command_with_params(&config.tools.catkin, &["run_tests", &package.name], &params)?;
    let (code, output) = run_and_capture(cmd, timeout(config))
        .await
        .with_context(|| format!("Test run did not complete for package {}", package.name))?;

    package.output = output;
    apply_summary(package, config).await;
    package.set_execution_status(code);

    if code != 0 {
        // Coverage data from a failed or partial run is not meaningful.
        // 来自失败或不完整运行的覆盖率数据没有意义。
        return Ok(code);
    }

    // Capture post-run counters, add the baseline, and strip system, test and
    // build-artifact paths from the combined trace.
    // 采集运行后计数器，叠加基线，并从合并的跟踪文件中剔除系统、测试和
    // 构建产物路径。
    lcov_stage(
        package,
        config,
        &format!(
            "{} --no-checksum --directory build/{} --capture --output-file build/lcov.info",
            rc, package.name
        ),
        "capture",
    )
    .await;
    lcov_stage(
        package,
        config,
        &format!(
            "{} --add-tracefile build/lcov.base --add-tracefile build/lcov.info --output-file build/lcov.total",
            rc
        ),
        "merge",
    )
    .await;
    let filter_output = lcov_stage(
        package,
        config,
        &format!(
            "{} --remove build/lcov.total /usr* /opt* */test/* */CMakeFiles/* */build/* --output-file build/lcov.total.cleaned",
            rc
        ),
        "filter",
    )
    .await;

    if let Some(stdout) = filter_output {
        match extract_line_coverage(&stdout) {
            Some(percent) => {
                package.coverage = percent;
                package.coverage_status = CoverageStatus::Collected;
            }
            None => package.coverage = 0.0,
        }
    }

    Ok(0)
}

/// Rebuilds the package with instrumentation flags. A failure here is logged
/// but does not abort the pipeline; the test run that follows surfaces real
/// breakage.
///
/// 使用插桩标志重新构建软件包。此处的失败会被记录，但不会中止流水线；
/// 随后的测试运行会暴露真正的问题。
async fn instrumented_build(package: &Package, config: &RunnerConfig) {
    let stage = async {
        let cmd = command_with_params(
            &config.tools.catkin,
            &["build", &package.name],
            COVERAGE_CMAKE_ARGS,
        )?;
        run_and_capture(cmd, timeout(config)).await
    };

    match stage.await {
        Ok((0, _)) => {}
        Ok((code, _)) => eprintln!(
            "{}",
            format!(
                "Warning: instrumented build of {} exited with code {}",
                package.name, code
            )
            .yellow()
        ),
        Err(e) => eprintln!(
            "{} {:#}",
            format!("Warning: instrumented build of {} failed:", package.name).yellow(),
            e
        ),
    }
}

/// Runs one lcov stage. Any failure (bad parameters, spawn error, nonzero
/// exit) is reported as a warning and yields `None`; the pipeline's return
/// code is never affected by coverage tooling.
///
/// 运行一个 lcov 阶段。任何失败（参数错误、派生错误、非零退出）都会以警告
/// 形式报告并返回 `None`；流水线的返回码绝不受覆盖率工具影响。
async fn lcov_stage(
    package: &Package,
    config: &RunnerConfig,
    params: &str,
    stage: &str,
) -> Option<String> {
    let run = async {
        let cmd = command_with_params(&config.tools.lcov, &[], params)?;
        run_and_capture(cmd, timeout(config)).await
    };

    match run.await {
        Ok((0, output)) => Some(output),
        Ok((code, _)) => {
            eprintln!(
                "{}",
                format!(
                    "Warning: lcov {} exited with code {} for package {}",
                    stage, code, package.name
                )
                .yellow()
            );
            None
        }
        Err(e) => {
            eprintln!(
                "{} {:#}",
                format!("Warning: lcov {} failed for package {}:", stage, package.name).yellow(),
                e
            );
            None
        }
    }
}

/// Fetches the last output line of the summarization tool, scoped to this
/// unit's build output directory. An `Err` is a tool invocation problem and
/// is reported distinctly from a line that merely fails to parse.
///
/// 获取汇总工具的最后一行输出，作用域限定为该单元的构建输出目录。
/// `Err` 表示工具调用问题，与仅仅是解析失败的行区分报告。
async fn fetch_summary_line(config: &RunnerConfig, package_name: &str) -> Result<String> {
    let mut cmd = Command::new(&config.tools.test_results);
    cmd.arg(format!("build/{}", package_name));

    let (_code, output) = run_and_capture(cmd, timeout(config)).await?;
    // The tool exits nonzero when failures were recorded but still prints the
    // summary, so only missing output is an error here.
    // 工具在记录到失败时会以非零码退出，但仍会打印摘要，
    // 因此这里只有缺少输出才算错误。
    let line = output
        .trim()
        .lines()
        .next_back()
        .context("Summarization tool produced no output")?;
    Ok(line.to_string())
}

/// Fetches and parses the test summary into the descriptor. Tool invocation
/// failure yields the sentinel with a yellow diagnostic; an unparsable line
/// yields the sentinel silently, as malformed tool output is expected.
///
/// 获取并解析测试摘要写入描述符。工具调用失败会得到哨兵并打印黄色诊断；
/// 无法解析的行静默得到哨兵，因为工具输出格式异常是预期内的。
async fn apply_summary(package: &mut Package, config: &RunnerConfig) {
    match fetch_summary_line(config, &package.name).await {
        Ok(line) => package.summary = TestSummary::from_line(&line),
        Err(e) => {
            eprintln!(
                "{} {:#}",
                format!("Warning: could not fetch test summary for {}:", package.name).yellow(),
                e
            );
            package.summary = TestSummary::UNPARSED;
        }
    }
}

/// Extracts the aggregate line-coverage percentage from lcov's textual
/// output: the number between `"lines......: "` and `"%"`.
///
/// 从 lcov 的文本输出中提取聚合行覆盖率百分比：
/// 位于 `"lines......: "` 和 `"%"` 之间的数字。
pub fn extract_line_coverage(output: &str) -> Option<f64> {
    let rest = output.split(LINES_LABEL).nth(1)?;
    rest.split('%').next()?.trim().parse().ok()
}

fn lcov_rc_flag(config: &RunnerConfig) -> String {
    format!("--rc lcov_branch_coverage={}", config.branch_coverage as u8)
}

fn timeout(config: &RunnerConfig) -> Option<Duration> {
    config.timeout_secs.map(Duration::from_secs)
}
