//! # Console Reporting Module / 控制台报告模块
//!
//! The fixed-width tabular report: a header printed once, then one row per
//! tested package, written immediately after that package runs. The identical
//! plain-text table is appended to an optional output file; only the console
//! copy is colored.
//!
//! 定宽表格报告：表头打印一次，之后每个被测软件包一行，在该软件包运行结束
//! 后立即写出。完全相同的纯文本表格会追加到可选的输出文件；只有控制台副本
//! 带颜色。

use anyhow::Result;
use colored::*;
use std::path::PathBuf;

use crate::core::models::{ExecutionStatus, Package};
use crate::infra::fs::append_line;

const RULE_WIDTH: usize = 169;

/// Renders the summary table to the console and, when configured, mirrors it
/// into an output file. The output destination is a constructor argument;
/// nothing here reads global state.
///
/// 将摘要表格渲染到控制台，并在配置后镜像到输出文件。输出目标是构造函数
/// 参数；这里不读取任何全局状态。
pub struct Reporter {
    output: Option<PathBuf>,
}

impl Reporter {
    pub fn new(output: Option<PathBuf>) -> Self {
        Self { output }
    }

    /// Prints the table header between two double rules.
    /// 在两条双线之间打印表头。
    pub fn write_header(&self) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        let header = format_cells(&[
            "Package name".to_string(),
            "is metapkg?".to_string(),
            "has tests?".to_string(),
            "status".to_string(),
            "total".to_string(),
            "errors".to_string(),
            "failures".to_string(),
            "skipped".to_string(),
            "coverage".to_string(),
        ]);

        println!("{}", rule);
        println!("{}", header);
        println!("{}", rule);

        if let Some(path) = &self.output {
            append_line(path, &rule)?;
            append_line(path, &header)?;
            append_line(path, &rule)?;
        }
        Ok(())
    }

    /// Prints one package row. The status cell is padded before coloring so
    /// ANSI escapes do not break the column alignment.
    /// 打印一个软件包行。状态单元格在着色前先补齐宽度，
    /// 以免 ANSI 转义破坏列对齐。
    pub fn write_row(&self, package: &Package) -> Result<()> {
        let cells = [
            package.name.clone(),
            package.is_metapackage.to_string(),
            package.has_tests.to_string(),
            package.status.to_string(),
            package.summary.total.to_string(),
            package.summary.errors.to_string(),
            package.summary.failures.to_string(),
            package.summary.skipped.to_string(),
            format!("{}%", package.coverage),
        ];

        println!("{}", colored_row(&cells, package.status));

        if let Some(path) = &self.output {
            append_line(path, &format_cells(&cells))?;
        }
        Ok(())
    }
}

/// Prints a red list of the packages whose run failed, so identity is not
/// lost in the aggregate exit code.
/// 打印运行失败的软件包的红色列表，避免其身份淹没在聚合退出码中。
pub fn print_failing_packages(packages: &[Package]) {
    let failing: Vec<&Package> = packages
        .iter()
        .filter(|p| p.status == ExecutionStatus::Failed)
        .collect();

    if failing.is_empty() {
        return;
    }

    println!("\n{}", "Packages with failing tests:".red().bold());
    for package in failing {
        println!("  - {}", package.name.red());
    }
}

fn format_cells(cells: &[String; 9]) -> String {
    format!(
        "{:<40} \t {:<10} \t {:<10} \t {:<10} \t {:<10} \t {:<10} \t {:<10} \t {:<10} \t {:<10}",
        cells[0], cells[1], cells[2], cells[3], cells[4], cells[5], cells[6], cells[7], cells[8]
    )
}

fn colored_row(cells: &[String; 9], status: ExecutionStatus) -> String {
    let status_cell = format!("{:<10}", cells[3]);
    let status_cell = match status {
        ExecutionStatus::Executed => status_cell.green().to_string(),
        ExecutionStatus::Failed => status_cell.red().to_string(),
        ExecutionStatus::NotRun => status_cell,
    };

    format!(
        "{:<40} \t {:<10} \t {:<10} \t {} \t {:<10} \t {:<10} \t {:<10} \t {:<10} \t {:<10}",
        cells[0], cells[1], cells[2], status_cell, cells[4], cells[5], cells[6], cells[7], cells[8]
    )
}
