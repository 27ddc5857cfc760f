//! # HTML Reporting Module / HTML 报告模块
//!
//! This module handles the generation of HTML test reports.
//! It creates a styled, standalone HTML file with per-package statistics, a
//! detailed results table and collapsible captured output for failures.
//!
//! 此模块处理 HTML 测试报告的生成。
//! 它创建一个样式化的独立 HTML 文件，包含各软件包统计、详细结果表格以及
//! 可折叠的失败输出。

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::models::{CoverageStatus, ExecutionStatus, Package};

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = include_str!("assets/report.css");

/// Embedded JavaScript for HTML report interactivity / HTML 报告交互性的嵌入式 JavaScript
const HTML_SCRIPT: &str = include_str!("assets/report.js");

/// Generates a standalone HTML report for a finished run.
///
/// # Arguments / 参数
/// * `packages` - The discovered packages with their populated results
///                已发现的软件包及其填充完的结果
/// * `output_path` - The file path where the HTML report will be saved
///                   保存 HTML 报告的文件路径
pub fn generate_html_report(packages: &[Package], output_path: &Path) -> Result<()> {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html><html><head><title>Catkin Test Report</title>");
    html.push_str("<style>");
    html.push_str(HTML_STYLE);
    html.push_str("</style>");
    html.push_str("</head><body>");
    html.push_str("<h1>Catkin Test Report</h1>");

    // Summary statistics over the whole run.
    // 整次运行的汇总统计。
    let total = packages.len();
    let tested = packages.iter().filter(|p| p.has_tests).count();
    let failed = packages
        .iter()
        .filter(|p| p.status == ExecutionStatus::Failed)
        .count();
    let covered: Vec<f64> = packages
        .iter()
        .filter(|p| p.coverage_status == CoverageStatus::Collected)
        .map(|p| p.coverage)
        .collect();
    let mean_coverage = if covered.is_empty() {
        None
    } else {
        Some(covered.iter().sum::<f64>() / covered.len() as f64)
    };

    html.push_str("<div class='summary-container'>");
    html.push_str(&format!(
        "<div class='summary-item'><span class='count'>{}</span><span class='label'>Packages</span></div>",
        total
    ));
    html.push_str(&format!(
        "<div class='summary-item'><span class='count'>{}</span><span class='label'>With tests</span></div>",
        tested
    ));
    html.push_str(&format!(
        "<div class='summary-item'><span class='count failed-text'>{}</span><span class='label'>Failed</span></div>",
        failed
    ));
    if let Some(mean) = mean_coverage {
        html.push_str(&format!(
            "<div class='summary-item'><span class='count covered-text'>{:.1}%</span><span class='label'>Mean coverage</span></div>",
            mean
        ));
    }
    html.push_str("</div>");

    // Results table, one row per package.
    // 结果表格，每个软件包一行。
    html.push_str("<table><thead><tr>");
    for header in [
        "Package", "Metapkg", "Tests", "Status", "Total", "Errors", "Failures", "Skipped",
        "Coverage",
    ] {
        html.push_str(&format!("<th>{}</th>", header));
    }
    html.push_str("</tr></thead><tbody>");

    for (i, package) in packages.iter().enumerate() {
        let status_class = status_class(package.status);
        let status_str = package.status.to_string();

        let output_id = format!("output-{}", i);
        let output_details = if package.status == ExecutionStatus::Failed {
            format!(
                "<tr id='{}' style='display:none;'><td colspan='9'><pre class='output-content'>{}</pre></td></tr>",
                output_id,
                escape_html(&package.output)
            )
        } else {
            String::new()
        };
        let output_toggle = if package.status == ExecutionStatus::Failed {
            format!(
                "<div class='output-toggle' onclick=\"toggleOutput('{}')\">show output</div>",
                output_id
            )
        } else {
            String::new()
        };

        let coverage_cell = match package.coverage_status {
            CoverageStatus::NotRequested => String::new(),
            CoverageStatus::Collected => format!("{}%", package.coverage),
            CoverageStatus::Incomplete => "incomplete".to_string(),
        };

        html.push_str("<tr>");
        html.push_str(&format!("<td>{}</td>", escape_html(&package.name)));
        html.push_str(&format!("<td>{}</td>", package.is_metapackage));
        html.push_str(&format!("<td>{}</td>", package.has_tests));
        html.push_str(&format!(
            "<td class='status-col'><div class='status-cell {}'>{}</div>{}</td>",
            status_class, status_str, output_toggle
        ));
        html.push_str(&format!("<td>{}</td>", package.summary.total));
        html.push_str(&format!("<td>{}</td>", package.summary.errors));
        html.push_str(&format!("<td>{}</td>", package.summary.failures));
        html.push_str(&format!("<td>{}</td>", package.summary.skipped));
        html.push_str(&format!("<td>{}</td>", coverage_cell));
        html.push_str("</tr>");
        html.push_str(&output_details);
    }

    html.push_str("</tbody></table>");
    html.push_str(&format!(
        "<p class='timestamp'>Generated at {}</p>",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    html.push_str("<script>");
    html.push_str(HTML_SCRIPT);
    html.push_str("</script></body></html>");

    fs::write(output_path, html)
        .with_context(|| format!("Failed to write HTML report: {}", output_path.display()))?;
    Ok(())
}

fn status_class(status: ExecutionStatus) -> &'static str {
    match status {
        ExecutionStatus::Executed => "status-Executed",
        ExecutionStatus::Failed => "status-Failed",
        ExecutionStatus::NotRun => "status-NotRun",
    }
}

/// Simple HTML escape function to replace special characters with their HTML entities
/// 简单的 HTML 转义函数，用 HTML 实体替换特殊字符
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
