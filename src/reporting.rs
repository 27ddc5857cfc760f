//! # Reporting Module / 报告模块
//!
//! This module handles the generation and display of test reports in multiple
//! formats: the fixed-width console table (optionally mirrored to a file), a
//! styled HTML report and a machine-readable JSON report.
//!
//! 此模块处理多种格式的测试报告生成和显示：定宽控制台表格（可选镜像到
//! 文件）、样式化 HTML 报告和机器可读的 JSON 报告。

pub mod console;
pub mod html;
pub mod json;

// Re-export common reporting entry points
pub use console::Reporter;
pub use html::generate_html_report;
pub use json::write_json_report;
