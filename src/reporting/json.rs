//! # JSON Reporting Module / JSON 报告模块
//!
//! Machine-readable report: a timestamp plus the full package records,
//! serialized as pretty-printed JSON for downstream tooling.
//!
//! 机器可读的报告：时间戳加上完整的软件包记录，
//! 序列化为带缩进的 JSON 供下游工具使用。

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::models::Package;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    packages: &'a [Package],
}

/// Writes the full run result as pretty-printed JSON.
/// 将完整的运行结果写为带缩进的 JSON。
pub fn write_json_report(packages: &[Package], output_path: &Path) -> Result<()> {
    let report = JsonReport {
        generated_at: chrono::Local::now().to_rfc3339(),
        packages,
    };

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize JSON report")?;
    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report: {}", output_path.display()))?;
    Ok(())
}
