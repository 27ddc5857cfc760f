//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides small utilities for file system operations used by
//! the runner and the reporters.
//!
//! 此模块提供运行器和报告器使用的小型文件系统操作工具。

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Checks if a path exists and is a directory.
///
/// # Arguments
/// * `path` - Path to check
///
/// # Returns
/// `true` if the path exists and is a directory, `false` otherwise
pub fn is_directory(path: &Path) -> bool {
    path.exists() && path.is_dir()
}

/// Gets the absolute path from a potentially relative path.
///
/// # Arguments
/// * `path` - Path to canonicalize
///
/// # Returns
/// Canonicalized absolute path, or an error if the path doesn't exist
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}

/// Appends a line of text to a file, creating the file if needed.
///
/// # Arguments
/// * `path` - File to append to
/// * `line` - Text to append; a trailing newline is added
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open output file: {}", path.display()))?;
    writeln!(file, "{}", line)
        .with_context(|| format!("Failed to write to output file: {}", path.display()))?;
    Ok(())
}
