//! # Command Execution Module / 命令执行模块
//!
//! External tool invocation: spawn, capture combined output, and enforce an
//! optional bounded wait with a hard kill on expiry. Spawn failures and
//! timeouts surface as errors with their cause, distinct from a tool that ran
//! and returned a nonzero code.
//!
//! 外部工具调用：派生进程、捕获合并输出，并施加可选的有界等待，超时后强制
//! 杀死进程。派生失败和超时会作为带有原因的错误上报，与工具正常运行但返回
//! 非零码的情况区分开。

use anyhow::{Context, Result, anyhow};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

/// Spawns a command and captures its stdout and stderr.
/// The output streams are read concurrently and combined into a single string.
///
/// # Arguments
/// * `cmd` - The `tokio::process::Command` to execute.
///
/// # Returns
/// A tuple containing:
/// - The `ExitStatus` of the process wrapped in an `io::Result`.
/// - The combined stdout and stderr as a `String`.
///
/// 派生一个命令，捕获其 stdout 和 stderr。
/// 输出流被并发读取并合并到一个字符串中。
///
/// # Arguments
/// * `cmd` - 要执行的 `tokio::process::Command`。
///
/// # Returns
/// 一个元组，包含：
/// - 进程的 `ExitStatus`（包装在 `io::Result` 中）。
/// - 合并的 stdout 和 stderr，为一个 `String`。
pub async fn spawn_and_capture(
    mut cmd: Command,
) -> (std::io::Result<std::process::ExitStatus>, String) {
    // Configure the command to capture stdout and stderr.
    // 配置命令以捕获 stdout 和 stderr。
    let mut child = match cmd
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            // If spawning fails, we return the error and an empty string for the output.
            // 如果派生失败，我们返回错误和空字符串作为输出。
            return (Err(e), String::new());
        }
    };

    let stdout = match child.stdout.take() {
        Some(stdout) => stdout,
        None => {
            return (
                Err(std::io::Error::other("Failed to capture stdout")),
                String::new(),
            );
        }
    };
    let stderr = match child.stderr.take() {
        Some(stderr) => stderr,
        None => {
            return (
                Err(std::io::Error::other("Failed to capture stderr")),
                String::new(),
            );
        }
    };

    // Use an Arc<Mutex<String>> to allow concurrent writes from stdout and stderr tasks.
    // 使用 Arc<Mutex<String>> 来允许多个任务（stdout 和 stderr）并发写入。
    let output = Arc::new(tokio::sync::Mutex::new(String::new()));

    // Spawn a task to read stdout line by line.
    // 派生一个任务来逐行读取 stdout。
    let stdout_output = Arc::clone(&output);
    let stdout_handle = tokio::spawn(async move {
        let reader = BufReader::new(stdout);
        let mut lines = reader.lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let mut output = stdout_output.lock().await;
            output.push_str(&line);
            output.push('\n');
        }
    });

    // Spawn a task to read stderr line by line.
    // 派生一个任务来逐行读取 stderr。
    let stderr_output = Arc::clone(&output);
    let stderr_handle = tokio::spawn(async move {
        let reader = BufReader::new(stderr);
        let mut lines = reader.lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let mut output = stderr_output.lock().await;
            output.push_str(&line);
            output.push('\n');
        }
    });

    // Wait for the process to exit.
    // 等待进程退出。
    let status = child.wait().await;

    // Wait for the reader tasks to complete to ensure all output is captured.
    // 等待读取任务完成，以确保所有输出都被捕获。
    if let Err(e) = stdout_handle.await {
        eprintln!("Failed to join stdout task: {}", e);
    }
    if let Err(e) = stderr_handle.await {
        eprintln!("Failed to join stderr task: {}", e);
    }

    (status, output.lock().await.clone())
}

/// Runs a command to completion under an optional bounded wait and returns
/// its return code together with the combined output.
///
/// The command is configured with `kill_on_drop`, so on timeout the child is
/// killed when the capture future is dropped. A spawn failure or a timeout is
/// an `Err` (a resource problem, not a test result); a process killed by a
/// signal has no code and is mapped to 1.
///
/// 在可选的有界等待下运行命令直至完成，返回其返回码和合并输出。
///
/// 命令配置了 `kill_on_drop`，因此超时后随着捕获 future 被丢弃，子进程会被
/// 杀死。派生失败或超时是 `Err`（资源问题，不是测试结果）；被信号杀死的
/// 进程没有返回码，映射为 1。
pub async fn run_and_capture(
    mut cmd: Command,
    timeout: Option<Duration>,
) -> Result<(i32, String)> {
    cmd.kill_on_drop(true);
    let description = format!("{:?}", cmd.as_std());

    let capture = spawn_and_capture(cmd);
    let (status_res, output) = match timeout {
        Some(duration) => tokio::time::timeout(duration, capture)
            .await
            .map_err(|_| anyhow!("Command timed out after {:?}: {}", duration, description))?,
        None => capture.await,
    };

    let status = status_res.with_context(|| format!("Failed to invoke {}", description))?;

    // Signal death carries no exit code; count it as a plain failure.
    // 被信号杀死的进程没有退出码；按普通失败计。
    Ok((status.code().unwrap_or(1), output))
}

/// Builds a command from a program, fixed leading arguments, and a
/// shell-style parameter string split with `shlex`.
///
/// 从程序名、固定的前导参数和用 `shlex` 切分的 shell 风格参数字符串构建命令。
pub fn command_with_params(program: &str, leading: &[&str], params: &str) -> Result<Command> {
    let parts = shlex::split(params)
        .ok_or_else(|| anyhow!("Failed to parse command parameters: {}", params))?;

    let mut cmd = Command::new(program);
    cmd.args(leading);
    cmd.args(parts);
    Ok(cmd)
}
