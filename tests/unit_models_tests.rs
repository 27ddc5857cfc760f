//! # Models Module Unit Tests / Models 模块单元测试
//!
//! Unit tests for the core data structures: the summary-line parser with its
//! atomic sentinel, and the package descriptor's status transitions.
//!
//! 核心数据结构的单元测试：带原子哨兵的摘要行解析器，
//! 以及软件包描述符的状态转换。

use catkin_test_runner::core::models::{
    CoverageStatus, ExecutionStatus, Package, TestSummary,
};
use std::path::PathBuf;

fn sample_package(name: &str) -> Package {
    Package::new(name.to_string(), PathBuf::from("/ws/src/pkg"), false, true)
}

#[cfg(test)]
mod test_summary_tests {
    use super::*;

    #[test]
    fn test_parses_well_formed_line() {
        let summary = TestSummary::from_line("Summary: 6 tests, 1 errors, 2 failures, 3 skipped");
        assert_eq!(summary, TestSummary::new(6, 1, 2, 3));
        assert!(!summary.is_unparsed());
    }

    #[test]
    fn test_parses_zero_counts() {
        let summary = TestSummary::from_line("Summary: 0 tests, 0 errors, 0 failures, 0 skipped");
        assert_eq!(summary, TestSummary::new(0, 0, 0, 0));
    }

    #[test]
    fn test_tolerates_surrounding_whitespace() {
        let summary =
            TestSummary::from_line("   Summary: 12 tests, 0 errors, 1 failures, 4 skipped   ");
        assert_eq!(summary, TestSummary::new(12, 0, 1, 4));
    }

    #[test]
    fn test_tolerates_missing_prefix() {
        let summary = TestSummary::from_line("6 tests, 1 errors, 2 failures, 3 skipped");
        assert_eq!(summary, TestSummary::new(6, 1, 2, 3));
    }

    #[test]
    fn test_too_few_segments_yields_sentinel() {
        let summary = TestSummary::from_line("Summary: 6 tests, 1 errors, 2 failures");
        assert_eq!(summary, TestSummary::UNPARSED);
    }

    #[test]
    fn test_too_many_segments_yields_sentinel() {
        let summary =
            TestSummary::from_line("Summary: 6 tests, 1 errors, 2 failures, 3 skipped, 4 extra");
        assert_eq!(summary, TestSummary::UNPARSED);
    }

    #[test]
    fn test_non_numeric_token_yields_sentinel() {
        let summary = TestSummary::from_line("Summary: six tests, 1 errors, 2 failures, 3 skipped");
        assert_eq!(summary, TestSummary::UNPARSED);
    }

    #[test]
    fn test_empty_line_yields_sentinel() {
        assert_eq!(TestSummary::from_line(""), TestSummary::UNPARSED);
        assert_eq!(TestSummary::from_line("None"), TestSummary::UNPARSED);
    }

    /// The parse-failure state is atomic: no mix of real counts and -1.
    /// 解析失败状态是原子的：真实计数与 -1 绝不混合。
    #[test]
    fn test_sentinel_is_atomic() {
        let summary = TestSummary::from_line("Summary: 6 tests, oops errors, 2 failures, 3 skipped");
        assert_eq!(summary.total, -1);
        assert_eq!(summary.errors, -1);
        assert_eq!(summary.failures, -1);
        assert_eq!(summary.skipped, -1);
        assert!(summary.is_unparsed());
    }

    #[test]
    fn test_default_is_all_zero() {
        assert_eq!(TestSummary::default(), TestSummary::new(0, 0, 0, 0));
    }
}

#[cfg(test)]
mod package_tests {
    use super::*;

    #[test]
    fn test_new_package_has_not_run_state() {
        let package = sample_package("fresh");
        assert_eq!(package.status, ExecutionStatus::NotRun);
        assert_eq!(package.coverage_status, CoverageStatus::NotRequested);
        assert_eq!(package.summary, TestSummary::default());
        assert_eq!(package.coverage, 0.0);
        assert!(package.output.is_empty());
    }

    #[test]
    fn test_zero_return_code_maps_to_executed() {
        let mut package = sample_package("green");
        package.set_execution_status(0);
        assert_eq!(package.status, ExecutionStatus::Executed);
    }

    #[test]
    fn test_nonzero_return_code_maps_to_failed() {
        let mut package = sample_package("red");
        package.set_execution_status(1);
        assert_eq!(package.status, ExecutionStatus::Failed);

        package.set_execution_status(137);
        assert_eq!(package.status, ExecutionStatus::Failed);
    }

    #[test]
    fn test_status_display_strings() {
        assert_eq!(ExecutionStatus::NotRun.to_string(), "");
        assert_eq!(ExecutionStatus::Executed.to_string(), "executed");
        assert_eq!(ExecutionStatus::Failed.to_string(), "failed");
    }
}
