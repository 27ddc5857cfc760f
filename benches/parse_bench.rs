use catkin_test_runner::core::cmake;
use catkin_test_runner::core::models::TestSummary;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_summary_from_line(c: &mut Criterion) {
    let line = "Summary: 42 tests, 1 errors, 2 failures, 3 skipped";

    c.bench_function("summary_from_line", |b| {
        b.iter(|| TestSummary::from_line(black_box(line)))
    });
}

fn bench_cmake_scan(c: &mut Criterion) {
    // A representative CMakeLists with the test marker near the end.
    let mut text = String::from("cmake_minimum_required(VERSION 3.0.2)\nproject(bench_pkg)\n");
    for i in 0..200 {
        text.push_str(&format!("add_library(lib{} src/lib{}.cpp)\n# comment {}\n", i, i, i));
    }
    text.push_str("catkin_add_gtest(${PROJECT_NAME}-test test/test_bench.cpp)\n");

    c.bench_function("cmake_has_tests", |b| b.iter(|| cmake::has_tests(black_box(&text))));
    c.bench_function("cmake_is_metapackage", |b| {
        b.iter(|| cmake::is_metapackage(black_box(&text)))
    });
}

criterion_group!(benches, bench_summary_from_line, bench_cmake_scan);
criterion_main!(benches);
