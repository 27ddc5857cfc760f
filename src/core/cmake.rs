//! # CMakeLists Classification Module / CMakeLists 分类模块
//!
//! Text-based classification of a package's `CMakeLists.txt`. No CMake AST is
//! built; the build-configuration language is an external concern and plain
//! marker scanning is sufficient for the two questions asked here: is this a
//! metapackage, and does it declare unit tests.
//!
//! 基于文本对软件包的 `CMakeLists.txt` 进行分类。不构建 CMake AST；
//! 构建配置语言是外部事务，对这里要回答的两个问题——是否为元软件包、
//! 是否声明了单元测试——简单的标记扫描已经足够。

/// Marker declaring a catkin metapackage. / 声明 catkin 元软件包的标记。
pub const METAPACKAGE_MARKER: &str = "catkin_metapackage";

/// Markers declaring a unit test target. / 声明单元测试目标的标记。
pub const TEST_MARKERS: [&str; 2] = ["catkin_add_gtest", "add_rostest_gtest"];

const COMMENT_MARKER: char = '#';

/// Whitespace tokenizer with comment-token suppression.
///
/// Comment handling is *line-oblivious*: a token that starts with `#` is
/// discarded, but the remainder of its line is not. `#catkin_add_gtest(...)`
/// is suppressed while `# catkin_add_gtest(...)` still yields the marker as
/// its own token. Deliberate, tested policy.
///
/// 带注释词元抑制的空白分词器。
///
/// 注释处理*不感知行*：以 `#` 开头的词元被丢弃，但其所在行的其余部分不会
/// 被丢弃。`#catkin_add_gtest(...)` 会被抑制，而 `# catkin_add_gtest(...)`
/// 仍会把标记作为独立词元产出。这是有意为之并经过测试的策略。
pub struct CMakeTokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
}

impl<'a> CMakeTokens<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
        }
    }
}

impl<'a> Iterator for CMakeTokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.next().map(|token| {
            if token.starts_with(COMMENT_MARKER) {
                ""
            } else {
                token
            }
        })
    }
}

/// Returns `true` if the CMakeLists text declares a metapackage.
///
/// Pure containment check over the whole text; comments are not stripped
/// here.
///
/// 如果 CMakeLists 文本声明了元软件包则返回 `true`。
///
/// 对整个文本做纯粹的包含检查；这里不剥离注释。
pub fn is_metapackage(cmake_text: &str) -> bool {
    cmake_text.contains(METAPACKAGE_MARKER)
}

/// Returns `true` if the CMakeLists text declares at least one test target.
///
/// Scans whitespace tokens with comment suppression; the first token
/// containing any of [`TEST_MARKERS`] short-circuits the scan.
///
/// 如果 CMakeLists 文本至少声明了一个测试目标则返回 `true`。
///
/// 在抑制注释的前提下扫描空白词元；第一个包含 [`TEST_MARKERS`] 之一的
/// 词元会使扫描短路。
pub fn has_tests(cmake_text: &str) -> bool {
    CMakeTokens::new(cmake_text).any(|token| TEST_MARKERS.iter().any(|m| token.contains(m)))
}
